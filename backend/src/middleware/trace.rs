//! Request tracing middleware.
//!
//! Every request runs inside a [`TraceId`] scope. A client that sends a
//! well-formed UUID in the `trace-id` header keeps it; otherwise a fresh one is
//! generated. The identifier is echoed on the response and each request is
//! logged once on completion with its method, path, status and latency.

use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{info, warn};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware factory. Handlers read the identifier via [`TraceId::current`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use blog_backend::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TracedService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TracedService { inner: service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TracedService<S> {
    inner: S,
}

/// Reuse the caller's trace identifier when it parses as a UUID.
fn incoming_trace_id(headers: &HeaderMap) -> TraceId {
    headers
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or_else(TraceId::generate)
}

fn stamp_trace_header<B>(res: &mut ServiceResponse<B>, trace_id: TraceId) {
    match HeaderValue::try_from(trace_id.to_string()) {
        Ok(value) => {
            res.headers_mut()
                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
        Err(error) => warn!(%error, %trace_id, "trace id is not a valid header value"),
    }
}

struct RequestLine {
    method: String,
    path: String,
    started: Instant,
}

impl RequestLine {
    fn of(req: &ServiceRequest) -> Self {
        Self {
            method: req.method().to_string(),
            path: req.path().to_owned(),
            started: Instant::now(),
        }
    }

    fn finish(&self, status: StatusCode) {
        let latency: Duration = self.started.elapsed();
        if status.is_server_error() {
            warn!(
                method = %self.method,
                path = %self.path,
                status = status.as_u16(),
                ?latency,
                "request failed"
            );
        } else {
            info!(
                method = %self.method,
                path = %self.path,
                status = status.as_u16(),
                ?latency,
                "request completed"
            );
        }
    }
}

impl<S, B> Service<ServiceRequest> for TracedService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = incoming_trace_id(req.headers());
        let line = RequestLine::of(&req);
        let pending = self.inner.call(req);

        Box::pin(TraceId::scope(trace_id, async move {
            match pending.await {
                Ok(mut res) => {
                    stamp_trace_header(&mut res, trace_id);
                    line.finish(res.status());
                    Ok(res)
                }
                Err(error) => {
                    line.finish(error.as_response_error().status_code());
                    Err(error)
                }
            }
        }))
    }
}
