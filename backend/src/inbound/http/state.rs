//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on the
//! driving ports, so they can be tested without storage.

use std::sync::Arc;

use crate::domain::ports::{PostsCommand, PostsQuery};

/// Port handles used by the post handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Mutating post use-cases.
    pub posts: Arc<dyn PostsCommand>,
    /// Read-only post use-cases.
    pub posts_query: Arc<dyn PostsQuery>,
}

impl HttpState {
    /// Bundle the post command and query ports.
    pub fn new(posts: Arc<dyn PostsCommand>, posts_query: Arc<dyn PostsQuery>) -> Self {
        Self { posts, posts_query }
    }

    /// Build the state from one value implementing both ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: PostsCommand + PostsQuery + 'static,
    {
        Self {
            posts: service.clone(),
            posts_query: service,
        }
    }
}
