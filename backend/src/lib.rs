//! Blog backend library.
//!
//! Hexagonal layout: [`domain`] holds entities, ports and the post service;
//! [`inbound`] adapts HTTP requests onto the driving ports; [`outbound`]
//! implements the storage ports in memory and on PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
