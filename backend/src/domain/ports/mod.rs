//! Domain ports at the edges of the hexagon.
//!
//! Driven ports (`*Repository`) describe what the domain needs from storage;
//! each exposes a typed error so adapters map their failures into predictable
//! variants. Driving ports (`PostsQuery`, `PostsCommand`) are the use-cases
//! inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod post_repository;
mod posts_command;
mod posts_query;
mod user_repository;

#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostRepository, PostRepositoryError};
#[cfg(test)]
pub use posts_command::MockPostsCommand;
pub use posts_command::PostsCommand;
#[cfg(test)]
pub use posts_query::MockPostsQuery;
pub use posts_query::PostsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
