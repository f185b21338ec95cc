//! Outbound adapters implementing the domain's driven ports.
//!
//! - [`memory`] keeps users and posts in process memory.
//! - [`persistence`] stores them in PostgreSQL through Diesel.

pub mod memory;
pub mod persistence;
