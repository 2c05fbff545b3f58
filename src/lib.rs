//! Backend library for the kavamap kava-bar discovery and check-in app.
//!
//! The crate follows a hexagonal layout: `domain` holds entities, services,
//! and ports; `inbound` adapts HTTP requests onto the domain; `outbound`
//! implements the ports against PostgreSQL and the external places provider.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

#[cfg(test)]
pub(crate) mod test_support;

/// Request-scoped tracing middleware re-exported for server wiring.
pub use middleware::trace::Trace;
