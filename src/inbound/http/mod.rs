//! Inbound HTTP adapter: handlers, session plumbing, and error mapping.

pub mod auth;
pub mod bars;
pub mod error;
pub mod health;
pub mod session;
pub mod state;
pub mod users;

#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
pub use health::HealthState;
pub use session::SessionContext;
pub use state::HttpState;
