//! Cross-cutting actix middleware.

pub mod trace;
