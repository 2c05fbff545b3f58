//! Outbound adapters: PostgreSQL persistence and the external place
//! provider client.

pub mod persistence;
pub mod places;
