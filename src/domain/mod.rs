//! Domain aggregates exposed by the dashboard service layer.

pub mod handover;
pub mod invite;
pub mod manager;
pub mod message;
pub mod section;
pub mod store;
pub mod types;
