//! Database and configuration models used by the dashboard.

pub mod config;
pub mod invite;
pub mod manager;
pub mod store;
