//! Workflows behind the dashboard routes.
//!
//! Services are plain functions generic over the repository traits so they
//! can run against the database, the fixture source or a mock.

pub mod errors;
pub mod invites;
pub mod managers;
pub mod store;

pub use errors::{FetchError, ServiceError, ServiceResult, SubmitError};
