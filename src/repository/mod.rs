//! Data access traits and the sources implementing them.
//!
//! Routes and services only see the reader/writer traits. The concrete source
//! is chosen at startup: [`DieselRepository`] talks to SQLite,
//! [`fixture::FixtureRepository`] serves demo data with simulated latency.

use crate::crypto::TokenCipher;
use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::invite::InviteToken;
use crate::domain::manager::{Manager, NewManager};
use crate::domain::store::StoreProfile;
use crate::domain::types::{InviteCode, ManagerId, StoreId};
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod fixture;
pub mod invite;
pub mod manager;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod store;

/// Diesel-backed repository sharing a connection pool.
///
/// Marketplace tokens pass through `cipher` on their way in and out.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
    cipher: TokenCipher,
}

impl DieselRepository {
    pub fn new(pool: DbPool, cipher: TokenCipher) -> Self {
        Self { pool, cipher }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

pub trait ManagerReader {
    /// Managers of the store ordered by id.
    fn list_managers(&self, store_id: StoreId) -> RepositoryResult<Vec<Manager>>;
}

pub trait ManagerWriter {
    fn create_manager(&self, new_manager: &NewManager) -> RepositoryResult<Manager>;
    /// Removes the manager and returns the number of deleted rows.
    fn delete_manager(&self, store_id: StoreId, id: ManagerId) -> RepositoryResult<usize>;
}

pub trait StoreReader {
    /// Registered profile of the store, `None` when nothing was saved yet.
    fn get_store_profile(&self, store_id: StoreId) -> RepositoryResult<Option<StoreProfile>>;
}

pub trait StoreWriter {
    fn save_store_profile(&self, store_id: StoreId, profile: &StoreProfile)
    -> RepositoryResult<()>;
}

pub trait InviteReader {
    fn get_invite(&self, code: &InviteCode) -> RepositoryResult<Option<InviteToken>>;
}

pub trait InviteWriter {
    /// Issues an invite code for the store.
    fn issue_invite(&self, store_id: StoreId) -> RepositoryResult<InviteToken>;
    /// Registers the manager and marks the invite used.
    fn redeem_invite(
        &self,
        code: &InviteCode,
        new_manager: &NewManager,
    ) -> RepositoryResult<Manager>;
}

/// Everything the HTTP layer needs from a data source.
pub trait DashboardRepository:
    ManagerReader
    + ManagerWriter
    + StoreReader
    + StoreWriter
    + InviteReader
    + InviteWriter
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> DashboardRepository for T where
    T: ManagerReader
        + ManagerWriter
        + StoreReader
        + StoreWriter
        + InviteReader
        + InviteWriter
        + Clone
        + Send
        + Sync
        + 'static
{
}
