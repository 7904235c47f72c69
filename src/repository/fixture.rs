//! In-memory demo source with simulated network latency.
//!
//! Every call blocks the calling thread for the configured delay, so it must
//! run on a blocking pool (`web::block`) when used from a handler.

use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use chrono::Utc;

use crate::domain::invite::InviteToken;
use crate::domain::manager::{Manager, ManagerRole, NewManager};
use crate::domain::store::StoreProfile;
use crate::domain::types::{
    InviteCode, ManagerEmail, ManagerId, ManagerName, MarketplaceToken, StoreDescription,
    StoreId, StoreName,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    InviteReader, InviteWriter, ManagerReader, ManagerWriter, StoreReader, StoreWriter,
};

/// Code handed out by every fixture invite.
pub const STATIC_INVITE_CODE: &str = "abc123";

/// Delays applied to the three simulated fetches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixtureLatency {
    pub managers: Duration,
    pub profile: Duration,
    pub submit: Duration,
}

impl FixtureLatency {
    pub fn from_millis(managers: u64, profile: u64, submit: u64) -> Self {
        Self {
            managers: Duration::from_millis(managers),
            profile: Duration::from_millis(profile),
            submit: Duration::from_millis(submit),
        }
    }

    /// No delay at all.
    pub fn none() -> Self {
        Self::default()
    }
}

#[derive(Debug)]
struct FixtureState {
    managers: Vec<Manager>,
    next_id: i32,
    profile: Option<StoreProfile>,
    unavailable: bool,
}

/// Demo data source serving the sample roster and store profile.
#[derive(Clone, Debug)]
pub struct FixtureRepository {
    store_id: StoreId,
    latency: FixtureLatency,
    state: Arc<Mutex<FixtureState>>,
}

impl FixtureRepository {
    /// Source seeded with the two sample managers and the sample profile.
    pub fn seeded(store_id: StoreId, latency: FixtureLatency) -> RepositoryResult<Self> {
        let managers = vec![
            sample_manager(1, store_id, "Иван Петров", "ivan@example.com")?,
            sample_manager(2, store_id, "Ольга Смирнова", "olga@example.com")?,
        ];
        Ok(Self::with_data(
            store_id,
            latency,
            managers,
            Some(sample_profile()?),
        ))
    }

    /// Source with no managers and no registered store.
    pub fn empty(store_id: StoreId, latency: FixtureLatency) -> Self {
        Self::with_data(store_id, latency, Vec::new(), None)
    }

    pub fn with_data(
        store_id: StoreId,
        latency: FixtureLatency,
        managers: Vec<Manager>,
        profile: Option<StoreProfile>,
    ) -> Self {
        let next_id = managers.iter().map(|m| m.id.get()).max().unwrap_or(0) + 1;
        Self {
            store_id,
            latency,
            state: Arc::new(Mutex::new(FixtureState {
                managers,
                next_id,
                profile,
                unavailable: false,
            })),
        }
    }

    /// Makes every following call fail as if the source were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) -> RepositoryResult<()> {
        self.lock()?.unavailable = unavailable;
        Ok(())
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, FixtureState>> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unexpected("fixture state poisoned".to_string()))
    }

    /// Sleeps for `delay` and returns the state unless the source is down.
    fn reach(&self, delay: Duration) -> RepositoryResult<MutexGuard<'_, FixtureState>> {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        let state = self.lock()?;
        if state.unavailable {
            return Err(RepositoryError::Unavailable(
                "fixture source switched off".to_string(),
            ));
        }
        Ok(state)
    }

    fn insert_manager(
        state: &mut FixtureState,
        new_manager: &NewManager,
    ) -> RepositoryResult<Manager> {
        let duplicate = state
            .managers
            .iter()
            .any(|m| m.store_id == new_manager.store_id && m.email == new_manager.email);
        if duplicate {
            return Err(RepositoryError::ConstraintViolation(format!(
                "manager {} already exists",
                new_manager.email
            )));
        }

        let manager = Manager {
            id: ManagerId::new(state.next_id)?,
            store_id: new_manager.store_id,
            name: new_manager.name.clone(),
            email: new_manager.email.clone(),
            role: new_manager.role,
        };
        state.next_id += 1;
        state.managers.push(manager.clone());
        Ok(manager)
    }

    fn static_invite(&self) -> RepositoryResult<InviteToken> {
        Ok(InviteToken::new(
            InviteCode::new(STATIC_INVITE_CODE)?,
            self.store_id,
            Utc::now().naive_utc(),
        ))
    }
}

fn sample_manager(id: i32, store_id: StoreId, name: &str, email: &str) -> RepositoryResult<Manager> {
    Ok(Manager {
        id: ManagerId::new(id)?,
        store_id,
        name: ManagerName::new(name)?,
        email: ManagerEmail::new(email)?,
        role: ManagerRole::Manager,
    })
}

fn sample_profile() -> RepositoryResult<StoreProfile> {
    Ok(StoreProfile::new(
        StoreName::new("ООО Ромашка")?,
        StoreDescription::new("Магазин товаров для дома"),
        Some(MarketplaceToken::new("sample-ozon-token")?),
        Some(MarketplaceToken::new("sample-wb-token")?),
    ))
}

impl ManagerReader for FixtureRepository {
    fn list_managers(&self, store_id: StoreId) -> RepositoryResult<Vec<Manager>> {
        let state = self.reach(self.latency.managers)?;
        Ok(state
            .managers
            .iter()
            .filter(|m| m.store_id == store_id)
            .cloned()
            .collect())
    }
}

impl ManagerWriter for FixtureRepository {
    fn create_manager(&self, new_manager: &NewManager) -> RepositoryResult<Manager> {
        let mut state = self.reach(Duration::ZERO)?;
        Self::insert_manager(&mut state, new_manager)
    }

    fn delete_manager(&self, store_id: StoreId, id: ManagerId) -> RepositoryResult<usize> {
        let mut state = self.reach(Duration::ZERO)?;
        let before = state.managers.len();
        state
            .managers
            .retain(|m| !(m.id == id && m.store_id == store_id));
        Ok(before - state.managers.len())
    }
}

impl StoreReader for FixtureRepository {
    fn get_store_profile(&self, store_id: StoreId) -> RepositoryResult<Option<StoreProfile>> {
        let state = self.reach(self.latency.profile)?;
        if store_id != self.store_id {
            return Ok(None);
        }
        Ok(state.profile.clone())
    }
}

impl StoreWriter for FixtureRepository {
    /// Accepts the profile after the submit delay without storing it.
    fn save_store_profile(
        &self,
        store_id: StoreId,
        profile: &StoreProfile,
    ) -> RepositoryResult<()> {
        let _state = self.reach(self.latency.submit)?;
        let (ozon, wb) = profile.token_previews();
        log::info!(
            "Fixture accepted store {store_id} profile \"{}\" (ozon: {ozon}, wb: {wb})",
            profile.store_name
        );
        Ok(())
    }
}

impl InviteReader for FixtureRepository {
    fn get_invite(&self, code: &InviteCode) -> RepositoryResult<Option<InviteToken>> {
        let _state = self.reach(Duration::ZERO)?;
        if code.as_str() == STATIC_INVITE_CODE {
            Ok(Some(self.static_invite()?))
        } else {
            Ok(None)
        }
    }
}

impl InviteWriter for FixtureRepository {
    fn issue_invite(&self, _store_id: StoreId) -> RepositoryResult<InviteToken> {
        let _state = self.reach(Duration::ZERO)?;
        self.static_invite()
    }

    /// The static code never gets used up.
    fn redeem_invite(
        &self,
        code: &InviteCode,
        new_manager: &NewManager,
    ) -> RepositoryResult<Manager> {
        let mut state = self.reach(Duration::ZERO)?;
        if code.as_str() != STATIC_INVITE_CODE {
            return Err(RepositoryError::NotFound);
        }
        Self::insert_manager(&mut state, new_manager)
    }
}
