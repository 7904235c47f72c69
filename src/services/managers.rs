//! Services handling the manager roster.

use crate::domain::invite::InviteLink;
use crate::domain::types::{ManagerId, StoreId};
use crate::dto::managers::{RosterState, RosterView};
use crate::forms::managers::DeleteManagerForm;
use crate::repository::{InviteWriter, ManagerReader, ManagerWriter};
use crate::services::{FetchError, ServiceError, ServiceResult};

/// What happened to a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined the confirmation; nothing was touched.
    Cancelled,
}

/// Fetches the roster of the store.
pub fn fetch_roster<R>(repo: &R, store_id: StoreId, cap: usize) -> Result<RosterView, FetchError>
where
    R: ManagerReader + ?Sized,
{
    let managers = repo.list_managers(store_id).map_err(|err| {
        log::error!("Failed to fetch managers of store {store_id}: {err}");
        FetchError::from(err)
    })?;
    Ok(RosterView::new(&managers, cap))
}

/// Resolves the pending roster panel into its loaded or failed state.
pub fn load_roster<R>(repo: &R, store_id: StoreId, cap: usize) -> RosterState
where
    R: ManagerReader + ?Sized,
{
    let state = RosterState::from_fetch(fetch_roster(repo, store_id, cap));
    log::debug!("roster: loading -> {}", state.kind());
    state
}

/// Removes a manager once the user confirmed the deletion.
pub fn delete_manager<R>(
    repo: &R,
    store_id: StoreId,
    manager_id: i32,
    form: DeleteManagerForm,
) -> ServiceResult<DeleteOutcome>
where
    R: ManagerWriter + ?Sized,
{
    if !form.confirmed {
        return Ok(DeleteOutcome::Cancelled);
    }

    let manager_id = ManagerId::new(manager_id).map_err(|_| ServiceError::NotFound)?;

    match repo.delete_manager(store_id, manager_id)? {
        0 => Err(ServiceError::NotFound),
        _ => Ok(DeleteOutcome::Deleted),
    }
}

/// Creates an invite for the store and builds the shareable link.
pub fn issue_invite<R>(repo: &R, store_id: StoreId, public_url: &str) -> ServiceResult<InviteLink>
where
    R: InviteWriter + ?Sized,
{
    let token = repo.issue_invite(store_id).map_err(|err| {
        log::error!("Failed to issue invite for store {store_id}: {err}");
        err
    })?;
    Ok(InviteLink::new(public_url, token.code))
}

#[cfg(test)]
mod fixture_tests {
    use super::*;
    use crate::repository::fixture::{FixtureLatency, FixtureRepository};

    fn store_id() -> StoreId {
        StoreId::new(1).expect("valid store id")
    }

    fn repo() -> FixtureRepository {
        FixtureRepository::seeded(store_id(), FixtureLatency::none()).expect("fixture seeds")
    }

    fn names(state: &RosterState) -> Vec<String> {
        match state {
            RosterState::Loaded(view) => view.managers.iter().map(|m| m.name.clone()).collect(),
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn confirmed_delete_removes_exactly_one_manager() {
        let repo = repo();
        let outcome = delete_manager(&repo, store_id(), 1, DeleteManagerForm { confirmed: true })
            .expect("delete");
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(
            names(&load_roster(&repo, store_id(), 5)),
            vec!["Ольга Смирнова"]
        );
    }

    #[test]
    fn rejected_confirmation_keeps_roster() {
        let repo = repo();
        let before = load_roster(&repo, store_id(), 5);
        let outcome = delete_manager(&repo, store_id(), 1, DeleteManagerForm::default())
            .expect("cancel");
        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(load_roster(&repo, store_id(), 5), before);
    }

    #[test]
    fn deleting_unknown_id_reports_not_found() {
        let repo = repo();
        let result = delete_manager(&repo, store_id(), 42, DeleteManagerForm { confirmed: true });
        assert!(matches!(result, Err(ServiceError::NotFound)));
        assert_eq!(names(&load_roster(&repo, store_id(), 5)).len(), 2);
    }

    #[test]
    fn fixture_invite_link_is_static() {
        let link = issue_invite(&repo(), store_id(), "https://example.com").expect("invite");
        assert_eq!(link.url, "https://example.com/invite/abc123");
    }

    #[test]
    fn unavailable_source_yields_recoverable_failure() {
        let repo = repo();
        repo.set_unavailable(true).expect("toggle");
        match load_roster(&repo, store_id(), 5) {
            RosterState::Failed(err) => assert!(err.is_recoverable()),
            other => panic!("unexpected state {other:?}"),
        }
    }
}
