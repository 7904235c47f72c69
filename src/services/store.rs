//! Services backing the store registration form.

use crate::domain::types::StoreId;
use crate::dto::store::{StoreFormFields, StoreFormState, StoreFormView};
use crate::forms::store::{StoreRegistrationForm, StoreRegistrationPayload};
use crate::repository::{StoreReader, StoreWriter};
use crate::services::{FetchError, SubmitError};

/// Fetches the registered profile as raw input values.
pub fn fetch_store_fields<R>(repo: &R, store_id: StoreId) -> Result<StoreFormFields, FetchError>
where
    R: StoreReader + ?Sized,
{
    let profile = repo.get_store_profile(store_id).map_err(|err| {
        log::error!("Failed to fetch profile of store {store_id}: {err}");
        FetchError::from(err)
    })?;
    Ok(StoreFormFields::from_profile(profile.as_ref()))
}

/// Resolves the pending form panel into its ready or failed state.
pub fn load_store_form<R>(repo: &R, store_id: StoreId) -> StoreFormState
where
    R: StoreReader + ?Sized,
{
    let state = StoreFormState::loaded(fetch_store_fields(repo, store_id));
    log::debug!("store form: loading -> {}", state.kind());
    state
}

/// Submits the form and returns the ready form carrying the outcome message.
///
/// The posted toggles are echoed back but not persisted.
pub fn submit_store_form<R>(
    repo: &R,
    store_id: StoreId,
    form: StoreRegistrationForm,
) -> StoreFormState
where
    R: StoreWriter + ?Sized,
{
    let submitting =
        StoreFormState::Ready(StoreFormView::new(form.fields(), form.handover())).begin_submit();

    let outcome = match StoreRegistrationPayload::try_from(form) {
        Ok(payload) => {
            let (ozon, wb) = payload.profile.token_previews();
            log::info!(
                "Registering store {store_id} \"{}\" (ozon: {ozon}, wb: {wb})",
                payload.profile.store_name
            );
            repo.save_store_profile(store_id, &payload.profile)
                .map_err(|err| {
                    log::error!("Failed to save profile of store {store_id}: {err}");
                    SubmitError::from(err)
                })
        }
        Err(err) => {
            log::warn!("Rejected store form: {err}");
            Err(SubmitError::Invalid(err.hint().to_string()))
        }
    };

    submitting.finish_submit(outcome)
}
