//! View state of the store registration form.

use serde::Serialize;

use crate::domain::handover::HandoverOptions;
use crate::domain::message::SubmissionMessage;
use crate::domain::store::StoreProfile;
use crate::domain::types::MarketplaceToken;
use crate::services::errors::{FetchError, SubmitError};

/// Raw values of the four text inputs.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct StoreFormFields {
    pub store_name: String,
    pub description: String,
    pub ozon_token: String,
    pub wb_token: String,
}

impl StoreFormFields {
    /// Populates the inputs from a fetched profile, empty when none exists.
    pub fn from_profile(profile: Option<&StoreProfile>) -> Self {
        let Some(profile) = profile else {
            return Self::default();
        };
        let token = |token: &Option<MarketplaceToken>| {
            token
                .as_ref()
                .map(|t| t.as_str().to_string())
                .unwrap_or_default()
        };
        Self {
            store_name: profile.store_name.as_str().to_string(),
            description: profile.description.as_str().to_string(),
            ozon_token: token(&profile.ozon_token),
            wb_token: token(&profile.wb_token),
        }
    }
}

/// Checkbox line of the handover block.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct HandoverRow {
    pub key: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreFormView {
    pub fields: StoreFormFields,
    pub handover: HandoverOptions,
    pub message: Option<SubmissionMessage>,
}

impl StoreFormView {
    pub fn new(fields: StoreFormFields, handover: HandoverOptions) -> Self {
        Self {
            fields,
            handover,
            message: None,
        }
    }

    pub fn handover_rows(&self) -> Vec<HandoverRow> {
        self.handover
            .iter()
            .map(|(option, checked)| HandoverRow {
                key: option.key(),
                label: option.label(),
                checked,
            })
            .collect()
    }
}

/// Lifecycle of the store form panel.
///
/// `Loading -> Ready -> Submitting -> Ready`, or `Loading -> Failed`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreFormState {
    Loading,
    Ready(StoreFormView),
    Submitting(StoreFormView),
    Failed(FetchError),
}

/// Serializable snapshot of [`StoreFormState`] handed to templates.
#[derive(Debug, Serialize)]
pub struct StoreFormFragment {
    pub kind: &'static str,
    pub fields: StoreFormFields,
    pub handover: Vec<HandoverRow>,
    pub message: Option<SubmissionMessage>,
    pub submitting: bool,
    pub error: Option<String>,
    pub retryable: bool,
}

impl StoreFormState {
    /// Result of the profile fetch. Toggles always start at the default
    /// pattern because the profile carries no handover data.
    pub fn loaded(result: Result<StoreFormFields, FetchError>) -> Self {
        match result {
            Ok(fields) => {
                StoreFormState::Ready(StoreFormView::new(fields, HandoverOptions::default()))
            }
            Err(err) => StoreFormState::Failed(err),
        }
    }

    /// Moves a ready form into the submitting state.
    pub fn begin_submit(self) -> Self {
        match self {
            StoreFormState::Ready(view) => {
                log::debug!("store form: ready -> submitting");
                StoreFormState::Submitting(view)
            }
            other => {
                log::warn!("store form: submit ignored in {} state", other.kind());
                other
            }
        }
    }

    /// Leaves the submitting state with a fresh outcome message.
    pub fn finish_submit(self, outcome: Result<(), SubmitError>) -> Self {
        match self {
            StoreFormState::Submitting(mut view) => {
                let message = match outcome {
                    Ok(()) => SubmissionMessage::registered(),
                    Err(SubmitError::Invalid(reason)) => {
                        SubmissionMessage::error(format!("Ошибка при регистрации: {reason}"))
                    }
                    Err(_) => SubmissionMessage::registration_failed(),
                };
                log::debug!("store form: submitting -> ready ({:?})", message.kind);
                view.message = Some(message);
                StoreFormState::Ready(view)
            }
            other => {
                log::warn!("store form: no submission in flight in {} state", other.kind());
                other
            }
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, StoreFormState::Submitting(_))
    }

    pub fn message(&self) -> Option<&SubmissionMessage> {
        match self {
            StoreFormState::Ready(view) | StoreFormState::Submitting(view) => {
                view.message.as_ref()
            }
            _ => None,
        }
    }

    pub fn view(&self) -> Option<&StoreFormView> {
        match self {
            StoreFormState::Ready(view) | StoreFormState::Submitting(view) => Some(view),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            StoreFormState::Loading => "loading",
            StoreFormState::Ready(_) => "ready",
            StoreFormState::Submitting(_) => "submitting",
            StoreFormState::Failed(_) => "failed",
        }
    }

    pub fn fragment(&self) -> StoreFormFragment {
        let (fields, handover) = match self.view() {
            Some(view) => (view.fields.clone(), view.handover_rows()),
            None => (StoreFormFields::default(), Vec::new()),
        };
        let (error, retryable) = match self {
            StoreFormState::Failed(err) => (Some(err.to_string()), err.is_recoverable()),
            _ => (None, false),
        };
        StoreFormFragment {
            kind: self.kind(),
            fields,
            handover,
            message: self.message().cloned(),
            submitting: self.is_submitting(),
            error,
            retryable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::handover::HandoverOption;
    use crate::domain::message::REGISTRATION_SUCCEEDED;
    use crate::domain::types::{StoreDescription, StoreName};

    fn ready() -> StoreFormState {
        StoreFormState::loaded(Ok(StoreFormFields::default()))
    }

    #[test]
    fn missing_profile_yields_empty_fields_and_default_toggles() {
        let state = ready();
        let view = state.view().expect("ready view");
        assert_eq!(view.fields, StoreFormFields::default());
        assert_eq!(view.handover, HandoverOptions::default());
    }

    #[test]
    fn fetched_profile_populates_fields() {
        let profile = StoreProfile::new(
            StoreName::new("ООО Ромашка").expect("valid name"),
            StoreDescription::new("Магазин товаров для дома"),
            None,
            MarketplaceToken::parse_optional("sample-wb-token").expect("valid token"),
        );
        let fields = StoreFormFields::from_profile(Some(&profile));
        let fragment = StoreFormState::loaded(Ok(fields)).fragment();
        assert_eq!(fragment.fields.store_name, "ООО Ромашка");
        assert_eq!(fragment.fields.ozon_token, "");
        assert_eq!(fragment.fields.wb_token, "sample-wb-token");
        assert_eq!(fragment.handover.len(), HandoverOption::ALL.len());
    }

    #[test]
    fn submit_cycle_passes_through_submitting() {
        let submitting = ready().begin_submit();
        assert!(submitting.is_submitting());
        assert!(submitting.fragment().submitting);

        let done = submitting.finish_submit(Ok(()));
        assert_eq!(done.kind(), "ready");
        assert_eq!(
            done.message().map(|m| m.text.as_str()),
            Some(REGISTRATION_SUCCEEDED)
        );
    }

    #[test]
    fn next_submission_replaces_previous_message() {
        let first = ready().begin_submit().finish_submit(Ok(()));
        let second = first
            .begin_submit()
            .finish_submit(Err(SubmitError::Unavailable("down".into())));
        let message = second.message().expect("message present");
        assert!(!message.is_success());
        assert_eq!(message.text, "Ошибка при регистрации.");
    }

    #[test]
    fn finishing_without_submit_changes_nothing() {
        let state = ready();
        assert_eq!(state.clone().finish_submit(Ok(())), state);

        let failed = StoreFormState::Failed(FetchError::Unavailable("down".into()));
        assert_eq!(failed.clone().begin_submit(), failed);
    }
}
