//! View state of the manager roster.

use serde::Serialize;

use crate::domain::manager::Manager;
use crate::services::errors::FetchError;

/// One roster line as rendered by the templates and the JSON API.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ManagerRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub initial: String,
    pub avatar_color: &'static str,
}

impl From<&Manager> for ManagerRow {
    fn from(manager: &Manager) -> Self {
        Self {
            id: manager.id.get(),
            name: manager.name.as_str().to_string(),
            email: manager.email.as_str().to_string(),
            role: manager.role.label().to_string(),
            initial: manager.initial().to_string(),
            avatar_color: manager.avatar_color(),
        }
    }
}

/// Loaded roster together with the display-only cap.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct RosterView {
    pub managers: Vec<ManagerRow>,
    pub cap: usize,
}

impl RosterView {
    pub fn new(managers: &[Manager], cap: usize) -> Self {
        Self {
            managers: managers.iter().map(ManagerRow::from).collect(),
            cap,
        }
    }

    pub fn count(&self) -> usize {
        self.managers.len()
    }

    /// Badge text such as `2 из 5`. The cap is never enforced.
    pub fn badge(&self) -> String {
        format!("{} из {}", self.count(), self.cap)
    }
}

/// Lifecycle of the roster panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RosterState {
    Loading,
    Loaded(RosterView),
    Failed(FetchError),
}

/// Serializable snapshot of [`RosterState`] handed to templates.
#[derive(Debug, Serialize)]
pub struct RosterFragment {
    pub kind: &'static str,
    pub managers: Vec<ManagerRow>,
    pub badge: String,
    pub error: Option<String>,
    pub retryable: bool,
}

impl RosterState {
    pub fn from_fetch(result: Result<RosterView, FetchError>) -> Self {
        match result {
            Ok(view) => RosterState::Loaded(view),
            Err(err) => RosterState::Failed(err),
        }
    }

    /// Template discriminator. An empty loaded roster is its own kind.
    pub fn kind(&self) -> &'static str {
        match self {
            RosterState::Loading => "loading",
            RosterState::Loaded(view) if view.managers.is_empty() => "empty",
            RosterState::Loaded(_) => "loaded",
            RosterState::Failed(_) => "failed",
        }
    }

    pub fn fragment(&self) -> RosterFragment {
        let (managers, badge) = match self {
            RosterState::Loaded(view) => (view.managers.clone(), view.badge()),
            _ => (Vec::new(), String::new()),
        };
        let (error, retryable) = match self {
            RosterState::Failed(err) => (Some(err.to_string()), err.is_recoverable()),
            _ => (None, false),
        };
        RosterFragment {
            kind: self.kind(),
            managers,
            badge,
            error,
            retryable,
        }
    }
}
