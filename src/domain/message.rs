use serde::Serialize;

pub const REGISTRATION_SUCCEEDED: &str = "Магазин успешно зарегистрирован!";
pub const REGISTRATION_FAILED: &str = "Ошибка при регистрации.";

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Success,
    Error,
}

/// Outcome line shown under the store form after a submit attempt.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SubmissionMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl SubmissionMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    pub fn registered() -> Self {
        Self::success(REGISTRATION_SUCCEEDED)
    }

    pub fn registration_failed() -> Self {
        Self::error(REGISTRATION_FAILED)
    }

    pub fn is_success(&self) -> bool {
        self.kind == MessageKind::Success
    }
}
