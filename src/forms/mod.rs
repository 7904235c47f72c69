//! Form definitions backing the dashboard routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod invites;
pub mod managers;
pub mod store;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid store name")]
    InvalidStoreName,

    #[error("invalid marketplace token")]
    InvalidToken,
}

impl FormError {
    /// Short Russian hint shown to the user next to the form.
    pub fn hint(&self) -> &'static str {
        match self {
            FormError::Validation(errors) => {
                let fields = errors.field_errors();
                if fields.contains_key("store_name") {
                    "укажите название магазина."
                } else if fields.contains_key("ozon_token") || fields.contains_key("wb_token") {
                    "проверьте токены маркетплейсов."
                } else if fields.contains_key("email") {
                    "укажите корректный email."
                } else if fields.contains_key("name") {
                    "укажите имя."
                } else {
                    "проверьте заполнение формы."
                }
            }
            FormError::InvalidEmail => "укажите корректный email.",
            FormError::InvalidName => "укажите имя.",
            FormError::InvalidStoreName => "укажите название магазина.",
            FormError::InvalidToken => "проверьте токены маркетплейсов.",
        }
    }
}
