//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! normalized/validated email, non-empty names) so that once a value reaches
//! the domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Maximum length accepted for short text values such as names.
pub const MAX_NAME_LENGTH: usize = 255;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided string exceeded the allowed length.
    #[error("value is longer than {0} characters")]
    TooLong(usize),
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Trims the value and checks it is non-empty and within `MAX_NAME_LENGTH`.
fn normalize_name<S: Into<String>>(value: S) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(TypeConstraintError::TooLong(MAX_NAME_LENGTH));
    }
    Ok(trimmed)
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

/// Macro to generate validated string newtypes sharing the same accessors.
macro_rules! text_newtype {
    ($name:ident, $normalize:path, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Validates and normalizes the provided value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                Ok(Self($normalize(value)?))
            }

            /// Borrow the value as a `&str`.
            pub fn as_str(&self) -> &str {
                &self.0
            }

        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(ManagerId, "Unique identifier for a manager.");
id_newtype!(StoreId, "Unique identifier for a store.");

text_newtype!(
    ManagerEmail,
    normalize_email,
    "Lower-cased and validated email address."
);
text_newtype!(ManagerName, normalize_name, "Trimmed, non-empty manager name.");
text_newtype!(StoreName, normalize_name, "Trimmed, non-empty store name.");

/// Free-form store description with every HTML tag stripped.
///
/// The text is kept unescaped; templates escape it on output.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct StoreDescription(String);

impl StoreDescription {
    /// Sanitizes the description. Empty descriptions are allowed.
    pub fn new<S: Into<String>>(value: S) -> Self {
        let value = value.into();
        let cleaned = ammonia::Builder::empty().clean(value.trim()).to_string();
        Self(unescape_text(&cleaned).trim().to_string())
    }

    /// Wraps text that already went through [`StoreDescription::new`]
    /// without sanitizing it again.
    pub(crate) fn from_sanitized(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Reverts the entities the HTML serializer emits for text nodes.
/// `&amp;` goes last so escaped entity text stays literal.
fn unescape_text(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

impl Display for StoreDescription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// API token issued by a marketplace (Ozon, Wildberries).
///
/// The raw value never appears in logs; use [`MarketplaceToken::preview`].
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketplaceToken(String);

impl MarketplaceToken {
    /// Trims the token and rejects blank or whitespace-containing values.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(TypeConstraintError::InvalidValue(
                "token must not contain whitespace".to_string(),
            ));
        }
        Ok(Self(trimmed))
    }

    /// Parses an optional form value, treating blank input as "no token".
    pub fn parse_optional(value: &str) -> Result<Option<Self>, TypeConstraintError> {
        if value.trim().is_empty() {
            Ok(None)
        } else {
            Self::new(value).map(Some)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Masked form of the token: first and last four characters kept, the
    /// rest replaced with `*`. Tokens of eight characters or fewer are fully
    /// masked.
    pub fn preview(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}{}{tail}", "*".repeat(chars.len() - 8))
    }
}

impl std::fmt::Debug for MarketplaceToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MarketplaceToken")
            .field(&self.preview())
            .finish()
    }
}

/// Opaque invite code embedded in invite links.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct InviteCode(String);

impl InviteCode {
    /// Accepts URL-safe codes made of ASCII letters, digits and dashes.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        if value.len() > 64 || !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(TypeConstraintError::InvalidValue(format!(
                "malformed invite code: {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Generates a fresh random code.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for InviteCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
