//! Encryption of marketplace tokens at rest.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use fernet::Fernet;
use thiserror::Error;

use crate::domain::types::{MarketplaceToken, TypeConstraintError};

#[derive(Debug, Error)]
pub enum CipherError {
    #[error("token key must be a url-safe base64 encoded 32-byte key")]
    InvalidKey,

    #[error("stored token cannot be decrypted with the configured key")]
    Decrypt,

    #[error(transparent)]
    Constraint(#[from] TypeConstraintError),
}

/// Fernet cipher applied to tokens before they reach the database.
#[derive(Clone)]
pub struct TokenCipher {
    fernet: Arc<Fernet>,
}

impl TokenCipher {
    pub fn new(key: &str) -> Result<Self, CipherError> {
        let fernet = Fernet::new(key.trim()).ok_or(CipherError::InvalidKey)?;
        Ok(Self {
            fernet: Arc::new(fernet),
        })
    }

    /// Cipher with a freshly generated key.
    pub fn generate() -> Result<Self, CipherError> {
        Self::new(&Fernet::generate_key())
    }

    pub fn encrypt(&self, token: &MarketplaceToken) -> String {
        self.fernet.encrypt(token.as_str().as_bytes())
    }

    /// Decrypts a stored column. Blank columns mean no token.
    pub fn decrypt(&self, stored: &str) -> Result<Option<MarketplaceToken>, CipherError> {
        if stored.trim().is_empty() {
            return Ok(None);
        }
        let plain = self
            .fernet
            .decrypt(stored.trim())
            .map_err(|_| CipherError::Decrypt)?;
        let plain = String::from_utf8(plain).map_err(|_| CipherError::Decrypt)?;
        Ok(MarketplaceToken::parse_optional(&plain)?)
    }
}

impl Debug for TokenCipher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("TokenCipher(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher() -> TokenCipher {
        TokenCipher::generate().expect("generated key")
    }

    #[test]
    fn encrypted_token_decrypts_back() {
        let cipher = cipher();
        let token = MarketplaceToken::new("sample-ozon-token").expect("valid token");

        let stored = cipher.encrypt(&token);
        assert!(!stored.contains("sample-ozon-token"));
        assert_eq!(cipher.decrypt(&stored).expect("decrypt"), Some(token));
    }

    #[test]
    fn other_key_cannot_decrypt() {
        let token = MarketplaceToken::new("sample-wb-token").expect("valid token");
        let stored = cipher().encrypt(&token);

        assert!(matches!(
            cipher().decrypt(&stored),
            Err(CipherError::Decrypt)
        ));
    }

    #[test]
    fn blank_column_is_no_token() {
        assert_eq!(cipher().decrypt("  ").expect("blank"), None);
    }

    #[test]
    fn malformed_key_is_rejected() {
        assert!(matches!(
            TokenCipher::new("not-a-key"),
            Err(CipherError::InvalidKey)
        ));
    }
}
