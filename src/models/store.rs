//! Diesel models for registered stores.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::crypto::{CipherError, TokenCipher};
use crate::domain::store::StoreProfile;
use crate::domain::types::{StoreDescription, StoreName};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::stores)]
pub struct Store {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub ozon_token: Option<String>,
    pub wb_token: Option<String>,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::stores)]
#[diesel(treat_none_as_null = true)]
/// Row written when a store profile is registered or updated.
///
/// Tokens hold the encrypted form only.
pub struct SaveStore<'a> {
    pub id: i32,
    pub name: &'a str,
    pub description: &'a str,
    pub ozon_token: Option<String>,
    pub wb_token: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl<'a> SaveStore<'a> {
    pub fn new(
        id: i32,
        profile: &'a StoreProfile,
        updated_at: NaiveDateTime,
        cipher: &TokenCipher,
    ) -> Self {
        Self {
            id,
            name: profile.store_name.as_str(),
            description: profile.description.as_str(),
            ozon_token: profile.ozon_token.as_ref().map(|t| cipher.encrypt(t)),
            wb_token: profile.wb_token.as_ref().map(|t| cipher.encrypt(t)),
            updated_at,
        }
    }
}

impl Store {
    /// Rebuilds the profile, decrypting the stored tokens.
    pub fn into_profile(self, cipher: &TokenCipher) -> Result<StoreProfile, CipherError> {
        let decrypt = |token: Option<String>| {
            token
                .map(|value| cipher.decrypt(&value))
                .transpose()
                .map(Option::flatten)
        };

        Ok(StoreProfile::new(
            StoreName::new(self.name)?,
            StoreDescription::from_sanitized(self.description),
            decrypt(self.ozon_token)?,
            decrypt(self.wb_token)?,
        ))
    }
}
