//! Diesel models for manager invite tokens.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::invite::InviteToken as DomainInviteToken;
use crate::domain::types::{InviteCode, StoreId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::invite_tokens)]
#[diesel(primary_key(code))]
pub struct InviteToken {
    pub code: String,
    pub store_id: i32,
    pub created_at: NaiveDateTime,
    pub is_used: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::invite_tokens)]
pub struct NewInviteToken<'a> {
    pub code: &'a str,
    pub store_id: i32,
    pub created_at: NaiveDateTime,
    pub is_used: bool,
}

impl<'a> From<&'a DomainInviteToken> for NewInviteToken<'a> {
    fn from(token: &'a DomainInviteToken) -> Self {
        Self {
            code: token.code.as_str(),
            store_id: token.store_id.get(),
            created_at: token.created_at,
            is_used: token.is_used,
        }
    }
}

impl TryFrom<InviteToken> for DomainInviteToken {
    type Error = TypeConstraintError;

    fn try_from(token: InviteToken) -> Result<Self, Self::Error> {
        Ok(Self {
            code: InviteCode::new(token.code)?,
            store_id: StoreId::try_from(token.store_id)?,
            created_at: token.created_at,
            is_used: token.is_used,
        })
    }
}
