use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use crate::domain::types::{InviteCode, StoreId};

/// Number of days an invite stays valid after creation.
pub const INVITE_TTL_DAYS: i64 = 7;

/// One-time code allowing a new manager to join a store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InviteToken {
    pub code: InviteCode,
    pub store_id: StoreId,
    pub created_at: NaiveDateTime,
    pub is_used: bool,
}

/// Where an invite stands at a given moment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteStatus {
    Valid,
    Used,
    Expired,
}

impl InviteToken {
    pub fn new(code: InviteCode, store_id: StoreId, created_at: NaiveDateTime) -> Self {
        Self {
            code,
            store_id,
            created_at,
            is_used: false,
        }
    }

    pub fn expires_at(&self) -> NaiveDateTime {
        self.created_at + Duration::days(INVITE_TTL_DAYS)
    }

    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        now > self.expires_at()
    }

    /// A used invite reports `Used` even once it has also expired.
    pub fn status(&self, now: NaiveDateTime) -> InviteStatus {
        if self.is_used {
            InviteStatus::Used
        } else if self.is_expired(now) {
            InviteStatus::Expired
        } else {
            InviteStatus::Valid
        }
    }
}

/// Shareable link built from an invite code.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct InviteLink {
    pub code: InviteCode,
    pub url: String,
}

impl InviteLink {
    pub fn new(public_url: &str, code: InviteCode) -> Self {
        let url = format!("{}/invite/{}", public_url.trim_end_matches('/'), code);
        Self { code, url }
    }
}
