use serde::{Deserialize, Serialize};

use crate::domain::types::{ManagerEmail, ManagerId, ManagerName, StoreId, TypeConstraintError};

/// Background colours cycled through for manager avatars.
const AVATAR_COLORS: [&str; 15] = [
    "red", "orange", "amber", "yellow", "lime", "green", "emerald", "teal", "cyan", "blue",
    "indigo", "violet", "purple", "pink", "rose",
];

/// Role a store member holds in the dashboard.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ManagerRole {
    #[default]
    Manager,
    Owner,
}

impl ManagerRole {
    /// Human readable label shown in the roster.
    pub fn label(self) -> &'static str {
        match self {
            ManagerRole::Manager => "Менеджер",
            ManagerRole::Owner => "Владелец магазина",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ManagerRole::Manager => "manager",
            ManagerRole::Owner => "owner",
        }
    }
}

impl TryFrom<&str> for ManagerRole {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "manager" => Ok(ManagerRole::Manager),
            "owner" => Ok(ManagerRole::Owner),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown manager role: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Manager {
    pub id: ManagerId,
    pub store_id: StoreId,
    pub name: ManagerName,
    pub email: ManagerEmail,
    pub role: ManagerRole,
}

impl Manager {
    /// Upper-cased first letter of the manager's name.
    pub fn initial(&self) -> char {
        self.name
            .as_str()
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('?')
    }

    /// Avatar colour derived from the initial's code point.
    pub fn avatar_color(&self) -> &'static str {
        let index = (i64::from(u32::from(self.initial())) - 65).rem_euclid(15);
        AVATAR_COLORS[index as usize]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewManager {
    pub store_id: StoreId,
    pub name: ManagerName,
    pub email: ManagerEmail,
    pub role: ManagerRole,
}

impl NewManager {
    #[must_use]
    pub fn new(store_id: StoreId, name: ManagerName, email: ManagerEmail, role: ManagerRole) -> Self {
        Self {
            store_id,
            name,
            email,
            role,
        }
    }
}
