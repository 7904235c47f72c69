//! Diesel models representing store managers.

use diesel::prelude::*;

use crate::domain::manager::{
    Manager as DomainManager, ManagerRole, NewManager as DomainNewManager,
};
use crate::domain::types::{ManagerEmail, ManagerId, ManagerName, StoreId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::managers)]
/// Diesel model for [`crate::domain::manager::Manager`].
pub struct Manager {
    pub id: i32,
    pub store_id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::managers)]
/// Insertable form of [`Manager`].
pub struct NewManager<'a> {
    pub store_id: i32,
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
}

impl TryFrom<Manager> for DomainManager {
    type Error = TypeConstraintError;

    fn try_from(manager: Manager) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ManagerId::try_from(manager.id)?,
            store_id: StoreId::try_from(manager.store_id)?,
            name: ManagerName::new(manager.name)?,
            email: ManagerEmail::new(manager.email)?,
            role: ManagerRole::try_from(manager.role.as_str())?,
        })
    }
}

impl<'a> From<&'a DomainNewManager> for NewManager<'a> {
    fn from(manager: &'a DomainNewManager) -> Self {
        Self {
            store_id: manager.store_id.get(),
            name: manager.name.as_str(),
            email: manager.email.as_str(),
            role: manager.role.as_str(),
        }
    }
}
