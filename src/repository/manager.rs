//! Diesel implementation of the manager roster.

use diesel::prelude::*;

use crate::domain::manager::{Manager, NewManager};
use crate::domain::types::{ManagerId, StoreId};
use crate::models::manager::{Manager as DbManager, NewManager as DbNewManager};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ManagerReader, ManagerWriter};

impl ManagerReader for DieselRepository {
    fn list_managers(&self, store_id: StoreId) -> RepositoryResult<Vec<Manager>> {
        use crate::schema::managers;

        let mut conn = self.conn()?;
        let db_managers = managers::table
            .filter(managers::store_id.eq(store_id.get()))
            .order(managers::id.asc())
            .load::<DbManager>(&mut conn)?;

        db_managers
            .into_iter()
            .map(|manager| Manager::try_from(manager).map_err(RepositoryError::from))
            .collect()
    }
}

impl ManagerWriter for DieselRepository {
    fn create_manager(&self, new_manager: &NewManager) -> RepositoryResult<Manager> {
        use crate::schema::managers;

        let mut conn = self.conn()?;
        let db_new_manager: DbNewManager = new_manager.into();

        let db_manager = diesel::insert_into(managers::table)
            .values(&db_new_manager)
            .get_result::<DbManager>(&mut conn)?;

        Manager::try_from(db_manager).map_err(RepositoryError::from)
    }

    fn delete_manager(&self, store_id: StoreId, id: ManagerId) -> RepositoryResult<usize> {
        use crate::schema::managers;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            managers::table
                .filter(managers::id.eq(id.get()))
                .filter(managers::store_id.eq(store_id.get())),
        )
        .execute(&mut conn)?;

        Ok(deleted)
    }
}
