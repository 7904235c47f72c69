//! Diesel implementation of store profile storage.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::store::StoreProfile;
use crate::domain::types::StoreId;
use crate::models::store::{SaveStore, Store as DbStore};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, StoreReader, StoreWriter};

impl StoreReader for DieselRepository {
    fn get_store_profile(&self, store_id: StoreId) -> RepositoryResult<Option<StoreProfile>> {
        use crate::schema::stores;

        let mut conn = self.conn()?;
        let db_store = stores::table
            .filter(stores::id.eq(store_id.get()))
            .first::<DbStore>(&mut conn)
            .optional()?;

        match db_store {
            Some(db_store) => Ok(Some(
                db_store
                    .into_profile(&self.cipher)
                    .map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }
}

impl StoreWriter for DieselRepository {
    fn save_store_profile(
        &self,
        store_id: StoreId,
        profile: &StoreProfile,
    ) -> RepositoryResult<()> {
        use crate::schema::stores;

        let mut conn = self.conn()?;
        let row = SaveStore::new(store_id.get(), profile, Utc::now().naive_utc(), &self.cipher);

        diesel::insert_into(stores::table)
            .values(&row)
            .on_conflict(stores::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)?;

        Ok(())
    }
}
