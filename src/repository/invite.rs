//! Diesel implementation of manager invites.

use chrono::Utc;
use diesel::{Connection, prelude::*};

use crate::domain::invite::{InviteStatus, InviteToken};
use crate::domain::manager::{Manager, NewManager};
use crate::domain::types::{InviteCode, StoreId};
use crate::models::invite::{InviteToken as DbInviteToken, NewInviteToken};
use crate::models::manager::{Manager as DbManager, NewManager as DbNewManager};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, InviteReader, InviteWriter};

impl InviteReader for DieselRepository {
    fn get_invite(&self, code: &InviteCode) -> RepositoryResult<Option<InviteToken>> {
        use crate::schema::invite_tokens;

        let mut conn = self.conn()?;
        let db_token = invite_tokens::table
            .filter(invite_tokens::code.eq(code.as_str()))
            .first::<DbInviteToken>(&mut conn)
            .optional()?;

        match db_token {
            Some(db_token) => Ok(Some(
                InviteToken::try_from(db_token).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }
}

impl InviteWriter for DieselRepository {
    fn issue_invite(&self, store_id: StoreId) -> RepositoryResult<InviteToken> {
        use crate::schema::invite_tokens;

        let mut conn = self.conn()?;
        let token = InviteToken::new(InviteCode::generate(), store_id, Utc::now().naive_utc());
        let db_token: NewInviteToken = (&token).into();

        diesel::insert_into(invite_tokens::table)
            .values(&db_token)
            .execute(&mut conn)?;

        Ok(token)
    }

    fn redeem_invite(
        &self,
        code: &InviteCode,
        new_manager: &NewManager,
    ) -> RepositoryResult<Manager> {
        use crate::schema::{invite_tokens, managers};

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        conn.transaction::<Manager, RepositoryError, _>(|conn| {
            let db_token = invite_tokens::table
                .filter(invite_tokens::code.eq(code.as_str()))
                .first::<DbInviteToken>(conn)?;
            let token = InviteToken::try_from(db_token)?;

            if token.store_id != new_manager.store_id {
                return Err(RepositoryError::ValidationError(
                    "invite belongs to another store".to_string(),
                ));
            }
            match token.status(now) {
                InviteStatus::Valid => {}
                InviteStatus::Used => {
                    return Err(RepositoryError::ConstraintViolation(
                        "invite already used".to_string(),
                    ));
                }
                InviteStatus::Expired => {
                    return Err(RepositoryError::ValidationError(
                        "invite expired".to_string(),
                    ));
                }
            }

            diesel::update(invite_tokens::table.filter(invite_tokens::code.eq(code.as_str())))
                .set(invite_tokens::is_used.eq(true))
                .execute(conn)?;

            let db_new_manager: DbNewManager = new_manager.into();
            let db_manager = diesel::insert_into(managers::table)
                .values(&db_new_manager)
                .get_result::<DbManager>(conn)?;

            Ok(Manager::try_from(db_manager)?)
        })
    }
}
