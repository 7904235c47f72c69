//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::invite::InviteToken;
use crate::domain::manager::{Manager, NewManager};
use crate::domain::store::StoreProfile;
use crate::domain::types::{InviteCode, ManagerId, StoreId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    InviteReader, InviteWriter, ManagerReader, ManagerWriter, StoreReader, StoreWriter,
};

mock! {
    pub Repository {}

    impl Clone for Repository {
        fn clone(&self) -> Self;
    }

    impl ManagerReader for Repository {
        fn list_managers(&self, store_id: StoreId) -> RepositoryResult<Vec<Manager>>;
    }

    impl ManagerWriter for Repository {
        fn create_manager(&self, new_manager: &NewManager) -> RepositoryResult<Manager>;
        fn delete_manager(&self, store_id: StoreId, id: ManagerId) -> RepositoryResult<usize>;
    }

    impl StoreReader for Repository {
        fn get_store_profile(&self, store_id: StoreId) -> RepositoryResult<Option<StoreProfile>>;
    }

    impl StoreWriter for Repository {
        fn save_store_profile(
            &self,
            store_id: StoreId,
            profile: &StoreProfile,
        ) -> RepositoryResult<()>;
    }

    impl InviteReader for Repository {
        fn get_invite(&self, code: &InviteCode) -> RepositoryResult<Option<InviteToken>>;
    }

    impl InviteWriter for Repository {
        fn issue_invite(&self, store_id: StoreId) -> RepositoryResult<InviteToken>;
        fn redeem_invite(
            &self,
            code: &InviteCode,
            new_manager: &NewManager,
        ) -> RepositoryResult<Manager>;
    }
}
