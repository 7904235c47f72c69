use chrono::{Duration, Utc};
use diesel::prelude::*;
use nikosale_admin::crypto::TokenCipher;
use nikosale_admin::domain::manager::{ManagerRole, NewManager};
use nikosale_admin::domain::store::StoreProfile;
use nikosale_admin::domain::types::{
    InviteCode, ManagerEmail, ManagerName, MarketplaceToken, StoreDescription, StoreId, StoreName,
};
use nikosale_admin::repository::errors::RepositoryError;
use nikosale_admin::repository::{
    DieselRepository, InviteReader, InviteWriter, ManagerReader, ManagerWriter, StoreReader,
    StoreWriter,
};

mod common;

fn store(id: i32) -> StoreId {
    StoreId::new(id).unwrap()
}

fn repository(test_db: &common::TestDb) -> DieselRepository {
    DieselRepository::new(test_db.pool(), TokenCipher::generate().unwrap())
}

fn new_manager(store_id: i32, name: &str, email: &str) -> NewManager {
    NewManager::new(
        store(store_id),
        ManagerName::new(name).unwrap(),
        ManagerEmail::new(email).unwrap(),
        ManagerRole::Manager,
    )
}

#[test]
fn test_manager_repository_crud() {
    let test_db = common::TestDb::new("test_manager_repository_crud.db");
    let repo = repository(&test_db);

    let ivan = repo
        .create_manager(&new_manager(1, "Иван Петров", "ivan@example.com"))
        .unwrap();
    let olga = repo
        .create_manager(&new_manager(1, "Ольга Смирнова", "olga@example.com"))
        .unwrap();
    repo.create_manager(&new_manager(2, "Other", "other@example.com"))
        .unwrap();

    let managers = repo.list_managers(store(1)).unwrap();
    assert_eq!(managers.len(), 2);
    assert_eq!(managers[0].id, ivan.id);
    assert_eq!(managers[1].name.as_str(), "Ольга Смирнова");

    // Deleting through the wrong store leaves the row alone.
    assert_eq!(repo.delete_manager(store(2), ivan.id).unwrap(), 0);
    assert_eq!(repo.delete_manager(store(1), ivan.id).unwrap(), 1);

    let managers = repo.list_managers(store(1)).unwrap();
    assert_eq!(managers.len(), 1);
    assert_eq!(managers[0].id, olga.id);
}

#[test]
fn test_manager_email_unique_per_store() {
    let test_db = common::TestDb::new("test_manager_email_unique_per_store.db");
    let repo = repository(&test_db);

    repo.create_manager(&new_manager(1, "Anna", "anna@example.com"))
        .unwrap();
    let duplicate = repo.create_manager(&new_manager(1, "Anna B", "anna@example.com"));
    assert!(matches!(
        duplicate,
        Err(RepositoryError::ConstraintViolation(_))
    ));

    assert!(
        repo.create_manager(&new_manager(2, "Anna", "anna@example.com"))
            .is_ok()
    );
}

#[test]
fn test_store_profile_upsert() {
    let test_db = common::TestDb::new("test_store_profile_upsert.db");
    let repo = repository(&test_db);

    assert!(repo.get_store_profile(store(1)).unwrap().is_none());

    let profile = StoreProfile::new(
        StoreName::new("ООО Ромашка").unwrap(),
        StoreDescription::new("Магазин товаров для дома"),
        Some(MarketplaceToken::new("sample-ozon-token").unwrap()),
        Some(MarketplaceToken::new("sample-wb-token").unwrap()),
    );
    repo.save_store_profile(store(1), &profile).unwrap();
    assert_eq!(repo.get_store_profile(store(1)).unwrap(), Some(profile));

    let updated = StoreProfile::new(
        StoreName::new("ООО Лютик").unwrap(),
        StoreDescription::default(),
        None,
        Some(MarketplaceToken::new("new-wb-token").unwrap()),
    );
    repo.save_store_profile(store(1), &updated).unwrap();

    let loaded = repo.get_store_profile(store(1)).unwrap().unwrap();
    assert_eq!(loaded.store_name.as_str(), "ООО Лютик");
    assert!(loaded.ozon_token.is_none());
    assert_eq!(loaded.description.as_str(), "");
}

#[test]
fn test_store_description_round_trips_special_characters() {
    let test_db = common::TestDb::new("test_store_description_round_trips.db");
    let repo = repository(&test_db);

    let profile = StoreProfile::new(
        StoreName::new("Дом & сад").unwrap(),
        StoreDescription::new("Дом & сад, скидки > 10%, 1 < 2"),
        None,
        None,
    );
    repo.save_store_profile(store(1), &profile).unwrap();
    // Saving what was loaded must not change it either.
    let loaded = repo.get_store_profile(store(1)).unwrap().unwrap();
    repo.save_store_profile(store(1), &loaded).unwrap();

    let loaded = repo.get_store_profile(store(1)).unwrap().unwrap();
    assert_eq!(loaded.store_name.as_str(), "Дом & сад");
    assert_eq!(loaded.description.as_str(), "Дом & сад, скидки > 10%, 1 < 2");
}

#[test]
fn test_store_tokens_are_encrypted_at_rest() {
    use nikosale_admin::schema::stores;

    let test_db = common::TestDb::new("test_store_tokens_are_encrypted_at_rest.db");
    let repo = repository(&test_db);

    let profile = StoreProfile::new(
        StoreName::new("ООО Ромашка").unwrap(),
        StoreDescription::default(),
        Some(MarketplaceToken::new("sample-ozon-token").unwrap()),
        None,
    );
    repo.save_store_profile(store(1), &profile).unwrap();

    let mut conn = test_db.pool().get().unwrap();
    let (ozon, wb): (Option<String>, Option<String>) = stores::table
        .filter(stores::id.eq(1))
        .select((stores::ozon_token, stores::wb_token))
        .first(&mut conn)
        .unwrap();
    let ozon = ozon.unwrap();
    assert!(!ozon.contains("sample-ozon-token"));
    assert!(wb.is_none());

    let loaded = repo.get_store_profile(store(1)).unwrap().unwrap();
    assert_eq!(loaded.ozon_token, profile.ozon_token);

    // A repository with another key cannot read the tokens back.
    let other = repository(&test_db);
    assert!(other.get_store_profile(store(1)).is_err());
}

#[test]
fn test_invite_can_be_redeemed_once() {
    let test_db = common::TestDb::new("test_invite_can_be_redeemed_once.db");
    let repo = repository(&test_db);

    let token = repo.issue_invite(store(1)).unwrap();
    let second = repo.issue_invite(store(1)).unwrap();
    assert_ne!(token.code, second.code);

    let stored = repo.get_invite(&token.code).unwrap().unwrap();
    assert!(!stored.is_used);

    let manager = repo
        .redeem_invite(&token.code, &new_manager(1, "Пётр", "petr@example.com"))
        .unwrap();
    assert_eq!(manager.store_id, store(1));
    assert!(repo.get_invite(&token.code).unwrap().unwrap().is_used);

    let again = repo.redeem_invite(&token.code, &new_manager(1, "Анна", "anna@example.com"));
    assert!(matches!(again, Err(RepositoryError::ConstraintViolation(_))));
    assert_eq!(repo.list_managers(store(1)).unwrap().len(), 1);
}

#[test]
fn test_expired_invite_is_rejected() {
    use nikosale_admin::schema::invite_tokens;

    let test_db = common::TestDb::new("test_expired_invite_is_rejected.db");
    let repo = repository(&test_db);
    let token = repo.issue_invite(store(1)).unwrap();

    let mut conn = test_db.pool().get().unwrap();
    diesel::update(invite_tokens::table.filter(invite_tokens::code.eq(token.code.as_str())))
        .set(invite_tokens::created_at.eq(Utc::now().naive_utc() - Duration::days(8)))
        .execute(&mut conn)
        .unwrap();

    let result = repo.redeem_invite(&token.code, &new_manager(1, "Пётр", "petr@example.com"));
    assert!(matches!(result, Err(RepositoryError::ValidationError(_))));
    assert!(repo.list_managers(store(1)).unwrap().is_empty());
}

#[test]
fn test_unknown_invite() {
    let test_db = common::TestDb::new("test_unknown_invite.db");
    let repo = repository(&test_db);
    let code = InviteCode::new("missing").unwrap();

    assert!(repo.get_invite(&code).unwrap().is_none());
    assert!(matches!(
        repo.redeem_invite(&code, &new_manager(1, "Пётр", "petr@example.com")),
        Err(RepositoryError::NotFound)
    ));
}
