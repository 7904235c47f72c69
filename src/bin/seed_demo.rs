//! Fills the configured SQLite database with the demo roster and store profile.

use dotenvy::dotenv;

use nikosale_admin::crypto::TokenCipher;
use nikosale_admin::db::establish_connection_pool;
use nikosale_admin::domain::manager::NewManager;
use nikosale_admin::domain::types::StoreId;
use nikosale_admin::load_server_config;
use nikosale_admin::repository::errors::RepositoryResult;
use nikosale_admin::repository::fixture::{FixtureLatency, FixtureRepository};
use nikosale_admin::repository::{
    DieselRepository, ManagerReader, ManagerWriter, StoreReader, StoreWriter,
};

/// Copies managers missing from the target and the profile if none exists.
fn seed<S, T>(source: &S, target: &T, store_id: StoreId) -> RepositoryResult<usize>
where
    S: ManagerReader + StoreReader,
    T: ManagerReader + ManagerWriter + StoreReader + StoreWriter,
{
    let existing = target.list_managers(store_id)?;
    let mut created = 0;
    for manager in source.list_managers(store_id)? {
        if existing.iter().any(|m| m.email == manager.email) {
            continue;
        }
        let new_manager = NewManager::new(store_id, manager.name, manager.email, manager.role);
        target.create_manager(&new_manager)?;
        created += 1;
    }

    if target.get_store_profile(store_id)?.is_none()
        && let Some(profile) = source.get_store_profile(store_id)?
    {
        target.save_store_profile(store_id, &profile)?;
        log::info!("Registered demo profile \"{}\"", profile.store_name);
    }

    Ok(created)
}

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match load_server_config() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let store_id = match StoreId::new(server_config.store_id) {
        Ok(store_id) => store_id,
        Err(err) => {
            log::error!("Invalid store id: {err}");
            std::process::exit(1);
        }
    };

    if server_config.database_url.trim().is_empty() {
        log::error!("database_url is not configured");
        std::process::exit(1);
    }

    let cipher = match TokenCipher::new(&server_config.token_key) {
        Ok(cipher) => cipher,
        Err(err) => {
            log::error!("Invalid token key: {err}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let source = match FixtureRepository::seeded(store_id, FixtureLatency::none()) {
        Ok(source) => source,
        Err(err) => {
            log::error!("Failed to build demo data: {err}");
            std::process::exit(1);
        }
    };

    match seed(&source, &DieselRepository::new(pool, cipher), store_id) {
        Ok(created) => log::info!("Seeded {created} managers into store {store_id}"),
        Err(err) => {
            log::error!("Failed to seed demo data: {err}");
            std::process::exit(1);
        }
    }
}
