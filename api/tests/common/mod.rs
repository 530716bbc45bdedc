//! Shared setup for the API integration tests: the full app over the
//! in-memory store, with two configured accounts.

#![allow(dead_code)]

use actix_web::web;
use wh_api::{AppState, Repositories};
use wh_core::{CreateBatch, ImportBatch, NewCategory, WarehouseUser};
use wh_shared::config::{AppConfig, UserAccount};

pub const PASSWORD: &str = "correct-horse";

fn account(id: i64, username: &str, active: bool) -> UserAccount {
    UserAccount {
        id,
        username: username.to_string(),
        password_hash: bcrypt::hash(PASSWORD, 4).unwrap(),
        display_name: Some(format!("{} user", username)),
        role: "admin".to_string(),
        permissions: vec!["inventory".to_string(), "sales".to_string()],
        active,
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.users = vec![account(1, "admin", true), account(2, "former", false)];
    config
}

pub fn test_state(config: &AppConfig) -> web::Data<AppState> {
    web::Data::new(AppState::new(config, Repositories::in_memory(), None).unwrap())
}

/// Authorization header value for the active account
pub fn bearer(state: &AppState, config: &AppConfig) -> String {
    let user = WarehouseUser::from(&config.auth.users[0]);
    format!("Bearer {}", state.tokens.issue(&user).unwrap())
}

/// A category plus a two-unit batch (IMEI0001, IMEI0002) bought at 100 000
/// and priced at 150 000
pub async fn seed_batch(state: &AppState) -> ImportBatch {
    let category = state
        .categories
        .create(NewCategory {
            name: "Phones".to_string(),
            description: None,
            is_active: true,
        })
        .await
        .unwrap();

    state
        .batches
        .create(CreateBatch {
            category_id: category.id,
            quantity: 2,
            import_price: 100_000,
            selling_price: Some(150_000),
            identifiers: Some(vec!["IMEI0001".to_string(), "IMEI0002".to_string()]),
            ..Default::default()
        })
        .await
        .unwrap()
}
