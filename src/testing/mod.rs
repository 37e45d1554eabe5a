use std::sync::Arc;

use crate::auth::{issue_token, Identity};
use crate::config::AppConfig;
use crate::models::{NewPlace, NewUser, User};
use crate::services::HbnbFacade;
use crate::AppState;

pub const TEST_PASSWORD: &str = "password";

/// Facade pre-seeded with one admin and one regular member.
pub struct TestContext {
    pub facade: Arc<HbnbFacade>,
    pub config: AppConfig,
    pub admin: User,
    pub member: User,
}

pub fn new_user(email: &str) -> NewUser {
    NewUser {
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        is_admin: false,
    }
}

impl TestContext {
    pub async fn new() -> Self {
        let facade = Arc::new(HbnbFacade::in_memory());

        let mut admin = new_user("admin@hbnb.io");
        admin.is_admin = true;
        let admin = facade.create_user(admin).await.expect("seed admin");
        let member = facade.create_user(new_user("member@hbnb.io")).await.expect("seed member");

        Self {
            facade,
            config: AppConfig::development(),
            admin,
            member,
        }
    }

    pub fn state(&self) -> AppState {
        AppState::with_facade(self.config.clone(), self.facade.clone())
    }

    pub fn token_for(&self, user: &User) -> String {
        issue_token(&self.config.security, &Identity::from(user)).expect("issue token")
    }

    pub fn place_input(&self, owner_id: &str) -> NewPlace {
        NewPlace {
            title: "Cozy cabin".to_string(),
            description: "Quiet spot".to_string(),
            price: 80.0,
            latitude: 48.85,
            longitude: 2.35,
            owner_id: owner_id.to_string(),
            amenities: Vec::new(),
        }
    }
}
