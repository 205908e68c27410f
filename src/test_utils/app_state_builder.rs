//! Test app state builder for HTTP-level testing.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use secrecy::SecretString;
use time::Duration;

use crate::{
    adapters::http::app_state::AppState,
    infra::config::AppConfig,
    test_utils::{InMemorySubscriptionRepo, InMemoryUserRepo},
    use_cases::{
        subscription::{SubscriptionRepo, SubscriptionUseCases},
        user::{AuthUseCases, UserRepo},
    },
};

pub fn create_test_config() -> AppConfig {
    AppConfig {
        jwt_secret: SecretString::new("test-jwt-secret-test-jwt-secret!".into()),
        access_token_ttl: Duration::hours(24),
        bind_addr: "127.0.0.1:0".parse::<SocketAddr>().unwrap(),
        cors_origin: HeaderValue::from_static("http://localhost:3000"),
        database_url: "postgres://localhost/subtrack_test".to_string(),
        upcoming_window_days: 7,
    }
}

/// Builds an `AppState` wired to in-memory repositories.
#[derive(Default)]
pub struct TestAppStateBuilder {
    user_repo: InMemoryUserRepo,
    subscription_repo: InMemorySubscriptionRepo,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subscription_repo(mut self, repo: InMemorySubscriptionRepo) -> Self {
        self.subscription_repo = repo;
        self
    }

    pub fn build(self) -> AppState {
        let user_repo = Arc::new(self.user_repo) as Arc<dyn UserRepo>;
        let subscription_repo = Arc::new(self.subscription_repo) as Arc<dyn SubscriptionRepo>;

        AppState {
            config: Arc::new(create_test_config()),
            auth_use_cases: Arc::new(AuthUseCases::new(user_repo)),
            subscription_use_cases: Arc::new(SubscriptionUseCases::new(subscription_repo)),
        }
    }
}
