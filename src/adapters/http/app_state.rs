use std::sync::Arc;

use crate::{
    application::use_cases::{subscription::SubscriptionUseCases, user::AuthUseCases},
    infra::config::AppConfig,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth_use_cases: Arc<AuthUseCases>,
    pub subscription_use_cases: Arc<SubscriptionUseCases>,
}
