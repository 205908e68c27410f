use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::validators::is_valid_email,
};

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub reminders_enabled: bool,
    pub default_reminder_days: i32,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// What login needs to check a password without loading the full profile.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: Uuid,
    pub password_hash: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ReminderSettings {
    pub enabled: bool,
    pub days_before_due: i32,
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<UserProfile>;
    async fn find_credentials_by_email(&self, email: &str) -> AppResult<Option<UserCredentials>>;
    async fn get_profile_by_id(&self, user_id: Uuid) -> AppResult<Option<UserProfile>>;
    async fn update_reminder_settings(
        &self,
        user_id: Uuid,
        settings: ReminderSettings,
    ) -> AppResult<()>;
    async fn delete_user(&self, user_id: Uuid) -> AppResult<()>;
}

#[derive(Clone)]
pub struct AuthUseCases {
    repo: Arc<dyn UserRepo>,
}

impl AuthUseCases {
    pub fn new(repo: Arc<dyn UserRepo>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> AppResult<UserProfile> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput("Name must not be empty".into()));
        }
        let email = email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(AppError::InvalidInput("Invalid email address".into()));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::InvalidInput(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let password_hash = hash_password(password)?;
        self.repo.create_user(name, &email, &password_hash).await
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> AppResult<UserProfile> {
        let email = email.trim().to_lowercase();
        // Unknown email and wrong password are indistinguishable to the caller.
        let credentials = self
            .repo
            .find_credentials_by_email(&email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(&credentials.password_hash, password)? {
            return Err(AppError::InvalidCredentials);
        }

        self.repo
            .get_profile_by_id(credentials.id)
            .await?
            .ok_or(AppError::InvalidCredentials)
    }

    #[instrument(skip(self))]
    pub async fn profile(&self, user_id: Uuid) -> AppResult<UserProfile> {
        self.repo
            .get_profile_by_id(user_id)
            .await?
            .ok_or(AppError::InvalidCredentials)
    }

    #[instrument(skip(self))]
    pub async fn update_reminder_settings(
        &self,
        user_id: Uuid,
        settings: ReminderSettings,
    ) -> AppResult<UserProfile> {
        if settings.days_before_due < 0 {
            return Err(AppError::InvalidInput(
                "Reminder lead time must not be negative".into(),
            ));
        }
        self.repo.update_reminder_settings(user_id, settings).await?;
        self.profile(user_id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_account(&self, user_id: Uuid) -> AppResult<()> {
        self.repo.delete_user(user_id).await
    }
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(e.to_string()))
}

fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
