use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    use_cases::user::{ReminderSettings, UserCredentials, UserProfile, UserRepo},
};

// User row as stored in the db.
#[derive(FromRow, Debug)]
struct UserDb {
    id: Uuid,
    created_at: Option<NaiveDateTime>,
    updated_at: Option<NaiveDateTime>,
    name: String,
    email: String,
    reminders_enabled: bool,
    default_reminder_days: i32,
}

impl From<UserDb> for UserProfile {
    fn from(row: UserDb) -> Self {
        UserProfile {
            id: row.id,
            name: row.name,
            email: row.email,
            reminders_enabled: row.reminders_enabled,
            default_reminder_days: row.default_reminder_days,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow, Debug)]
struct CredentialsDb {
    id: Uuid,
    password_hash: String,
}

const PROFILE_COLUMNS: &str =
    "id, created_at, updated_at, name, email, reminders_enabled, default_reminder_days";

#[async_trait]
impl UserRepo for PostgresPersistence {
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<UserProfile> {
        let id = Uuid::new_v4();
        let rec = sqlx::query_as::<_, UserDb>(&format!(
            "INSERT INTO users (id, name, email, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rec.into())
    }

    async fn find_credentials_by_email(&self, email: &str) -> AppResult<Option<UserCredentials>> {
        let rec = sqlx::query_as::<_, CredentialsDb>(
            "SELECT id, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rec.map(|r| UserCredentials {
            id: r.id,
            password_hash: r.password_hash,
        }))
    }

    async fn get_profile_by_id(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        let rec = sqlx::query_as::<_, UserDb>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rec.map(UserProfile::from))
    }

    async fn update_reminder_settings(
        &self,
        user_id: Uuid,
        settings: ReminderSettings,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE users
             SET reminders_enabled = $2, default_reminder_days = $3, updated_at = now()
             WHERE id = $1",
        )
        .bind(user_id)
        .bind(settings.enabled)
        .bind(settings.days_before_due)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(())
    }

    async fn delete_user(&self, user_id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
