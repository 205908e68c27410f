//! In-memory mock implementations of the repository traits.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::subscription::Subscription,
    use_cases::{
        subscription::SubscriptionRepo,
        user::{ReminderSettings, UserCredentials, UserProfile, UserRepo},
    },
};

#[derive(Debug, Clone)]
struct StoredUser {
    profile: UserProfile,
    password_hash: String,
}

/// In-memory implementation of `UserRepo` for testing.
#[derive(Default)]
pub struct InMemoryUserRepo {
    users: Mutex<HashMap<Uuid, StoredUser>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<UserProfile> {
        let mut users = self.users.lock().unwrap();

        // Mirror the unique-constraint translation of the Postgres adapter.
        if users.values().any(|u| u.profile.email == email) {
            return Err(AppError::InvalidInput(
                "A record with this value already exists".into(),
            ));
        }

        let now = chrono::Utc::now().naive_utc();
        let profile = UserProfile {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            reminders_enabled: true,
            default_reminder_days: 3,
            created_at: Some(now),
            updated_at: Some(now),
        };
        users.insert(
            profile.id,
            StoredUser {
                profile: profile.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(profile)
    }

    async fn find_credentials_by_email(&self, email: &str) -> AppResult<Option<UserCredentials>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.profile.email == email)
            .map(|u| UserCredentials {
                id: u.profile.id,
                password_hash: u.password_hash.clone(),
            }))
    }

    async fn get_profile_by_id(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .get(&user_id)
            .map(|u| u.profile.clone()))
    }

    async fn update_reminder_settings(
        &self,
        user_id: Uuid,
        settings: ReminderSettings,
    ) -> AppResult<()> {
        if let Some(stored) = self.users.lock().unwrap().get_mut(&user_id) {
            stored.profile.reminders_enabled = settings.enabled;
            stored.profile.default_reminder_days = settings.days_before_due;
            stored.profile.updated_at = Some(chrono::Utc::now().naive_utc());
        }
        Ok(())
    }

    async fn delete_user(&self, user_id: Uuid) -> AppResult<()> {
        self.users.lock().unwrap().remove(&user_id);
        Ok(())
    }
}

/// In-memory implementation of `SubscriptionRepo` for testing.
#[derive(Default)]
pub struct InMemorySubscriptionRepo {
    subscriptions: Mutex<HashMap<Uuid, Subscription>>,
}

impl InMemorySubscriptionRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repo with initial subscriptions for testing.
    pub fn with_subscriptions(subscriptions: Vec<Subscription>) -> Self {
        let map: HashMap<Uuid, Subscription> =
            subscriptions.into_iter().map(|s| (s.id, s)).collect();
        Self {
            subscriptions: Mutex::new(map),
        }
    }
}

#[async_trait]
impl SubscriptionRepo for InMemorySubscriptionRepo {
    async fn insert(&self, subscription: &Subscription) -> AppResult<Subscription> {
        let now = chrono::Utc::now().naive_utc();
        let mut stored = subscription.clone();
        stored.created_at = Some(now);
        stored.updated_at = Some(now);
        self.subscriptions
            .lock()
            .unwrap()
            .insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Subscription>> {
        let mut subs: Vec<Subscription> = self
            .subscriptions
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        // Same ordering as the Postgres adapter.
        subs.sort_by_key(|s| (s.next_payment_date, s.created_at));
        Ok(subs)
    }

    async fn get_for_user(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Subscription>> {
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .get(&id)
            .filter(|s| s.user_id == user_id)
            .cloned())
    }

    async fn update(&self, subscription: &Subscription) -> AppResult<Subscription> {
        let mut subs = self.subscriptions.lock().unwrap();
        let Some(existing) = subs
            .get(&subscription.id)
            .filter(|s| s.user_id == subscription.user_id)
        else {
            return Err(AppError::NotFound);
        };
        let mut stored = subscription.clone();
        stored.created_at = existing.created_at;
        stored.updated_at = Some(chrono::Utc::now().naive_utc());
        subs.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete_for_user(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let mut subs = self.subscriptions.lock().unwrap();
        let matches = subs.get(&id).is_some_and(|s| s.user_id == user_id);
        if matches {
            subs.remove(&id);
        }
        Ok(matches)
    }
}
