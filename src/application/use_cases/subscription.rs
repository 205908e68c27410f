use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        billing::{schedule, spending, spending::SpendingSummary, status},
        validators::is_valid_currency_code,
    },
    domain::entities::subscription::{BillingCycle, DueStatus, Subscription},
};

const DEFAULT_CURRENCY: &str = "USD";
const DEFAULT_REMINDER_DAYS: i32 = 3;

/// Creation payload. Dates arrive as raw strings so a bad one surfaces as
/// `InvalidDate` instead of an opaque deserialization failure.
#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub name: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub currency: Option<String>,
    pub billing_cycle: BillingCycle,
    pub start_date: String,
    pub next_payment_date: Option<String>,
    pub category: String,
    pub logo: Option<String>,
    pub website: Option<String>,
    pub color: Option<String>,
    pub reminder_days: Option<i32>,
    pub active: Option<bool>,
}

/// Field-level update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub billing_cycle: Option<BillingCycle>,
    pub start_date: Option<String>,
    pub next_payment_date: Option<String>,
    pub category: Option<String>,
    pub logo: Option<String>,
    pub website: Option<String>,
    pub color: Option<String>,
    pub reminder_days: Option<i32>,
    pub active: Option<bool>,
}

/// A subscription paired with its engine-derived urgency figures.
#[derive(Debug, Clone)]
pub struct SubscriptionWithStatus {
    pub subscription: Subscription,
    pub days_till_payment: i64,
    pub due_status: DueStatus,
}

impl SubscriptionWithStatus {
    pub fn new(subscription: Subscription, now: NaiveDateTime) -> Self {
        let days_till_payment =
            status::days_till_payment(subscription.next_payment_date, now);
        let due_status = status::classify(days_till_payment, subscription.reminder_days);
        SubscriptionWithStatus {
            subscription,
            days_till_payment,
            due_status,
        }
    }
}

/// Aggregate figures for a user's whole subscription set.
#[derive(Debug, Clone)]
pub struct SpendingOverview {
    pub summary: SpendingSummary,
    pub upcoming_count: usize,
    pub categories: HashMap<String, usize>,
}

#[async_trait]
pub trait SubscriptionRepo: Send + Sync {
    async fn insert(&self, subscription: &Subscription) -> AppResult<Subscription>;
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Subscription>>;
    async fn get_for_user(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Subscription>>;
    async fn update(&self, subscription: &Subscription) -> AppResult<Subscription>;
    /// Returns `false` when nothing matched `(user_id, id)`.
    async fn delete_for_user(&self, user_id: Uuid, id: Uuid) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct SubscriptionUseCases {
    repo: Arc<dyn SubscriptionRepo>,
}

impl SubscriptionUseCases {
    pub fn new(repo: Arc<dyn SubscriptionRepo>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, user_id: Uuid, input: NewSubscription) -> AppResult<Subscription> {
        let name = input.name.trim().to_string();
        let category = input.category.trim().to_string();
        let start_date = schedule::parse_date(&input.start_date)?;
        let next_payment_date = match &input.next_payment_date {
            Some(raw) => schedule::parse_date(raw)?,
            None => schedule::advance(start_date, input.billing_cycle)?,
        };

        let subscription = Subscription {
            id: Uuid::new_v4(),
            user_id,
            name,
            description: input.description,
            amount: input.amount,
            currency: normalize_currency(input.currency.as_deref())?,
            billing_cycle: input.billing_cycle,
            start_date,
            next_payment_date,
            category,
            logo: input.logo,
            website: input.website,
            color: input.color,
            reminder_days: input.reminder_days.unwrap_or(DEFAULT_REMINDER_DAYS),
            active: input.active.unwrap_or(true),
            created_at: None,
            updated_at: None,
        };
        validate(&subscription)?;

        self.repo.insert(&subscription).await
    }

    /// List plus per-record urgency, "now" supplied by the caller.
    #[instrument(skip(self))]
    pub async fn list_with_status(
        &self,
        user_id: Uuid,
        now: NaiveDateTime,
    ) -> AppResult<Vec<SubscriptionWithStatus>> {
        let subscriptions = self.repo.list_for_user(user_id).await?;
        Ok(subscriptions
            .into_iter()
            .map(|s| SubscriptionWithStatus::new(s, now))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, user_id: Uuid, id: Uuid) -> AppResult<Subscription> {
        self.repo
            .get_for_user(user_id, id)
            .await?
            .ok_or(AppError::NotFound)
    }

    #[instrument(skip(self, changes))]
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: SubscriptionUpdate,
    ) -> AppResult<Subscription> {
        let mut subscription = self.get(user_id, id).await?;

        if let Some(name) = changes.name {
            subscription.name = name.trim().to_string();
        }
        if let Some(description) = changes.description {
            subscription.description = Some(description);
        }
        if let Some(amount) = changes.amount {
            subscription.amount = amount;
        }
        if let Some(currency) = changes.currency {
            subscription.currency = normalize_currency(Some(&currency))?;
        }
        if let Some(cycle) = changes.billing_cycle {
            subscription.billing_cycle = cycle;
        }
        if let Some(raw) = changes.start_date {
            subscription.start_date = schedule::parse_date(&raw)?;
        }
        if let Some(raw) = changes.next_payment_date {
            // Manual edits may set an arbitrary date; staleness is accepted.
            subscription.next_payment_date = schedule::parse_date(&raw)?;
        }
        if let Some(category) = changes.category {
            subscription.category = category.trim().to_string();
        }
        if let Some(logo) = changes.logo {
            subscription.logo = Some(logo);
        }
        if let Some(website) = changes.website {
            subscription.website = Some(website);
        }
        if let Some(color) = changes.color {
            subscription.color = Some(color);
        }
        if let Some(reminder_days) = changes.reminder_days {
            subscription.reminder_days = reminder_days;
        }
        if let Some(active) = changes.active {
            subscription.active = active;
        }
        validate(&subscription)?;

        self.repo.update(&subscription).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<()> {
        if !self.repo.delete_for_user(user_id, id).await? {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// Active subscriptions due within `[today, today + days_ahead]`,
    /// soonest first.
    #[instrument(skip(self))]
    pub async fn upcoming(
        &self,
        user_id: Uuid,
        today: NaiveDate,
        days_ahead: u32,
    ) -> AppResult<Vec<Subscription>> {
        let subscriptions = self.repo.list_for_user(user_id).await?;
        let mut hits: Vec<Subscription> = status::upcoming_within(&subscriptions, today, days_ahead)
            .into_iter()
            .cloned()
            .collect();
        hits.sort_by_key(|s| s.next_payment_date);
        Ok(hits)
    }

    #[instrument(skip(self))]
    pub async fn overview(
        &self,
        user_id: Uuid,
        today: NaiveDate,
        upcoming_days: u32,
    ) -> AppResult<SpendingOverview> {
        let subscriptions = self.repo.list_for_user(user_id).await?;
        Ok(SpendingOverview {
            summary: spending::spending_summary(&subscriptions),
            upcoming_count: status::upcoming_within(&subscriptions, today, upcoming_days).len(),
            categories: spending::count_by_category(&subscriptions),
        })
    }
}

fn normalize_currency(raw: Option<&str>) -> AppResult<String> {
    match raw {
        None => Ok(DEFAULT_CURRENCY.to_string()),
        Some(code) => {
            let code = code.trim();
            if !is_valid_currency_code(code) {
                return Err(AppError::InvalidInput(format!(
                    "Invalid currency code: {code}"
                )));
            }
            Ok(code.to_ascii_uppercase())
        }
    }
}

fn validate(subscription: &Subscription) -> AppResult<()> {
    if subscription.name.is_empty() {
        return Err(AppError::InvalidInput("Name must not be empty".into()));
    }
    if subscription.amount < Decimal::ZERO {
        return Err(AppError::InvalidInput(
            "Amount must not be negative".into(),
        ));
    }
    if subscription.reminder_days < 0 {
        return Err(AppError::InvalidInput(
            "Reminder lead time must not be negative".into(),
        ));
    }
    if subscription.category.is_empty() {
        return Err(AppError::InvalidInput("Category must not be empty".into()));
    }
    Ok(())
}
