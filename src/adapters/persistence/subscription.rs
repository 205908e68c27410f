use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::subscription::{BillingCycle, Subscription},
    use_cases::subscription::SubscriptionRepo,
};

// Subscription row as stored in the db. The cycle is TEXT; parsing it back
// out is where a corrupted value surfaces as InvalidCycle.
#[derive(FromRow, Debug)]
struct SubscriptionDb {
    id: Uuid,
    user_id: Uuid,
    name: String,
    description: Option<String>,
    amount: Decimal,
    currency: String,
    billing_cycle: String,
    start_date: NaiveDate,
    next_payment_date: NaiveDate,
    category: String,
    logo: Option<String>,
    website: Option<String>,
    color: Option<String>,
    reminder_days: i32,
    active: bool,
    created_at: Option<NaiveDateTime>,
    updated_at: Option<NaiveDateTime>,
}

impl TryFrom<SubscriptionDb> for Subscription {
    type Error = AppError;

    fn try_from(row: SubscriptionDb) -> AppResult<Subscription> {
        let billing_cycle = BillingCycle::parse(&row.billing_cycle)
            .ok_or_else(|| AppError::InvalidCycle(row.billing_cycle.clone()))?;
        Ok(Subscription {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            description: row.description,
            amount: row.amount,
            currency: row.currency,
            billing_cycle,
            start_date: row.start_date,
            next_payment_date: row.next_payment_date,
            category: row.category,
            logo: row.logo,
            website: row.website,
            color: row.color,
            reminder_days: row.reminder_days,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const COLUMNS: &str = "id, user_id, name, description, amount, currency, billing_cycle, \
     start_date, next_payment_date, category, logo, website, color, reminder_days, active, \
     created_at, updated_at";

#[async_trait]
impl SubscriptionRepo for PostgresPersistence {
    async fn insert(&self, subscription: &Subscription) -> AppResult<Subscription> {
        let rec = sqlx::query_as::<_, SubscriptionDb>(&format!(
            "INSERT INTO subscriptions
                 (id, user_id, name, description, amount, currency, billing_cycle,
                  start_date, next_payment_date, category, logo, website, color,
                  reminder_days, active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             RETURNING {COLUMNS}"
        ))
        .bind(subscription.id)
        .bind(subscription.user_id)
        .bind(&subscription.name)
        .bind(&subscription.description)
        .bind(subscription.amount)
        .bind(&subscription.currency)
        .bind(subscription.billing_cycle.as_str())
        .bind(subscription.start_date)
        .bind(subscription.next_payment_date)
        .bind(&subscription.category)
        .bind(&subscription.logo)
        .bind(&subscription.website)
        .bind(&subscription.color)
        .bind(subscription.reminder_days)
        .bind(subscription.active)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        rec.try_into()
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Subscription>> {
        let rows = sqlx::query_as::<_, SubscriptionDb>(&format!(
            "SELECT {COLUMNS} FROM subscriptions
             WHERE user_id = $1
             ORDER BY next_payment_date, created_at"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        rows.into_iter().map(Subscription::try_from).collect()
    }

    async fn get_for_user(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Subscription>> {
        let rec = sqlx::query_as::<_, SubscriptionDb>(&format!(
            "SELECT {COLUMNS} FROM subscriptions WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        rec.map(Subscription::try_from).transpose()
    }

    async fn update(&self, subscription: &Subscription) -> AppResult<Subscription> {
        let rec = sqlx::query_as::<_, SubscriptionDb>(&format!(
            "UPDATE subscriptions
             SET name = $3, description = $4, amount = $5, currency = $6,
                 billing_cycle = $7, start_date = $8, next_payment_date = $9,
                 category = $10, logo = $11, website = $12, color = $13,
                 reminder_days = $14, active = $15, updated_at = now()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        ))
        .bind(subscription.id)
        .bind(subscription.user_id)
        .bind(&subscription.name)
        .bind(&subscription.description)
        .bind(subscription.amount)
        .bind(&subscription.currency)
        .bind(subscription.billing_cycle.as_str())
        .bind(subscription.start_date)
        .bind(subscription.next_payment_date)
        .bind(&subscription.category)
        .bind(&subscription.logo)
        .bind(&subscription.website)
        .bind(&subscription.color)
        .bind(subscription.reminder_days)
        .bind(subscription.active)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        rec.try_into()
    }

    async fn delete_for_user(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;
        Ok(result.rows_affected() > 0)
    }
}
