use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::{app_state::AppState, routes::current_user_id},
    app_error::AppResult,
    application::billing::status,
    domain::entities::subscription::{BillingCycle, DueStatus},
    use_cases::subscription::{
        NewSubscription, SubscriptionUpdate, SubscriptionWithStatus,
    },
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/stats", get(stats))
        .route("/upcoming", get(upcoming))
        .route(
            "/{id}",
            get(get_one).patch(update_one).delete(delete_one),
        )
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePayload {
    name: String,
    description: Option<String>,
    amount: Decimal,
    currency: Option<String>,
    billing_cycle: BillingCycle,
    start_date: String,
    next_payment_date: Option<String>,
    category: String,
    logo: Option<String>,
    website: Option<String>,
    color: Option<String>,
    reminder_days: Option<i32>,
    active: Option<bool>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UpdatePayload {
    name: Option<String>,
    description: Option<String>,
    amount: Option<Decimal>,
    currency: Option<String>,
    billing_cycle: Option<BillingCycle>,
    start_date: Option<String>,
    next_payment_date: Option<String>,
    category: Option<String>,
    logo: Option<String>,
    website: Option<String>,
    color: Option<String>,
    reminder_days: Option<i32>,
    active: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionResponse {
    id: Uuid,
    name: String,
    description: Option<String>,
    amount: Decimal,
    currency: String,
    billing_cycle: BillingCycle,
    start_date: NaiveDate,
    next_payment_date: NaiveDate,
    category: String,
    logo: Option<String>,
    website: Option<String>,
    color: Option<String>,
    reminder_days: i32,
    active: bool,
    days_till_payment: i64,
    due_status: DueStatus,
    status_label: String,
}

impl From<SubscriptionWithStatus> for SubscriptionResponse {
    fn from(item: SubscriptionWithStatus) -> Self {
        let sub = item.subscription;
        SubscriptionResponse {
            id: sub.id,
            name: sub.name,
            description: sub.description,
            amount: sub.amount,
            currency: sub.currency,
            billing_cycle: sub.billing_cycle,
            start_date: sub.start_date,
            next_payment_date: sub.next_payment_date,
            category: sub.category,
            logo: sub.logo,
            website: sub.website,
            color: sub.color,
            reminder_days: sub.reminder_days,
            active: sub.active,
            days_till_payment: item.days_till_payment,
            due_status: item.due_status,
            status_label: status::status_label(item.days_till_payment),
        }
    }
}

#[derive(Serialize)]
struct ListResponse<T> {
    items: Vec<T>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsResponse {
    monthly_spending: Decimal,
    yearly_spending: Decimal,
    active_count: usize,
    total_count: usize,
    average_per_subscription: Decimal,
    upcoming_count: usize,
    categories: HashMap<String, usize>,
}

#[derive(Deserialize)]
struct UpcomingParams {
    days: Option<u32>,
}

async fn list(
    State(app_state): State<AppState>,
    cookies: CookieJar,
) -> AppResult<impl IntoResponse> {
    let user_id = current_user_id(&cookies, &app_state)?;
    // The clock is read once at the boundary; the engine only ever sees it
    // as a parameter.
    let now = Utc::now().naive_utc();
    let items = app_state
        .subscription_use_cases
        .list_with_status(user_id, now)
        .await?;
    Ok(Json(ListResponse {
        items: items.into_iter().map(SubscriptionResponse::from).collect(),
    }))
}

async fn create(
    State(app_state): State<AppState>,
    cookies: CookieJar,
    Json(payload): Json<CreatePayload>,
) -> AppResult<impl IntoResponse> {
    let user_id = current_user_id(&cookies, &app_state)?;
    let now = Utc::now().naive_utc();
    let input = NewSubscription {
        name: payload.name,
        description: payload.description,
        amount: payload.amount,
        currency: payload.currency,
        billing_cycle: payload.billing_cycle,
        start_date: payload.start_date,
        next_payment_date: payload.next_payment_date,
        category: payload.category,
        logo: payload.logo,
        website: payload.website,
        color: payload.color,
        reminder_days: payload.reminder_days,
        active: payload.active,
    };
    let created = app_state.subscription_use_cases.create(user_id, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubscriptionResponse::from(SubscriptionWithStatus::new(
            created, now,
        ))),
    ))
}

async fn get_one(
    State(app_state): State<AppState>,
    cookies: CookieJar,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let user_id = current_user_id(&cookies, &app_state)?;
    let now = Utc::now().naive_utc();
    let subscription = app_state.subscription_use_cases.get(user_id, id).await?;
    Ok(Json(SubscriptionResponse::from(SubscriptionWithStatus::new(
        subscription,
        now,
    ))))
}

async fn update_one(
    State(app_state): State<AppState>,
    cookies: CookieJar,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePayload>,
) -> AppResult<impl IntoResponse> {
    let user_id = current_user_id(&cookies, &app_state)?;
    let now = Utc::now().naive_utc();
    let changes = SubscriptionUpdate {
        name: payload.name,
        description: payload.description,
        amount: payload.amount,
        currency: payload.currency,
        billing_cycle: payload.billing_cycle,
        start_date: payload.start_date,
        next_payment_date: payload.next_payment_date,
        category: payload.category,
        logo: payload.logo,
        website: payload.website,
        color: payload.color,
        reminder_days: payload.reminder_days,
        active: payload.active,
    };
    let updated = app_state
        .subscription_use_cases
        .update(user_id, id, changes)
        .await?;
    Ok(Json(SubscriptionResponse::from(SubscriptionWithStatus::new(
        updated, now,
    ))))
}

async fn delete_one(
    State(app_state): State<AppState>,
    cookies: CookieJar,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let user_id = current_user_id(&cookies, &app_state)?;
    app_state.subscription_use_cases.delete(user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn stats(
    State(app_state): State<AppState>,
    cookies: CookieJar,
) -> AppResult<impl IntoResponse> {
    let user_id = current_user_id(&cookies, &app_state)?;
    let today = Utc::now().date_naive();
    let overview = app_state
        .subscription_use_cases
        .overview(user_id, today, app_state.config.upcoming_window_days)
        .await?;
    // Full precision stays in the engine; responses round to cents.
    Ok(Json(StatsResponse {
        monthly_spending: overview.summary.monthly_spending.round_dp(2),
        yearly_spending: overview.summary.yearly_spending.round_dp(2),
        active_count: overview.summary.active_count,
        total_count: overview.summary.total_count,
        average_per_subscription: overview.summary.average_per_subscription.round_dp(2),
        upcoming_count: overview.upcoming_count,
        categories: overview.categories,
    }))
}

async fn upcoming(
    State(app_state): State<AppState>,
    cookies: CookieJar,
    Query(params): Query<UpcomingParams>,
) -> AppResult<impl IntoResponse> {
    let user_id = current_user_id(&cookies, &app_state)?;
    let now = Utc::now().naive_utc();
    let days = params
        .days
        .unwrap_or(app_state.config.upcoming_window_days);
    let hits = app_state
        .subscription_use_cases
        .upcoming(user_id, now.date(), days)
        .await?;
    Ok(Json(ListResponse {
        items: hits
            .into_iter()
            .map(|s| SubscriptionResponse::from(SubscriptionWithStatus::new(s, now)))
            .collect(),
    }))
}
