use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::{app_state::AppState, routes::current_user_id},
    app_error::AppResult,
    use_cases::user::{ReminderSettings, UserProfile},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route("/reminders", get(get_reminders).patch(update_reminders))
        .route("/delete", delete(delete_account))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub reminders_enabled: bool,
    pub default_reminder_days: i32,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        ProfileResponse {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            reminders_enabled: profile.reminders_enabled,
            default_reminder_days: profile.default_reminder_days,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RemindersResponse {
    enabled: bool,
    days_before_due: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemindersPayload {
    enabled: Option<bool>,
    days_before_due: Option<i32>,
}

async fn get_me(
    State(app_state): State<AppState>,
    cookies: CookieJar,
) -> AppResult<impl IntoResponse> {
    let user_id = current_user_id(&cookies, &app_state)?;
    let profile = app_state.auth_use_cases.profile(user_id).await?;
    Ok(Json(ProfileResponse::from(profile)))
}

async fn get_reminders(
    State(app_state): State<AppState>,
    cookies: CookieJar,
) -> AppResult<impl IntoResponse> {
    let user_id = current_user_id(&cookies, &app_state)?;
    let profile = app_state.auth_use_cases.profile(user_id).await?;
    Ok(Json(RemindersResponse {
        enabled: profile.reminders_enabled,
        days_before_due: profile.default_reminder_days,
    }))
}

async fn update_reminders(
    State(app_state): State<AppState>,
    cookies: CookieJar,
    Json(payload): Json<RemindersPayload>,
) -> AppResult<impl IntoResponse> {
    let user_id = current_user_id(&cookies, &app_state)?;
    let current = app_state.auth_use_cases.profile(user_id).await?;
    let settings = ReminderSettings {
        enabled: payload.enabled.unwrap_or(current.reminders_enabled),
        days_before_due: payload
            .days_before_due
            .unwrap_or(current.default_reminder_days),
    };
    let profile = app_state
        .auth_use_cases
        .update_reminder_settings(user_id, settings)
        .await?;
    Ok(Json(RemindersResponse {
        enabled: profile.reminders_enabled,
        days_before_due: profile.default_reminder_days,
    }))
}

async fn delete_account(
    State(app_state): State<AppState>,
    cookies: CookieJar,
) -> AppResult<(StatusCode, HeaderMap)> {
    let user_id = current_user_id(&cookies, &app_state)?;

    app_state.auth_use_cases.delete_account(user_id).await?;

    let mut headers = HeaderMap::new();
    let cookie = Cookie::build(("access_token", ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(0))
        .build();
    headers.append("set-cookie", cookie.to_string().parse().unwrap());

    Ok((StatusCode::NO_CONTENT, headers))
}
