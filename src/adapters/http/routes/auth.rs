use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::Deserialize;

use crate::{
    adapters::http::{app_state::AppState, routes::user::ProfileResponse},
    app_error::AppResult,
    application::jwt,
    use_cases::user::UserProfile,
};

#[derive(Deserialize)]
struct RegisterPayload {
    name: String,
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct LoginPayload {
    email: String,
    password: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> AppResult<impl IntoResponse> {
    let profile = app_state
        .auth_use_cases
        .register(&payload.name, &payload.email, &payload.password)
        .await?;
    let headers = session_headers(&app_state, &profile)?;
    Ok((StatusCode::CREATED, headers, Json(ProfileResponse::from(profile))))
}

async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> AppResult<impl IntoResponse> {
    let profile = app_state
        .auth_use_cases
        .login(&payload.email, &payload.password)
        .await?;
    let headers = session_headers(&app_state, &profile)?;
    Ok((StatusCode::OK, headers, Json(ProfileResponse::from(profile))))
}

async fn logout() -> AppResult<impl IntoResponse> {
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

fn session_headers(app_state: &AppState, profile: &UserProfile) -> AppResult<HeaderMap> {
    let access = jwt::issue(
        profile.id,
        &app_state.config.jwt_secret,
        app_state.config.access_token_ttl,
    )?;
    let mut headers = HeaderMap::new();
    let cookie = Cookie::build(("access_token", access))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build();
    headers.append("set-cookie", cookie.to_string().parse().unwrap());
    Ok(headers)
}
