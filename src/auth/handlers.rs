use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            is_valid_email, normalize_email, AuthResponse, MeResponse, PublicUser, SigninRequest,
            SignupRequest, MIN_PASSWORD_LEN,
        },
        extractors::AuthUser,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo_types::{NewUser, Role},
    },
    error::{AppError, AppResult},
    extract::AppJson,
    response::MessageResponse,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/signin", post(signin))
        .route("/auth/signout", post(signout))
        .route("/auth/me", get(me))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let email = normalize_email(&payload.email);
    let full_name = payload.full_name.trim();

    if !is_valid_email(&email) {
        warn!(%email, "invalid email");
        return Err(AppError::bad_request("Invalid email"));
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::bad_request("Password too short"));
    }
    if full_name.is_empty() {
        return Err(AppError::bad_request("Full name is required"));
    }

    let role = match payload.role.as_deref() {
        None => Role::Client,
        Some(raw) => raw
            .parse::<Role>()
            .ok()
            .filter(|r| r.allowed_at_signup())
            .ok_or_else(|| AppError::bad_request("Invalid role specified"))?,
    };

    let hash = hash_password(&payload.password)?;

    let user = state
        .users
        .create(NewUser {
            email: &email,
            password_hash: &hash,
            full_name,
            role,
        })
        .await?
        .ok_or_else(|| {
            warn!(%email, "email already registered");
            AppError::Conflict("Email already registered".into())
        })?;

    let token = JwtKeys::from_ref(&state).sign(&user)?;

    info!(user_id = %user.id, email = %user.email, role = %user.role, "user signed up");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn signin(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SigninRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = normalize_email(&payload.email);
    if email.is_empty() || payload.password.is_empty() {
        return Err(AppError::bad_request("Email and password required"));
    }

    let Some(user) = state.users.find_by_email(&email).await? else {
        warn!(%email, "signin unknown email");
        return Err(AppError::unauthorized("Invalid credentials"));
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(%email, user_id = %user.id, "signin invalid password");
        return Err(AppError::unauthorized("Invalid credentials"));
    }

    let token = JwtKeys::from_ref(&state).sign(&user)?;

    info!(user_id = %user.id, "user signed in");
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// Tokens are stateless; the client drops its copy.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn signout(user: AuthUser) -> Json<MessageResponse> {
    info!("user signed out");
    Json(MessageResponse::new("Logged out successfully"))
}

#[instrument(skip(state))]
pub async fn me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<MeResponse>> {
    let found = state
        .users
        .find_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(MeResponse {
        user: PublicUser::from(found),
    }))
}
