use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{CreateFreelancerRequest, FreelancerPage, ListQuery, UpdateFreelancerRequest},
    repo_types::{Freelancer, FreelancerFilter, FreelancerStatus},
};
use crate::{
    auth::{
        dto::is_valid_email,
        extractors::{AdminUser, AuthUser},
        repo_types::Role,
    },
    error::{AppError, AppResult},
    extract::{AppJson, AppPath, AppQuery},
    pagination::{clamp_limit, clamp_offset},
    response::{DataResponse, MessageResponse},
    state::AppState,
};

pub fn freelancer_routes() -> Router<AppState> {
    Router::new()
        .route("/freelancers", get(list_freelancers).post(create_freelancer))
        .route(
            "/freelancers/:id",
            get(get_freelancer)
                .put(update_freelancer)
                .delete(delete_freelancer),
        )
}

fn not_found() -> AppError {
    AppError::not_found("Freelancer not found")
}

#[instrument(skip(state, _user))]
pub async fn list_freelancers(
    State(state): State<AppState>,
    _user: AuthUser,
    AppQuery(q): AppQuery<ListQuery>,
) -> AppResult<Json<FreelancerPage>> {
    let status = match q.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<FreelancerStatus>()
                .map_err(|_| AppError::bad_request("Invalid status filter"))?,
        ),
    };
    let search = q
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let filter = FreelancerFilter {
        status,
        search,
        limit: clamp_limit(q.limit),
        offset: clamp_offset(q.offset),
    };
    let (data, count) = state.freelancers.list(&filter).await?;

    Ok(Json(FreelancerPage {
        data,
        count,
        limit: filter.limit,
        offset: filter.offset,
    }))
}

#[instrument(skip(state, _user))]
pub async fn get_freelancer(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<DataResponse<Freelancer>>> {
    let freelancer = state.freelancers.get(id).await?.ok_or_else(not_found)?;
    Ok(Json(DataResponse::new(freelancer)))
}

#[instrument(skip(state, body), fields(user_id = %user.id))]
pub async fn create_freelancer(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(body): AppJson<CreateFreelancerRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Freelancer>>)> {
    if body.name.trim().is_empty() || body.email.trim().is_empty() {
        return Err(AppError::bad_request("Name and email are required"));
    }
    if !is_valid_email(body.email.trim()) {
        return Err(AppError::bad_request("Invalid email"));
    }
    if body.hourly_rate.is_some_and(|r| r < 0.0) || body.experience_years.is_some_and(|y| y < 0) {
        return Err(AppError::bad_request("Rate and experience must not be negative"));
    }

    let created = state.freelancers.create(body.into_new(user.id)).await?;

    info!(freelancer_id = %created.id, "freelancer created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(
            created,
            "Freelancer created successfully",
        )),
    ))
}

#[instrument(skip(state, body), fields(user_id = %user.id))]
pub async fn update_freelancer(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<UpdateFreelancerRequest>,
) -> AppResult<Json<DataResponse<Freelancer>>> {
    let existing = state.freelancers.get(id).await?.ok_or_else(not_found)?;
    if existing.user_id != Some(user.id)
        && user.current_role(state.users.as_ref()).await? != Role::Admin
    {
        warn!(freelancer_id = %id, "update denied: not owner");
        return Err(AppError::forbidden(
            "Not authorized to update this freelancer",
        ));
    }
    if body.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::bad_request("Name must not be empty"));
    }
    if body.email.as_deref().is_some_and(|e| !is_valid_email(e.trim())) {
        return Err(AppError::bad_request("Invalid email"));
    }

    let updated = state
        .freelancers
        .update(id, body.into())
        .await?
        .ok_or_else(not_found)?;

    info!(freelancer_id = %id, "freelancer updated");
    Ok(Json(DataResponse::with_message(
        updated,
        "Freelancer updated successfully",
    )))
}

#[instrument(skip(state, admin), fields(user_id = %admin.0.id))]
pub async fn delete_freelancer(
    State(state): State<AppState>,
    admin: AdminUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    if !state.freelancers.delete(id).await? {
        return Err(not_found());
    }
    info!(freelancer_id = %id, "freelancer deleted");
    Ok(Json(MessageResponse::new("Freelancer deleted successfully")))
}
