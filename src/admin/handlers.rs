use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{AdminUserView, PlatformStats, SetRoleRequest};
use crate::{
    auth::{extractors::AdminUser, repo_types::Role},
    error::{AppError, AppResult},
    extract::{AppJson, AppPath},
    response::DataResponse,
    state::AppState,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/:user_id/role", put(set_role))
        .route("/admin/stats", get(stats))
}

#[instrument(skip(state, _admin))]
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<DataResponse<Vec<AdminUserView>>>> {
    let users = state.users.list().await?;
    Ok(Json(DataResponse::new(
        users.into_iter().map(AdminUserView::from).collect(),
    )))
}

#[instrument(skip(state, admin, body), fields(admin_id = %admin.0.id))]
pub async fn set_role(
    State(state): State<AppState>,
    admin: AdminUser,
    AppPath(user_id): AppPath<Uuid>,
    AppJson(body): AppJson<SetRoleRequest>,
) -> AppResult<Json<DataResponse<AdminUserView>>> {
    let role: Role = body
        .role
        .trim()
        .parse()
        .map_err(|_| AppError::bad_request("Invalid role"))?;

    let user = state
        .users
        .set_role(user_id, role)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    info!(%user_id, %role, "role updated");
    Ok(Json(DataResponse::with_message(
        user.into(),
        "Role updated successfully",
    )))
}

#[instrument(skip(state, _admin))]
pub async fn stats(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<DataResponse<PlatformStats>>> {
    let by_status = state.freelancers.count_by_status().await?;
    let stats = PlatformStats {
        total_users: state.users.count().await?,
        total_freelancers: by_status.values().sum(),
        total_reports: state.reports.count().await?,
        freelancers_by_status: by_status
            .into_iter()
            .map(|(status, n)| (status.to_string(), n))
            .collect(),
    };
    Ok(Json(DataResponse::new(stats)))
}
