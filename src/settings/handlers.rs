use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::{info, instrument};

use super::{
    dto::PutSettingRequest,
    repo_types::{Setting, SettingUpsert},
};
use crate::{
    auth::extractors::{AdminUser, AuthUser},
    error::{AppError, AppResult},
    extract::{AppJson, AppPath},
    response::{DataResponse, MessageResponse},
    state::AppState,
};

pub fn setting_routes() -> Router<AppState> {
    Router::new().route("/settings", get(list_settings)).route(
        "/settings/:key",
        get(get_setting).put(put_setting).delete(delete_setting),
    )
}

#[instrument(skip(state, _user))]
pub async fn list_settings(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Setting>>>> {
    Ok(Json(DataResponse::new(state.settings.list().await?)))
}

#[instrument(skip(state, _user))]
pub async fn get_setting(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(key): AppPath<String>,
) -> AppResult<Json<DataResponse<Setting>>> {
    let setting = state
        .settings
        .get(&key)
        .await?
        .ok_or_else(|| AppError::not_found("Setting not found"))?;
    Ok(Json(DataResponse::new(setting)))
}

#[instrument(skip(state, admin, body), fields(user_id = %admin.0.id))]
pub async fn put_setting(
    State(state): State<AppState>,
    admin: AdminUser,
    AppPath(key): AppPath<String>,
    AppJson(body): AppJson<PutSettingRequest>,
) -> AppResult<Json<DataResponse<Setting>>> {
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(AppError::bad_request("Setting key is required"));
    }

    let setting = state
        .settings
        .upsert(SettingUpsert {
            key,
            value: body.value.unwrap_or_else(|| json!({})),
            description: body.description,
            updated_by: admin.0.id,
        })
        .await?;

    info!(key = %setting.key, "setting saved");
    Ok(Json(DataResponse::with_message(
        setting,
        "Setting saved successfully",
    )))
}

#[instrument(skip(state, admin), fields(user_id = %admin.0.id))]
pub async fn delete_setting(
    State(state): State<AppState>,
    admin: AdminUser,
    AppPath(key): AppPath<String>,
) -> AppResult<Json<MessageResponse>> {
    if !state.settings.delete(&key).await? {
        return Err(AppError::not_found("Setting not found"));
    }
    info!(%key, "setting deleted");
    Ok(Json(MessageResponse::new("Setting deleted successfully")))
}
