use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{CreateReportRequest, ReportQuery},
    repo_types::{NewReport, Report, ReportKind},
};
use crate::{
    auth::extractors::{AdminUser, AuthUser},
    error::{AppError, AppResult},
    extract::{AppJson, AppPath, AppQuery},
    pagination::clamp_limit,
    response::{DataResponse, MessageResponse},
    state::AppState,
};

pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/reports", get(list_reports).post(create_report))
        .route("/reports/:id", get(get_report).delete(delete_report))
}

fn parse_kind(raw: &str) -> AppResult<ReportKind> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::bad_request(format!("Invalid report type: {raw}")))
}

#[instrument(skip(state, _user))]
pub async fn list_reports(
    State(state): State<AppState>,
    _user: AuthUser,
    AppQuery(q): AppQuery<ReportQuery>,
) -> AppResult<Json<DataResponse<Vec<Report>>>> {
    let kind = match q.kind.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(parse_kind(raw)?),
    };
    let reports = state.reports.list(kind, clamp_limit(q.limit)).await?;
    Ok(Json(DataResponse::new(reports)))
}

#[instrument(skip(state, _user))]
pub async fn get_report(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<DataResponse<Report>>> {
    let report = state
        .reports
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Report not found"))?;
    Ok(Json(DataResponse::new(report)))
}

#[instrument(skip(state, body), fields(user_id = %user.id))]
pub async fn create_report(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(body): AppJson<CreateReportRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Report>>)> {
    let title = body.title.trim();
    let kind = match body.kind.as_deref() {
        Some(raw) if !title.is_empty() => parse_kind(raw)?,
        _ => return Err(AppError::bad_request("Title and type are required")),
    };

    let report = state
        .reports
        .create(NewReport {
            title: title.to_string(),
            description: body.description,
            kind,
            data: body.data.unwrap_or_else(|| json!({})),
            created_by: Some(user.id),
        })
        .await?;

    info!(report_id = %report.id, kind = %report.kind, "report created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(
            report,
            "Report created successfully",
        )),
    ))
}

#[instrument(skip(state, admin), fields(user_id = %admin.0.id))]
pub async fn delete_report(
    State(state): State<AppState>,
    admin: AdminUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    if !state.reports.delete(id).await? {
        return Err(AppError::not_found("Report not found"));
    }
    info!(report_id = %id, "report deleted");
    Ok(Json(MessageResponse::new("Report deleted successfully")))
}
