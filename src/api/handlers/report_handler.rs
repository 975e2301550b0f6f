//! Report handlers - submission, listing, triage, and deletion.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::report::{status_choices, Category, ReportStatus, StatusChoice};
use crate::domain::ReportResponse;
use crate::errors::AppResult;

/// Report submission request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReportRequest {
    /// Crime category
    #[schema(example = "theft")]
    pub category: Category,
    /// What happened
    #[validate(length(min = 1, message = "Description is required"))]
    #[schema(example = "Bicycle stolen from the station rack")]
    pub description: String,
    /// Incident latitude
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    #[schema(example = 52.37)]
    pub latitude: f64,
    /// Incident longitude
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    #[schema(example = 4.89)]
    pub longitude: f64,
}

/// Report status update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReportStatusRequest {
    /// New status; any of the four values may be set in one step
    #[schema(example = "in_progress")]
    pub status: ReportStatus,
}

/// Report listing with the status choices clients use to build dropdowns
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportListResponse {
    pub reports: Vec<ReportResponse>,
    pub status_choices: Vec<StatusChoice>,
}

/// Create report routes
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reports).post(create_report))
        .route(
            "/:id",
            get(get_report).patch(update_report_status).delete(delete_report),
        )
}

/// Submit a new report
#[utoipa::path(
    post,
    path = "/reports",
    tag = "Reports",
    security(("bearer_auth" = [])),
    request_body = CreateReportRequest,
    responses(
        (status = 201, description = "Report submitted with status pending", body = ReportResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_report(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateReportRequest>,
) -> AppResult<(StatusCode, Json<ReportResponse>)> {
    let report = state
        .report_service
        .create_report(
            &current_user.actor(),
            payload.category,
            payload.description,
            payload.latitude,
            payload.longitude,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ReportResponse::from(report))))
}

/// List reports: all for triage roles, own submissions for citizens
#[utoipa::path(
    get,
    path = "/reports",
    tag = "Reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Reports visible to the caller, newest first", body = ReportListResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_reports(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ReportListResponse>> {
    let reports = state
        .report_service
        .list_reports(&current_user.actor())
        .await?;

    Ok(Json(ReportListResponse {
        reports: reports.into_iter().map(ReportResponse::from).collect(),
        status_choices: status_choices(),
    }))
}

/// Get a single report
#[utoipa::path(
    get,
    path = "/reports/{id}",
    tag = "Reports",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Report id")),
    responses(
        (status = 200, description = "The report", body = ReportResponse),
        (status = 403, description = "Citizen requesting someone else's report"),
        (status = 404, description = "Report not found")
    )
)]
pub async fn get_report(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ReportResponse>> {
    let report = state
        .report_service
        .get_report(&current_user.actor(), id)
        .await?;

    Ok(Json(ReportResponse::from(report)))
}

/// Update a report's status (law enforcement and admin only)
#[utoipa::path(
    patch,
    path = "/reports/{id}",
    tag = "Reports",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Report id")),
    request_body = UpdateReportStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ReportResponse),
        (status = 403, description = "Citizens cannot update report status"),
        (status = 404, description = "Report not found")
    )
)]
pub async fn update_report_status(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateReportStatusRequest>,
) -> AppResult<Json<ReportResponse>> {
    let report = state
        .report_service
        .update_status(&current_user.actor(), id, payload.status)
        .await?;

    Ok(Json(ReportResponse::from(report)))
}

/// Delete a resolved report (admin only)
#[utoipa::path(
    delete,
    path = "/reports/{id}",
    tag = "Reports",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Report id")),
    responses(
        (status = 204, description = "Report deleted"),
        (status = 403, description = "Not an admin, or report not resolved"),
        (status = 404, description = "Report not found")
    )
)]
pub async fn delete_report(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state
        .report_service
        .delete_report(&current_user.actor(), id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
