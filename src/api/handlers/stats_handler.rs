//! Statistics handlers - summary rollups and CrimeStat aggregates.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Extension, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::crime_stat::NewCrimeStat;
use crate::domain::report::{Category, ReportStatus};
use crate::domain::user::Role;
use crate::domain::CrimeStatResponse;
use crate::errors::AppResult;
use crate::services::SummaryResponse;

/// New CrimeStat aggregate row (admin recompute endpoint)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecordCrimeStatRequest {
    /// Incident category this row aggregates
    #[schema(example = "theft")]
    pub incident_type: Category,
    /// Role scope the statistic was computed for
    #[schema(example = "citizen")]
    pub user_role: Role,
    /// Summary status tag for the row
    #[schema(example = "pending")]
    pub status: ReportStatus,
    /// Total reports in the period
    #[schema(example = 75)]
    pub total_reports: u32,
    #[serde(default)]
    pub pending: u32,
    #[serde(default)]
    pub in_progress: u32,
    #[serde(default)]
    pub resolved: u32,
    #[serde(default)]
    pub rejected: u32,
    /// Reporting period start
    pub start_date: NaiveDate,
    /// Reporting period end, if closed
    pub end_date: Option<NaiveDate>,
}

impl From<RecordCrimeStatRequest> for NewCrimeStat {
    fn from(r: RecordCrimeStatRequest) -> Self {
        Self {
            incident_type: r.incident_type,
            user_role: r.user_role,
            status: r.status,
            total_reports: r.total_reports,
            pending: r.pending,
            in_progress: r.in_progress,
            resolved: r.resolved,
            rejected: r.rejected,
            start_date: r.start_date,
            end_date: r.end_date,
        }
    }
}

/// Create statistics routes
pub fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(get_summary))
        .route("/crime", get(list_crime_stats).post(record_crime_stat))
}

/// Role-shaped statistics summary, recomputed per request
#[utoipa::path(
    get,
    path = "/stats/summary",
    tag = "Statistics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Summary rollup shaped by the caller's role", body = SummaryResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_summary(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<SummaryResponse>> {
    let summary = state.stats_service.summary(&current_user.actor()).await?;
    Ok(Json(summary))
}

/// List CrimeStat aggregate rows (law enforcement and admin)
#[utoipa::path(
    get,
    path = "/stats/crime",
    tag = "Statistics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Aggregate rows, most recently updated first", body = [CrimeStatResponse]),
        (status = 403, description = "Citizens cannot read aggregates")
    )
)]
pub async fn list_crime_stats(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<CrimeStatResponse>>> {
    let stats = state
        .stats_service
        .list_crime_stats(&current_user.actor())
        .await?;

    Ok(Json(stats.into_iter().map(CrimeStatResponse::from).collect()))
}

/// Record a new aggregate row and notify triage users (admin only)
#[utoipa::path(
    post,
    path = "/stats/crime",
    tag = "Statistics",
    security(("bearer_auth" = [])),
    request_body = RecordCrimeStatRequest,
    responses(
        (status = 201, description = "Aggregate row recorded", body = CrimeStatResponse),
        (status = 403, description = "Not an admin"),
        (status = 409, description = "Row already exists for this (type, role, status) triple")
    )
)]
pub async fn record_crime_stat(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<RecordCrimeStatRequest>,
) -> AppResult<(StatusCode, Json<CrimeStatResponse>)> {
    let stat = state
        .stats_service
        .record_crime_stat(&current_user.actor(), payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(CrimeStatResponse::from(stat))))
}
