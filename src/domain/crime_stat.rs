//! CrimeStat aggregate snapshot.
//!
//! A derived, disposable projection over the report stream. Rows are unique
//! per (incident_type, user_role, status) triple and carry a per-status
//! breakdown of report counts for a reporting period.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::report::{Category, ReportStatus};
use crate::domain::user::Role;

/// Crime statistics aggregate row.
#[derive(Debug, Clone, Serialize)]
pub struct CrimeStat {
    pub id: Uuid,
    pub incident_type: Category,
    /// Role scope this statistic was computed for.
    pub user_role: Role,
    /// Summary status tag for the row.
    pub status: ReportStatus,
    pub total_reports: u32,
    pub pending: u32,
    pub in_progress: u32,
    pub resolved: u32,
    pub rejected: u32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new aggregate row, before the database assigns identity
/// and timestamps.
#[derive(Debug, Clone)]
pub struct NewCrimeStat {
    pub incident_type: Category,
    pub user_role: Role,
    pub status: ReportStatus,
    pub total_reports: u32,
    pub pending: u32,
    pub in_progress: u32,
    pub resolved: u32,
    pub rejected: u32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// CrimeStat response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CrimeStatResponse {
    pub id: Uuid,
    #[schema(example = "theft")]
    pub incident_type: Category,
    #[schema(example = "citizen")]
    pub user_role: Role,
    #[schema(example = "pending")]
    pub status: ReportStatus,
    #[schema(example = 75)]
    pub total_reports: u32,
    pub pending: u32,
    pub in_progress: u32,
    pub resolved: u32,
    pub rejected: u32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

impl From<CrimeStat> for CrimeStatResponse {
    fn from(s: CrimeStat) -> Self {
        Self {
            id: s.id,
            incident_type: s.incident_type,
            user_role: s.user_role,
            status: s.status,
            total_reports: s.total_reports,
            pending: s.pending,
            in_progress: s.in_progress,
            resolved: s.resolved,
            rejected: s.rejected,
            start_date: s.start_date,
            end_date: s.end_date,
            updated_at: s.updated_at,
        }
    }
}
