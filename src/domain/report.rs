//! Report domain entity and its status lifecycle types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Crime categories accepted on a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Theft,
    Assault,
    Fraud,
    Vandalism,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Theft => "theft",
            Category::Assault => "assault",
            Category::Fraud => "fraud",
            Category::Vandalism => "vandalism",
            Category::Other => "other",
        }
    }
}

impl TryFrom<&str> for Category {
    type Error = AppError;

    fn try_from(s: &str) -> AppResult<Self> {
        match s {
            "theft" => Ok(Category::Theft),
            "assault" => Ok(Category::Assault),
            "fraud" => Ok(Category::Fraud),
            "vandalism" => Ok(Category::Vandalism),
            "other" => Ok(Category::Other),
            other => Err(AppError::validation(format!("Invalid category: {}", other))),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report status lifecycle.
///
/// `Pending` is the initial state. Any of the four values may be set in one
/// step by an authorized triage actor; there is no adjacency constraint
/// between states. No status transitions happen automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    InProgress,
    Resolved,
    Rejected,
}

impl ReportStatus {
    /// All statuses with their display labels, for the UI choices payload.
    pub const ALL: [ReportStatus; 4] = [
        ReportStatus::Pending,
        ReportStatus::InProgress,
        ReportStatus::Resolved,
        ReportStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::InProgress => "in_progress",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Rejected => "rejected",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "Pending",
            ReportStatus::InProgress => "In Progress",
            ReportStatus::Resolved => "Resolved",
            ReportStatus::Rejected => "Rejected",
        }
    }
}

impl TryFrom<&str> for ReportStatus {
    type Error = AppError;

    fn try_from(s: &str) -> AppResult<Self> {
        match s {
            "pending" => Ok(ReportStatus::Pending),
            "in_progress" => Ok(ReportStatus::InProgress),
            "resolved" => Ok(ReportStatus::Resolved),
            "rejected" => Ok(ReportStatus::Rejected),
            other => Err(AppError::validation(format!("Invalid status: {}", other))),
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status value/label pair surfaced to clients building status dropdowns.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatusChoice {
    #[schema(example = "in_progress")]
    pub value: &'static str,
    #[schema(example = "In Progress")]
    pub label: &'static str,
}

/// All report status choices.
pub fn status_choices() -> Vec<StatusChoice> {
    ReportStatus::ALL
        .iter()
        .map(|s| StatusChoice {
            value: s.as_str(),
            label: s.label(),
        })
        .collect()
}

/// Report domain entity
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub id: Uuid,
    /// Submitting user; set at creation, never transferred.
    pub user_id: Uuid,
    pub category: Category,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Report {
    /// Combined display string for the geolocation.
    ///
    /// Whole-number coordinates keep their decimal point ("Lat: 1.0"), which
    /// is what clients of the original API parse.
    pub fn location(&self) -> String {
        format!("Lat: {:?}, Lon: {:?}", self.latitude, self.longitude)
    }
}

/// Report response (includes the derived location field)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "theft")]
    pub category: Category,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Derived display field, e.g. "Lat: 1.0, Lon: 2.0"
    #[schema(example = "Lat: 1.0, Lon: 2.0")]
    pub location: String,
    #[schema(example = "pending")]
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Report> for ReportResponse {
    fn from(report: Report) -> Self {
        let location = report.location();
        Self {
            id: report.id,
            user_id: report.user_id,
            category: report.category,
            description: report.description,
            latitude: report.latitude,
            longitude: report.longitude,
            location,
            status: report.status,
            created_at: report.created_at,
            updated_at: report.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_string_format() {
        let report = Report {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            category: Category::Theft,
            description: "stolen bicycle".to_string(),
            latitude: 1.0,
            longitude: 2.0,
            status: ReportStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(report.location(), "Lat: 1.0, Lon: 2.0");
    }

    #[test]
    fn status_parse_round_trip() {
        for status in ReportStatus::ALL {
            assert_eq!(ReportStatus::try_from(status.as_str()).unwrap(), status);
        }
        assert!(ReportStatus::try_from("closed").is_err());
    }

    #[test]
    fn status_choices_cover_all_states() {
        let choices = status_choices();
        assert_eq!(choices.len(), 4);
        assert_eq!(choices[0].value, "pending");
        assert_eq!(choices[1].label, "In Progress");
    }
}
