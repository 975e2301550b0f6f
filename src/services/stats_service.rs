//! Statistics service - per-request rollups and CrimeStat aggregates.
//!
//! The summary is recomputed from the report stream on every call; there is
//! no caching layer. Visibility narrows by role: citizens see only their own
//! submissions reflected, law enforcement sees a restricted status
//! breakdown, and only admins get the time series.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{TIME_SERIES_WINDOW_DAYS, UNCATEGORIZED_LABEL};
use crate::domain::crime_stat::{CrimeStat, NewCrimeStat};
use crate::domain::notification::NotificationType;
use crate::domain::policy::{self, Action, Actor};
use crate::domain::report::ReportStatus;
use crate::domain::user::Role;
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// One by-category bucket. Categories are reported as raw labels so legacy
/// uncategorized rows keep their coerced bucket.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryCount {
    #[schema(example = "theft")]
    pub category: String,
    pub count: u64,
}

/// One by-status bucket
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatusCount {
    #[schema(example = "pending")]
    pub status: String,
    pub count: u64,
}

/// One calendar-day bucket of the time series
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// Role-shaped statistics summary
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SummaryResponse {
    /// Total report count (own submissions only for citizens)
    pub total_reports: u64,
    /// By-category buckets, descending by count
    pub reports_by_category: Vec<CategoryCount>,
    /// By-status buckets, descending by count; withheld from citizens and
    /// restricted to pending/in_progress for law enforcement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reports_by_status: Option<Vec<StatusCount>>,
    /// Reports per calendar day over the trailing window, ascending;
    /// admin only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reports_over_time: Option<Vec<DayCount>>,
}

/// Statistics service trait for dependency injection.
#[async_trait]
pub trait StatsService: Send + Sync {
    /// Compute the role-shaped summary rollup
    async fn summary(&self, actor: &Actor) -> AppResult<SummaryResponse>;

    /// List CrimeStat aggregate rows (triage roles)
    async fn list_crime_stats(&self, actor: &Actor) -> AppResult<Vec<CrimeStat>>;

    /// Record a new aggregate row (admin only) and fan out a crime_trend
    /// notification to every admin and law enforcement user.
    ///
    /// The fan-out is a sequence of independent inserts: a failed insert is
    /// logged and the remaining recipients are still notified.
    async fn record_crime_stat(&self, actor: &Actor, stat: NewCrimeStat) -> AppResult<CrimeStat>;
}

/// Concrete implementation of StatsService using Unit of Work.
pub struct StatsManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> StatsManager<U> {
    /// Create new statistics service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn time_series(&self) -> AppResult<Vec<DayCount>> {
        let since = Utc::now() - Duration::days(TIME_SERIES_WINDOW_DAYS);
        let timestamps = self.uow.reports().created_since(since).await?;

        let mut buckets: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for ts in timestamps {
            *buckets.entry(ts.date_naive()).or_insert(0) += 1;
        }

        // BTreeMap iteration gives the ascending-by-day ordering
        Ok(buckets
            .into_iter()
            .map(|(date, count)| DayCount { date, count })
            .collect())
    }
}

/// Coerce empty category labels and sort buckets descending by count.
fn category_buckets(rows: Vec<(String, u64)>) -> Vec<CategoryCount> {
    let mut buckets: Vec<CategoryCount> = rows
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: if category.is_empty() {
                UNCATEGORIZED_LABEL.to_string()
            } else {
                category
            },
            count,
        })
        .collect();

    buckets.sort_by(|a, b| b.count.cmp(&a.count).then(a.category.cmp(&b.category)));
    buckets
}

/// Sort status buckets descending by count, optionally restricted to a set
/// of visible statuses.
fn status_buckets(rows: Vec<(String, u64)>, visible: Option<&[ReportStatus]>) -> Vec<StatusCount> {
    let mut buckets: Vec<StatusCount> = rows
        .into_iter()
        .filter(|(status, _)| match visible {
            Some(allowed) => allowed.iter().any(|s| s.as_str() == status),
            None => true,
        })
        .map(|(status, count)| StatusCount { status, count })
        .collect();

    buckets.sort_by(|a, b| b.count.cmp(&a.count).then(a.status.cmp(&b.status)));
    buckets
}

#[async_trait]
impl<U: UnitOfWork> StatsService for StatsManager<U> {
    async fn summary(&self, actor: &Actor) -> AppResult<SummaryResponse> {
        let (id, role) = match (actor.id(), actor.role()) {
            (Some(id), Some(role)) => (id, role),
            _ => return Err(AppError::Unauthorized),
        };

        // Citizens see only their own submissions reflected in the rollup
        let scope = if role.is_officer() { None } else { Some(id) };

        let total_reports = self.uow.reports().count(scope).await?;
        let by_category = self.uow.reports().count_by_category(scope).await?;
        let reports_by_category = category_buckets(by_category);

        let reports_by_status = match role {
            Role::Citizen => None,
            Role::LawEnforcement => {
                let rows = self.uow.reports().count_by_status(scope).await?;
                Some(status_buckets(
                    rows,
                    Some(&[ReportStatus::Pending, ReportStatus::InProgress]),
                ))
            }
            Role::Admin => {
                let rows = self.uow.reports().count_by_status(scope).await?;
                Some(status_buckets(rows, None))
            }
        };

        let reports_over_time = if policy::authorize(actor, Action::ViewTimeSeries).is_ok() {
            Some(self.time_series().await?)
        } else {
            None
        };

        Ok(SummaryResponse {
            total_reports,
            reports_by_category,
            reports_by_status,
            reports_over_time,
        })
    }

    async fn list_crime_stats(&self, actor: &Actor) -> AppResult<Vec<CrimeStat>> {
        policy::authorize(actor, Action::ViewCrimeStats)?;
        self.uow.crime_stats().list().await
    }

    async fn record_crime_stat(&self, actor: &Actor, stat: NewCrimeStat) -> AppResult<CrimeStat> {
        policy::authorize(actor, Action::RecordCrimeStat)?;

        let created = self.uow.crime_stats().insert(stat).await?;

        // Fan out one notification per admin / law enforcement user.
        // Inserts are independent: failures are logged, not propagated.
        let message = format!(
            "New crime statistics recorded: {} {} reports ({})",
            created.total_reports, created.incident_type, created.status
        );

        let mut recipients = Vec::new();
        for role in [Role::Admin, Role::LawEnforcement] {
            recipients.extend(self.uow.users().list_by_role(role).await?);
        }

        for recipient in recipients {
            if let Err(e) = self
                .uow
                .notifications()
                .create(
                    Some(recipient.id),
                    None,
                    message.clone(),
                    NotificationType::CrimeTrend,
                    None,
                )
                .await
            {
                tracing::error!(
                    recipient = %recipient.id,
                    error = %e,
                    "Crime trend fan-out insert failed"
                );
            }
        }

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_category_is_coerced_to_uncategorized() {
        let buckets = category_buckets(vec![
            ("theft".to_string(), 3),
            ("".to_string(), 5),
            ("fraud".to_string(), 1),
        ]);

        assert_eq!(buckets[0].category, "uncategorized");
        assert_eq!(buckets[0].count, 5);
        assert_eq!(buckets[1].category, "theft");
        assert_eq!(buckets[2].category, "fraud");
    }

    #[test]
    fn status_buckets_respect_visibility() {
        let rows = vec![
            ("pending".to_string(), 4),
            ("resolved".to_string(), 9),
            ("in_progress".to_string(), 2),
            ("rejected".to_string(), 1),
        ];

        let restricted = status_buckets(
            rows.clone(),
            Some(&[ReportStatus::Pending, ReportStatus::InProgress]),
        );
        assert_eq!(restricted.len(), 2);
        assert_eq!(restricted[0].status, "pending");
        assert_eq!(restricted[1].status, "in_progress");

        let all = status_buckets(rows, None);
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].status, "resolved");
    }
}
