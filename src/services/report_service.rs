//! Report service - submission, triage, and guarded deletion.
//!
//! The check ordering here is deliberate: policy capability first, then
//! resource fetch (404), then resource-state guards (403). A non-admin
//! delete is refused before the row is even fetched.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::policy::{self, Action, Actor};
use crate::domain::report::{Category, Report, ReportStatus};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Report service trait for dependency injection.
#[async_trait]
pub trait ReportService: Send + Sync {
    /// Submit a new report. The initial status is always pending; callers
    /// cannot choose it.
    async fn create_report(
        &self,
        actor: &Actor,
        category: Category,
        description: String,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<Report>;

    /// List reports: the full collection for triage roles, own reports for
    /// citizens. Newest first.
    async fn list_reports(&self, actor: &Actor) -> AppResult<Vec<Report>>;

    /// Get one report (own for citizens, any for triage roles)
    async fn get_report(&self, actor: &Actor, id: Uuid) -> AppResult<Report>;

    /// Set a report's status (triage roles only)
    async fn update_status(&self, actor: &Actor, id: Uuid, status: ReportStatus)
        -> AppResult<Report>;

    /// Delete a report (admin only, resolved only)
    async fn delete_report(&self, actor: &Actor, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of ReportService using Unit of Work.
pub struct ReportManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ReportManager<U> {
    /// Create new report service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ReportService for ReportManager<U> {
    async fn create_report(
        &self,
        actor: &Actor,
        category: Category,
        description: String,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<Report> {
        policy::authorize(actor, Action::SubmitReport)?;
        let owner = actor.id().ok_or(AppError::Unauthorized)?;

        let report = self
            .uow
            .reports()
            .create(
                owner,
                category,
                description,
                latitude,
                longitude,
                ReportStatus::Pending,
            )
            .await?;

        tracing::info!(report_id = %report.id, category = %category, "Report submitted");
        Ok(report)
    }

    async fn list_reports(&self, actor: &Actor) -> AppResult<Vec<Report>> {
        match policy::authorize(actor, Action::ListAllReports) {
            Ok(()) => self.uow.reports().list_all().await,
            Err(AppError::Forbidden) => {
                // Citizens fall back to their own submissions
                let id = actor.id().ok_or(AppError::Unauthorized)?;
                self.uow.reports().list_by_user(id).await
            }
            Err(e) => Err(e),
        }
    }

    async fn get_report(&self, actor: &Actor, id: Uuid) -> AppResult<Report> {
        if actor.id().is_none() {
            return Err(AppError::Unauthorized);
        }

        let report = self.uow.reports().find_by_id(id).await?.ok_or_not_found()?;
        policy::authorize(actor, Action::ViewReport { owner: report.user_id })?;

        Ok(report)
    }

    async fn update_status(
        &self,
        actor: &Actor,
        id: Uuid,
        status: ReportStatus,
    ) -> AppResult<Report> {
        policy::authorize(actor, Action::UpdateReportStatus)?;

        // Existence check gives 404 before the write
        self.uow.reports().find_by_id(id).await?.ok_or_not_found()?;

        let report = self.uow.reports().update_status(id, status).await?;

        tracing::info!(report_id = %id, status = %status, "Report status updated");
        Ok(report)
    }

    async fn delete_report(&self, actor: &Actor, id: Uuid) -> AppResult<()> {
        // Capability first: non-admins never learn whether the row exists
        policy::authorize(actor, Action::DeleteReport)?;

        let report = self.uow.reports().find_by_id(id).await?.ok_or_not_found()?;
        policy::ensure_report_deletable(&report)?;

        self.uow.reports().delete(id).await?;

        tracing::info!(report_id = %id, "Report deleted");
        Ok(())
    }
}
