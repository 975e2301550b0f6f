//! Centralized authorization policy.
//!
//! One pure function decides every (actor, action) pair; handlers never
//! compare role strings themselves. Resource-state guards (delete only when
//! resolved, review only law enforcement targets) live alongside so the
//! whole rule set is in one place.
//!
//! Check ordering is structural: authentication, then role capability, then
//! resource existence (404), then resource state (403). `authorize` covers
//! the first two; the `ensure_*` guards cover the last, and callers fetch
//! the resource in between.

use uuid::Uuid;

use crate::domain::report::{Report, ReportStatus};
use crate::domain::user::{AccountStatus, Role, User};
use crate::errors::{AppError, AppResult};

/// The entity issuing a request.
///
/// "No actor" and "actor with a role" are distinct, explicit variants; an
/// unparseable role never reaches this type (the auth middleware fails
/// closed before constructing one).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Anonymous,
    User {
        id: Uuid,
        role: Role,
        status: AccountStatus,
    },
}

impl Actor {
    pub fn user(id: Uuid, role: Role, status: AccountStatus) -> Self {
        Actor::User { id, role, status }
    }

    /// The actor's id, if authenticated.
    pub fn id(&self) -> Option<Uuid> {
        match self {
            Actor::Anonymous => None,
            Actor::User { id, .. } => Some(*id),
        }
    }

    /// The actor's role, if authenticated.
    pub fn role(&self) -> Option<Role> {
        match self {
            Actor::Anonymous => None,
            Actor::User { role, .. } => Some(*role),
        }
    }
}

/// Every gated operation in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create a report (submitter becomes owner).
    SubmitReport,
    /// Read one report owned by `owner`.
    ViewReport { owner: Uuid },
    /// Read the full report collection.
    ListAllReports,
    /// Set a report's status.
    UpdateReportStatus,
    /// Hard-delete a report (state guard applies separately).
    DeleteReport,
    /// List every user account.
    ListUsers,
    /// Approve or reject a pending law enforcement account.
    ReviewOfficer,
    /// Change another user's role.
    ChangeUserRole,
    /// Change one's own role or status (denied for everyone).
    ChangeOwnRoleOrStatus,
    /// Read every notification, not just one's own.
    ListAllNotifications,
    /// Flip the read flag / set sent_at on a notification addressed to
    /// `recipient`.
    UpdateNotification { recipient: Option<Uuid> },
    /// Read CrimeStat aggregate rows.
    ViewCrimeStats,
    /// Insert a CrimeStat aggregate row.
    RecordCrimeStat,
    /// Read the reports-over-time series.
    ViewTimeSeries,
}

/// Decide whether `actor` may perform `action`.
///
/// Pure function, no side effects. Anonymous actors are always denied with
/// an authentication error; everything else is a capability decision.
pub fn authorize(actor: &Actor, action: Action) -> AppResult<()> {
    let (id, role) = match actor {
        Actor::Anonymous => return Err(AppError::Unauthorized),
        Actor::User { id, role, .. } => (*id, *role),
    };

    let allowed = match action {
        Action::SubmitReport => true,
        Action::ViewReport { owner } => role.is_officer() || owner == id,
        Action::ListAllReports => role.is_officer(),
        Action::UpdateReportStatus => role.is_officer(),
        Action::DeleteReport => role.is_admin(),
        Action::ListUsers => role.is_admin(),
        Action::ReviewOfficer => role.is_admin(),
        Action::ChangeUserRole => role.is_admin(),
        Action::ChangeOwnRoleOrStatus => false,
        Action::ListAllNotifications => role.is_admin(),
        Action::UpdateNotification { recipient } => {
            role.is_admin() || recipient == Some(id)
        }
        Action::ViewCrimeStats => role.is_officer(),
        Action::RecordCrimeStat => role.is_admin(),
        Action::ViewTimeSeries => role.is_admin(),
    };

    if allowed {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// State guard: a report may only be deleted once resolved.
pub fn ensure_report_deletable(report: &Report) -> AppResult<()> {
    if report.status == ReportStatus::Resolved {
        Ok(())
    } else {
        Err(AppError::forbidden("Only resolved reports can be deleted"))
    }
}

/// State guard: only law enforcement accounts go through approve/reject.
pub fn ensure_reviewable(target: &User) -> AppResult<()> {
    if target.role == Role::LawEnforcement {
        Ok(())
    } else {
        Err(AppError::validation(
            "This user is not a law enforcement officer",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn actor(role: Role) -> Actor {
        Actor::user(Uuid::new_v4(), role, AccountStatus::Approved)
    }

    fn report_with_status(status: ReportStatus) -> Report {
        Report {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            category: crate::domain::report::Category::Theft,
            description: "test".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn user_with_role(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            email: "u@example.com".to_string(),
            username: "u".to_string(),
            password_hash: "hash".to_string(),
            role,
            status: AccountStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn anonymous_is_always_denied() {
        for action in [
            Action::SubmitReport,
            Action::ListAllReports,
            Action::UpdateReportStatus,
            Action::DeleteReport,
            Action::ListUsers,
            Action::ViewCrimeStats,
        ] {
            assert!(matches!(
                authorize(&Actor::Anonymous, action),
                Err(AppError::Unauthorized)
            ));
        }
    }

    #[test]
    fn every_role_may_submit_reports() {
        for role in [Role::Citizen, Role::LawEnforcement, Role::Admin] {
            assert!(authorize(&actor(role), Action::SubmitReport).is_ok());
        }
    }

    #[test]
    fn citizens_read_only_their_own_reports() {
        let id = Uuid::new_v4();
        let citizen = Actor::user(id, Role::Citizen, AccountStatus::Approved);

        assert!(authorize(&citizen, Action::ViewReport { owner: id }).is_ok());
        assert!(matches!(
            authorize(&citizen, Action::ViewReport { owner: Uuid::new_v4() }),
            Err(AppError::Forbidden)
        ));
        assert!(authorize(&citizen, Action::ListAllReports).is_err());
    }

    #[test]
    fn officers_read_any_report() {
        let other = Uuid::new_v4();
        assert!(authorize(
            &actor(Role::LawEnforcement),
            Action::ViewReport { owner: other }
        )
        .is_ok());
        assert!(authorize(&actor(Role::Admin), Action::ListAllReports).is_ok());
        assert!(authorize(&actor(Role::LawEnforcement), Action::ListAllReports).is_ok());
    }

    #[test]
    fn status_updates_are_officer_only() {
        assert!(authorize(&actor(Role::Citizen), Action::UpdateReportStatus).is_err());
        assert!(authorize(&actor(Role::LawEnforcement), Action::UpdateReportStatus).is_ok());
        assert!(authorize(&actor(Role::Admin), Action::UpdateReportStatus).is_ok());
    }

    #[test]
    fn deletes_are_admin_only() {
        assert!(authorize(&actor(Role::Citizen), Action::DeleteReport).is_err());
        assert!(authorize(&actor(Role::LawEnforcement), Action::DeleteReport).is_err());
        assert!(authorize(&actor(Role::Admin), Action::DeleteReport).is_ok());
    }

    #[test]
    fn user_administration_is_admin_only() {
        for action in [Action::ListUsers, Action::ReviewOfficer, Action::ChangeUserRole] {
            assert!(authorize(&actor(Role::Citizen), action).is_err());
            assert!(authorize(&actor(Role::LawEnforcement), action).is_err());
            assert!(authorize(&actor(Role::Admin), action).is_ok());
        }
    }

    #[test]
    fn nobody_mutates_their_own_role_or_status() {
        for role in [Role::Citizen, Role::LawEnforcement, Role::Admin] {
            assert!(matches!(
                authorize(&actor(role), Action::ChangeOwnRoleOrStatus),
                Err(AppError::Forbidden)
            ));
        }
    }

    #[test]
    fn notification_updates_need_recipient_or_admin() {
        let id = Uuid::new_v4();
        let citizen = Actor::user(id, Role::Citizen, AccountStatus::Approved);

        assert!(authorize(&citizen, Action::UpdateNotification { recipient: Some(id) }).is_ok());
        assert!(authorize(
            &citizen,
            Action::UpdateNotification { recipient: Some(Uuid::new_v4()) }
        )
        .is_err());
        // Role-targeted rows (no specific recipient) are admin-managed
        assert!(authorize(&citizen, Action::UpdateNotification { recipient: None }).is_err());
        assert!(authorize(
            &actor(Role::Admin),
            Action::UpdateNotification { recipient: None }
        )
        .is_ok());
    }

    #[test]
    fn crime_stats_visibility() {
        assert!(authorize(&actor(Role::Citizen), Action::ViewCrimeStats).is_err());
        assert!(authorize(&actor(Role::LawEnforcement), Action::ViewCrimeStats).is_ok());
        assert!(authorize(&actor(Role::LawEnforcement), Action::RecordCrimeStat).is_err());
        assert!(authorize(&actor(Role::Admin), Action::RecordCrimeStat).is_ok());
        assert!(authorize(&actor(Role::LawEnforcement), Action::ViewTimeSeries).is_err());
        assert!(authorize(&actor(Role::Admin), Action::ViewTimeSeries).is_ok());
    }

    #[test]
    fn only_resolved_reports_are_deletable() {
        assert!(ensure_report_deletable(&report_with_status(ReportStatus::Resolved)).is_ok());
        for status in [
            ReportStatus::Pending,
            ReportStatus::InProgress,
            ReportStatus::Rejected,
        ] {
            assert!(matches!(
                ensure_report_deletable(&report_with_status(status)),
                Err(AppError::ForbiddenWithReason(_))
            ));
        }
    }

    #[test]
    fn review_guard_rejects_non_officers() {
        assert!(ensure_reviewable(&user_with_role(Role::LawEnforcement)).is_ok());
        assert!(ensure_reviewable(&user_with_role(Role::Citizen)).is_err());
        assert!(ensure_reviewable(&user_with_role(Role::Admin)).is_err());
    }
}
