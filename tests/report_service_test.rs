//! Report service unit tests.

mod common;

use std::sync::Arc;

use mockall::predicate::{always, eq};
use uuid::Uuid;

use crimewatch::domain::report::{Category, ReportStatus};
use crimewatch::domain::user::Role;
use crimewatch::errors::AppError;
use crimewatch::infra::repositories::MockReportRepository;
use crimewatch::services::{ReportManager, ReportService};

use common::{actor, actor_with_id, test_report, TestUnitOfWork};

#[tokio::test]
async fn created_reports_are_always_pending() {
    let owner = Uuid::new_v4();

    let mut repo = MockReportRepository::new();
    repo.expect_create()
        .with(
            eq(owner),
            eq(Category::Theft),
            always(),
            always(),
            always(),
            eq(ReportStatus::Pending),
        )
        .returning(|user_id, _, _, _, _, status| {
            Ok(test_report(Uuid::new_v4(), user_id, status))
        });

    let uow = TestUnitOfWork::default().with_reports(repo);
    let service = ReportManager::new(Arc::new(uow));

    let report = service
        .create_report(
            &actor_with_id(owner, Role::Citizen),
            Category::Theft,
            "stolen bicycle".to_string(),
            52.37,
            4.89,
        )
        .await
        .unwrap();

    assert_eq!(report.status, ReportStatus::Pending);
    assert_eq!(report.user_id, owner);
}

#[tokio::test]
async fn citizens_list_only_their_own_reports() {
    let citizen_id = Uuid::new_v4();

    let mut repo = MockReportRepository::new();
    repo.expect_list_by_user()
        .with(eq(citizen_id))
        .returning(|user_id| {
            Ok(vec![test_report(
                Uuid::new_v4(),
                user_id,
                ReportStatus::Pending,
            )])
        });

    let uow = TestUnitOfWork::default().with_reports(repo);
    let service = ReportManager::new(Arc::new(uow));

    let reports = service
        .list_reports(&actor_with_id(citizen_id, Role::Citizen))
        .await
        .unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].user_id, citizen_id);
}

#[tokio::test]
async fn officers_list_all_reports() {
    let mut repo = MockReportRepository::new();
    repo.expect_list_all().returning(|| {
        Ok(vec![
            test_report(Uuid::new_v4(), Uuid::new_v4(), ReportStatus::Pending),
            test_report(Uuid::new_v4(), Uuid::new_v4(), ReportStatus::Resolved),
        ])
    });

    let uow = TestUnitOfWork::default().with_reports(repo);
    let service = ReportManager::new(Arc::new(uow));

    let reports = service
        .list_reports(&actor(Role::LawEnforcement))
        .await
        .unwrap();

    assert_eq!(reports.len(), 2);
}

#[tokio::test]
async fn citizen_cannot_read_someone_elses_report() {
    let report_id = Uuid::new_v4();

    let mut repo = MockReportRepository::new();
    repo.expect_find_by_id()
        .with(eq(report_id))
        .returning(|id| Ok(Some(test_report(id, Uuid::new_v4(), ReportStatus::Pending))));

    let uow = TestUnitOfWork::default().with_reports(repo);
    let service = ReportManager::new(Arc::new(uow));

    let result = service.get_report(&actor(Role::Citizen), report_id).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn citizen_status_update_is_rejected_without_any_fetch() {
    // No expectations programmed: any repository call would panic
    let uow = TestUnitOfWork::default();
    let service = ReportManager::new(Arc::new(uow));

    let result = service
        .update_status(&actor(Role::Citizen), Uuid::new_v4(), ReportStatus::Resolved)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn officer_updates_status_in_one_step() {
    let report_id = Uuid::new_v4();

    let mut repo = MockReportRepository::new();
    repo.expect_find_by_id()
        .with(eq(report_id))
        .returning(|id| Ok(Some(test_report(id, Uuid::new_v4(), ReportStatus::Pending))));
    repo.expect_update_status()
        .with(eq(report_id), eq(ReportStatus::Resolved))
        .returning(|id, status| Ok(test_report(id, Uuid::new_v4(), status)));

    let uow = TestUnitOfWork::default().with_reports(repo);
    let service = ReportManager::new(Arc::new(uow));

    let report = service
        .update_status(&actor(Role::LawEnforcement), report_id, ReportStatus::Resolved)
        .await
        .unwrap();

    assert_eq!(report.status, ReportStatus::Resolved);
}

#[tokio::test]
async fn status_update_of_missing_report_is_not_found() {
    let mut repo = MockReportRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let uow = TestUnitOfWork::default().with_reports(repo);
    let service = ReportManager::new(Arc::new(uow));

    let result = service
        .update_status(&actor(Role::Admin), Uuid::new_v4(), ReportStatus::InProgress)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn non_admin_delete_is_refused_without_any_fetch() {
    let uow = TestUnitOfWork::default();
    let service = ReportManager::new(Arc::new(uow));

    for role in [Role::Citizen, Role::LawEnforcement] {
        let result = service.delete_report(&actor(role), Uuid::new_v4()).await;
        assert!(matches!(result.unwrap_err(), AppError::Forbidden));
    }
}

#[tokio::test]
async fn admin_delete_of_missing_report_is_not_found() {
    let mut repo = MockReportRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let uow = TestUnitOfWork::default().with_reports(repo);
    let service = ReportManager::new(Arc::new(uow));

    let result = service.delete_report(&actor(Role::Admin), Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn admin_delete_of_pending_report_is_refused_and_row_kept() {
    let report_id = Uuid::new_v4();

    let mut repo = MockReportRepository::new();
    repo.expect_find_by_id()
        .with(eq(report_id))
        .returning(|id| Ok(Some(test_report(id, Uuid::new_v4(), ReportStatus::Pending))));
    // delete must never run
    repo.expect_delete().times(0);

    let uow = TestUnitOfWork::default().with_reports(repo);
    let service = ReportManager::new(Arc::new(uow));

    let result = service.delete_report(&actor(Role::Admin), report_id).await;

    assert!(matches!(
        result.unwrap_err(),
        AppError::ForbiddenWithReason(_)
    ));
}

#[tokio::test]
async fn admin_deletes_resolved_report() {
    let report_id = Uuid::new_v4();

    let mut repo = MockReportRepository::new();
    repo.expect_find_by_id()
        .with(eq(report_id))
        .returning(|id| Ok(Some(test_report(id, Uuid::new_v4(), ReportStatus::Resolved))));
    repo.expect_delete()
        .with(eq(report_id))
        .times(1)
        .returning(|_| Ok(()));

    let uow = TestUnitOfWork::default().with_reports(repo);
    let service = ReportManager::new(Arc::new(uow));

    assert!(service.delete_report(&actor(Role::Admin), report_id).await.is_ok());
}
