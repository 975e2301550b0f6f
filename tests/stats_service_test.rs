//! Statistics service unit tests.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{Duration, NaiveDate, Utc};
use mockall::predicate::eq;
use uuid::Uuid;

use crimewatch::domain::crime_stat::NewCrimeStat;
use crimewatch::domain::notification::NotificationType;
use crimewatch::domain::report::{Category, ReportStatus};
use crimewatch::domain::user::{AccountStatus, Role};
use crimewatch::errors::AppError;
use crimewatch::infra::repositories::{
    MockCrimeStatRepository, MockNotificationRepository, MockReportRepository,
    MockUserRepository,
};
use crimewatch::services::{StatsManager, StatsService};

use common::{actor, actor_with_id, test_crime_stat, test_notification, test_user, TestUnitOfWork};

fn new_stat(total_reports: u32) -> NewCrimeStat {
    NewCrimeStat {
        incident_type: Category::Theft,
        user_role: Role::Citizen,
        status: ReportStatus::Pending,
        total_reports,
        pending: total_reports,
        in_progress: 0,
        resolved: 0,
        rejected: 0,
        start_date: NaiveDate::from_ymd_opt(2025, 8, 1).expect("valid date"),
        end_date: None,
    }
}

#[tokio::test]
async fn citizen_summary_is_scoped_to_their_own_reports() {
    let citizen_id = Uuid::new_v4();

    let mut reports = MockReportRepository::new();
    reports
        .expect_count()
        .with(eq(Some(citizen_id)))
        .returning(|_| Ok(3));
    reports
        .expect_count_by_category()
        .with(eq(Some(citizen_id)))
        .returning(|_| Ok(vec![("theft".to_string(), 2), ("fraud".to_string(), 1)]));

    let uow = TestUnitOfWork::default().with_reports(reports);
    let service = StatsManager::new(Arc::new(uow));

    let summary = service
        .summary(&actor_with_id(citizen_id, Role::Citizen))
        .await
        .unwrap();

    assert_eq!(summary.total_reports, 3);
    assert_eq!(summary.reports_by_category.len(), 2);
    // Citizens get no status breakdown and no time series
    assert!(summary.reports_by_status.is_none());
    assert!(summary.reports_over_time.is_none());
}

#[tokio::test]
async fn law_enforcement_sees_only_pending_and_in_progress_statuses() {
    let mut reports = MockReportRepository::new();
    reports.expect_count().with(eq(None::<Uuid>)).returning(|_| Ok(16));
    reports
        .expect_count_by_category()
        .returning(|_| Ok(vec![("theft".to_string(), 16)]));
    reports.expect_count_by_status().returning(|_| {
        Ok(vec![
            ("pending".to_string(), 5),
            ("in_progress".to_string(), 2),
            ("resolved".to_string(), 8),
            ("rejected".to_string(), 1),
        ])
    });

    let uow = TestUnitOfWork::default().with_reports(reports);
    let service = StatsManager::new(Arc::new(uow));

    let summary = service.summary(&actor(Role::LawEnforcement)).await.unwrap();

    let statuses = summary.reports_by_status.unwrap();
    assert_eq!(statuses.len(), 2);
    assert!(statuses.iter().all(|s| s.status == "pending" || s.status == "in_progress"));
    assert!(summary.reports_over_time.is_none());
}

#[tokio::test]
async fn admin_summary_has_all_statuses_and_an_ascending_time_series() {
    let today = Utc::now();
    let yesterday = today - Duration::days(1);

    let mut reports = MockReportRepository::new();
    reports.expect_count().with(eq(None::<Uuid>)).returning(|_| Ok(4));
    reports
        .expect_count_by_category()
        .returning(|_| Ok(vec![("theft".to_string(), 4)]));
    reports.expect_count_by_status().returning(|_| {
        Ok(vec![
            ("pending".to_string(), 1),
            ("resolved".to_string(), 3),
        ])
    });
    reports
        .expect_created_since()
        .returning(move |_| Ok(vec![today, yesterday, yesterday]));

    let uow = TestUnitOfWork::default().with_reports(reports);
    let service = StatsManager::new(Arc::new(uow));

    let summary = service.summary(&actor(Role::Admin)).await.unwrap();

    let statuses = summary.reports_by_status.unwrap();
    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0].status, "resolved");

    let series = summary.reports_over_time.unwrap();
    assert_eq!(series.len(), 2);
    // Ascending by day, with per-day counts
    assert_eq!(series[0].date, yesterday.date_naive());
    assert_eq!(series[0].count, 2);
    assert_eq!(series[1].date, today.date_naive());
    assert_eq!(series[1].count, 1);
}

#[tokio::test]
async fn empty_categories_are_bucketed_as_uncategorized() {
    let mut reports = MockReportRepository::new();
    reports.expect_count().returning(|_| Ok(7));
    reports
        .expect_count_by_category()
        .returning(|_| Ok(vec![("".to_string(), 5), ("theft".to_string(), 2)]));

    let uow = TestUnitOfWork::default().with_reports(reports);
    let service = StatsManager::new(Arc::new(uow));

    let summary = service.summary(&actor(Role::Citizen)).await.unwrap();

    assert_eq!(summary.reports_by_category[0].category, "uncategorized");
    assert_eq!(summary.reports_by_category[0].count, 5);
}

#[tokio::test]
async fn crime_stats_listing_is_for_triage_roles_only() {
    let uow = TestUnitOfWork::default();
    let service = StatsManager::new(Arc::new(uow));

    let result = service.list_crime_stats(&actor(Role::Citizen)).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn recording_crime_stats_is_admin_only() {
    let uow = TestUnitOfWork::default();
    let service = StatsManager::new(Arc::new(uow));

    let result = service
        .record_crime_stat(&actor(Role::LawEnforcement), new_stat(10))
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn duplicate_aggregate_row_is_a_conflict() {
    let mut stats = MockCrimeStatRepository::new();
    stats
        .expect_insert()
        .returning(|_| Err(AppError::conflict("A statistic for this incident type, role and status")));

    let uow = TestUnitOfWork::default().with_crime_stats(stats);
    let service = StatsManager::new(Arc::new(uow));

    let result = service.record_crime_stat(&actor(Role::Admin), new_stat(10)).await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn recording_fans_out_to_every_admin_and_officer() {
    let mut stats = MockCrimeStatRepository::new();
    stats
        .expect_insert()
        .returning(|stat| Ok(test_crime_stat(Uuid::new_v4(), stat.total_reports)));

    let mut users = MockUserRepository::new();
    users
        .expect_list_by_role()
        .with(eq(Role::Admin))
        .returning(|role| Ok(vec![test_user(Uuid::new_v4(), role, AccountStatus::Approved)]));
    users
        .expect_list_by_role()
        .with(eq(Role::LawEnforcement))
        .returning(|role| {
            Ok(vec![
                test_user(Uuid::new_v4(), role, AccountStatus::Approved),
                test_user(Uuid::new_v4(), role, AccountStatus::Approved),
            ])
        });

    let mut notifications = MockNotificationRepository::new();
    notifications
        .expect_create()
        .withf(|recipient_id, _, _, notification_type, _| {
            recipient_id.is_some() && *notification_type == NotificationType::CrimeTrend
        })
        .times(3)
        .returning(|recipient_id, _, _, _, _| {
            Ok(test_notification(Uuid::new_v4(), recipient_id))
        });

    let uow = TestUnitOfWork::default()
        .with_crime_stats(stats)
        .with_users(users)
        .with_notifications(notifications);
    let service = StatsManager::new(Arc::new(uow));

    let stat = service
        .record_crime_stat(&actor(Role::Admin), new_stat(75))
        .await
        .unwrap();

    assert_eq!(stat.total_reports, 75);
}

#[tokio::test]
async fn one_failed_fan_out_insert_does_not_fail_the_request() {
    let mut stats = MockCrimeStatRepository::new();
    stats
        .expect_insert()
        .returning(|stat| Ok(test_crime_stat(Uuid::new_v4(), stat.total_reports)));

    let mut users = MockUserRepository::new();
    users
        .expect_list_by_role()
        .with(eq(Role::Admin))
        .returning(|role| Ok(vec![test_user(Uuid::new_v4(), role, AccountStatus::Approved)]));
    users
        .expect_list_by_role()
        .with(eq(Role::LawEnforcement))
        .returning(|role| Ok(vec![test_user(Uuid::new_v4(), role, AccountStatus::Approved)]));

    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();

    let mut notifications = MockNotificationRepository::new();
    notifications
        .expect_create()
        .times(2)
        .returning(move |recipient_id, _, _, _, _| {
            if seen.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(AppError::internal("insert failed"))
            } else {
                Ok(test_notification(Uuid::new_v4(), recipient_id))
            }
        });

    let uow = TestUnitOfWork::default()
        .with_crime_stats(stats)
        .with_users(users)
        .with_notifications(notifications);
    let service = StatsManager::new(Arc::new(uow));

    // The row itself is recorded and both recipients were attempted
    assert!(service
        .record_crime_stat(&actor(Role::Admin), new_stat(75))
        .await
        .is_ok());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
