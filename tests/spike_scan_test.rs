//! Spike scan unit tests.

mod common;

use std::sync::Arc;

use uuid::Uuid;

use crimewatch::config::Config;
use crimewatch::domain::notification::NotificationType;
use crimewatch::domain::user::Role;
use crimewatch::errors::AppError;
use crimewatch::infra::repositories::{MockCrimeStatRepository, MockNotificationRepository};
use crimewatch::jobs::{MockScanGuard, ScanOutcome, SpikeScanner};

use common::{test_crime_stat, test_notification, TestUnitOfWork};

fn scanner(
    uow: TestUnitOfWork,
    guard: MockScanGuard,
) -> SpikeScanner<TestUnitOfWork> {
    SpikeScanner::new(Arc::new(uow), Arc::new(guard), &Config::for_tests())
}

#[tokio::test]
async fn scan_is_skipped_when_another_run_holds_the_lock() {
    let mut guard = MockScanGuard::new();
    guard.expect_begin().returning(|| Ok(false));
    guard.expect_end().times(0);

    // No repository expectations: a locked-out scan must not touch storage
    let scanner = scanner(TestUnitOfWork::default(), guard);

    let outcome = scanner.scan().await.unwrap();
    assert_eq!(outcome, ScanOutcome::Skipped);
}

#[tokio::test]
async fn rows_at_or_below_the_threshold_raise_no_alerts() {
    let mut guard = MockScanGuard::new();
    guard.expect_begin().returning(|| Ok(true));
    guard.expect_end().returning(|| Ok(()));
    guard.expect_claim().times(0);

    let mut stats = MockCrimeStatRepository::new();
    stats.expect_started_since().returning(|_| {
        // Default test threshold is 50; 50 itself does not qualify
        Ok(vec![
            test_crime_stat(Uuid::new_v4(), 10),
            test_crime_stat(Uuid::new_v4(), 50),
        ])
    });

    let uow = TestUnitOfWork::default().with_crime_stats(stats);
    let scanner = scanner(uow, guard);

    let outcome = scanner.scan().await.unwrap();
    assert_eq!(
        outcome,
        ScanOutcome::Completed {
            scanned: 2,
            alerts: 0
        }
    );
}

#[tokio::test]
async fn qualifying_row_raises_one_admin_targeted_alert() {
    let stat_id = Uuid::new_v4();
    let key = format!("spike:{}", stat_id);

    let mut guard = MockScanGuard::new();
    guard.expect_begin().returning(|| Ok(true));
    guard.expect_end().returning(|| Ok(()));
    guard
        .expect_claim()
        .withf(move |k, ttl| k == key && *ttl == 86_400)
        .times(1)
        .returning(|_, _| Ok(true));

    let mut stats = MockCrimeStatRepository::new();
    stats
        .expect_started_since()
        .returning(move |_| Ok(vec![test_crime_stat(stat_id, 75)]));

    let mut notifications = MockNotificationRepository::new();
    notifications
        .expect_create()
        .withf(|recipient_id, recipient_role, message, notification_type, report_id| {
            recipient_id.is_none()
                && *recipient_role == Some(Role::Admin)
                && message.contains("Crime spike detected: 75 theft reports")
                && *notification_type == NotificationType::CrimeTrend
                && report_id.is_none()
        })
        .times(1)
        .returning(|_, _, _, _, _| Ok(test_notification(Uuid::new_v4(), None)));

    let uow = TestUnitOfWork::default()
        .with_crime_stats(stats)
        .with_notifications(notifications);
    let scanner = scanner(uow, guard);

    let outcome = scanner.scan().await.unwrap();
    assert_eq!(
        outcome,
        ScanOutcome::Completed {
            scanned: 1,
            alerts: 1
        }
    );
}

#[tokio::test]
async fn already_notified_rows_are_not_alerted_twice() {
    let mut guard = MockScanGuard::new();
    guard.expect_begin().returning(|| Ok(true));
    guard.expect_end().returning(|| Ok(()));
    // Dedupe key already held from an earlier run in the same window
    guard.expect_claim().returning(|_, _| Ok(false));

    let mut stats = MockCrimeStatRepository::new();
    stats
        .expect_started_since()
        .returning(|_| Ok(vec![test_crime_stat(Uuid::new_v4(), 75)]));

    // No notification expectations: a second alert would panic
    let uow = TestUnitOfWork::default().with_crime_stats(stats);
    let scanner = scanner(uow, guard);

    let outcome = scanner.scan().await.unwrap();
    assert_eq!(
        outcome,
        ScanOutcome::Completed {
            scanned: 1,
            alerts: 0
        }
    );
}

#[tokio::test]
async fn failed_alert_insert_releases_the_dedupe_key() {
    let stat_id = Uuid::new_v4();
    let key = format!("spike:{}", stat_id);

    let mut guard = MockScanGuard::new();
    guard.expect_begin().returning(|| Ok(true));
    guard.expect_end().returning(|| Ok(()));
    guard.expect_claim().returning(|_, _| Ok(true));
    guard
        .expect_unclaim()
        .withf(move |k| k == key)
        .times(1)
        .returning(|_| Ok(()));

    let mut stats = MockCrimeStatRepository::new();
    stats
        .expect_started_since()
        .returning(move |_| Ok(vec![test_crime_stat(stat_id, 75)]));

    let mut notifications = MockNotificationRepository::new();
    notifications
        .expect_create()
        .returning(|_, _, _, _, _| Err(AppError::internal("insert failed")));

    let uow = TestUnitOfWork::default()
        .with_crime_stats(stats)
        .with_notifications(notifications);
    let scanner = scanner(uow, guard);

    let outcome = scanner.scan().await.unwrap();
    assert_eq!(
        outcome,
        ScanOutcome::Completed {
            scanned: 1,
            alerts: 0
        }
    );
}

#[tokio::test]
async fn lock_is_released_even_when_the_scan_fails() {
    let mut guard = MockScanGuard::new();
    guard.expect_begin().returning(|| Ok(true));
    guard.expect_end().times(1).returning(|| Ok(()));

    let mut stats = MockCrimeStatRepository::new();
    stats
        .expect_started_since()
        .returning(|_| Err(AppError::internal("storage down")));

    let uow = TestUnitOfWork::default().with_crime_stats(stats);
    let scanner = scanner(uow, guard);

    assert!(scanner.scan().await.is_err());
}
