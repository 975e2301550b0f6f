//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, notification_handler, report_handler, stats_handler, user_handler,
};
use crate::domain::notification::NotificationType;
use crate::domain::report::{Category, ReportStatus, StatusChoice};
use crate::domain::user::{AccountStatus, ReviewAction, Role};
use crate::domain::{CrimeStatResponse, NotificationResponse, ReportResponse, UserResponse};
use crate::services::{
    CategoryCount, DayCount, StatusCount, SummaryResponse, TokenResponse,
};

/// OpenAPI documentation for the CrimeWatch API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CrimeWatch API",
        version = "0.1.0",
        description = "Role-based crime reporting backend with Axum and SeaORM",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // User endpoints
        user_handler::get_current_user,
        user_handler::update_current_user,
        user_handler::list_users,
        user_handler::review_user,
        user_handler::change_role,
        // Report endpoints
        report_handler::create_report,
        report_handler::list_reports,
        report_handler::get_report,
        report_handler::update_report_status,
        report_handler::delete_report,
        // Notification endpoints
        notification_handler::list_notifications,
        notification_handler::create_notification,
        notification_handler::update_notification,
        // Statistics endpoints
        stats_handler::get_summary,
        stats_handler::list_crime_stats,
        stats_handler::record_crime_stat,
    ),
    components(
        schemas(
            // Domain types
            Role,
            AccountStatus,
            ReviewAction,
            Category,
            ReportStatus,
            StatusChoice,
            NotificationType,
            UserResponse,
            ReportResponse,
            NotificationResponse,
            CrimeStatResponse,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            TokenResponse,
            // User handler types
            user_handler::UpdateProfileRequest,
            user_handler::ReviewRequest,
            user_handler::ChangeRoleRequest,
            // Report handler types
            report_handler::CreateReportRequest,
            report_handler::UpdateReportStatusRequest,
            report_handler::ReportListResponse,
            // Notification handler types
            notification_handler::CreateNotificationRequest,
            notification_handler::UpdateNotificationRequest,
            // Statistics types
            stats_handler::RecordCrimeStatRequest,
            SummaryResponse,
            CategoryCount,
            StatusCount,
            DayCount,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Users", description = "Profile access and admin account management"),
        (name = "Reports", description = "Crime report submission and triage"),
        (name = "Notifications", description = "Notification rows and delivery flags"),
        (name = "Statistics", description = "Rollups and crime aggregates")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
