//! Domain layer: entities, value objects, and the authorization policy.
//!
//! Everything here is persistence-free; the infra layer maps these types to
//! and from storage rows.

pub mod crime_stat;
pub mod notification;
pub mod password;
pub mod policy;
pub mod report;
pub mod user;

pub use crime_stat::{CrimeStat, CrimeStatResponse, NewCrimeStat};
pub use notification::{Notification, NotificationResponse, NotificationType};
pub use password::Password;
pub use policy::{authorize, ensure_report_deletable, ensure_reviewable, Action, Actor};
pub use report::{status_choices, Category, Report, ReportResponse, ReportStatus, StatusChoice};
pub use user::{
    username_from_email, AccountStatus, ReviewAction, Role, User, UserResponse,
};
