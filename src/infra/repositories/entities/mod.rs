//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.
//! Conversions into domain types are fallible: enum-valued columns are
//! stored as strings and parsed fail-closed on the way out.

pub mod crime_stat;
pub mod notification;
pub mod report;
pub mod user;
