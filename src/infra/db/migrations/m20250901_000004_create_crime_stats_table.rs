//! Migration: Create the crime_stats table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CrimeStats::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CrimeStats::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CrimeStats::IncidentType).string().not_null())
                    .col(ColumnDef::new(CrimeStats::UserRole).string().not_null())
                    .col(ColumnDef::new(CrimeStats::Status).string().not_null())
                    .col(
                        ColumnDef::new(CrimeStats::TotalReports)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CrimeStats::Pending)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CrimeStats::InProgress)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CrimeStats::Resolved)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CrimeStats::Rejected)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(CrimeStats::StartDate).date().not_null())
                    .col(ColumnDef::new(CrimeStats::EndDate).date().null())
                    .col(
                        ColumnDef::new(CrimeStats::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // One aggregate row per (incident_type, user_role, status) triple
        manager
            .create_index(
                Index::create()
                    .name("uq_crime_stats_type_role_status")
                    .table(CrimeStats::Table)
                    .col(CrimeStats::IncidentType)
                    .col(CrimeStats::UserRole)
                    .col(CrimeStats::Status)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // The spike scan windows on start_date
        manager
            .create_index(
                Index::create()
                    .name("idx_crime_stats_start_date")
                    .table(CrimeStats::Table)
                    .col(CrimeStats::StartDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CrimeStats::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CrimeStats {
    Table,
    Id,
    IncidentType,
    UserRole,
    Status,
    TotalReports,
    Pending,
    InProgress,
    Resolved,
    Rejected,
    StartDate,
    EndDate,
    UpdatedAt,
}
