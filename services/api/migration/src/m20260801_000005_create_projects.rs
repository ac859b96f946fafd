use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Projects::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Projects::CreatorId).uuid().not_null())
                    .col(ColumnDef::new(Projects::Name).string().not_null())
                    .col(ColumnDef::new(Projects::Description).text())
                    .col(ColumnDef::new(Projects::ProjectType).string().not_null())
                    .col(ColumnDef::new(Projects::ReleasePlatform).string())
                    .col(ColumnDef::new(Projects::EstimatedCompletion).timestamp_with_time_zone())
                    .col(ColumnDef::new(Projects::Status).string().not_null())
                    .col(
                        ColumnDef::new(Projects::IsFullyStaffed)
                            .boolean()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Projects::LastStatusUpdate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Projects::City).string())
                    .col(ColumnDef::new(Projects::State).string())
                    .col(ColumnDef::new(Projects::Country).string())
                    .col(ColumnDef::new(Projects::Latitude).double())
                    .col(ColumnDef::new(Projects::Longitude).double())
                    .col(
                        ColumnDef::new(Projects::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Projects::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Projects::Table, Projects::CreatorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Search scans active, not fully staffed projects.
        manager
            .create_index(
                Index::create()
                    .table(Projects::Table)
                    .col(Projects::Status)
                    .col(Projects::IsFullyStaffed)
                    .name("idx_projects_visibility")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Projects::Table)
                    .col(Projects::CreatorId)
                    .name("idx_projects_creator_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Projects {
    Table,
    Id,
    CreatorId,
    Name,
    Description,
    ProjectType,
    ReleasePlatform,
    EstimatedCompletion,
    Status,
    IsFullyStaffed,
    LastStatusUpdate,
    City,
    State,
    Country,
    Latitude,
    Longitude,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
