use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProjectRoles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectRoles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProjectRoles::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(ProjectRoles::SkillId).integer().not_null())
                    .col(ColumnDef::new(ProjectRoles::RoleTitle).string().not_null())
                    .col(ColumnDef::new(ProjectRoles::Description).text())
                    .col(
                        ColumnDef::new(ProjectRoles::SlotsAvailable)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectRoles::SlotsFilled)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProjectRoles::IsFilled).boolean().not_null())
                    .col(
                        ColumnDef::new(ProjectRoles::PaymentType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProjectRoles::PaymentAmount).double())
                    .col(ColumnDef::new(ProjectRoles::PaymentDetails).text())
                    .col(
                        ColumnDef::new(ProjectRoles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProjectRoles::Table, ProjectRoles::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProjectRoles::Table, ProjectRoles::SkillId)
                            .to(Skills::Table, Skills::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ProjectRoles::Table)
                    .col(ProjectRoles::ProjectId)
                    .name("idx_project_roles_project_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ProjectRoles::Table)
                    .col(ProjectRoles::SkillId)
                    .name("idx_project_roles_skill_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProjectRoles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ProjectRoles {
    Table,
    Id,
    ProjectId,
    SkillId,
    RoleTitle,
    Description,
    SlotsAvailable,
    SlotsFilled,
    IsFilled,
    PaymentType,
    PaymentAmount,
    PaymentDetails,
    CreatedAt,
}

#[derive(Iden)]
enum Projects {
    Table,
    Id,
}

#[derive(Iden)]
enum Skills {
    Table,
    Id,
}
