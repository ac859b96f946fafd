use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProfileSkills::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ProfileSkills::ProfileId).uuid().not_null())
                    .col(ColumnDef::new(ProfileSkills::SkillId).integer().not_null())
                    .col(
                        ColumnDef::new(ProfileSkills::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ProfileSkills::ProfileId)
                            .col(ProfileSkills::SkillId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProfileSkills::Table, ProfileSkills::ProfileId)
                            .to(UserProfiles::Table, UserProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProfileSkills::Table, ProfileSkills::SkillId)
                            .to(Skills::Table, Skills::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProfileSkills::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ProfileSkills {
    Table,
    ProfileId,
    SkillId,
    CreatedAt,
}

#[derive(Iden)]
enum UserProfiles {
    Table,
    Id,
}

#[derive(Iden)]
enum Skills {
    Table,
    Id,
}
