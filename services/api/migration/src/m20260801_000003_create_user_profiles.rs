use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(UserProfiles::Name).string().not_null())
                    .col(ColumnDef::new(UserProfiles::Age).integer())
                    .col(ColumnDef::new(UserProfiles::Gender).string())
                    .col(ColumnDef::new(UserProfiles::Profession).string())
                    .col(ColumnDef::new(UserProfiles::Bio).text())
                    .col(ColumnDef::new(UserProfiles::IsActor).boolean().not_null())
                    .col(ColumnDef::new(UserProfiles::ProfilePhotoUrl).string())
                    .col(ColumnDef::new(UserProfiles::City).string())
                    .col(ColumnDef::new(UserProfiles::State).string())
                    .col(ColumnDef::new(UserProfiles::Country).string())
                    .col(ColumnDef::new(UserProfiles::Latitude).double())
                    .col(ColumnDef::new(UserProfiles::Longitude).double())
                    .col(ColumnDef::new(UserProfiles::YearsOfExperience).integer())
                    .col(ColumnDef::new(UserProfiles::PreviousProjects).text())
                    .col(ColumnDef::new(UserProfiles::PortfolioUrl).string())
                    .col(
                        ColumnDef::new(UserProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserProfiles::Table, UserProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(UserProfiles::Table)
                    .col(UserProfiles::Latitude)
                    .col(UserProfiles::Longitude)
                    .name("idx_user_profiles_location")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserProfiles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserProfiles {
    Table,
    Id,
    UserId,
    Name,
    Age,
    Gender,
    Profession,
    Bio,
    IsActor,
    ProfilePhotoUrl,
    City,
    State,
    Country,
    Latitude,
    Longitude,
    YearsOfExperience,
    PreviousProjects,
    PortfolioUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
