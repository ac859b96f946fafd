use sea_orm_migration::prelude::*;

mod m20260801_000001_create_users;
mod m20260801_000002_create_skills;
mod m20260801_000003_create_user_profiles;
mod m20260801_000004_create_profile_skills;
mod m20260801_000005_create_projects;
mod m20260801_000006_create_project_roles;
mod m20260801_000007_create_applications;
mod m20260801_000008_create_project_members;
mod m20260801_000009_create_messages;
mod m20260801_000010_create_one_time_codes;
mod m20260801_000011_create_refresh_tokens;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_users::Migration),
            Box::new(m20260801_000002_create_skills::Migration),
            Box::new(m20260801_000003_create_user_profiles::Migration),
            Box::new(m20260801_000004_create_profile_skills::Migration),
            Box::new(m20260801_000005_create_projects::Migration),
            Box::new(m20260801_000006_create_project_roles::Migration),
            Box::new(m20260801_000007_create_applications::Migration),
            Box::new(m20260801_000008_create_project_members::Migration),
            Box::new(m20260801_000009_create_messages::Migration),
            Box::new(m20260801_000010_create_one_time_codes::Migration),
            Box::new(m20260801_000011_create_refresh_tokens::Migration),
        ]
    }
}
