use sea_orm::entity::prelude::*;

/// Film project. `is_fully_staffed` is derived from its roles and only
/// written by the staffing invariant helpers.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub creator_id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub project_type: String,
    pub release_platform: Option<String>,
    pub estimated_completion: Option<chrono::DateTime<chrono::Utc>>,
    pub status: String,
    pub is_fully_staffed: bool,
    pub last_status_update: Option<chrono::DateTime<chrono::Utc>>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
