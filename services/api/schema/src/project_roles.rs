use sea_orm::entity::prelude::*;

/// Open position on a project. `is_filled == (slots_filled >= slots_available)`;
/// both counters are only written inside transactions by the invariant
/// helpers.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "project_roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project_id: Uuid,
    pub skill_id: i32,
    pub role_title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub slots_available: i32,
    pub slots_filled: i32,
    pub is_filled: bool,
    pub payment_type: String,
    pub payment_amount: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub payment_details: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
