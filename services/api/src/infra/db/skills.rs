use anyhow::Context as _;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use filmcrew_schema::skills;

use crate::domain::repository::SkillRepository;
use crate::domain::types::Skill;
use crate::error::ApiError;
use crate::infra::db::profiles::skill_from_model;

#[derive(Clone)]
pub struct DbSkillRepository {
    pub db: DatabaseConnection,
}

impl SkillRepository for DbSkillRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Skill>, ApiError> {
        let model = skills::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find skill by id")?;
        Ok(model.map(skill_from_model))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Skill>, ApiError> {
        let model = skills::Entity::find()
            .filter(skills::Column::Name.eq(name))
            .one(&self.db)
            .await
            .context("find skill by name")?;
        Ok(model.map(skill_from_model))
    }

    async fn create(&self, name: &str, category: Option<&str>) -> Result<Skill, ApiError> {
        let model = skills::ActiveModel {
            name: Set(name.to_owned()),
            category: Set(category.map(str::to_owned)),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create skill")?;
        Ok(skill_from_model(model))
    }

    async fn list(&self, category: Option<&str>) -> Result<Vec<Skill>, ApiError> {
        let mut query = skills::Entity::find();
        if let Some(category) = category {
            query = query.filter(skills::Column::Category.eq(category));
        }
        let models = query
            .order_by_asc(skills::Column::Name)
            .all(&self.db)
            .await
            .context("list skills")?;
        Ok(models.into_iter().map(skill_from_model).collect())
    }

    async fn find_existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, ApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let found: Vec<i32> = skills::Entity::find()
            .select_only()
            .column(skills::Column::Id)
            .filter(skills::Column::Id.is_in(ids.to_vec()))
            .into_tuple()
            .all(&self.db)
            .await
            .context("check skill ids")?;
        Ok(found)
    }
}
