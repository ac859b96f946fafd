use anyhow::Context as _;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use filmcrew_domain::profile::Gender;
use filmcrew_schema::{profile_skills, profiles, skills};

use crate::domain::repository::ProfileRepository;
use crate::domain::types::{Profile, Skill};
use crate::error::ApiError;
use crate::infra::db::{bad_enum, txn_err};

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: DatabaseConnection,
}

impl ProfileRepository for DbProfileRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, ApiError> {
        let model = profiles::Entity::find()
            .filter(profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find profile by user")?;
        model.map(profile_from_model).transpose()
    }

    async fn create(&self, profile: &Profile, skill_ids: &[i32]) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), ApiError>(|txn| {
                let profile = profile.clone();
                let skill_ids = skill_ids.to_vec();
                Box::pin(async move {
                    profile_to_active_model(&profile)
                        .insert(txn)
                        .await
                        .context("insert profile")?;
                    insert_skill_links(txn, profile.id, &skill_ids).await?;
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)?;
        Ok(())
    }

    async fn update(&self, profile: &Profile, skill_ids: &[i32]) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), ApiError>(|txn| {
                let profile = profile.clone();
                let skill_ids = skill_ids.to_vec();
                Box::pin(async move {
                    profile_to_active_model(&profile)
                        .update(txn)
                        .await
                        .context("update profile")?;
                    profile_skills::Entity::delete_many()
                        .filter(profile_skills::Column::ProfileId.eq(profile.id))
                        .exec(txn)
                        .await
                        .context("clear profile skills")?;
                    insert_skill_links(txn, profile.id, &skill_ids).await?;
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)?;
        Ok(())
    }

    async fn skills_of(&self, profile_id: Uuid) -> Result<Vec<Skill>, ApiError> {
        let links = profile_skills::Entity::find()
            .filter(profile_skills::Column::ProfileId.eq(profile_id))
            .all(&self.db)
            .await
            .context("list profile skill links")?;
        if links.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i32> = links.into_iter().map(|l| l.skill_id).collect();
        let models = skills::Entity::find()
            .filter(skills::Column::Id.is_in(ids))
            .order_by_asc(skills::Column::Name)
            .all(&self.db)
            .await
            .context("load profile skills")?;
        Ok(models.into_iter().map(skill_from_model).collect())
    }

    async fn search(
        &self,
        name: Option<&str>,
        profession: Option<&str>,
    ) -> Result<Vec<Profile>, ApiError> {
        let mut query = profiles::Entity::find();
        if let Some(name) = name {
            query = query.filter(Expr::col(profiles::Column::Name).ilike(format!("%{name}%")));
        }
        if let Some(profession) = profession {
            query = query.filter(
                Expr::col(profiles::Column::Profession).ilike(format!("%{profession}%")),
            );
        }
        let models = query
            .order_by_asc(profiles::Column::Name)
            .all(&self.db)
            .await
            .context("search profiles")?;
        models.into_iter().map(profile_from_model).collect()
    }
}

async fn insert_skill_links(
    txn: &DatabaseTransaction,
    profile_id: Uuid,
    skill_ids: &[i32],
) -> Result<(), ApiError> {
    if skill_ids.is_empty() {
        return Ok(());
    }
    let now = Utc::now();
    let links = skill_ids.iter().map(|&skill_id| profile_skills::ActiveModel {
        profile_id: Set(profile_id),
        skill_id: Set(skill_id),
        created_at: Set(now),
    });
    profile_skills::Entity::insert_many(links)
        .exec(txn)
        .await
        .context("insert profile skill links")?;
    Ok(())
}

fn profile_to_active_model(profile: &Profile) -> profiles::ActiveModel {
    profiles::ActiveModel {
        id: Set(profile.id),
        user_id: Set(profile.user_id),
        name: Set(profile.name.clone()),
        age: Set(profile.age),
        gender: Set(profile.gender.map(|g| g.as_str().to_owned())),
        profession: Set(profile.profession.clone()),
        bio: Set(profile.bio.clone()),
        is_actor: Set(profile.is_actor),
        profile_photo_url: Set(profile.profile_photo_url.clone()),
        city: Set(profile.city.clone()),
        state: Set(profile.state.clone()),
        country: Set(profile.country.clone()),
        latitude: Set(profile.latitude),
        longitude: Set(profile.longitude),
        years_of_experience: Set(profile.years_of_experience),
        previous_projects: Set(profile.previous_projects.clone()),
        portfolio_url: Set(profile.portfolio_url.clone()),
        created_at: Set(profile.created_at),
        updated_at: Set(profile.updated_at),
    }
}

fn profile_from_model(model: profiles::Model) -> Result<Profile, ApiError> {
    let gender = model
        .gender
        .as_deref()
        .map(|g| Gender::parse(g).ok_or_else(|| bad_enum("gender", g)))
        .transpose()?;
    Ok(Profile {
        id: model.id,
        user_id: model.user_id,
        name: model.name,
        age: model.age,
        gender,
        profession: model.profession,
        bio: model.bio,
        is_actor: model.is_actor,
        profile_photo_url: model.profile_photo_url,
        city: model.city,
        state: model.state,
        country: model.country,
        latitude: model.latitude,
        longitude: model.longitude,
        years_of_experience: model.years_of_experience,
        previous_projects: model.previous_projects,
        portfolio_url: model.portfolio_url,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

pub(crate) fn skill_from_model(model: skills::Model) -> Skill {
    Skill {
        id: model.id,
        name: model.name,
        category: model.category,
        created_at: model.created_at,
    }
}
