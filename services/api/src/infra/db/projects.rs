use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use uuid::Uuid;

use filmcrew_domain::project::{PaymentType, ProjectStatus, ProjectType};
use filmcrew_schema::{project_members, project_roles, projects};

use crate::domain::repository::{ProjectRepository, RoleRepository};
use crate::domain::types::{Member, Project, Role};
use crate::error::ApiError;
use crate::infra::db::{bad_enum, txn_err};

// ── Project repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProjectRepository {
    pub db: DatabaseConnection,
}

impl ProjectRepository for DbProjectRepository {
    async fn create_with_roles(
        &self,
        project: &Project,
        roles: &[Role],
        admin: &Member,
    ) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), ApiError>(|txn| {
                let project = project.clone();
                let roles = roles.to_vec();
                let admin = admin.clone();
                Box::pin(async move {
                    project_to_active_model(&project)
                        .insert(txn)
                        .await
                        .context("insert project")?;
                    for role in &roles {
                        role_to_active_model(role)
                            .insert(txn)
                            .await
                            .context("insert project role")?;
                    }
                    project_members::ActiveModel {
                        id: Set(admin.id),
                        project_id: Set(admin.project_id),
                        user_id: Set(admin.user_id),
                        role_id: Set(admin.role_id),
                        member_role: Set(admin.tier.as_str().to_owned()),
                        joined_at: Set(admin.joined_at),
                    }
                    .insert(txn)
                    .await
                    .context("insert admin member")?;
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, ApiError> {
        let model = projects::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find project by id")?;
        model.map(project_from_model).transpose()
    }

    async fn list_by_creator(&self, creator_id: Uuid) -> Result<Vec<Project>, ApiError> {
        let models = projects::Entity::find()
            .filter(projects::Column::CreatorId.eq(creator_id))
            .order_by_desc(projects::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list projects by creator")?;
        models.into_iter().map(project_from_model).collect()
    }

    async fn list_open(&self) -> Result<Vec<Project>, ApiError> {
        let models = projects::Entity::find()
            .filter(projects::Column::Status.eq(ProjectStatus::Active.as_str()))
            .filter(projects::Column::IsFullyStaffed.eq(false))
            .order_by_desc(projects::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list open projects")?;
        models.into_iter().map(project_from_model).collect()
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ProjectStatus,
        now: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        projects::ActiveModel {
            id: Set(id),
            status: Set(status.as_str().to_owned()),
            last_status_update: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update project status")?;
        Ok(())
    }

    async fn mark_stale_dead(&self, threshold: DateTime<Utc>) -> Result<u64, ApiError> {
        let now = Utc::now();
        let result = projects::Entity::update_many()
            .col_expr(
                projects::Column::Status,
                Expr::value(ProjectStatus::Dead.as_str()),
            )
            .col_expr(projects::Column::LastStatusUpdate, Expr::value(Some(now)))
            .col_expr(projects::Column::UpdatedAt, Expr::value(now))
            .filter(projects::Column::Status.eq(ProjectStatus::Active.as_str()))
            .filter(projects::Column::LastStatusUpdate.lt(threshold))
            .exec(&self.db)
            .await
            .context("mark stale projects dead")?;
        Ok(result.rows_affected)
    }
}

fn project_to_active_model(project: &Project) -> projects::ActiveModel {
    projects::ActiveModel {
        id: Set(project.id),
        creator_id: Set(project.creator_id),
        name: Set(project.name.clone()),
        description: Set(project.description.clone()),
        project_type: Set(project.project_type.as_str().to_owned()),
        release_platform: Set(project.release_platform.clone()),
        estimated_completion: Set(project.estimated_completion),
        status: Set(project.status.as_str().to_owned()),
        is_fully_staffed: Set(project.is_fully_staffed),
        last_status_update: Set(project.last_status_update),
        city: Set(project.city.clone()),
        state: Set(project.state.clone()),
        country: Set(project.country.clone()),
        latitude: Set(project.latitude),
        longitude: Set(project.longitude),
        created_at: Set(project.created_at),
        updated_at: Set(project.updated_at),
    }
}

pub(crate) fn project_from_model(model: projects::Model) -> Result<Project, ApiError> {
    let project_type = ProjectType::parse(&model.project_type)
        .ok_or_else(|| bad_enum("project type", &model.project_type))?;
    let status = ProjectStatus::parse(&model.status)
        .ok_or_else(|| bad_enum("project status", &model.status))?;
    Ok(Project {
        id: model.id,
        creator_id: model.creator_id,
        name: model.name,
        description: model.description,
        project_type,
        release_platform: model.release_platform,
        estimated_completion: model.estimated_completion,
        status,
        is_fully_staffed: model.is_fully_staffed,
        last_status_update: model.last_status_update,
        city: model.city,
        state: model.state,
        country: model.country,
        latitude: model.latitude,
        longitude: model.longitude,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Role repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRoleRepository {
    pub db: DatabaseConnection,
}

impl RoleRepository for DbRoleRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, ApiError> {
        let model = project_roles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find role by id")?;
        model.map(role_from_model).transpose()
    }

    async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<Role>, ApiError> {
        let models = project_roles::Entity::find()
            .filter(project_roles::Column::ProjectId.eq(project_id))
            .order_by_asc(project_roles::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list roles by project")?;
        models.into_iter().map(role_from_model).collect()
    }
}

fn role_to_active_model(role: &Role) -> project_roles::ActiveModel {
    project_roles::ActiveModel {
        id: Set(role.id),
        project_id: Set(role.project_id),
        skill_id: Set(role.skill_id),
        role_title: Set(role.role_title.clone()),
        description: Set(role.description.clone()),
        slots_available: Set(role.slots_available),
        slots_filled: Set(role.slots_filled),
        is_filled: Set(role.is_filled),
        payment_type: Set(role.payment_type.as_str().to_owned()),
        payment_amount: Set(role.payment_amount),
        payment_details: Set(role.payment_details.clone()),
        created_at: Set(role.created_at),
    }
}

pub(crate) fn role_from_model(model: project_roles::Model) -> Result<Role, ApiError> {
    let payment_type = PaymentType::parse(&model.payment_type)
        .ok_or_else(|| bad_enum("payment type", &model.payment_type))?;
    Ok(Role {
        id: model.id,
        project_id: model.project_id,
        skill_id: model.skill_id,
        role_title: model.role_title,
        description: model.description,
        slots_available: model.slots_available,
        slots_filled: model.slots_filled,
        is_filled: model.is_filled,
        payment_type,
        payment_amount: model.payment_amount,
        payment_details: model.payment_details,
        created_at: model.created_at,
    })
}
