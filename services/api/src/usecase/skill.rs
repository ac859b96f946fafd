use crate::domain::repository::SkillRepository;
use crate::domain::types::Skill;
use crate::error::ApiError;

pub struct CreateSkillInput {
    pub name: String,
    pub category: Option<String>,
}

pub struct CreateSkillUseCase<S: SkillRepository> {
    pub skills: S,
}

impl<S: SkillRepository> CreateSkillUseCase<S> {
    pub async fn execute(&self, input: CreateSkillInput) -> Result<Skill, ApiError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ApiError::UnknownSkill);
        }
        if self.skills.find_by_name(name).await?.is_some() {
            return Err(ApiError::SkillAlreadyExists);
        }
        self.skills.create(name, input.category.as_deref()).await
    }
}

pub struct ListSkillsUseCase<S: SkillRepository> {
    pub skills: S,
}

impl<S: SkillRepository> ListSkillsUseCase<S> {
    pub async fn execute(&self, category: Option<&str>) -> Result<Vec<Skill>, ApiError> {
        self.skills.list(category).await
    }
}

pub struct GetSkillUseCase<S: SkillRepository> {
    pub skills: S,
}

impl<S: SkillRepository> GetSkillUseCase<S> {
    pub async fn execute(&self, id: i32) -> Result<Skill, ApiError> {
        self.skills
            .find_by_id(id)
            .await?
            .ok_or(ApiError::SkillNotFound)
    }
}
