use chrono::Utc;
use uuid::Uuid;

use filmcrew_domain::profile::Gender;

use crate::domain::repository::{ProfileRepository, SkillRepository};
use crate::domain::types::{Profile, Skill};
use crate::error::ApiError;

/// Reject skill ids that are not in the catalog. One batched query.
async fn validate_skill_ids<S: SkillRepository>(
    skills: &S,
    skill_ids: &[i32],
) -> Result<(), ApiError> {
    if skill_ids.is_empty() {
        return Ok(());
    }
    let existing = skills.find_existing_ids(skill_ids).await?;
    if skill_ids.iter().any(|id| !existing.contains(id)) {
        return Err(ApiError::UnknownSkill);
    }
    Ok(())
}

/// Actor profiles are searchable for casting and must carry age, gender,
/// and a headshot.
fn validate_actor_fields(profile: &Profile) -> Result<(), ApiError> {
    if profile.is_actor
        && (profile.age.is_none()
            || profile.gender.is_none()
            || profile.profile_photo_url.is_none())
    {
        return Err(ApiError::MissingActorFields);
    }
    Ok(())
}

// ── CreateProfile ─────────────────────────────────────────────────────────────

pub struct CreateProfileInput {
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub profession: Option<String>,
    pub bio: Option<String>,
    pub is_actor: bool,
    pub profile_photo_url: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub years_of_experience: Option<i32>,
    pub previous_projects: Option<String>,
    pub portfolio_url: Option<String>,
    pub skill_ids: Vec<i32>,
}

pub struct CreateProfileUseCase<P: ProfileRepository, S: SkillRepository> {
    pub profiles: P,
    pub skills: S,
}

impl<P: ProfileRepository, S: SkillRepository> CreateProfileUseCase<P, S> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: CreateProfileInput,
    ) -> Result<Profile, ApiError> {
        if self.profiles.find_by_user(user_id).await?.is_some() {
            return Err(ApiError::ProfileAlreadyExists);
        }
        validate_skill_ids(&self.skills, &input.skill_ids).await?;

        let now = Utc::now();
        let profile = Profile {
            id: Uuid::new_v4(),
            user_id,
            name: input.name,
            age: input.age,
            gender: input.gender,
            profession: input.profession,
            bio: input.bio,
            is_actor: input.is_actor,
            profile_photo_url: input.profile_photo_url,
            city: input.city,
            state: input.state,
            country: input.country,
            latitude: input.latitude,
            longitude: input.longitude,
            years_of_experience: input.years_of_experience,
            previous_projects: input.previous_projects,
            portfolio_url: input.portfolio_url,
            created_at: now,
            updated_at: now,
        };
        validate_actor_fields(&profile)?;

        self.profiles.create(&profile, &input.skill_ids).await?;
        Ok(profile)
    }
}

// ── UpdateProfile ─────────────────────────────────────────────────────────────

/// Partial update; `None` leaves a field unchanged. Clearing optional
/// fields is not supported over this surface.
#[derive(Default)]
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub profession: Option<String>,
    pub bio: Option<String>,
    pub is_actor: Option<bool>,
    pub profile_photo_url: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub years_of_experience: Option<i32>,
    pub previous_projects: Option<String>,
    pub portfolio_url: Option<String>,
    pub skill_ids: Option<Vec<i32>>,
}

pub struct UpdateProfileUseCase<P: ProfileRepository, S: SkillRepository> {
    pub profiles: P,
    pub skills: S,
}

impl<P: ProfileRepository, S: SkillRepository> UpdateProfileUseCase<P, S> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<Profile, ApiError> {
        let mut profile = self
            .profiles
            .find_by_user(user_id)
            .await?
            .ok_or(ApiError::ProfileNotFound)?;

        if let Some(name) = input.name {
            profile.name = name;
        }
        if input.age.is_some() {
            profile.age = input.age;
        }
        if input.gender.is_some() {
            profile.gender = input.gender;
        }
        if input.profession.is_some() {
            profile.profession = input.profession;
        }
        if input.bio.is_some() {
            profile.bio = input.bio;
        }
        if let Some(is_actor) = input.is_actor {
            profile.is_actor = is_actor;
        }
        if input.profile_photo_url.is_some() {
            profile.profile_photo_url = input.profile_photo_url;
        }
        if input.city.is_some() {
            profile.city = input.city;
        }
        if input.state.is_some() {
            profile.state = input.state;
        }
        if input.country.is_some() {
            profile.country = input.country;
        }
        if input.latitude.is_some() {
            profile.latitude = input.latitude;
        }
        if input.longitude.is_some() {
            profile.longitude = input.longitude;
        }
        if input.years_of_experience.is_some() {
            profile.years_of_experience = input.years_of_experience;
        }
        if input.previous_projects.is_some() {
            profile.previous_projects = input.previous_projects;
        }
        if input.portfolio_url.is_some() {
            profile.portfolio_url = input.portfolio_url;
        }
        profile.updated_at = Utc::now();

        validate_actor_fields(&profile)?;

        let skill_ids = match input.skill_ids {
            Some(ids) => {
                validate_skill_ids(&self.skills, &ids).await?;
                ids
            }
            None => self
                .profiles
                .skills_of(profile.id)
                .await?
                .into_iter()
                .map(|s| s.id)
                .collect(),
        };

        self.profiles.update(&profile, &skill_ids).await?;
        Ok(profile)
    }
}

// ── GetProfile ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ProfileWithSkills {
    pub profile: Profile,
    pub skills: Vec<Skill>,
}

pub struct GetProfileUseCase<P: ProfileRepository> {
    pub profiles: P,
}

impl<P: ProfileRepository> GetProfileUseCase<P> {
    pub async fn execute(&self, user_id: Uuid) -> Result<ProfileWithSkills, ApiError> {
        let profile = self
            .profiles
            .find_by_user(user_id)
            .await?
            .ok_or(ApiError::ProfileNotFound)?;
        let skills = self.profiles.skills_of(profile.id).await?;
        Ok(ProfileWithSkills { profile, skills })
    }
}
