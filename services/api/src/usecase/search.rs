use std::cmp::Ordering;

use filmcrew_domain::geo::haversine_km;
use filmcrew_domain::project::ProjectType;
use filmcrew_domain::staffing::role_is_filled;

use crate::domain::repository::{ProfileRepository, ProjectRepository, RoleRepository};
use crate::domain::types::{Profile, Project, Role, Skill};
use crate::error::ApiError;

/// Sort hits nearest first; hits whose distance is unknown go last.
fn by_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn distance_from(
    origin: Option<(f64, f64)>,
    lat: Option<f64>,
    lon: Option<f64>,
) -> Option<f64> {
    let (olat, olon) = origin?;
    Some(haversine_km(olat, olon, lat?, lon?))
}

// ── SearchProjects ────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct SearchProjectsInput {
    pub project_type: Option<ProjectType>,
    pub skill_id: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub max_distance_km: Option<f64>,
}

#[derive(Debug)]
pub struct ProjectHit {
    pub project: Project,
    pub open_roles: Vec<Role>,
    pub distance_km: Option<f64>,
}

/// Search open (active, not fully staffed) projects. A skill filter keeps
/// only projects with an unfilled role needing that skill. With an origin
/// point, hits are sorted nearest first and projects without coordinates
/// sink to the end; a distance cap drops them entirely.
pub struct SearchProjectsUseCase<P: ProjectRepository, R: RoleRepository> {
    pub projects: P,
    pub roles: R,
}

impl<P: ProjectRepository, R: RoleRepository> SearchProjectsUseCase<P, R> {
    pub async fn execute(&self, input: SearchProjectsInput) -> Result<Vec<ProjectHit>, ApiError> {
        let origin = input.latitude.zip(input.longitude);
        let mut hits = Vec::new();

        for project in self.projects.list_open().await? {
            if let Some(wanted) = input.project_type {
                if project.project_type != wanted {
                    continue;
                }
            }

            let open_roles: Vec<Role> = self
                .roles
                .list_by_project(project.id)
                .await?
                .into_iter()
                .filter(|r| !role_is_filled(r.slots_filled, r.slots_available))
                .collect();
            if let Some(skill_id) = input.skill_id {
                if !open_roles.iter().any(|r| r.skill_id == skill_id) {
                    continue;
                }
            }

            let distance_km = distance_from(origin, project.latitude, project.longitude);
            if let Some(max) = input.max_distance_km {
                match distance_km {
                    Some(d) if d <= max => {}
                    _ => continue,
                }
            }

            hits.push(ProjectHit {
                project,
                open_roles,
                distance_km,
            });
        }

        if origin.is_some() {
            hits.sort_by(|a, b| by_distance(a.distance_km, b.distance_km));
        }
        Ok(hits)
    }
}

// ── SearchPeople ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct SearchPeopleInput {
    pub name: Option<String>,
    pub profession: Option<String>,
    pub skill_id: Option<i32>,
    pub is_actor: Option<bool>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub max_distance_km: Option<f64>,
}

#[derive(Debug)]
pub struct PersonHit {
    pub profile: Profile,
    pub skills: Vec<Skill>,
    pub distance_km: Option<f64>,
}

pub struct SearchPeopleUseCase<Pf: ProfileRepository> {
    pub profiles: Pf,
}

impl<Pf: ProfileRepository> SearchPeopleUseCase<Pf> {
    pub async fn execute(&self, input: SearchPeopleInput) -> Result<Vec<PersonHit>, ApiError> {
        let origin = input.latitude.zip(input.longitude);
        let candidates = self
            .profiles
            .search(input.name.as_deref(), input.profession.as_deref())
            .await?;

        let mut hits = Vec::new();
        for profile in candidates {
            if let Some(wanted) = input.is_actor {
                if profile.is_actor != wanted {
                    continue;
                }
            }

            let skills = self.profiles.skills_of(profile.id).await?;
            if let Some(skill_id) = input.skill_id {
                if !skills.iter().any(|s| s.id == skill_id) {
                    continue;
                }
            }

            let distance_km = distance_from(origin, profile.latitude, profile.longitude);
            if let Some(max) = input.max_distance_km {
                match distance_km {
                    Some(d) if d <= max => {}
                    _ => continue,
                }
            }

            hits.push(PersonHit {
                profile,
                skills,
                distance_km,
            });
        }

        if origin.is_some() {
            hits.sort_by(|a, b| by_distance(a.distance_km, b.distance_km));
        }
        Ok(hits)
    }
}
