//! sea-orm entities for the FilmCrew database.
//!
//! Enum-valued columns are stored as snake_case strings; the conversion to
//! domain enums happens in the service's `infra` layer.

pub mod applications;
pub mod messages;
pub mod one_time_codes;
pub mod profile_skills;
pub mod profiles;
pub mod project_members;
pub mod project_roles;
pub mod projects;
pub mod refresh_tokens;
pub mod skills;
pub mod users;
