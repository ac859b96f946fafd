pub mod applications;
pub mod auth;
pub mod chat;
pub mod members;
pub mod profiles;
pub mod projects;
pub mod search;
pub mod skills;
pub mod uploads;
