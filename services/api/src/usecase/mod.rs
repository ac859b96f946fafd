pub mod application;
pub mod authz;
pub mod maintenance;
pub mod membership;
pub mod message;
pub mod password;
pub mod profile;
pub mod project;
pub mod search;
pub mod signup;
pub mod skill;
pub mod token;
