//! Shared service plumbing for the FilmCrew backend.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
