//! Domain types shared across the FilmCrew backend.
//!
//! This crate contains only pure types and invariant helpers with no
//! framework dependencies.

pub mod application;
pub mod geo;
pub mod member;
pub mod pagination;
pub mod profile;
pub mod project;
pub mod staffing;
