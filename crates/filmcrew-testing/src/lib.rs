//! Test utilities for the FilmCrew backend.
//!
//! Import in `#[cfg(test)]` blocks and dev-dependencies only — never in
//! production code.

pub mod auth;
