//! Auth types shared across the FilmCrew backend.
//!
//! Provides JWT validation and the bearer-token `Identity` extractor.

pub mod identity;
pub mod token;
