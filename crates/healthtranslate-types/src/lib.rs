//! Shared wire types and domain models for the HealthTranslate gateway.

pub mod api;
pub mod models;
