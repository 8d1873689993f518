//! Persona response engine.
//!
//! Personas and their therapists are immutable configuration loaded once at
//! startup into a [`catalog::PersonaCatalog`]. The [`engine::ResponseEngine`]
//! answers chat requests from that catalog without touching the store.

pub mod catalog;
pub mod engine;
