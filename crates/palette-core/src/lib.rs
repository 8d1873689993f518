//! Business logic and repository trait definitions for Palette.
//!
//! This crate holds the persona response engine and the notes/seed services,
//! and defines the "ports" (repository traits) that the infrastructure layer
//! implements. It depends only on `palette-types` -- never on
//! `palette-infra` or any database/IO crate.

pub mod persona;
pub mod repository;
pub mod service;
