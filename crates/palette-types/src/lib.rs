//! Shared domain types for Palette.
//!
//! This crate contains the domain types used across the Palette backend:
//! personas and chat turns, therapists, children and guardians, therapy
//! sessions and progress notes, plus their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod child;
pub mod config;
pub mod error;
pub mod persona;
pub mod session;
pub mod therapist;
