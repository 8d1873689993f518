//! HTTP/REST API layer for Palette.
//!
//! Axum-based JSON API under `/api/` with flat `{"error": ...}` failure
//! bodies and CORS open to any origin.

pub mod error;
pub mod handlers;
pub mod router;
