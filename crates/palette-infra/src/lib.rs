//! Infrastructure layer for Palette.
//!
//! Contains implementations of the repository traits defined in `palette-core`
//! (SQLite storage) and the loaders for `config.toml` and persona catalogs.

pub mod config;
pub mod sqlite;
