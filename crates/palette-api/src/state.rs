//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over repository traits, but AppState pins them to the
//! SQLite implementations.

use std::path::PathBuf;
use std::sync::Arc;

use palette_core::persona::engine::ResponseEngine;
use palette_core::service::notes::NotesService;
use palette_core::service::seed::SeedService;
use palette_infra::config::{database_url, load_app_config, load_catalog, resolve_data_dir};
use palette_infra::sqlite::notes::SqliteNotesRepository;
use palette_infra::sqlite::pool::DatabasePool;
use palette_infra::sqlite::registry::SqliteRegistryRepository;
use palette_types::config::AppConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteNotesService = NotesService<SqliteNotesRepository>;

pub type ConcreteSeedService = SeedService<SqliteRegistryRepository>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ResponseEngine>,
    pub notes_service: Arc<ConcreteNotesService>,
    pub seed_service: Arc<ConcreteSeedService>,
    pub config: Arc<AppConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state from the data directory's config.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_app_config(&data_dir).await;
        Self::build(config, data_dir).await
    }

    /// Wire services from an explicit config: load the catalog, connect to
    /// the database (running migrations), and build the services.
    pub async fn build(config: AppConfig, data_dir: PathBuf) -> anyhow::Result<Self> {
        let catalog = load_catalog(&config).await?;
        let engine = ResponseEngine::new(Arc::new(catalog));

        let db_pool = DatabasePool::new(&database_url(&config, &data_dir)).await?;

        let notes_service = NotesService::new(
            SqliteNotesRepository::new(db_pool.clone()),
            config.notes.placeholder_therapist_id,
            config.notes.recent_limit,
        );
        let seed_service = SeedService::new(SqliteRegistryRepository::new(db_pool));

        Ok(Self {
            engine: Arc::new(engine),
            notes_service: Arc::new(notes_service),
            seed_service: Arc::new(seed_service),
            config: Arc::new(config),
            data_dir,
        })
    }
}
