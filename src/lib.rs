use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod telemetry;
pub mod ui;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{client, db, web};

use handlers::system::HealthCache;
use repositories::{image::ImageRepository, sqlx_repo::SqlxImageRepo};
use use_cases::images::ImageHandler;

pub type AppImageHandler = ImageHandler<Arc<dyn ImageRepository>>;

pub struct AppState {
    pub image_handler: AppImageHandler,
    pub health_cache: HealthCache,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        Self::with_repository(config, Arc::new(SqlxImageRepo::new(pool)))
    }

    /// Builds state around any storage backend.
    pub fn with_repository(config: &settings::AppConfig, image_repo: Arc<dyn ImageRepository>) -> Self {
        AppState {
            image_handler: ImageHandler::new(image_repo, config.max_upload_bytes),
            health_cache: HealthCache::default(),
        }
    }
}

/// JSON body limit large enough for a maximal data URL plus its envelope.
pub fn json_limit(config: &settings::AppConfig) -> usize {
    entities::image::max_url_len(config.max_upload_bytes) + 1024
}
