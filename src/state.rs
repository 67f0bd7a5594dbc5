use crate::auth::magic::MagicLinkConfig;
use crate::config::AppConfig;
use crate::db::Database;

/// Shared by every worker; cheap to clone.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Database,
    pub magic: MagicLinkConfig,
    pub expose_magic_links: bool,
}

impl AppState {
    pub fn new(db: Database, config: &AppConfig) -> Self {
        Self {
            db,
            magic: MagicLinkConfig::default(),
            expose_magic_links: config.expose_magic_links,
        }
    }
}
