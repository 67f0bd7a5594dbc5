use crate::config::AppConfig;
use crate::db::{apply_sql_file, init_db, Database};
use crate::responses::error_response;
use crate::router::handle;
use crate::state::AppState;
use astra::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod auth;
mod config;
mod db;
mod domain;
mod errors;
mod responses;
mod router;
mod state;
mod templates;

#[cfg(test)]
mod tests;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "casa_listings=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let db = Database::new(&config.db_path);
    init_db(&db, &config.schema_path)?;
    if let Some(seed) = &config.seed_path {
        apply_sql_file(&db, seed)?;
        tracing::info!(seed = %seed.display(), "seed data applied");
    }

    let app = AppState::new(db, &config);

    tracing::info!(addr = %config.addr, workers = config.workers, "starting server");
    Server::bind(&config.addr)
        .max_workers(config.workers)
        .serve(move |req, _info| match handle(req, &app) {
            Ok(resp) => resp,
            Err(err) => error_response(err),
        })?;

    tracing::info!("server shut down cleanly");
    Ok(())
}
