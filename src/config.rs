//! Runtime configuration, resolved once at startup from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub workers: usize,
    pub db_path: PathBuf,
    pub schema_path: PathBuf,
    /// Optional SQL file applied after the schema (demo listings).
    pub seed_path: Option<PathBuf>,
    /// Show the magic link in the login response instead of only logging it.
    pub expose_magic_links: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            workers: 8,
            db_path: PathBuf::from("casa.sqlite3"),
            schema_path: PathBuf::from("sql/schema.sql"),
            seed_path: None,
            expose_magic_links: false,
        }
    }
}

impl AppConfig {
    /// Reads `CASA_*` variables from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] but with an injectable lookup, for tests.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("CASA_ADDR") {
            cfg.addr = v
                .trim()
                .parse()
                .with_context(|| format!("CASA_ADDR is not a socket address: {v}"))?;
        }
        if let Some(v) = get("CASA_WORKERS") {
            cfg.workers = v
                .trim()
                .parse()
                .with_context(|| format!("CASA_WORKERS is not a number: {v}"))?;
            anyhow::ensure!(cfg.workers > 0, "CASA_WORKERS must be at least 1");
        }
        if let Some(v) = get("CASA_DB_PATH") {
            cfg.db_path = PathBuf::from(v);
        }
        if let Some(v) = get("CASA_SCHEMA_PATH") {
            cfg.schema_path = PathBuf::from(v);
        }
        cfg.seed_path = get("CASA_SEED_PATH").map(PathBuf::from);
        if let Some(v) = get("CASA_EXPOSE_MAGIC_LINKS") {
            cfg.expose_magic_links = parse_flag(&v)
                .with_context(|| format!("CASA_EXPOSE_MAGIC_LINKS is not a boolean: {v}"))?;
        }

        Ok(cfg)
    }
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognized flag value '{other}'"),
    }
}
