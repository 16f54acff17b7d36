use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON array of postings loaded once at startup.
    pub catalog_path: PathBuf,
    pub default_top_n: usize,
    /// Seeds the tie-break generator for reproducible rankings.
    pub rank_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let default_top_n = std::env::var("DEFAULT_TOP_N")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<usize>()
            .context("DEFAULT_TOP_N must be a positive integer")?;
        anyhow::ensure!(default_top_n >= 1, "DEFAULT_TOP_N must be at least 1");

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            catalog_path: std::env::var("CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/internships.json")),
            default_top_n,
            rank_seed: optional_env("RANK_SEED")
                .map(|s| s.parse::<u64>())
                .transpose()
                .context("RANK_SEED must be an unsigned 64-bit integer")?,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
