use std::path::PathBuf;

use anyhow::{Context, Result};

/// Path of the reference geography dataset, relative to the form's origin.
pub const REFERENCE_DATA_PATH: &str = "/data/countries.json";

/// Runner configuration loaded from environment variables.
/// Every variable has a default; only malformed values are rejected.
#[derive(Debug, Clone)]
pub struct Config {
    pub form_origin: String,
    /// Read the dataset from disk instead of over HTTP when set.
    pub reference_data_file: Option<PathBuf>,
    /// JSON snapshot of a previous submission, e.g. `{"country":"Philippines"}`.
    pub prefill_json: Option<String>,
    pub fetch_timeout_secs: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            form_origin: std::env::var("FORM_ORIGIN")
                .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string()),
            reference_data_file: optional_env("REFERENCE_DATA_FILE").map(PathBuf::from),
            prefill_json: optional_env("FORM_PREFILL"),
            fetch_timeout_secs: std::env::var("FETCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("FETCH_TIMEOUT_SECS must be a whole number of seconds")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Full URL of the reference dataset.
    pub fn reference_data_url(&self) -> String {
        format!(
            "{}{}",
            self.form_origin.trim_end_matches('/'),
            REFERENCE_DATA_PATH
        )
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
