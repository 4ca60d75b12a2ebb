use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use healthtranslate_api::together::DEFAULT_BASE_URL;

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &[
    "your_jwt_secret_fallback",
    "change-me-to-a-random-string",
    "dev-secret-change-me",
];

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,https://healthtranslate.vercel.app";

/// Process configuration, read once at startup.
pub struct Config {
    pub jwt_secret: String,
    pub encryption_key: String,
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub together_api_key: Option<String>,
    pub together_base_url: String,
    pub seed_email: String,
    pub seed_username: String,
    pub seed_password: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let or = |name: &str, default: &str| var(name).unwrap_or_else(|| default.to_string());

        let jwt_secret = var("JWT_SECRET").context("JWT_SECRET is not set")?;
        if PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!("JWT_SECRET is still a placeholder");
        }
        let encryption_key = var("ENCRYPTION_KEY").context("ENCRYPTION_KEY is not set")?;

        let port: u16 = or("PORT", "8000")
            .parse()
            .context("PORT must be a port number")?;

        let cors_origins = or("CORS_ORIGINS", DEFAULT_CORS_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            jwt_secret,
            encryption_key,
            db_path: or("DATABASE_PATH", "healthtranslate.db").into(),
            host: or("HOST", "0.0.0.0"),
            port,
            cors_origins,
            together_api_key: var("TOGETHER_AI_API_KEY"),
            together_base_url: or("TOGETHER_AI_BASE_URL", DEFAULT_BASE_URL),
            seed_email: or("SEED_EMAIL", "test@example.com"),
            seed_username: or("SEED_USERNAME", "testuser"),
            seed_password: or("SEED_PASSWORD", "testpass"),
        })
    }
}
