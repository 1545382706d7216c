use std::fmt;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

const DEFAULT_DATABASE_URL: &str = "sqlite://wrappeds.db";
const DEFAULT_PUBLIC_DIR: &str = "public";

/// Application configuration loaded from environment variables.
/// Startup fails if `ADMIN_PASSWORD` is missing: there is no built-in admin secret.
#[derive(Clone)]
pub struct Config {
    /// `postgres://...` selects PostgreSQL, `sqlite:...` the embedded store.
    pub database_url: String,
    pub admin_password: String,
    /// Root directory that sample `static_path` values are resolved against.
    pub public_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let admin_password = require_env("ADMIN_PASSWORD")?;
        if admin_password.trim().is_empty() {
            bail!("ADMIN_PASSWORD must not be empty");
        }

        Ok(Config {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            admin_password,
            public_dir: std::env::var("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_PUBLIC_DIR)),
            port: parse_port(std::env::var("PORT").ok().as_deref())?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("admin_password", &"<redacted>")
            .field("public_dir", &self.public_dir)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_port(raw: Option<&str>) -> Result<u16> {
    raw.unwrap_or("3000")
        .parse::<u16>()
        .context("PORT must be a valid port number")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_defaults_to_3000() {
        assert_eq!(parse_port(None).unwrap(), 3000);
    }

    #[test]
    fn test_port_parses_value() {
        assert_eq!(parse_port(Some("8081")).unwrap(), 8081);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = parse_port(Some("not-a-port")).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_require_env_names_missing_key() {
        let err = require_env("WRAPPED_API_TEST_SURELY_UNSET").unwrap_err();
        assert!(err.to_string().contains("WRAPPED_API_TEST_SURELY_UNSET"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            admin_password: "hunter2".to_string(),
            public_dir: PathBuf::from("public"),
            port: 3000,
            rust_log: "info".to_string(),
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
