use std::path::PathBuf;

use axum::http::HeaderValue;
use chrono::TimeDelta;

/// Default ceiling for completion callback bodies (5 MB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Server configuration loaded from environment variables.
///
/// Everything except the engine start URL has a default suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Workflow engine start webhook.
    pub engine_start_url: String,
    /// PostgreSQL URL; `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// How long completed results stay visible; `None` keeps them forever.
    pub result_ttl: Option<TimeDelta>,
    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
    /// Directory of static front-end files served for unmatched routes.
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `ENGINE_START_URL`     | required                   |
    /// | `DATABASE_URL`         | unset (in-memory store)    |
    /// | `RESULT_TTL_SECS`      | unset (keep forever)       |
    /// | `MAX_BODY_BYTES`       | `5242880`                  |
    /// | `STATIC_DIR`           | unset                      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", var("PORT"), 3000u16)?;

        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                    var: "CORS_ORIGINS",
                    reason: format!("'{origin}': {e}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let request_timeout_secs =
            parse_or("REQUEST_TIMEOUT_SECS", var("REQUEST_TIMEOUT_SECS"), 30u64)?;

        let engine_start_url =
            var("ENGINE_START_URL").ok_or(ConfigError::Missing("ENGINE_START_URL"))?;
        if !engine_start_url.starts_with("http://") && !engine_start_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                var: "ENGINE_START_URL",
                reason: "must be an http(s) URL".into(),
            });
        }

        let database_url = var("DATABASE_URL");

        let result_ttl = match var("RESULT_TTL_SECS") {
            Some(raw) => Some(parse_ttl(&raw)?),
            None => None,
        };

        let max_body_bytes =
            parse_or("MAX_BODY_BYTES", var("MAX_BODY_BYTES"), DEFAULT_MAX_BODY_BYTES)?;

        let static_dir = var("STATIC_DIR").map(PathBuf::from);

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            engine_start_url,
            database_url,
            result_ttl,
            max_body_bytes,
            static_dir,
        })
    }
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn parse_ttl(raw: &str) -> Result<TimeDelta, ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        var: "RESULT_TTL_SECS",
        reason: reason.to_string(),
    };
    let secs: i64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid("must be a whole number of seconds"))?;
    if secs <= 0 {
        return Err(invalid("must be positive"));
    }
    TimeDelta::try_seconds(secs).ok_or_else(|| invalid("out of range"))
}
