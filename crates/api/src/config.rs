use std::str::FromStr;

use axum::http::HeaderValue;

use crate::auth::jwt::{JwtConfig, DEFAULT_ACCESS_EXPIRY_HOURS, DEFAULT_REFRESH_EXPIRY_DAYS};
use crate::auth::password::DEFAULT_BCRYPT_COST;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set and non-empty")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Which document store backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    /// In-process stores; data is lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::Invalid {
                name: "STORE_BACKEND",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the signing secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// bcrypt work factor for new password hashes (default: `14`).
    pub bcrypt_cost: u32,
    pub store_backend: StoreBackend,
    pub mongo: MongoConfig,
    /// Token signing secret and expiry durations.
    pub jwt: JwtConfig,
}

/// Read `name` or fall back to `default`, then parse.
fn var_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: &str,
) -> Result<T, ConfigError> {
    let value = lookup(name).unwrap_or_else(|| default.to_string());
    let parsed: Result<T, _> = value.trim().parse();
    parsed.map_err(|_| ConfigError::Invalid { name, value })
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                       |
    /// |---------------------------|-------------------------------|
    /// | `HOST`                    | `0.0.0.0`                     |
    /// | `PORT`                    | `8080`                        |
    /// | `CORS_ORIGINS`            | `http://localhost:3000`       |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                          |
    /// | `SECRET_KEY`              | **required**                  |
    /// | `JWT_ACCESS_EXPIRY_HOURS` | `24`                          |
    /// | `JWT_REFRESH_EXPIRY_DAYS` | `7`                           |
    /// | `BCRYPT_COST`             | `14`                          |
    /// | `STORE_BACKEND`           | `mongo`                       |
    /// | `MONGODB_URI`             | `mongodb://localhost:27017`   |
    /// | `MONGODB_DATABASE`        | `bistro`                      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ServerConfig::from_env`] but reading from an arbitrary source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = var_or(&lookup, "PORT", "8080")?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(bad) = cors_origins
            .iter()
            .find(|o| HeaderValue::from_str(o).is_err())
        {
            return Err(ConfigError::Invalid {
                name: "CORS_ORIGINS",
                value: bad.clone(),
            });
        }

        let request_timeout_secs: u64 = var_or(&lookup, "REQUEST_TIMEOUT_SECS", "30")?;

        let bcrypt_cost: u32 = var_or(&lookup, "BCRYPT_COST", &DEFAULT_BCRYPT_COST.to_string())?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        let store_backend: StoreBackend = var_or(&lookup, "STORE_BACKEND", "mongo")?;
        let mongo = MongoConfig {
            uri: lookup("MONGODB_URI").unwrap_or_else(|| "mongodb://localhost:27017".into()),
            database: lookup("MONGODB_DATABASE").unwrap_or_else(|| "bistro".into()),
        };

        let secret = lookup("SECRET_KEY").unwrap_or_default();
        let jwt = JwtConfig::new(
            secret,
            var_or(
                &lookup,
                "JWT_ACCESS_EXPIRY_HOURS",
                &DEFAULT_ACCESS_EXPIRY_HOURS.to_string(),
            )?,
            var_or(
                &lookup,
                "JWT_REFRESH_EXPIRY_DAYS",
                &DEFAULT_REFRESH_EXPIRY_DAYS.to_string(),
            )?,
        )?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            bcrypt_cost,
            store_backend,
            mongo,
            jwt,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_with_secret_only() {
        let config = load(&[("SECRET_KEY", "s3cret")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.bcrypt_cost, 14);
        assert_eq!(config.store_backend, StoreBackend::Mongo);
        assert_eq!(config.mongo.database, "bistro");
        assert_eq!(config.jwt.access_token_expiry_hours, 24);
        assert_eq!(config.jwt.refresh_token_expiry_days, 7);
    }

    #[test]
    fn missing_or_empty_secret_is_refused() {
        assert_matches!(load(&[]), Err(ConfigError::Missing("SECRET_KEY")));
        assert_matches!(
            load(&[("SECRET_KEY", "")]),
            Err(ConfigError::Missing("SECRET_KEY"))
        );
    }

    #[test]
    fn invalid_numbers_are_reported() {
        assert_matches!(
            load(&[("SECRET_KEY", "k"), ("PORT", "http")]),
            Err(ConfigError::Invalid { name: "PORT", .. })
        );
        assert_matches!(
            load(&[("SECRET_KEY", "k"), ("BCRYPT_COST", "40")]),
            Err(ConfigError::Invalid { name: "BCRYPT_COST", .. })
        );
    }

    #[test]
    fn token_lifetimes_are_range_checked() {
        assert_matches!(
            load(&[("SECRET_KEY", "k"), ("JWT_ACCESS_EXPIRY_HOURS", "0")]),
            Err(ConfigError::Invalid { name: "JWT_ACCESS_EXPIRY_HOURS", .. })
        );
        assert_matches!(
            load(&[("SECRET_KEY", "k"), ("JWT_ACCESS_EXPIRY_HOURS", "9223372036854775")]),
            Err(ConfigError::Invalid { name: "JWT_ACCESS_EXPIRY_HOURS", .. })
        );
        assert_matches!(
            load(&[("SECRET_KEY", "k"), ("JWT_REFRESH_EXPIRY_DAYS", "-3")]),
            Err(ConfigError::Invalid { name: "JWT_REFRESH_EXPIRY_DAYS", .. })
        );
        let config = load(&[
            ("SECRET_KEY", "k"),
            ("JWT_ACCESS_EXPIRY_HOURS", "2"),
            ("JWT_REFRESH_EXPIRY_DAYS", "30"),
        ])
        .unwrap();
        assert_eq!(config.jwt.access_token_expiry_hours, 2);
        assert_eq!(config.jwt.refresh_token_expiry_days, 30);
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = load(&[
            ("SECRET_KEY", "k"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,,"),
            ("STORE_BACKEND", "memory"),
        ])
        .unwrap();
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.store_backend, StoreBackend::Memory);
    }

    #[test]
    fn unparseable_cors_origin_is_refused() {
        assert_matches!(
            load(&[("SECRET_KEY", "k"), ("CORS_ORIGINS", "http://ok.test,bad\norigin")]),
            Err(ConfigError::Invalid { name: "CORS_ORIGINS", .. })
        );
    }
}
