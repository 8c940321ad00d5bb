use std::net::IpAddr;
use std::str::FromStr;

use axum::http::HeaderValue;

/// A configuration variable holding a value that cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Origins allowed by CORS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// `CORS_ORIGINS=*`: any origin.
    Any,
    /// An explicit list of origins. Never contains `*`.
    List(Vec<HeaderValue>),
}

impl CorsOrigins {
    /// Parse a comma-separated `CORS_ORIGINS` value. A lone `*` allows any
    /// origin; `*` mixed with explicit origins is rejected.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let entries: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if entries == ["*"] {
            return Ok(CorsOrigins::Any);
        }

        let mut origins = Vec::with_capacity(entries.len());
        for origin in entries {
            if origin == "*" {
                return Err(ConfigError::Invalid {
                    var: "CORS_ORIGINS",
                    value: raw.to_string(),
                    reason: "'*' cannot be combined with explicit origins".to_string(),
                });
            }
            let value = HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                var: "CORS_ORIGINS",
                value: origin.to_string(),
                reason: e.to_string(),
            })?;
            origins.push(value);
        }
        Ok(CorsOrigins::List(origins))
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: CorsOrigins,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on closing the item store after the HTTP server drains
    /// (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// PostgreSQL URL. When unset the server runs on the in-memory store.
    pub database_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `DATABASE_URL`         | unset (in-memory store)    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        if let Err(e) = host.parse::<IpAddr>() {
            return Err(ConfigError::Invalid {
                var: "HOST",
                value: host,
                reason: e.to_string(),
            });
        }

        let port: u16 = parse_var(&lookup, "PORT", 3000)?;

        let cors_origins = CorsOrigins::parse(
            &lookup("CORS_ORIGINS").unwrap_or_else(|| "http://localhost:5173".into()),
        )?;

        let request_timeout_secs: u64 = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        let shutdown_timeout_secs: u64 = parse_var(&lookup, "SHUTDOWN_TIMEOUT_SECS", 30)?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            database_url,
        })
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(
            config.cors_origins,
            CorsOrigins::List(vec![HeaderValue::from_static("http://localhost:5173")])
        );
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.shutdown_timeout_secs, 30);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn overrides_are_read() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "2022"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("DATABASE_URL", "postgres://localhost/groceries"),
        ]))
        .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 2022);
        assert_eq!(
            config.cors_origins,
            CorsOrigins::List(vec![
                HeaderValue::from_static("http://a.test"),
                HeaderValue::from_static("http://b.test"),
            ])
        );
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/groceries")
        );
    }

    #[test]
    fn blank_database_url_means_in_memory() {
        let config = ServerConfig::from_lookup(lookup_from(&[("DATABASE_URL", "  ")])).unwrap();
        assert!(config.database_url.is_none());
    }

    #[test]
    fn malformed_numbers_are_errors() {
        let result = ServerConfig::from_lookup(lookup_from(&[("PORT", "eighty")]));
        assert_matches!(result, Err(ConfigError::Invalid { var: "PORT", .. }));

        let result = ServerConfig::from_lookup(lookup_from(&[("REQUEST_TIMEOUT_SECS", "-1")]));
        assert_matches!(
            result,
            Err(ConfigError::Invalid {
                var: "REQUEST_TIMEOUT_SECS",
                ..
            })
        );
    }

    #[test]
    fn invalid_host_is_an_error() {
        let result = ServerConfig::from_lookup(lookup_from(&[("HOST", "not an ip")]));
        assert_matches!(result, Err(ConfigError::Invalid { var: "HOST", .. }));
    }

    #[test]
    fn lone_wildcard_allows_any_origin() {
        let config = ServerConfig::from_lookup(lookup_from(&[("CORS_ORIGINS", " * ")])).unwrap();
        assert_eq!(config.cors_origins, CorsOrigins::Any);
    }

    #[test]
    fn wildcard_mixed_with_origins_is_an_error() {
        let result =
            ServerConfig::from_lookup(lookup_from(&[("CORS_ORIGINS", "*,http://a.test")]));
        assert_matches!(
            result,
            Err(ConfigError::Invalid {
                var: "CORS_ORIGINS",
                ..
            })
        );
    }
}
