use crate::error::ConfigError;
use std::net::SocketAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub store: StoreBackend,
    /// Schema holding the products table, enum type and id sequence.
    pub schema: String,
    /// Generated ids are `<id_prefix><sequence>`.
    pub id_prefix: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub body_limit: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| "postgres://localhost/products".into());

        let store = match lookup("PRODUCT_STORE").as_deref().map(str::trim) {
            None | Some("") | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "PRODUCT_STORE",
                    reason: format!("expected 'postgres' or 'memory', got '{}'", other),
                })
            }
        };

        let schema = lookup("PRODUCT_SCHEMA").unwrap_or_else(|| "public".into());
        if !is_identifier(&schema) {
            return Err(ConfigError::Invalid {
                key: "PRODUCT_SCHEMA",
                reason: format!("'{}' is not a valid identifier", schema),
            });
        }

        let id_prefix = lookup("PRODUCT_ID_PREFIX").unwrap_or_else(|| "p".into());
        if id_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "PRODUCT_ID_PREFIX",
                reason: "must not be blank".into(),
            });
        }

        let bind_addr = lookup("PRODUCT_BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".into())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "PRODUCT_BIND_ADDR",
                reason: e.to_string(),
            })?;

        let max_connections: u32 = parse_positive(&lookup, "DB_MAX_CONNECTIONS", 5)?;
        let body_limit: usize = parse_positive(&lookup, "PRODUCT_BODY_LIMIT", 64 * 1024)?;

        Ok(Settings {
            database_url,
            store,
            schema,
            id_prefix,
            bind_addr,
            max_connections,
            body_limit,
        })
    }
}

fn parse_positive<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialOrd + Default,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(ConfigError::Invalid {
            key,
            reason: format!("expected a positive integer, got '{}'", raw),
        }),
    }
}

/// Plain PostgreSQL identifier: letter or underscore, then letters, digits, underscores.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
