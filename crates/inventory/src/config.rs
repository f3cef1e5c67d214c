//! # Configuration
//!
//! Runtime settings read from the environment. A `.env` file in the working directory is
//! loaded first if present.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `INVENTORY_ACTOR_BUFFER` | 32 | Request channel capacity of each actor |
//! | `INVENTORY_UTC_OFFSET_MINUTES` | 0 | Business time zone, used for the daily sales window |
//! | `INVENTORY_PAGE_LIMIT` | 5 | Page size when a listing does not ask for one |

use chrono::{FixedOffset, Offset, Utc};
use std::env;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_ACTOR_BUFFER: usize = 32;
pub const DEFAULT_PAGE_LIMIT: u32 = 5;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryConfig {
    pub actor_buffer: usize,
    pub utc_offset: FixedOffset,
    pub page_limit: u32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            actor_buffer: DEFAULT_ACTOR_BUFFER,
            utc_offset: Utc.fix(),
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl InventoryConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the configuration from any variable source; unset variables take their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let actor_buffer = parse_var(&lookup, "INVENTORY_ACTOR_BUFFER")?
            .unwrap_or(defaults.actor_buffer);
        if actor_buffer == 0 {
            return Err(invalid("INVENTORY_ACTOR_BUFFER", "must be at least 1"));
        }

        let utc_offset = match parse_var::<i32>(&lookup, "INVENTORY_UTC_OFFSET_MINUTES")? {
            Some(minutes) => minutes
                .checked_mul(60)
                .and_then(FixedOffset::east_opt)
                .ok_or_else(|| {
                    invalid(
                        "INVENTORY_UTC_OFFSET_MINUTES",
                        format!("{minutes} is not a valid UTC offset"),
                    )
                })?,
            None => defaults.utc_offset,
        };

        let page_limit =
            parse_var(&lookup, "INVENTORY_PAGE_LIMIT")?.unwrap_or(defaults.page_limit);
        if page_limit == 0 {
            return Err(invalid("INVENTORY_PAGE_LIMIT", "must be at least 1"));
        }

        tracing::info!(actor_buffer, %utc_offset, page_limit, "Configuration loaded");
        Ok(Self {
            actor_buffer,
            utc_offset,
            page_limit,
        })
    }
}

fn invalid(var: &'static str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        var,
        message: message.into(),
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(var)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| invalid(var, format!("{raw:?}: {e}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| vars.get(var).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = InventoryConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, InventoryConfig::default());
        assert_eq!(config.page_limit, 5);
        assert_eq!(config.actor_buffer, 32);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = InventoryConfig::from_lookup(lookup(&[
            ("INVENTORY_ACTOR_BUFFER", "8"),
            ("INVENTORY_UTC_OFFSET_MINUTES", "-300"),
            ("INVENTORY_PAGE_LIMIT", "20"),
        ]))
        .unwrap();
        assert_eq!(config.actor_buffer, 8);
        assert_eq!(config.utc_offset.local_minus_utc(), -300 * 60);
        assert_eq!(config.page_limit, 20);
    }

    #[test]
    fn test_invalid_values() {
        let err = InventoryConfig::from_lookup(lookup(&[("INVENTORY_PAGE_LIMIT", "many")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "INVENTORY_PAGE_LIMIT", .. }));

        assert!(InventoryConfig::from_lookup(lookup(&[("INVENTORY_ACTOR_BUFFER", "0")])).is_err());
        assert!(
            InventoryConfig::from_lookup(lookup(&[("INVENTORY_UTC_OFFSET_MINUTES", "1500")]))
                .is_err()
        );
    }
}
