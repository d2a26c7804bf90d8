//! Library configuration that callers can serialize/deserialize.
//!
//! One configuration is active per process. It is read lazily on first use,
//! from `LAZYQ_*` environment variables unless a value was installed first.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

static ACTIVE: OnceCell<SeqConfig> = OnceCell::new();

/// Largest accepted `buffer_capacity_hint`.
pub const MAX_BUFFER_CAPACITY_HINT: usize = 1 << 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeqConfig {
    /// Inner-side size from which `join_hashed` builds a hash index instead
    /// of scanning the inner buffer for every outer element.
    pub hash_join_min_inner: usize,

    /// Initial capacity of buffers built by materializing operators.
    pub buffer_capacity_hint: usize,

    /// Emit a trace event every time an operator drains a source into memory.
    pub trace_materialize: bool,
}

impl Default for SeqConfig {
    fn default() -> Self {
        Self {
            hash_join_min_inner: 32,
            buffer_capacity_hint: 16,
            trace_materialize: true,
        }
    }
}

impl SeqConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `LAZYQ_HASH_JOIN_MIN_INNER`: inner size threshold for hashed joins
    /// - `LAZYQ_BUFFER_CAPACITY_HINT`: initial buffer capacity
    /// - `LAZYQ_TRACE_MATERIALIZE`: `true`/`false`
    ///
    /// Unparsable or out-of-range values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(s) = lookup("LAZYQ_HASH_JOIN_MIN_INNER") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.hash_join_min_inner = v;
            }
        }

        if let Some(s) = lookup("LAZYQ_BUFFER_CAPACITY_HINT") {
            match s.parse::<usize>() {
                Ok(v) if v <= MAX_BUFFER_CAPACITY_HINT => cfg.buffer_capacity_hint = v,
                _ => {}
            }
        }

        if let Some(s) = lookup("LAZYQ_TRACE_MATERIALIZE") {
            if let Ok(v) = s.parse::<bool>() {
                cfg.trace_materialize = v;
            }
        }

        cfg
    }

    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Capacity is reserved eagerly for every materialization.
        if self.buffer_capacity_hint > MAX_BUFFER_CAPACITY_HINT {
            return Err(ConfigError::Invalid(format!(
                "buffer_capacity_hint {} exceeds {}",
                self.buffer_capacity_hint, MAX_BUFFER_CAPACITY_HINT
            )));
        }
        Ok(())
    }
}

/// Make `cfg` the process-wide configuration. Fails if one is already active.
pub fn install(cfg: SeqConfig) -> Result<(), ConfigError> {
    cfg.validate()?;
    ACTIVE
        .set(cfg)
        .map_err(|_| ConfigError::AlreadyInstalled)
}

/// The active configuration (environment-derived unless installed earlier).
pub fn current() -> &'static SeqConfig {
    ACTIVE.get_or_init(SeqConfig::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_keeps_defaults() {
        let cfg = SeqConfig::from_json(r#"{ "hash_join_min_inner": 4 }"#).unwrap();
        assert_eq!(cfg.hash_join_min_inner, 4);
        assert_eq!(cfg.buffer_capacity_hint, 16);
        assert!(cfg.trace_materialize);
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(matches!(
            SeqConfig::from_json("{ not json"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SeqConfig::from_json(r#"{ "buffer_capacity_hint": 99999999 }"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_env_values_out_of_range_are_ignored() {
        let cfg = SeqConfig::from_lookup(|name| match name {
            "LAZYQ_BUFFER_CAPACITY_HINT" => Some("4611686018427387903".to_string()),
            "LAZYQ_HASH_JOIN_MIN_INNER" => Some("many".to_string()),
            "LAZYQ_TRACE_MATERIALIZE" => Some("false".to_string()),
            _ => None,
        });
        assert_eq!(cfg.buffer_capacity_hint, SeqConfig::default().buffer_capacity_hint);
        assert_eq!(cfg.hash_join_min_inner, SeqConfig::default().hash_join_min_inner);
        assert!(!cfg.trace_materialize);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_env_values_in_range_are_applied() {
        let cfg = SeqConfig::from_lookup(|name| match name {
            "LAZYQ_BUFFER_CAPACITY_HINT" => Some("1048576".to_string()),
            "LAZYQ_HASH_JOIN_MIN_INNER" => Some("7".to_string()),
            _ => None,
        });
        assert_eq!(cfg.buffer_capacity_hint, MAX_BUFFER_CAPACITY_HINT);
        assert_eq!(cfg.hash_join_min_inner, 7);
    }

    #[test]
    fn test_second_install_is_rejected() {
        let _ = current();
        assert!(matches!(
            install(SeqConfig::default()),
            Err(ConfigError::AlreadyInstalled)
        ));
    }
}
