//! Host-visible hydration configuration (spec.md §6's enumerated config,
//! §4.2's inputs).
//!
//! The core never parses a config file itself — a host assembles
//! `DriverConfig` from TOML/env via `figment` (or any other mechanism) and
//! hands over the already-built value.

use std::collections::BTreeSet;

use ctxcore_domain::constants::UNLIMITED_TOKENS;
use ctxcore_domain::value_objects::ReportFormat;
use serde::{Deserialize, Serialize};

/// Load-time configuration for [`crate::HydrationDriver::hydrate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Output reduction applied after hydration (spec.md §10.3).
    pub format: ReportFormat,
    /// Global token ceiling; `0` disables the cap.
    pub max_tokens: usize,
    /// When non-empty, only refs whose role is in this set are kept.
    pub include: BTreeSet<String>,
    /// Refs whose role is in this set are always dropped, even if also
    /// listed in `include`.
    pub exclude: BTreeSet<String>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Full,
            max_tokens: UNLIMITED_TOKENS,
            include: BTreeSet::new(),
            exclude: BTreeSet::new(),
        }
    }
}

impl DriverConfig {
    /// Whether the token budget is active at all.
    pub fn has_budget(&self) -> bool {
        self.max_tokens != UNLIMITED_TOKENS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbudgeted_full_format_no_filters() {
        let config = DriverConfig::default();
        assert_eq!(config.format, ReportFormat::Full);
        assert!(!config.has_budget());
        assert!(config.include.is_empty());
        assert!(config.exclude.is_empty());
    }

    #[test]
    fn deserializes_partial_json_with_defaults() {
        let config: DriverConfig = serde_json::from_str(r#"{"max_tokens": 500}"#).unwrap();
        assert_eq!(config.max_tokens, 500);
        assert_eq!(config.format, ReportFormat::Full);
    }
}
