//! Navigator configuration.
//!
//! Every field has a default, so an empty JSON object (`{}`) is a valid
//! configuration.

use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::Result;

/// Top-level settings for a `Navigator`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Route search limits.
    pub search: SearchConfig,

    /// Keep built graphs per map id and reuse them while the map revision
    /// is unchanged. When false every request rebuilds the graph.
    pub cache_graphs: bool,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            cache_graphs: true,
        }
    }
}

impl NavigatorConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Limits applied to a single route search.
///
/// Both limits are off by default; a search that exceeds either fails with
/// `Error::SearchTimeout`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Wall-clock budget in milliseconds.
    pub deadline_ms: Option<u64>,

    /// Maximum number of nodes to expand.
    pub max_expansions: Option<usize>,
}

impl SearchConfig {
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline_ms = Some(u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_max_expansions(mut self, max: usize) -> Self {
        self.max_expansions = Some(max);
        self
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }

    pub fn is_unbounded(&self) -> bool {
        self.deadline_ms.is_none() && self.max_expansions.is_none()
    }
}
