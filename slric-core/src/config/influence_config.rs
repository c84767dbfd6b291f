//! Direct-influence configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_GROUP_SIZE;
use crate::types::params::{GroupSize, QuotaSpec};

/// Configuration for the voting games and the direct-influence pass.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InfluenceConfig {
    /// Quota as a percentage of weighted in-degree (q). Default depends on the entry point.
    pub quota_percent: Option<f64>,
    /// Fixed quota for every node (dq). Takes precedence over `quota_percent`.
    pub fixed_quota: Option<f64>,
    /// Maximal coalition size. Default: 4.
    pub group_size: Option<usize>,
    /// Let coalitions grow to N − 1 members. Overrides `group_size`.
    pub unbounded_groups: Option<bool>,
    /// Cap on branch-and-bound expansions per oracle call. Default: unlimited.
    pub oracle_node_budget: Option<u64>,
    /// Run per-node work on the rayon pool. Default: true.
    pub parallel: Option<bool>,
}

impl InfluenceConfig {
    /// Returns the effective quota percentage, falling back to `default`.
    pub fn effective_quota_percent(&self, default: f64) -> f64 {
        self.quota_percent.unwrap_or(default)
    }

    /// Returns the quota derivation for this config.
    pub fn quota_spec(&self, default_percent: f64) -> QuotaSpec {
        match self.fixed_quota {
            Some(q) => QuotaSpec::Fixed(q),
            None => QuotaSpec::Percent(self.effective_quota_percent(default_percent)),
        }
    }

    /// Returns the effective coalition cap, defaulting to 4.
    pub fn effective_group_size(&self) -> GroupSize {
        if self.unbounded_groups.unwrap_or(false) {
            GroupSize::Unbounded
        } else {
            GroupSize::Limited(self.group_size.unwrap_or(DEFAULT_GROUP_SIZE))
        }
    }

    /// Returns whether per-node work runs in parallel, defaulting to true.
    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }
}
