//! Simulation statistics collection and reporting.
//!
//! This module tracks the comparative hit rates of the simulated policies. It provides:
//! 1. **Counters:** One shared request counter and one hit counter per policy.
//! 2. **Hit rates:** `100 * hits / requests`, guarded against empty runs.
//! 3. **Reports:** The text report (`LRU\thit rate: 87.5000%`) and a serializable summary.
//!
//! A request is one load or store of the trace, whatever its width; it is a
//! hit for a policy only if every byte it covers hit in that policy's array.

use serde::Serialize;

use crate::cache::policies::Policy;
use crate::config::PolicyMode;

/// Simulation statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Number of access events processed (shared by both policies).
    pub requests: u64,
    /// Requests that fully hit in the true-LRU array.
    pub lru_hits: u64,
    /// Requests that fully hit in the pseudo-LRU array.
    pub plru_hits: u64,
}

/// Hit figures of one policy.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PolicySummary {
    /// The policy.
    pub policy: Policy,
    /// Fully-hitting requests.
    pub hits: u64,
    /// Hit rate in percent.
    pub hit_rate: f64,
}

/// Serializable snapshot of a run's statistics.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatsSummary {
    /// Number of requests.
    pub requests: u64,
    /// Per-policy figures, in report order.
    pub policies: Vec<PolicySummary>,
}

impl SimStats {
    /// Hit count of `policy`.
    pub const fn hits(&self, policy: Policy) -> u64 {
        match policy {
            Policy::Lru => self.lru_hits,
            Policy::Plru => self.plru_hits,
        }
    }

    /// Records a fully-hitting request for `policy`.
    pub fn record_hit(&mut self, policy: Policy) {
        match policy {
            Policy::Lru => self.lru_hits += 1,
            Policy::Plru => self.plru_hits += 1,
        }
    }

    /// Hit rate of `policy` in percent; `0.0` when no request was made.
    pub fn hit_rate(&self, policy: Policy) -> f64 {
        if self.requests == 0 {
            return 0.0;
        }
        self.hits(policy) as f64 * 100.0 / self.requests as f64
    }

    /// Renders the report for the policies enabled by `mode`, one line each.
    ///
    /// # Examples
    ///
    /// ```
    /// use cachesim_core::config::PolicyMode;
    /// use cachesim_core::stats::SimStats;
    ///
    /// let stats = SimStats { requests: 8, lru_hits: 7, plru_hits: 6 };
    /// assert_eq!(
    ///     stats.report(PolicyMode::Both),
    ///     "LRU\thit rate: 87.5000%\npLRU\thit rate: 75.0000%\n"
    /// );
    /// ```
    pub fn report(&self, mode: PolicyMode) -> String {
        mode.policies()
            .iter()
            .map(|&policy| {
                format!(
                    "{}\thit rate: {:.4}%\n",
                    policy.label(),
                    self.hit_rate(policy)
                )
            })
            .collect()
    }

    /// Prints the report to stdout.
    pub fn print(&self, mode: PolicyMode) {
        print!("{}", self.report(mode));
    }

    /// Builds the serializable summary for the policies enabled by `mode`.
    pub fn summary(&self, mode: PolicyMode) -> StatsSummary {
        StatsSummary {
            requests: self.requests,
            policies: mode
                .policies()
                .iter()
                .map(|&policy| PolicySummary {
                    policy,
                    hits: self.hits(policy),
                    hit_rate: self.hit_rate(policy),
                })
                .collect(),
        }
    }
}
