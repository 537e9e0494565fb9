use serde::{Deserialize, Serialize};

/// Aggregate totals plus per-site rows for one render pass.
///
/// Transient: recomputed on every render, never persisted. Every field
/// defaults to "0" when absent upstream; the parser only fails when a
/// required container node is missing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatSnapshot {
    pub upload: String,
    pub download: String,
    pub seed_count: String,
    pub seed_size: String,
    pub sites: Vec<SiteRow>,
}

impl Default for StatSnapshot {
    fn default() -> Self {
        Self {
            upload: "0".to_string(),
            download: "0".to_string(),
            seed_count: "0".to_string(),
            seed_size: "0".to_string(),
            sites: Vec::new(),
        }
    }
}

/// One tracker's statistics, derived from a single table row.
///
/// Has no identity beyond its position in the upstream response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteRow {
    pub name: String,
    pub level: String,
    pub upload: String,
    pub download: String,
    pub ratio: String,
    pub bonus: String,
    pub seeds: String,
    pub size: String,
}

/// Subscription plan usage for the passport-style panel variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionSnapshot {
    pub plan_name: String,
    pub used_bytes: u64,
    pub total_bytes: u64,
    /// Days until the plan resets; `None` means the plan never expires.
    pub reset_day: Option<u32>,
    /// Used fraction of the plan, clamped to 1.0.
    pub used_fraction: f64,
}

impl SubscriptionSnapshot {
    /// Human-readable used volume (MB below 1 GiB, GB above).
    pub fn used_formatted(&self) -> String {
        format_bytes(self.used_bytes)
    }

    /// Human-readable plan total.
    pub fn total_formatted(&self) -> String {
        format_bytes(self.total_bytes)
    }
}

/// Formats a byte count as MB below 1 GiB and GB at or above, two decimals.
pub fn format_bytes(bytes: u64) -> String {
    const MIB: f64 = 1024.0 * 1024.0;
    const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
    let b = bytes as f64;
    if b >= GIB {
        format!("{:.2}GB", b / GIB)
    } else {
        format!("{:.2}MB", b / MIB)
    }
}
