// Aggregate dashboard metrics

use serde::{Deserialize, Serialize};

/// Overall health tiles shown above the site list. Computed over the full
/// unfiltered collection, never over the current search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    pub total_sites: u32,
    pub active_sites: u32,
    pub success_sites: u32,
    pub warning_sites: u32,
    pub error_sites: u32,
    /// Mean measured page weight over active sites, in megabytes; 0.0 when
    /// no site is active.
    pub avg_page_size: f64,
}
