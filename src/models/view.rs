// Derived dashboard view

use serde::{Deserialize, Serialize};

use super::{Site, SummaryMetrics};

/// One fully derived dashboard frame: the visible page plus the aggregate
/// tiles. Recomputed from scratch on every action; holds no state of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub visible_sites: Vec<Site>,
    /// Page actually shown (the requested page after clamping).
    pub page: u32,
    pub total_pages: u32,
    /// How many sites matched the filters before pagination.
    pub filtered_count: u32,
    pub summary: SummaryMetrics,
}
