// Monitored site and its scan results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a site's most recent scan; serializes to lowercase JSON (e.g. "warning").
/// Closed set: every match over it is exhaustive, there is no catch-all variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteStatus {
    Success,
    Warning,
    Error,
}

impl SiteStatus {
    /// Short tag for text rendering (e.g. "ok", "warn").
    pub fn tag(&self) -> &'static str {
        match self {
            SiteStatus::Success => "ok",
            SiteStatus::Warning => "warn",
            SiteStatus::Error => "error",
        }
    }

    /// Parse from a filter/shell token (e.g. "warning").
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "success" => Some(SiteStatus::Success),
            "warning" => Some(SiteStatus::Warning),
            "error" => Some(SiteStatus::Error),
            _ => None,
        }
    }
}

/// Configured thresholds shown on the site card. Advisory display values;
/// enforcement happens in the scanner, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteLimits {
    pub image_size_kb: u32,
    pub page_size_mb: f64,
    pub resolution: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    pub name: String,
    pub url: String,
    pub status: SiteStatus,
    pub last_scan: DateTime<Utc>,
    /// Measured page weight in megabytes.
    pub page_size: f64,
    pub image_count: u32,
    /// Images exceeding the configured limits; always <= image_count.
    pub heavy_images: u32,
    /// Inactive sites stay listed but are excluded from the active aggregates
    /// and refused manual scans.
    pub is_active: bool,
    pub limits: SiteLimits,
}
