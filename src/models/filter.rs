// Search, status and activity filters plus paging state

use serde::{Deserialize, Serialize};

use super::SiteStatus;

/// Status facet of the site list; `All` disables the status predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    All,
    Success,
    Warning,
    Error,
}

impl StatusFilter {
    pub fn matches(&self, status: SiteStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Success => status == SiteStatus::Success,
            StatusFilter::Warning => status == SiteStatus::Warning,
            StatusFilter::Error => status == SiteStatus::Error,
        }
    }

    /// Parse from a shell token (e.g. "all", "warning").
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(StatusFilter::All),
            "success" => Some(StatusFilter::Success),
            "warning" => Some(StatusFilter::Warning),
            "error" => Some(StatusFilter::Error),
            _ => None,
        }
    }
}

/// Activity facet of the site list; `All` disables the activity predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveFilter {
    All,
    Active,
    Inactive,
}

impl ActiveFilter {
    pub fn matches(&self, is_active: bool) -> bool {
        match self {
            ActiveFilter::All => true,
            ActiveFilter::Active => is_active,
            ActiveFilter::Inactive => !is_active,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(ActiveFilter::All),
            "active" => Some(ActiveFilter::Active),
            "inactive" => Some(ActiveFilter::Inactive),
            _ => None,
        }
    }
}

/// Current search/filter/pagination parameters of one viewing session.
/// Immutable from the view-model's perspective: the session replaces it
/// wholesale on each user action and derivation never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Free text, matched case-insensitively as a substring of name or url.
    pub search_text: String,
    pub status_filter: StatusFilter,
    pub active_filter: ActiveFilter,
    /// 1-based; clamped into [1, total_pages] at derivation time.
    pub page: u32,
    /// Page capacity. Must be > 0; enforced at config validation.
    pub page_size: usize,
}

impl FilterState {
    /// Everything visible, first page.
    pub fn new(page_size: usize) -> Self {
        Self {
            search_text: String::new(),
            status_filter: StatusFilter::All,
            active_filter: ActiveFilter::All,
            page: 1,
            page_size,
        }
    }
}
