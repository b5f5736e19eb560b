// Site list view-model: pure derivation of the visible page + summary tiles.
// Collection mutations live in site_repo; FilterState ownership lives in session.

use crate::models::{DashboardView, FilterState, Site, SiteStatus, SummaryMetrics};

/// Policy knobs for summary derivation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryOptions {
    /// Report the success tile as 0 regardless of data (legacy dashboard
    /// behavior). Off by default; the count is derived like the others.
    pub legacy_zero_success: bool,
}

/// Applies search, status and activity predicates. Stable: relative input
/// order is preserved, nothing is reordered. Empty input yields empty output.
pub fn filter_sites(sites: &[Site], filters: &FilterState) -> Vec<Site> {
    let needle = filters.search_text.to_lowercase();
    sites
        .iter()
        .filter(|site| {
            (needle.is_empty()
                || site.name.to_lowercase().contains(&needle)
                || site.url.to_lowercase().contains(&needle))
                && filters.status_filter.matches(site.status)
                && filters.active_filter.matches(site.is_active)
        })
        .cloned()
        .collect()
}

/// max(1, ceil(filtered_len / page_size)). An empty result still has one
/// (empty) page so the pager never shows "page 1 of 0".
pub fn total_pages(filtered_len: usize, page_size: usize) -> u32 {
    filtered_len.div_ceil(page_size).max(1) as u32
}

/// Clamps a 1-based page number into [1, total_pages].
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages)
}

/// Contiguous slice [(page-1)*page_size, +page_size) clipped to bounds;
/// empty when the start offset is past the end.
pub fn page_slice(filtered: &[Site], page: u32, page_size: usize) -> Vec<Site> {
    let start = (page.max(1) as usize - 1).saturating_mul(page_size);
    if start >= filtered.len() {
        return Vec::new();
    }
    let end = (start + page_size).min(filtered.len());
    filtered[start..end].to_vec()
}

/// Aggregate tiles over the full unfiltered collection. Warning/error/success
/// counts and the average weight only consider active sites; the average is
/// 0.0 when nothing is active.
pub fn summarize(all_sites: &[Site], options: SummaryOptions) -> SummaryMetrics {
    let active: Vec<&Site> = all_sites.iter().filter(|s| s.is_active).collect();

    let count_status =
        |status: SiteStatus| active.iter().filter(|s| s.status == status).count() as u32;
    let success_sites = if options.legacy_zero_success {
        0
    } else {
        count_status(SiteStatus::Success)
    };
    let warning_sites = count_status(SiteStatus::Warning);
    let error_sites = count_status(SiteStatus::Error);

    let avg_page_size = if active.is_empty() {
        0.0
    } else {
        active.iter().map(|s| s.page_size).sum::<f64>() / active.len() as f64
    };

    SummaryMetrics {
        total_sites: all_sites.len() as u32,
        active_sites: active.len() as u32,
        success_sites,
        warning_sites,
        error_sites,
        avg_page_size,
    }
}

/// Derives one full dashboard frame: filter, clamp the requested page, slice,
/// summarize. Pure and total; callers may invoke it concurrently on the same
/// snapshot without synchronization.
pub fn dashboard_view(
    sites: &[Site],
    filters: &FilterState,
    options: SummaryOptions,
) -> DashboardView {
    let filtered = filter_sites(sites, filters);
    let total_pages = total_pages(filtered.len(), filters.page_size);
    let page = clamp_page(filters.page, total_pages);
    let visible_sites = page_slice(&filtered, page, filters.page_size);
    DashboardView {
        visible_sites,
        page,
        total_pages,
        filtered_count: filtered.len() as u32,
        summary: summarize(sites, options),
    }
}
