// Text rendering tests: metrics row, site cards, empty states

use sitewatch::models::FilterState;
use sitewatch::render::render_dashboard;
use sitewatch::site_repo::sample_sites;
use sitewatch::view_model::{SummaryOptions, dashboard_view};

#[test]
fn renders_metrics_and_site_cards() {
    let sites = sample_sites();
    let view = dashboard_view(&sites, &FilterState::new(12), SummaryOptions::default());
    let text = render_dashboard(&view);
    assert!(text.contains("Sites: 3 total | 2 active | 0 ok | 1 warnings | 1 errors"));
    assert!(text.contains("avg weight 4.0 MB"));
    assert!(text.contains("Showing 3 of 3 sites (page 1/1)"));
    assert!(text.contains("Tout"));
    assert!(text.contains("https://rollpix.com"));
    assert!(text.contains("89 images, 4 heavy"));
}

#[test]
fn marks_paused_sites() {
    let sites = sample_sites();
    let view = dashboard_view(&sites, &FilterState::new(12), SummaryOptions::default());
    let text = render_dashboard(&view);
    assert!(text.contains("Buttman (paused)"));
    assert!(!text.contains("Tout (paused)"));
}

#[test]
fn empty_search_result_suggests_other_terms() {
    let sites = sample_sites();
    let mut filters = FilterState::new(12);
    filters.search_text = "no-such-site".to_string();
    let view = dashboard_view(&sites, &filters, SummaryOptions::default());
    let text = render_dashboard(&view);
    assert!(text.contains("No sites found"));
    assert!(text.contains("Try different search terms"));
}

#[test]
fn empty_collection_suggests_adding_a_site() {
    let view = dashboard_view(&[], &FilterState::new(12), SummaryOptions::default());
    let text = render_dashboard(&view);
    assert!(text.contains("No sites found"));
    assert!(text.contains("Add your first site to start monitoring"));
}
