// Plain-text rendering of a dashboard view: metric tiles, site cards,
// empty-state hints. Presentation only; all numbers arrive pre-derived.

use crate::models::{DashboardView, Site, SummaryMetrics};

pub fn render_dashboard(view: &DashboardView) -> String {
    let mut out = String::new();
    out.push_str(&render_summary(&view.summary));
    out.push('\n');

    if view.filtered_count == 0 {
        out.push_str("No sites found\n");
        if view.summary.total_sites > 0 {
            out.push_str("Try different search terms\n");
        } else {
            out.push_str("Add your first site to start monitoring\n");
        }
        return out;
    }

    out.push_str(&format!(
        "Showing {} of {} sites (page {}/{})\n",
        view.filtered_count, view.summary.total_sites, view.page, view.total_pages
    ));
    for site in &view.visible_sites {
        out.push_str(&render_site(site));
    }
    out
}

fn render_summary(summary: &SummaryMetrics) -> String {
    format!(
        "Sites: {} total | {} active | {} ok | {} warnings | {} errors | avg weight {}\n",
        summary.total_sites,
        summary.active_sites,
        summary.success_sites,
        summary.warning_sites,
        summary.error_sites,
        format_weight(summary.avg_page_size)
    )
}

fn render_site(site: &Site) -> String {
    let paused = if site.is_active { "" } else { " (paused)" };
    format!(
        "  [{:<5}] {}{} {}\n          {}, {} images, {} heavy, last scan {}\n          limits: {} KB image, {} page, {}\n",
        site.status.tag(),
        site.name,
        paused,
        site.url,
        format_weight(site.page_size),
        site.image_count,
        site.heavy_images,
        site.last_scan.format("%Y-%m-%d %H:%M:%S"),
        site.limits.image_size_kb,
        format_weight(site.limits.page_size_mb),
        site.limits.resolution,
    )
}

fn format_weight(megabytes: f64) -> String {
    format!("{megabytes:.1} MB")
}
