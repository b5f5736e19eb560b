// Domain models (ported from the dashboard frontend)

mod filter;
mod metrics;
mod site;
mod view;

pub use filter::{ActiveFilter, FilterState, StatusFilter};
pub use metrics::SummaryMetrics;
pub use site::{Site, SiteLimits, SiteStatus};
pub use view::DashboardView;
