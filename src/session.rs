// Dashboard session worker (the stateful shell around the pure view-model).
// Owns the FilterState; every action ends with a fresh snapshot, a fresh
// derivation, and a publish. No derived state is cached across actions.

use crate::models::{ActiveFilter, DashboardView, FilterState, Site, StatusFilter};
use crate::site_repo::SiteRepo;
use crate::view_model::{SummaryOptions, dashboard_view};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::time::{Duration, Instant, interval};

/// Rate limit for "no subscribers" logging (avoid one line per action while
/// nothing is attached to a channel)
const NO_SUBSCRIBERS_LOG_INTERVAL: Duration = Duration::from_secs(60);

/// One user interaction with the dashboard.
#[derive(Debug, Clone)]
pub enum SessionAction {
    SetSearch(String),
    SetStatusFilter(StatusFilter),
    SetActiveFilter(ActiveFilter),
    SetPage(u32),
    ScanSite(String),
    ScanAll,
    AddSite,
    OpenSettings,
    DownloadReport(String),
    /// Recompute after an external mutation of the site collection.
    Refresh,
}

/// Feedback from placeholder actions; how it is surfaced is the shell's call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    fn new(title: &str, body: &str) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
        }
    }
}

/// Repo, channels, and shutdown for the session.
pub struct SessionDeps {
    pub site_repo: Arc<SiteRepo>,
    pub view_tx: watch::Sender<DashboardView>,
    pub notify_tx: broadcast::Sender<Notification>,
    pub action_rx: mpsc::Receiver<SessionAction>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

/// Session paging and policy config.
pub struct SessionConfig {
    pub page_size: usize,
    /// Whether editing the search text also jumps back to page 1.
    pub search_resets_page: bool,
    /// Report the success tile as 0 regardless of data (legacy behavior).
    pub legacy_zero_success: bool,
    /// How often to log app stats (actions handled, views published) at INFO level.
    pub stats_log_interval_secs: u64,
}

pub fn spawn(deps: SessionDeps, config: SessionConfig) -> tokio::task::JoinHandle<()> {
    let SessionDeps {
        site_repo,
        view_tx,
        notify_tx,
        mut action_rx,
        mut shutdown_rx,
    } = deps;
    let SessionConfig {
        page_size,
        search_resets_page,
        legacy_zero_success,
        stats_log_interval_secs,
    } = config;

    let options = SummaryOptions {
        legacy_zero_success,
    };

    tokio::spawn(async move {
        let mut filters = FilterState::new(page_size);
        let mut stats_log_tick = interval(Duration::from_secs(stats_log_interval_secs));
        stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut actions_handled: u64 = 0;
        let mut views_published: u64 = 0;
        let mut last_no_subscribers_log: Option<Instant> = None;

        tracing::debug!(page_size, "Session started");

        loop {
            tokio::select! {
                action = action_rx.recv() => {
                    let Some(action) = action else {
                        tracing::debug!("Action channel closed");
                        break;
                    };
                    actions_handled += 1;

                    let snapshot = site_repo.snapshot().await;
                    if let Some(n) = apply_action(&action, &mut filters, &snapshot, search_resets_page) {
                        if notify_tx.send(n).is_err() {
                            let should_log = last_no_subscribers_log
                                .is_none_or(|t| t.elapsed() >= NO_SUBSCRIBERS_LOG_INTERVAL);
                            if should_log {
                                tracing::debug!(
                                    operation = "publish_notification",
                                    "Notification channel has no subscribers"
                                );
                                last_no_subscribers_log = Some(Instant::now());
                            }
                        }
                    }

                    let view = dashboard_view(&snapshot, &filters, options);
                    // Keep the stored page in sync with what was actually shown.
                    filters.page = view.page;
                    if view_tx.send(view).is_err() {
                        tracing::debug!(
                            operation = "publish_view",
                            "View channel has no subscribers"
                        );
                    } else {
                        views_published += 1;
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Session shutting down");
                    break;
                }
                _ = stats_log_tick.tick() => {
                    tracing::info!(
                        actions_handled,
                        views_published,
                        "app stats"
                    );
                }
            }
        }
    })
}

/// Applies one action to the filter state; returns the notification to
/// publish, if the action produces one.
fn apply_action(
    action: &SessionAction,
    filters: &mut FilterState,
    snapshot: &[Site],
    search_resets_page: bool,
) -> Option<Notification> {
    match action {
        SessionAction::SetSearch(text) => {
            filters.search_text = text.clone();
            if search_resets_page {
                filters.page = 1;
            }
            None
        }
        SessionAction::SetStatusFilter(f) => {
            filters.status_filter = *f;
            filters.page = 1;
            None
        }
        SessionAction::SetActiveFilter(f) => {
            filters.active_filter = *f;
            filters.page = 1;
            None
        }
        SessionAction::SetPage(page) => {
            // Clamping against the filtered count happens at derivation.
            filters.page = *page;
            None
        }
        SessionAction::ScanSite(id) => match snapshot.iter().find(|s| s.id == *id) {
            None => {
                tracing::warn!(
                    operation = "scan_site",
                    site_id = %id,
                    "Scan requested for unknown site"
                );
                Some(Notification::new(
                    "Site not found",
                    "No site with that id is registered.",
                ))
            }
            Some(site) if !site.is_active => Some(Notification::new(
                "Site is paused",
                "Resume monitoring to scan this site.",
            )),
            Some(site) => {
                tracing::info!(
                    operation = "scan_site",
                    site_id = %site.id,
                    url = %site.url,
                    "Scan queued"
                );
                Some(Notification::new(
                    "Scanning site",
                    "The scan has started. You will be notified when it finishes.",
                ))
            }
        },
        SessionAction::ScanAll => {
            tracing::info!(operation = "scan_all", "Bulk scan queued");
            Some(Notification::new(
                "Scanning all sites",
                "The bulk scan has started. This may take a few minutes.",
            ))
        }
        SessionAction::AddSite => Some(Notification::new(
            "Add site",
            "This feature is coming soon.",
        )),
        SessionAction::OpenSettings => Some(Notification::new(
            "Settings",
            "The settings panel is coming soon.",
        )),
        SessionAction::DownloadReport(id) => {
            tracing::debug!(
                operation = "download_report",
                site_id = %id,
                "Report download not implemented"
            );
            None
        }
        SessionAction::Refresh => None,
    }
}
