// Session integration tests: spawn, drive actions through the channel,
// assert the published views and notifications, shut down.

use sitewatch::models::{ActiveFilter, DashboardView, FilterState, StatusFilter};
use sitewatch::session::{
    Notification, SessionAction, SessionConfig, SessionDeps, spawn,
};
use sitewatch::site_repo::SiteRepo;
use sitewatch::view_model::{SummaryOptions, dashboard_view};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::time::{Duration, timeout};

struct Harness {
    site_repo: Arc<SiteRepo>,
    action_tx: mpsc::Sender<SessionAction>,
    view_rx: watch::Receiver<DashboardView>,
    notify_rx: broadcast::Receiver<Notification>,
    shutdown_tx: oneshot::Sender<()>,
    handle: tokio::task::JoinHandle<()>,
}

fn start(page_size: usize, search_resets_page: bool) -> Harness {
    let site_repo = Arc::new(SiteRepo::with_sample_sites());
    let initial = dashboard_view(&[], &FilterState::new(page_size), SummaryOptions::default());
    let (view_tx, view_rx) = watch::channel(initial);
    let (notify_tx, notify_rx) = broadcast::channel(16);
    let (action_tx, action_rx) = mpsc::channel(16);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let handle = spawn(
        SessionDeps {
            site_repo: site_repo.clone(),
            view_tx,
            notify_tx,
            action_rx,
            shutdown_rx,
        },
        SessionConfig {
            page_size,
            search_resets_page,
            legacy_zero_success: false,
            stats_log_interval_secs: 3600,
        },
    );

    Harness {
        site_repo,
        action_tx,
        view_rx,
        notify_rx,
        shutdown_tx,
        handle,
    }
}

async fn send(h: &Harness, action: SessionAction) {
    h.action_tx.send(action).await.expect("session alive");
}

async fn next_view(h: &mut Harness) -> DashboardView {
    timeout(Duration::from_secs(3), h.view_rx.changed())
        .await
        .expect("view published in time")
        .expect("view channel open");
    h.view_rx.borrow_and_update().clone()
}

async fn next_notification(h: &mut Harness) -> Notification {
    timeout(Duration::from_secs(3), h.notify_rx.recv())
        .await
        .expect("notification published in time")
        .expect("notification channel open")
}

#[tokio::test]
async fn search_filters_and_publishes_a_view() {
    let mut h = start(12, true);
    send(&h, SessionAction::SetSearch("roll".to_string())).await;
    let view = next_view(&mut h).await;
    assert_eq!(view.filtered_count, 1);
    assert_eq!(view.visible_sites[0].name, "Rollpix");
    // Tiles still describe the whole collection.
    assert_eq!(view.summary.total_sites, 3);
}

#[tokio::test]
async fn status_filter_change_resets_page() {
    let mut h = start(1, true);
    send(&h, SessionAction::SetPage(3)).await;
    let view = next_view(&mut h).await;
    assert_eq!(view.page, 3);

    send(&h, SessionAction::SetStatusFilter(StatusFilter::Error)).await;
    let view = next_view(&mut h).await;
    assert_eq!(view.page, 1);
    assert_eq!(view.filtered_count, 2);
}

#[tokio::test]
async fn active_filter_change_resets_page() {
    let mut h = start(1, true);
    send(&h, SessionAction::SetPage(2)).await;
    let view = next_view(&mut h).await;
    assert_eq!(view.page, 2);

    send(&h, SessionAction::SetActiveFilter(ActiveFilter::Active)).await;
    let view = next_view(&mut h).await;
    assert_eq!(view.page, 1);
    assert_eq!(view.filtered_count, 2);
}

#[tokio::test]
async fn set_page_is_clamped_to_total_pages() {
    let mut h = start(1, true);
    send(&h, SessionAction::SetPage(99)).await;
    let view = next_view(&mut h).await;
    assert_eq!(view.total_pages, 3);
    assert_eq!(view.page, 3);
}

#[tokio::test]
async fn search_resets_page_when_policy_is_on() {
    let mut h = start(1, true);
    send(&h, SessionAction::SetPage(2)).await;
    let view = next_view(&mut h).await;
    assert_eq!(view.page, 2);

    send(&h, SessionAction::SetSearch(String::new())).await;
    let view = next_view(&mut h).await;
    assert_eq!(view.page, 1);
}

#[tokio::test]
async fn search_keeps_page_when_policy_is_off() {
    let mut h = start(1, false);
    send(&h, SessionAction::SetPage(2)).await;
    let view = next_view(&mut h).await;
    assert_eq!(view.page, 2);

    send(&h, SessionAction::SetSearch(String::new())).await;
    let view = next_view(&mut h).await;
    assert_eq!(view.page, 2);
}

#[tokio::test]
async fn scanning_an_active_site_emits_started_notification() {
    let mut h = start(12, true);
    send(&h, SessionAction::ScanSite("1".to_string())).await;
    let n = next_notification(&mut h).await;
    assert_eq!(n.title, "Scanning site");
}

#[tokio::test]
async fn scanning_a_paused_site_is_refused() {
    let mut h = start(12, true);
    send(&h, SessionAction::ScanSite("3".to_string())).await;
    let n = next_notification(&mut h).await;
    assert_eq!(n.title, "Site is paused");
}

#[tokio::test]
async fn scanning_an_unknown_site_notifies_not_found() {
    let mut h = start(12, true);
    send(&h, SessionAction::ScanSite("99".to_string())).await;
    let n = next_notification(&mut h).await;
    assert_eq!(n.title, "Site not found");
}

#[tokio::test]
async fn placeholder_actions_emit_their_notifications() {
    let mut h = start(12, true);
    send(&h, SessionAction::ScanAll).await;
    send(&h, SessionAction::AddSite).await;
    send(&h, SessionAction::OpenSettings).await;
    assert_eq!(next_notification(&mut h).await.title, "Scanning all sites");
    assert_eq!(next_notification(&mut h).await.title, "Add site");
    assert_eq!(next_notification(&mut h).await.title, "Settings");
}

#[tokio::test]
async fn download_report_emits_no_notification() {
    let mut h = start(12, true);
    send(&h, SessionAction::DownloadReport("1".to_string())).await;
    send(&h, SessionAction::ScanAll).await;
    // The first notification to arrive is the scan, not the download.
    assert_eq!(next_notification(&mut h).await.title, "Scanning all sites");
}

#[tokio::test]
async fn refresh_recomputes_after_external_mutation() {
    let mut h = start(12, true);
    send(&h, SessionAction::Refresh).await;
    let view = next_view(&mut h).await;
    assert_eq!(view.summary.active_sites, 2);

    h.site_repo.set_active("3", true).await.expect("resume");
    send(&h, SessionAction::Refresh).await;
    let view = next_view(&mut h).await;
    assert_eq!(view.summary.active_sites, 3);
    assert_eq!(view.summary.error_sites, 2);
}

#[tokio::test]
async fn shutdown_stops_the_session() {
    let h = start(12, true);
    h.shutdown_tx.send(()).expect("session alive");
    h.handle.await.expect("session exits cleanly");
}
