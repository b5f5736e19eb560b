use anyhow::Result;
use sitewatch::*;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, mpsc, watch};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    tracing::info!(
        name = version::NAME,
        version = version::VERSION,
        "Starting dashboard"
    );

    let site_repo = Arc::new(site_repo::SiteRepo::with_sample_sites());

    let summary_options = view_model::SummaryOptions {
        legacy_zero_success: app_config.dashboard.legacy_zero_success,
    };
    let initial_view = view_model::dashboard_view(
        &site_repo.snapshot().await,
        &models::FilterState::new(app_config.dashboard.page_size),
        summary_options,
    );

    let (view_tx, mut view_rx) = watch::channel(initial_view);
    let (notify_tx, mut notify_rx) =
        broadcast::channel::<session::Notification>(app_config.session.notification_capacity);
    let (action_tx, action_rx) =
        mpsc::channel::<session::SessionAction>(app_config.session.action_capacity);
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let session_handle = session::spawn(
        session::SessionDeps {
            site_repo: site_repo.clone(),
            view_tx,
            notify_tx,
            action_rx,
            shutdown_rx,
        },
        session::SessionConfig {
            page_size: app_config.dashboard.page_size,
            search_resets_page: app_config.dashboard.search_resets_page,
            legacy_zero_success: app_config.dashboard.legacy_zero_success,
            stats_log_interval_secs: app_config.session.stats_log_interval_secs,
        },
    );

    println!("{}", render::render_dashboard(&view_rx.borrow()));
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            changed = view_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                println!("{}", render::render_dashboard(&view_rx.borrow_and_update()));
            }
            notification = notify_rx.recv() => {
                match notification {
                    Ok(n) => println!("* {}: {}", n.title, n.body),
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        tracing::warn!(missed, "Notifications dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break; // stdin closed
                };
                if !handle_command(line.trim(), &action_tx, &site_repo, &app_config, &view_rx).await {
                    break;
                }
            }
            _ = shutdown_signal() => {
                tracing::info!("Received shutdown signal");
                break;
            }
        }
    }

    let _ = shutdown_tx.send(());
    let _ = session_handle.await;
    Ok(())
}

/// Dispatches one shell line. Returns false when the loop should exit.
async fn handle_command(
    line: &str,
    action_tx: &mpsc::Sender<session::SessionAction>,
    site_repo: &site_repo::SiteRepo,
    app_config: &config::AppConfig,
    view_rx: &watch::Receiver<models::DashboardView>,
) -> bool {
    use session::SessionAction;

    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return true;
    };
    let args: Vec<&str> = parts.collect();

    let action = match (command, args.as_slice()) {
        ("quit" | "exit", _) => return false,
        ("help", _) => {
            print_help();
            return true;
        }
        ("version", _) => {
            println!("{} {}", version::NAME, version::VERSION);
            return true;
        }
        ("dump", _) => {
            match serde_json::to_string_pretty(&*view_rx.borrow()) {
                Ok(json) => println!("{json}"),
                Err(e) => tracing::warn!(error = %e, "Failed to serialize view"),
            }
            return true;
        }
        ("search", rest) => SessionAction::SetSearch(rest.join(" ")),
        ("status", [value]) => match models::StatusFilter::parse(value) {
            Some(f) => SessionAction::SetStatusFilter(f),
            None => {
                println!("usage: status <all|success|warning|error>");
                return true;
            }
        },
        ("active", [value]) => match models::ActiveFilter::parse(value) {
            Some(f) => SessionAction::SetActiveFilter(f),
            None => {
                println!("usage: active <all|active|inactive>");
                return true;
            }
        },
        ("page", [value]) => match value.parse::<u32>() {
            Ok(page) => SessionAction::SetPage(page),
            Err(_) => {
                println!("usage: page <number>");
                return true;
            }
        },
        ("scan-all", _) => SessionAction::ScanAll,
        ("scan", [id]) => SessionAction::ScanSite((*id).to_string()),
        ("add", []) => SessionAction::AddSite,
        ("add", [name, url]) => {
            let site = site_repo
                .add_site(
                    (*name).to_string(),
                    (*url).to_string(),
                    app_config.scan_defaults.limits(),
                )
                .await;
            println!("Added site {} ({})", site.name, site.id);
            SessionAction::Refresh
        }
        ("pause", [id]) => match site_repo.set_active(id, false).await {
            Ok(site) => {
                println!("Paused {}", site.name);
                SessionAction::Refresh
            }
            Err(e) => {
                println!("{e}");
                return true;
            }
        },
        ("resume", [id]) => match site_repo.set_active(id, true).await {
            Ok(site) => {
                println!("Resumed {}", site.name);
                SessionAction::Refresh
            }
            Err(e) => {
                println!("{e}");
                return true;
            }
        },
        ("delete", [id]) => match site_repo.remove_site(id).await {
            Ok(()) => SessionAction::Refresh,
            Err(e) => {
                println!("{e}");
                return true;
            }
        },
        ("settings", _) => SessionAction::OpenSettings,
        ("download", [id]) => SessionAction::DownloadReport((*id).to_string()),
        _ => {
            println!("unknown command (try 'help')");
            return true;
        }
    };

    action_tx.send(action).await.is_ok()
}

fn print_help() {
    println!(
        "commands:\n  \
         search [text]                        filter by name or url\n  \
         status <all|success|warning|error>   filter by scan outcome\n  \
         active <all|active|inactive>         filter by monitoring state\n  \
         page <n>                             go to page n\n  \
         scan <id> | scan-all                 queue scans\n  \
         add [<name> <url>]                   register a site\n  \
         pause <id> | resume <id>             toggle monitoring\n  \
         delete <id>                          remove a site\n  \
         settings | download <id>             other actions\n  \
         dump | version | quit"
    );
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(s) => s,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
