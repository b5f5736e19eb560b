// In-memory site collection. The scanner and settings surfaces own the
// mutations; the dashboard only ever reads immutable snapshots.

mod mock;

pub use mock::sample_sites;

use crate::models::{Site, SiteLimits, SiteStatus};
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum SiteRepoError {
    #[error("unknown site id: {0}")]
    UnknownSite(String),
}

pub struct SiteRepo {
    sites: RwLock<Vec<Site>>,
    next_id: AtomicU64,
}

impl SiteRepo {
    pub fn new(sites: Vec<Site>) -> Self {
        // Numeric ids continue after the highest seeded one; opaque ids are skipped.
        let max_id = sites
            .iter()
            .filter_map(|s| s.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            sites: RwLock::new(sites),
            next_id: AtomicU64::new(max_id + 1),
        }
    }

    /// Repo seeded with the sample dataset.
    pub fn with_sample_sites() -> Self {
        Self::new(sample_sites())
    }

    /// Immutable copy of the full collection, in insertion order. Later
    /// mutations never affect a snapshot already handed out.
    pub async fn snapshot(&self) -> Vec<Site> {
        self.sites.read().await.clone()
    }

    /// Registers a new site under the next numeric id. New sites start
    /// active with zeroed measurements; the first scan overwrites them.
    pub async fn add_site(&self, name: String, url: String, limits: SiteLimits) -> Site {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed).to_string();
        let site = Site {
            id: id.clone(),
            name,
            url,
            status: SiteStatus::Success,
            last_scan: Utc::now(),
            page_size: 0.0,
            image_count: 0,
            heavy_images: 0,
            is_active: true,
            limits,
        };
        self.sites.write().await.push(site.clone());
        tracing::debug!(operation = "add_site", site_id = %id, "Site added");
        site
    }

    pub async fn remove_site(&self, id: &str) -> Result<(), SiteRepoError> {
        let mut sites = self.sites.write().await;
        let pos = sites
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| SiteRepoError::UnknownSite(id.to_string()))?;
        sites.remove(pos);
        tracing::debug!(operation = "remove_site", site_id = %id, "Site removed");
        Ok(())
    }

    /// Pauses or resumes monitoring for one site; returns the updated site.
    pub async fn set_active(&self, id: &str, active: bool) -> Result<Site, SiteRepoError> {
        let mut sites = self.sites.write().await;
        let site = sites
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| SiteRepoError::UnknownSite(id.to_string()))?;
        site.is_active = active;
        tracing::debug!(operation = "set_active", site_id = %id, active, "Site activity changed");
        Ok(site.clone())
    }
}
