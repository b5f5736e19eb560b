// Sample dataset shipped with the dashboard (stand-in for a real site store)

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{Site, SiteLimits, SiteStatus};

fn default_limits() -> SiteLimits {
    SiteLimits {
        image_size_kb: 500,
        page_size_mb: 2.0,
        resolution: "1920 × 1080 px".to_string(),
    }
}

fn scan_time(hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 6, hour, min, sec)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Three monitored sites with one scan pass recorded. Buttman is paused.
pub fn sample_sites() -> Vec<Site> {
    vec![
        Site {
            id: "1".to_string(),
            name: "Tout".to_string(),
            url: "https://tout.com.ar".to_string(),
            status: SiteStatus::Error,
            last_scan: scan_time(2, 1, 0),
            page_size: 5.8,
            image_count: 89,
            heavy_images: 4,
            is_active: true,
            limits: default_limits(),
        },
        Site {
            id: "2".to_string(),
            name: "Rollpix".to_string(),
            url: "https://rollpix.com".to_string(),
            status: SiteStatus::Warning,
            last_scan: scan_time(2, 1, 4),
            page_size: 2.3,
            image_count: 37,
            heavy_images: 0,
            is_active: true,
            limits: default_limits(),
        },
        Site {
            id: "3".to_string(),
            name: "Buttman".to_string(),
            url: "https://buttman.com.ar".to_string(),
            status: SiteStatus::Error,
            last_scan: scan_time(2, 1, 11),
            page_size: 6.8,
            image_count: 118,
            heavy_images: 1,
            is_active: false,
            limits: default_limits(),
        },
    ]
}
