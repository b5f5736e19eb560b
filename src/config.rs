use serde::Deserialize;

use crate::models::SiteLimits;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub session: SessionChannelsConfig,
    #[serde(default)]
    pub scan_defaults: ScanDefaultsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Sites per page. Must be > 0; derivation assumes it.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Whether editing the search text also jumps back to page 1.
    #[serde(default = "default_true")]
    pub search_resets_page: bool,
    /// Report the success tile as 0 regardless of data (legacy dashboard behavior).
    #[serde(default)]
    pub legacy_zero_success: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionChannelsConfig {
    /// Max queued user actions before the shell backpressures.
    #[serde(default = "default_action_capacity")]
    pub action_capacity: usize,
    /// Max buffered notifications per subscriber (slow subscribers may lag).
    #[serde(default = "default_notification_capacity")]
    pub notification_capacity: usize,
    /// How often to log app stats (actions handled, views published) at INFO level.
    #[serde(default = "default_stats_log_interval_secs")]
    pub stats_log_interval_secs: u64,
}

/// Thresholds applied to newly added sites until their settings are edited.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanDefaultsConfig {
    #[serde(default = "default_image_size_kb")]
    pub image_size_kb: u32,
    #[serde(default = "default_page_size_mb")]
    pub page_size_mb: f64,
    #[serde(default = "default_resolution")]
    pub resolution: String,
}

fn default_page_size() -> usize {
    12
}

fn default_true() -> bool {
    true
}

fn default_action_capacity() -> usize {
    32
}

fn default_notification_capacity() -> usize {
    16
}

fn default_stats_log_interval_secs() -> u64 {
    60
}

fn default_image_size_kb() -> u32 {
    500
}

fn default_page_size_mb() -> f64 {
    2.0
}

fn default_resolution() -> String {
    "1920 × 1080 px".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            search_resets_page: true,
            legacy_zero_success: false,
        }
    }
}

impl Default for SessionChannelsConfig {
    fn default() -> Self {
        Self {
            action_capacity: default_action_capacity(),
            notification_capacity: default_notification_capacity(),
            stats_log_interval_secs: default_stats_log_interval_secs(),
        }
    }
}

impl Default for ScanDefaultsConfig {
    fn default() -> Self {
        Self {
            image_size_kb: default_image_size_kb(),
            page_size_mb: default_page_size_mb(),
            resolution: default_resolution(),
        }
    }
}

impl ScanDefaultsConfig {
    /// Limits applied to a site added without explicit settings.
    pub fn limits(&self) -> SiteLimits {
        SiteLimits {
            image_size_kb: self.image_size_kb,
            page_size_mb: self.page_size_mb,
            resolution: self.resolution.clone(),
        }
    }
}

impl AppConfig {
    /// Reads CONFIG_FILE (default "config.toml"); a missing file means defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        match std::fs::read_to_string(&path) {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(config_file = %path, "Config file not found; using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.dashboard.page_size > 0,
            "dashboard.page_size must be > 0, got {}",
            self.dashboard.page_size
        );
        anyhow::ensure!(
            self.session.action_capacity > 0,
            "session.action_capacity must be > 0, got {}",
            self.session.action_capacity
        );
        anyhow::ensure!(
            self.session.notification_capacity > 0,
            "session.notification_capacity must be > 0, got {}",
            self.session.notification_capacity
        );
        anyhow::ensure!(
            self.session.stats_log_interval_secs > 0,
            "session.stats_log_interval_secs must be > 0, got {}",
            self.session.stats_log_interval_secs
        );
        anyhow::ensure!(
            self.scan_defaults.image_size_kb > 0,
            "scan_defaults.image_size_kb must be > 0, got {}",
            self.scan_defaults.image_size_kb
        );
        anyhow::ensure!(
            self.scan_defaults.page_size_mb > 0.0,
            "scan_defaults.page_size_mb must be > 0, got {}",
            self.scan_defaults.page_size_mb
        );
        anyhow::ensure!(
            !self.scan_defaults.resolution.is_empty(),
            "scan_defaults.resolution must be non-empty"
        );
        Ok(())
    }
}
