use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per request (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.5,
            max_delay_secs: 10,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay: Duration::from_secs_f64(self.base_delay_secs.max(0.0)),
            max_delay: Duration::from_secs(self.max_delay_secs),
        }
    }
}

/// The scraping-relevant subset of the config: where the site lives and how its
/// album and track links look.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Origin prefixed to relative track links.
    pub base_url: String,
    /// Substring an input address must contain to be accepted as an album page.
    pub album_marker: String,
    /// Path segment every track link contains.
    pub album_path: String,
    /// Extension (with dot) track links end with; compared case-insensitively.
    pub audio_extension: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let cfg = KhdlConfig::default();
        cfg.site()
    }
}

/// Global configuration loaded from `~/.config/khdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KhdlConfig {
    pub base_url: String,
    pub album_marker: String,
    pub album_path: String,
    pub audio_extension: String,
    /// Root output directory; each album gets a subdirectory named by its identifier.
    pub download_dir: PathBuf,
    /// File with one album address per line, read when no URLs are given on the command line.
    pub input_file: PathBuf,
    pub connect_timeout_secs: u64,
    /// Upper bound on a whole request, body included.
    pub timeout_secs: u64,
    /// Abort a transfer slower than this many bytes/sec for `low_speed_time_secs`.
    pub low_speed_limit_bytes: u32,
    pub low_speed_time_secs: u64,
    pub max_redirections: u32,
    pub user_agent: String,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for KhdlConfig {
    fn default() -> Self {
        Self {
            base_url: "https://downloads.khinsider.com".to_string(),
            album_marker: "//downloads.khinsider.com/game-soundtracks/album/".to_string(),
            album_path: "/game-soundtracks/album/".to_string(),
            audio_extension: ".mp3".to_string(),
            download_dir: PathBuf::from("downloads"),
            input_file: PathBuf::from("inputs.txt"),
            connect_timeout_secs: 30,
            timeout_secs: 600,
            low_speed_limit_bytes: 1024,
            low_speed_time_secs: 60,
            max_redirections: 10,
            user_agent: concat!("khdl/", env!("CARGO_PKG_VERSION")).to_string(),
            retry: None,
        }
    }
}

impl KhdlConfig {
    pub fn site(&self) -> SiteConfig {
        SiteConfig {
            base_url: self.base_url.clone(),
            album_marker: self.album_marker.clone(),
            album_path: self.album_path.clone(),
            audio_extension: self.audio_extension.clone(),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone().unwrap_or_default().to_policy()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("khdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<KhdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = KhdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: KhdlConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = KhdlConfig::default();
        assert_eq!(cfg.base_url, "https://downloads.khinsider.com");
        assert_eq!(cfg.audio_extension, ".mp3");
        assert_eq!(cfg.download_dir, PathBuf::from("downloads"));
        assert_eq!(cfg.input_file, PathBuf::from("inputs.txt"));
        assert!(cfg.retry.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = KhdlConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: KhdlConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.album_marker, cfg.album_marker);
        assert_eq!(parsed.timeout_secs, cfg.timeout_secs);
        assert_eq!(parsed.max_redirections, cfg.max_redirections);
    }

    #[test]
    fn config_toml_retry_section() {
        let toml = r#"
            base_url = "http://127.0.0.1:8080"
            album_marker = "/game-soundtracks/album/"
            album_path = "/game-soundtracks/album/"
            audio_extension = ".mp3"
            download_dir = "/tmp/out"
            input_file = "albums.txt"
            connect_timeout_secs = 5
            timeout_secs = 60
            low_speed_limit_bytes = 512
            low_speed_time_secs = 30
            max_redirections = 3
            user_agent = "test"

            [retry]
            max_attempts = 4
            base_delay_secs = 0.25
            max_delay_secs = 2
        "#;
        let cfg: KhdlConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.download_dir, PathBuf::from("/tmp/out"));
        let policy = cfg.retry_policy();
        assert_eq!(policy.max_attempts, 4);
        assert_eq!(policy.base_delay, Duration::from_millis(250));
        assert_eq!(policy.max_delay, Duration::from_secs(2));
    }

    #[test]
    fn site_subset_mirrors_config() {
        let site = SiteConfig::default();
        assert_eq!(site.album_path, "/game-soundtracks/album/");
        assert!(site.album_marker.contains("downloads.khinsider.com"));
    }
}
