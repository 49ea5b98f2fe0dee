//! Monitor configuration loaded from TOML.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
}

/// Clipboard polling and runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Minimum time between two platform clipboard reads; 0 disables.
    #[serde(default = "default_min_read_interval_ms")]
    pub min_read_interval_ms: u64,
    /// Clipboard text longer than this is ignored.
    #[serde(default = "default_max_text_len")]
    pub max_text_len: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl MonitorConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn min_read_interval(&self) -> Duration {
        Duration::from_millis(self.min_read_interval_ms)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            min_read_interval_ms: default_min_read_interval_ms(),
            max_text_len: default_max_text_len(),
            log_level: default_log_level(),
        }
    }
}

/// Preview labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Subtitle of the placeholder shown while preview data loads.
    #[serde(default = "default_link_subtitle")]
    pub link_subtitle: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            link_subtitle: default_link_subtitle(),
        }
    }
}

/// Link recognition settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Hosts accepted in addition to the built-in forum hosts.
    #[serde(default)]
    pub extra_hosts: Vec<String>,
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_min_read_interval_ms() -> u64 {
    10_000
}

fn default_max_text_len() -> usize {
    64 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_link_subtitle() -> String {
    "this is a link".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("min_read_interval_ms = 10000"));
        assert!(toml_str.contains(r#"link_subtitle = "this is a link""#));
    }

    #[test]
    fn parse_example_config() {
        let toml_str = r#"
[monitor]
poll_interval_ms = 500
min_read_interval_ms = 0
log_level = "debug"

[preview]
link_subtitle = "tap to open"

[matcher]
extra_hosts = ["tieba.mirror.example"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.monitor.poll_interval(), Duration::from_millis(500));
        assert_eq!(config.monitor.min_read_interval(), Duration::ZERO);
        assert_eq!(config.monitor.max_text_len, 64 * 1024);
        assert_eq!(config.monitor.log_level, "debug");
        assert_eq!(config.preview.link_subtitle, "tap to open");
        assert_eq!(config.matcher.extra_hosts, vec!["tieba.mirror.example"]);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.monitor.poll_interval_ms, 1000);
        assert!(config.matcher.extra_hosts.is_empty());
    }
}
