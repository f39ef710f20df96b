//! Configuration loading and validation

use anyhow::{Context, Result};
use presswire_core::{Button, ButtonSet, Payload};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Interface to capture on
    pub nic: String,
    /// Watched buttons
    #[serde(default)]
    pub buttons: Vec<ButtonConfig>,
}

/// One configured button
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonConfig {
    /// Human-readable name used in logs
    pub name: String,
    /// Hardware address the button announces itself with
    pub mac: String,
    /// Callback URL invoked on press
    pub url: String,
    /// Free-form JSON object POSTed verbatim to the callback
    #[serde(default)]
    pub data: Payload,
}

/// Load configuration from file.
///
/// There is no default-config fallback: an empty watch set is a fatal
/// startup condition anyway, so a missing or unparsable file is an error.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration from {}", path.display()))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse configuration from {}", path.display()))?;

    info!(
        path = %path.display(),
        buttons = config.buttons.len(),
        "Loaded configuration"
    );
    Ok(config)
}

/// Convert configured buttons into the validated watch set.
///
/// Canonicalizes every hardware address; the first malformed address aborts
/// startup with a message naming the offending button.
pub fn watch_set(config: &Config) -> Result<ButtonSet> {
    let mut buttons = Vec::with_capacity(config.buttons.len());
    for entry in &config.buttons {
        buttons.push(Button::new(
            entry.name.clone(),
            &entry.mac,
            entry.url.clone(),
            entry.data.clone(),
        )?);
    }
    Ok(ButtonSet::new(buttons))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "nic": "eth0",
        "buttons": [
            {
                "name": "doorbell",
                "mac": "AA:BB:CC:DD:EE:FF",
                "url": "http://localhost:9/hook",
                "data": {"action": "ring", "floor": 2}
            }
        ]
    }"#;

    #[test]
    fn test_parse_sample_config() {
        let config: Config = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(config.nic, "eth0");
        assert_eq!(config.buttons.len(), 1);
        assert_eq!(config.buttons[0].name, "doorbell");
        assert_eq!(config.buttons[0].data["action"], "ring");
    }

    #[test]
    fn test_data_defaults_to_empty_map() {
        let config: Config = serde_json::from_str(
            r#"{"nic": "eth0", "buttons": [{"name": "a", "mac": "aa:bb:cc:dd:ee:ff", "url": "http://x"}]}"#,
        )
        .unwrap();
        assert!(config.buttons[0].data.is_empty());
    }

    #[test]
    fn test_missing_nic_is_an_error() {
        assert!(serde_json::from_str::<Config>(r#"{"buttons": []}"#).is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.nic, "eth0");
    }

    #[test]
    fn test_watch_set_canonicalizes_addresses() {
        let config: Config = serde_json::from_str(SAMPLE).unwrap();
        let set = watch_set(&config).unwrap();
        assert_eq!(set.buttons()[0].mac.to_string(), "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn test_watch_set_rejects_bad_address() {
        let config: Config = serde_json::from_str(
            r#"{"nic": "eth0", "buttons": [{"name": "bad", "mac": "not-a-mac", "url": "http://x"}]}"#,
        )
        .unwrap();
        let err = watch_set(&config).unwrap_err();
        assert!(err.to_string().contains("bad"));
    }
}
