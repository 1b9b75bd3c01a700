use crate::api::http::parse_base_url;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub const BASE_URL_ENV: &str = "MAIL_INSIGHT_BASE_URL";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub base_url: String,
    pub mails_limit: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            mails_limit: 10,
        }
    }
}

/// `~/.config/mail-insight/` or the platform equivalent.
fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("mail-insight"))
}

/// Defaults, then the config file if there is one, then the environment.
pub fn load() -> Result<DashboardConfig, AppError> {
    let file = config_dir().map(|d| d.join(CONFIG_FILE));
    let env = std::env::var(BASE_URL_ENV).ok();
    load_from(file.as_deref(), env.as_deref())
}

pub fn load_from(file: Option<&Path>, base_url_override: Option<&str>) -> Result<DashboardConfig, AppError> {
    let mut config = match file {
        Some(path) if path.exists() => {
            info!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(path)
                .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
            serde_json::from_str(&content)
                .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?
        }
        _ => DashboardConfig::default(),
    };

    if let Some(url) = base_url_override.filter(|u| !u.trim().is_empty()) {
        config.base_url = url.trim().to_string();
    }

    parse_base_url(&config.base_url)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mail-insight-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn config_dir_is_namespaced() {
        if let Some(dir) = config_dir() {
            assert!(dir.ends_with("mail-insight"));
        }
    }

    #[test]
    fn defaults_without_file_or_env() {
        let config = load_from(None, None).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn file_values_fill_in_over_defaults() {
        let path = temp_file("file", r#"{"base_url": "https://mail.example.com"}"#);
        let config = load_from(Some(&path), None).unwrap();
        assert_eq!(config.base_url, "https://mail.example.com");
        assert_eq!(config.mails_limit, 10);
    }

    #[test]
    fn env_overrides_file() {
        let path = temp_file("env", r#"{"base_url": "https://mail.example.com", "mails_limit": 25}"#);
        let config = load_from(Some(&path), Some("http://10.0.0.5:3000")).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.5:3000");
        assert_eq!(config.mails_limit, 25);
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        assert!(matches!(
            load_from(None, Some("not a url")),
            Err(AppError::Config(_))
        ));
        let path = temp_file("broken", "{ nope");
        assert!(matches!(load_from(Some(&path), None), Err(AppError::Config(_))));
    }
}
