use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the workshop backend, without a trailing slash.
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: String::new(), timeout_secs: default_timeout_secs() }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load from file (falling back to defaults when absent), fill from the
    /// environment, then validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.api.normalize_from_env();
        self.api.validate()?;
        Ok(())
    }
}

impl ApiConfig {
    /// Fill the base URL from `WORKSHOP_API_URL` when the file left it empty,
    /// trim trailing slashes, clamp a zero timeout to the default.
    pub fn normalize_from_env(&mut self) {
        if self.base_url.trim().is_empty() {
            if let Ok(url) = std::env::var("WORKSHOP_API_URL") {
                self.base_url = url;
            }
        }
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
        if self.timeout_secs == 0 {
            self.timeout_secs = default_timeout_secs();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(anyhow!(
                "api.base_url is empty; set it in config.toml or the WORKSHOP_API_URL env var"
            ));
        }
        let lower = self.base_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("api.base_url must start with http:// or https://"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_api_section() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://localhost:5000/api"
            timeout_secs = 10
            "#,
        )
        .expect("parse");
        assert_eq!(cfg.api.base_url, "http://localhost:5000/api");
        assert_eq!(cfg.api.timeout_secs, 10);
    }

    #[test]
    fn missing_section_uses_defaults() {
        let cfg: AppConfig = toml::from_str("").expect("parse");
        assert_eq!(cfg.api.timeout_secs, 30);
        assert!(cfg.api.base_url.is_empty());
    }

    #[test]
    fn trailing_slash_is_trimmed_and_zero_timeout_clamped() {
        let mut api = ApiConfig { base_url: "http://localhost:5000/api///".into(), timeout_secs: 0 };
        api.normalize_from_env();
        assert_eq!(api.base_url, "http://localhost:5000/api");
        assert_eq!(api.timeout_secs, 30);
    }

    #[test]
    fn rejects_missing_and_malformed_base_url() {
        let empty = ApiConfig { base_url: "".into(), timeout_secs: 30 };
        assert!(empty.validate().is_err());
        let bad = ApiConfig { base_url: "ftp://somewhere".into(), timeout_secs: 30 };
        assert!(bad.validate().is_err());
        let ok = ApiConfig { base_url: "https://workshop.local/api".into(), timeout_secs: 30 };
        assert!(ok.validate().is_ok());
    }
}
