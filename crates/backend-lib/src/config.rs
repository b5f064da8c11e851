// ============================
// ticklist-backend-lib/src/config.rs
// ============================
//! Configuration management.
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Log level
    pub log_level: String,
    /// Token issuing and verification settings
    pub jwt: JwtSettings,
}

/// Settings for the signed session tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtSettings {
    /// Symmetric signing secret. When absent a random secret is
    /// generated for the process lifetime; tokens issued before a
    /// restart then become unverifiable after it.
    pub secret: Option<String>,
    /// Claim issuer
    pub issuer: String,
    /// Claim audience
    pub audience: String,
    /// Token lifetime in seconds
    pub expires_secs: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().unwrap(),
            log_level: "info".to_string(),
            jwt: JwtSettings::default(),
        }
    }
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self {
            secret: None,
            issuer: "ticklist".to_string(),
            audience: "ticklist-web".to_string(),
            expires_secs: 60 * 60 * 24 * 7, // 7 days
        }
    }
}

impl Settings {
    /// Load settings from `config.toml` and `TICKLIST_*` environment
    /// variables, on top of the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    /// Load settings with an explicit config file path.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("TICKLIST_").split("__"))
            .extract()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(settings.log_level, "info");
        assert!(settings.jwt.secret.is_none());
        assert_eq!(settings.jwt.expires_secs, 604_800);
    }

    #[test]
    fn test_load_settings_from_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    bind_addr = "0.0.0.0:8080"
                    log_level = "debug"

                    [jwt]
                    secret = "fixed-test-secret"
                    issuer = "ticklist-test"
                    audience = "ticklist-test-web"
                    expires_secs = 3600
                "#,
            )?;

            let settings = Settings::load().unwrap();
            assert_eq!(settings.bind_addr.to_string(), "0.0.0.0:8080");
            assert_eq!(settings.log_level, "debug");
            assert_eq!(settings.jwt.secret.as_deref(), Some("fixed-test-secret"));
            assert_eq!(settings.jwt.expires_secs, 3600);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", r#"log_level = "info""#)?;
            jail.set_env("TICKLIST_LOG_LEVEL", "trace");
            jail.set_env("TICKLIST_JWT__SECRET", "env-secret");

            let settings = Settings::load().unwrap();
            assert_eq!(settings.log_level, "trace");
            assert_eq!(settings.jwt.secret.as_deref(), Some("env-secret"));
            Ok(())
        });
    }
}
