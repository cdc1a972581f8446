//! Application configuration, loaded from `config/{env}.yaml`.

use std::fs;

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    pub auth: AuthConfig,
    /// Admin account created at startup when the store is empty, so a
    /// fresh deployment has someone able to create users and orders.
    #[serde(default)]
    pub seed_admin: Option<SeedAdmin>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

/// Token signing configuration. The secret is injected here at process
/// start and rotated by redeploy, never mutated at runtime.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,
}

fn default_token_ttl() -> i64 {
    3600
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SeedAdmin {
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub password: String,
}

impl AppConfig {
    pub fn load(env: &str) -> anyhow::Result<Self> {
        let config_path = format!("config/{env}.yaml");
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {config_path}"))?;
        let mut config: AppConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {config_path}"))?;

        // The environment wins over the file for the signing secret, so
        // deployments never have to commit it.
        if let Ok(secret) = std::env::var("FASTFEET_JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
log_level: info
log_dir: ./logs
log_file: fastfeet.log
use_json: false
rotation: daily
gateway:
  host: 0.0.0.0
  port: 3333
auth:
  jwt_secret: test-secret
seed_admin:
  name: Admin
  cpf: "00000000000"
  email: admin@fastfeet.local
  password: admin123
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.gateway.port, 3333);
        assert_eq!(config.auth.token_ttl_secs, 3600, "ttl should default to 1h");
        assert!(config.seed_admin.is_some());
    }

    #[test]
    fn test_seed_admin_is_optional() {
        let yaml = r#"
log_level: info
log_dir: ./logs
log_file: fastfeet.log
use_json: true
rotation: never
gateway:
  host: 127.0.0.1
  port: 8080
auth:
  jwt_secret: s
  token_ttl_secs: 60
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.seed_admin.is_none());
        assert_eq!(config.auth.token_ttl_secs, 60);
    }
}
