use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub enable_tracing: bool,
    pub server: ServerConfig,
    /// PostgreSQL connection URL
    pub postgres_url: String,
    #[serde(default)]
    pub payment: PaymentConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Payment gateway configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PaymentConfig {
    /// Base URL of the payment gateway REST API
    pub endpoint: String,
    /// Merchant credential sent with every request
    pub merchant_id: String,
    /// Statement descriptor shown on the buyer's card statement
    pub billing_descriptor: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9090".to_string(),
            merchant_id: "sandbox".to_string(),
            billing_descriptor: "LEARNHUB COURSES".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthConfig {
    /// HS256 secret shared with the session service that issues tokens
    pub jwt_secret: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "dev-secret-change-me".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Self {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .unwrap_or_else(|_| panic!("Failed to read config file: {}", config_path));
        serde_yaml::from_str(&content).expect("Failed to parse config yaml")
    }
}
