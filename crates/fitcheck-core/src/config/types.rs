//! Sub-configuration structs with service defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Directory where uploaded photos are saved (created at startup)
    pub upload_dir: String,

    /// Single origin allowed to call the API. When unset, any origin is
    /// allowed (dev mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            upload_dir: "uploads".to_string(),
            allowed_origin: None,
        }
    }
}

/// Classification model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model name (the CLIP ONNX export to load)
    pub name: String,

    /// Directory where model files are stored
    pub dir: PathBuf,

    /// Image input size (224 for ViT-B/32)
    pub image_size: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "clip-vit-base-patch32".to_string(),
            dir: PathBuf::from("~/.fitcheck/models"),
            image_size: 224,
        }
    }
}

/// OpenRouter chat completion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenRouterConfig {
    /// API base endpoint
    pub endpoint: String,

    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model name
    pub model: String,

    /// HTTP-Referer header sent with each call (OpenRouter app attribution)
    pub referer: String,

    /// X-Title header sent with each call
    pub title: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://openrouter.ai/api/v1".to_string(),
            api_key: "${OPENROUTER_API_KEY}".to_string(),
            model: "deepseek/deepseek-r1:free".to_string(),
            referer: "https://ai-fashion-advisor.web.app/".to_string(),
            title: "Outfit Advisor".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum upload size in megabytes
    pub max_upload_mb: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self { max_upload_mb: 10 }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
