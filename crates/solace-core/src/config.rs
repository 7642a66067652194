use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, SolaceError};

/// Top-level configuration for the Solace service.
///
/// Loaded from `~/.solace/config.toml` by default. Each section corresponds
/// to a bounded context or cross-cutting concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolaceConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub safety: SafetyConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

impl Default for SolaceConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            chat: ChatConfig::default(),
            retrieval: RetrievalConfig::default(),
            completion: CompletionConfig::default(),
            safety: SafetyConfig::default(),
            remote: RemoteConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

impl SolaceConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SolaceConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SolaceError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Conversation handling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Number of most recent turns included in the context window.
    pub window_turns: usize,
    /// Maximum incoming message length in characters.
    pub max_message_length: usize,
    /// Minutes of inactivity after which a session expires.
    pub session_timeout_minutes: u32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            window_turns: 7,
            max_message_length: 2000,
            session_timeout_minutes: 60,
        }
    }
}

/// Passage retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Number of passages requested per retrieval call.
    pub limit: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { limit: 9 }
    }
}

/// Completion model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Model used for both query condensing and reply generation.
    pub model: String,
    /// Models offered for selection. In practice a single fixed choice.
    pub models: Vec<String>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: "mistral-large2".to_string(),
            models: vec!["mistral-large2".to_string()],
        }
    }
}

/// Safety gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    /// Crisis keywords matched case-insensitively as substrings.
    pub keywords: Vec<String>,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            keywords: vec![
                "suicide".to_string(),
                "harm".to_string(),
                "hopeless".to_string(),
                "kill myself".to_string(),
                "worthless".to_string(),
                "cut myself".to_string(),
            ],
        }
    }
}

/// Connection settings for the hosted retrieval and completion services.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the hosted service gateway.
    pub base_url: String,
    /// Bearer token for the hosted service. Overridable via SOLACE_API_TOKEN.
    pub api_token: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_token: String::new(),
        }
    }
}

/// HTTP API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// TCP port the server binds to.
    pub port: u16,
    /// Origin allowed by the CORS layer.
    pub allowed_origin: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 4040,
            allowed_origin: "http://localhost:4040".to_string(),
        }
    }
}
