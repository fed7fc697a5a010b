//! TOML configuration file loading
//!
//! Supports `~/.config/lyra/config.toml` as a persistent config source.
//! All fields are optional — the file is a partial overlay on top of
//! defaults, with environment variables taking precedence over both.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Result;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct PipelineConfigFile {
    /// Chat-agent configuration
    #[serde(default)]
    pub agent: AgentFileConfig,

    /// Bare LLM configuration
    #[serde(default)]
    pub llm: LlmFileConfig,

    /// Text-to-speech configuration
    #[serde(default)]
    pub tts: TtsFileConfig,
}

/// Chat-agent configuration section
#[derive(Debug, Default, Deserialize)]
pub struct AgentFileConfig {
    /// Agent backend (currently only "openai")
    pub agent_type: Option<String>,

    /// API key (env `OPENAI_API_KEY` takes precedence)
    pub api_key: Option<String>,

    /// OpenAI-compatible API base URL
    pub api_base_url: Option<String>,

    /// Model identifier (e.g. "gpt-4o-mini")
    pub model_name: Option<String>,

    pub top_p: Option<f32>,

    pub temperature: Option<f32>,

    /// MCP server configuration passed through to the agent runtime
    pub mcp_config: Option<HashMap<String, serde_json::Value>>,

    /// Whether image attachments are forwarded to the model
    pub support_image: Option<bool>,
}

/// Bare LLM configuration section
#[derive(Debug, Default, Deserialize)]
pub struct LlmFileConfig {
    /// LLM backend (currently only "openai")
    pub llm_model: Option<String>,

    pub api_key: Option<String>,

    pub base_url: Option<String>,

    pub model_name: Option<String>,

    pub top_p: Option<f32>,

    pub temperature: Option<f32>,
}

/// Text-to-speech configuration section
#[derive(Debug, Default, Deserialize)]
pub struct TtsFileConfig {
    /// TTS backend (currently only "fish_local_tts")
    pub tts_model: Option<String>,

    /// Local fish-speech server URL
    pub base_url: Option<String>,

    pub api_key: Option<String>,

    /// Sampling seed for reproducible synthesis
    pub seed: Option<i64>,

    /// Stream audio chunks as they are generated
    pub streaming: Option<bool>,

    /// Reference-audio memory cache: "on" or "off"
    pub use_memory_cache: Option<String>,

    /// Text chunk length per synthesis request
    pub chunk_length: Option<u32>,

    pub max_new_tokens: Option<u32>,

    pub top_p: Option<f32>,

    pub repetition_penalty: Option<f32>,

    pub temperature: Option<f32>,
}

impl PipelineConfigFile {
    /// Load a config file from an explicit path
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Load the TOML config file from the standard path
///
/// Returns `PipelineConfigFile::default()` if the file doesn't exist or
/// can't be parsed.
pub fn load_config_file() -> PipelineConfigFile {
    let Some(path) = config_file_path() else {
        return PipelineConfigFile::default();
    };

    if !path.exists() {
        return PipelineConfigFile::default();
    }

    match PipelineConfigFile::from_path(&path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "loaded config file");
            config
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to load config file, using defaults"
            );
            PipelineConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/lyra/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("lyra").join("config.toml"))
}
