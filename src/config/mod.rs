//! Configuration schemas for the Lyra pipeline
//!
//! Three independent sections — chat agent, bare LLM, and TTS — consumed by
//! the orchestration loop when constructing the corresponding clients.
//! Resolution order for every field is `env > toml > default`, evaluated
//! once at startup via the `load` constructors; nothing here reads the
//! environment at schema-definition time.

pub mod file;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Chat-agent backend
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentBackend {
    /// OpenAI-compatible chat-completion agent
    #[default]
    OpenAi,
}

/// Bare LLM backend
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmBackend {
    /// OpenAI-compatible completion endpoint
    #[default]
    OpenAi,
}

/// Text-to-speech backend
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtsBackend {
    /// Local fish-speech server
    #[default]
    FishLocalTts,
}

/// Reference-audio memory cache toggle for the fish-speech server
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryCacheMode {
    On,
    #[default]
    Off,
}

/// Chat-agent configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Agent backend
    pub agent_type: AgentBackend,

    /// API key (from `OPENAI_API_KEY` by default)
    pub api_key: String,

    /// OpenAI-compatible API base URL
    pub api_base_url: String,

    /// Model identifier (e.g. "gpt-4o-mini")
    pub model_name: String,

    /// Nucleus sampling parameter
    pub top_p: f32,

    /// Sampling temperature
    pub temperature: f32,

    /// MCP server configuration passed through to the agent runtime
    pub mcp_config: Option<HashMap<String, serde_json::Value>>,

    /// Whether image attachments are forwarded to the model
    pub support_image: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            agent_type: AgentBackend::OpenAi,
            api_key: String::new(),
            api_base_url: "https://api.openai.com/v1".to_string(),
            model_name: "gpt-4o-mini".to_string(),
            top_p: 1.0,
            temperature: 0.7,
            mcp_config: None,
            support_image: false,
        }
    }
}

/// Bare LLM configuration (summarization, rewriting, other one-shot calls)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// LLM backend
    pub llm_model: LlmBackend,

    /// API key (from `OPENAI_API_KEY` by default)
    pub api_key: String,

    /// OpenAI-compatible API base URL
    pub base_url: String,

    /// Model identifier
    pub model_name: String,

    /// Nucleus sampling parameter
    pub top_p: f32,

    /// Sampling temperature
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            llm_model: LlmBackend::OpenAi,
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            model_name: "gpt-4o-mini".to_string(),
            top_p: 1.0,
            temperature: 0.7,
        }
    }
}

/// Text-to-speech configuration for the local fish-speech server
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TtsConfig {
    /// TTS backend
    pub tts_model: TtsBackend,

    /// Local fish-speech server URL
    pub base_url: String,

    /// API key, if the server requires one
    pub api_key: Option<String>,

    /// Sampling seed for reproducible synthesis
    pub seed: Option<i64>,

    /// Stream audio chunks as they are generated
    pub streaming: bool,

    /// Reference-audio memory cache toggle
    pub use_memory_cache: MemoryCacheMode,

    /// Text chunk length per synthesis request
    pub chunk_length: u32,

    /// Max tokens generated per request
    pub max_new_tokens: u32,

    /// Nucleus sampling parameter
    pub top_p: f32,

    /// Penalty applied to repeated tokens
    pub repetition_penalty: f32,

    /// Sampling temperature
    pub temperature: f32,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            tts_model: TtsBackend::FishLocalTts,
            base_url: "http://127.0.0.1:8080".to_string(),
            api_key: None,
            seed: None,
            streaming: false,
            use_memory_cache: MemoryCacheMode::Off,
            chunk_length: 200,
            max_new_tokens: 1024,
            top_p: 0.7,
            repetition_penalty: 1.2,
            temperature: 0.7,
        }
    }
}

/// Fully resolved pipeline configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Chat-agent configuration
    pub agent: AgentConfig,

    /// Bare LLM configuration
    pub llm: LlmConfig,

    /// TTS configuration
    pub tts: TtsConfig,
}

impl PipelineConfig {
    /// Load the full pipeline configuration
    ///
    /// Reads the optional TOML config file, then overlays environment
    /// variables on top of it. Intended to be called once at startup.
    #[must_use]
    pub fn load() -> Self {
        let fc = file::load_config_file();
        Self::from_file(&fc)
    }

    /// Resolve configuration from an already-loaded file overlay
    #[must_use]
    pub fn from_file(fc: &file::PipelineConfigFile) -> Self {
        Self {
            agent: AgentConfig::load(&fc.agent),
            llm: LlmConfig::load(&fc.llm),
            tts: TtsConfig::load(&fc.tts),
        }
    }

    /// Validate field-level ranges across all sections
    ///
    /// # Errors
    ///
    /// Returns error if any sampling parameter is out of range.
    pub fn validate(&self) -> Result<()> {
        self.agent.validate()?;
        self.llm.validate()?;
        self.tts.validate()
    }
}

impl AgentConfig {
    /// Resolve chat-agent configuration (env > toml > default)
    #[must_use]
    pub fn load(fc: &file::AgentFileConfig) -> Self {
        let default = Self::default();

        Self {
            agent_type: fc
                .agent_type
                .as_deref()
                .and_then(parse_agent_backend)
                .unwrap_or(default.agent_type),
            api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .or_else(|| fc.api_key.clone())
                .unwrap_or(default.api_key),
            api_base_url: std::env::var("OPENAI_BASE_URL")
                .ok()
                .or_else(|| fc.api_base_url.clone())
                .unwrap_or(default.api_base_url),
            model_name: std::env::var("LYRA_AGENT_MODEL")
                .ok()
                .or_else(|| fc.model_name.clone())
                .unwrap_or(default.model_name),
            top_p: fc.top_p.unwrap_or(default.top_p),
            temperature: fc.temperature.unwrap_or(default.temperature),
            mcp_config: fc.mcp_config.clone(),
            support_image: fc.support_image.unwrap_or(default.support_image),
        }
    }

    /// Validate field-level ranges
    ///
    /// # Errors
    ///
    /// Returns error if `top_p` is outside (0, 1] or `temperature` is
    /// outside [0, 2].
    pub fn validate(&self) -> Result<()> {
        check_top_p("agent.top_p", self.top_p)?;
        check_temperature("agent.temperature", self.temperature)
    }
}

impl LlmConfig {
    /// Resolve bare LLM configuration (env > toml > default)
    #[must_use]
    pub fn load(fc: &file::LlmFileConfig) -> Self {
        let default = Self::default();

        Self {
            llm_model: fc
                .llm_model
                .as_deref()
                .and_then(parse_llm_backend)
                .unwrap_or(default.llm_model),
            api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .or_else(|| fc.api_key.clone())
                .unwrap_or(default.api_key),
            base_url: std::env::var("OPENAI_BASE_URL")
                .ok()
                .or_else(|| fc.base_url.clone())
                .unwrap_or(default.base_url),
            model_name: std::env::var("LYRA_LLM_MODEL")
                .ok()
                .or_else(|| fc.model_name.clone())
                .unwrap_or(default.model_name),
            top_p: fc.top_p.unwrap_or(default.top_p),
            temperature: fc.temperature.unwrap_or(default.temperature),
        }
    }

    /// Validate field-level ranges
    ///
    /// # Errors
    ///
    /// Returns error if `top_p` is outside (0, 1] or `temperature` is
    /// outside [0, 2].
    pub fn validate(&self) -> Result<()> {
        check_top_p("llm.top_p", self.top_p)?;
        check_temperature("llm.temperature", self.temperature)
    }
}

impl TtsConfig {
    /// Resolve TTS configuration (env > toml > default)
    #[must_use]
    pub fn load(fc: &file::TtsFileConfig) -> Self {
        let default = Self::default();

        Self {
            tts_model: fc
                .tts_model
                .as_deref()
                .and_then(parse_tts_backend)
                .unwrap_or(default.tts_model),
            base_url: std::env::var("LYRA_TTS_BASE_URL")
                .ok()
                .or_else(|| fc.base_url.clone())
                .unwrap_or(default.base_url),
            api_key: std::env::var("LYRA_TTS_API_KEY")
                .ok()
                .or_else(|| fc.api_key.clone()),
            seed: fc.seed,
            streaming: std::env::var("LYRA_TTS_STREAMING")
                .ok()
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .or(fc.streaming)
                .unwrap_or(default.streaming),
            use_memory_cache: fc
                .use_memory_cache
                .as_deref()
                .and_then(parse_memory_cache)
                .unwrap_or(default.use_memory_cache),
            chunk_length: fc.chunk_length.unwrap_or(default.chunk_length),
            max_new_tokens: fc.max_new_tokens.unwrap_or(default.max_new_tokens),
            top_p: fc.top_p.unwrap_or(default.top_p),
            repetition_penalty: fc.repetition_penalty.unwrap_or(default.repetition_penalty),
            temperature: fc.temperature.unwrap_or(default.temperature),
        }
    }

    /// Validate field-level ranges
    ///
    /// # Errors
    ///
    /// Returns error if a sampling parameter is out of range or
    /// `chunk_length` is zero.
    pub fn validate(&self) -> Result<()> {
        check_top_p("tts.top_p", self.top_p)?;
        check_temperature("tts.temperature", self.temperature)?;
        if self.repetition_penalty <= 0.0 {
            return Err(Error::Config(format!(
                "tts.repetition_penalty must be positive, got {}",
                self.repetition_penalty
            )));
        }
        if self.chunk_length == 0 {
            return Err(Error::Config(
                "tts.chunk_length must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse an agent backend name, warning on unrecognized values
fn parse_agent_backend(s: &str) -> Option<AgentBackend> {
    match s.to_lowercase().as_str() {
        "openai" => Some(AgentBackend::OpenAi),
        other => {
            tracing::warn!(agent_type = other, "unrecognized agent backend, using default");
            None
        }
    }
}

/// Parse an LLM backend name, warning on unrecognized values
fn parse_llm_backend(s: &str) -> Option<LlmBackend> {
    match s.to_lowercase().as_str() {
        "openai" => Some(LlmBackend::OpenAi),
        other => {
            tracing::warn!(llm_model = other, "unrecognized LLM backend, using default");
            None
        }
    }
}

/// Parse a TTS backend name, warning on unrecognized values
fn parse_tts_backend(s: &str) -> Option<TtsBackend> {
    match s.to_lowercase().as_str() {
        "fish_local_tts" => Some(TtsBackend::FishLocalTts),
        other => {
            tracing::warn!(tts_model = other, "unrecognized TTS backend, using default");
            None
        }
    }
}

/// Parse a memory cache toggle ("on"/"off")
fn parse_memory_cache(s: &str) -> Option<MemoryCacheMode> {
    match s.to_lowercase().as_str() {
        "on" => Some(MemoryCacheMode::On),
        "off" => Some(MemoryCacheMode::Off),
        other => {
            tracing::warn!(
                use_memory_cache = other,
                "unrecognized memory cache mode, using default"
            );
            None
        }
    }
}

fn check_top_p(field: &str, value: f32) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "{field} must be in (0, 1], got {value}"
        )))
    }
}

fn check_temperature(field: &str, value: f32) -> Result<()> {
    if (0.0..=2.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "{field} must be in [0, 2], got {value}"
        )))
    }
}
