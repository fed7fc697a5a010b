//! Lyra pipeline core - configuration and conversation utilities
//!
//! This library provides the declarative core of the Lyra voice agent:
//! - Configuration schemas for the chat agent, LLM, and TTS clients
//! - Conversation history trimming applied before each LLM call
//!
//! The orchestration loop, provider clients, and audio plumbing live in
//! separate services; this crate holds only the shared data contracts and
//! the one piece of logic they all agree on.

pub mod config;
pub mod error;
pub mod history;

pub use config::{
    AgentBackend, AgentConfig, LlmBackend, LlmConfig, MemoryCacheMode, PipelineConfig, TtsBackend,
    TtsConfig,
};
pub use error::{Error, Result};
pub use history::{DEFAULT_MAX_MESSAGES, Message, trim, trim_default};
