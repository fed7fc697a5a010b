//! Conversation history trimming
//!
//! Before each LLM call the orchestration loop hands the full transcript to
//! [`trim`], which reduces it to a bounded window of recent user/assistant
//! messages. System and tool messages never survive trimming: the system
//! prompt is re-injected per turn by the caller, and tool output is only
//! meaningful within the turn that produced it.

use serde::{Deserialize, Serialize};

/// Default retention cap applied by [`trim_default`]
pub const DEFAULT_MAX_MESSAGES: usize = 20;

/// A single transcript entry, tagged by role
///
/// Serializes as `{"role": "...", "content": "..."}` with lowercase role
/// tags, matching the chat-completion wire shape.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", content = "content", rename_all = "lowercase")]
pub enum Message {
    /// System prompt or injected summary
    System(String),
    /// End-user message
    Human(String),
    /// Assistant completion
    Ai(String),
    /// Tool invocation output
    Tool(String),
}

impl Message {
    /// The message text, regardless of role
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::System(s) | Self::Human(s) | Self::Ai(s) | Self::Tool(s) => s,
        }
    }
}

/// Trim a transcript to at most `max_messages` recent messages
///
/// Scans from the most recent message backwards, keeping human messages
/// unconditionally and assistant messages only when their content is
/// non-empty after trimming whitespace. An empty assistant message is
/// skipped without consuming a slot. System and tool messages are always
/// dropped. Once `max_messages` messages have been kept, everything older
/// is discarded. The result is returned oldest-first.
///
/// `max_messages == 0` yields an empty transcript. The function never
/// fails and never reorders or mutates surviving messages.
#[must_use]
pub fn trim(messages: Vec<Message>, max_messages: usize) -> Vec<Message> {
    let mut kept = Vec::with_capacity(max_messages.min(messages.len()));

    for message in messages.into_iter().rev() {
        if kept.len() >= max_messages {
            break;
        }
        let keep = match &message {
            Message::Human(_) => true,
            Message::Ai(text) => !text.trim().is_empty(),
            Message::System(_) | Message::Tool(_) => false,
        };
        if keep {
            kept.push(message);
        }
    }

    kept.reverse();
    kept
}

/// Trim a transcript with the default retention cap of 20 messages
#[must_use]
pub fn trim_default(messages: Vec<Message>) -> Vec<Message> {
    trim(messages, DEFAULT_MAX_MESSAGES)
}
