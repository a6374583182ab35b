// Shared chat types for provider requests

use serde::{Deserialize, Serialize};

/// A single chat turn in the common role/content shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Output of one role-client call: the reply text plus the two turns
/// (user input, assistant reply) for the caller to append to its history.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub history_delta: Vec<Message>,
}

impl Completion {
    /// Build a completion for an exchange of `input` -> `text`.
    pub fn new(input: &str, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            history_delta: vec![Message::user(input), Message::assistant(text.clone())],
            text,
        }
    }
}
