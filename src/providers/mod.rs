// Multi-provider role clients
//
// This module provides an abstraction layer over the LLM APIs backing the
// three roles (coordinator, drafter, critic), so the optimizer can treat
// each role as an opaque text-completion service.

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

pub mod types;

// Provider implementations
pub mod gemini;
pub mod openai;

// Role binding factory
pub mod factory;

// Re-export commonly used types
pub use factory::{build_bindings, RoleBinding, RoleBindings};
pub use gemini::GeminiClient;
pub use openai::OpenAIClient;
pub use types::{Completion, Message};

/// Trait for role-backing LLM clients
///
/// The optimizer treats every role as this opaque capability: given an input
/// (and optionally prior conversation history), return a text output plus the
/// history delta for the exchange.
#[async_trait]
pub trait RoleClient: Send + Sync {
    /// Complete `input` given prior conversation `history`.
    ///
    /// History is threaded explicitly by the caller. Implementations must not
    /// keep session state between calls, so concurrent runs cannot leak
    /// history into each other.
    async fn complete(&self, input: &str, history: &[Message]) -> Result<Completion>;

    /// Provider name (e.g. "openai", "gemini")
    fn provider(&self) -> &str;

    /// Model identity behind this client
    fn model(&self) -> &str;
}

/// Credential status for a role binding, as reported by /api/check_keys.
///
/// `Error` is part of the wire contract for probe failures; with the
/// presence-only check it is never produced at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStatus {
    Missing,
    Active,
    Error,
}
