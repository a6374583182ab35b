// Project-wide constants
//
// Centralised here so model names and other magic values have one
// source of truth. Import via `use crate::config::constants::*;`.

/// Default bind address for the quill HTTP server (localhost only).
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8000";

/// Model identity behind the coordinator binding.
pub const COORDINATOR_MODEL: &str = "gpt-4o";

/// Model identity behind the drafter binding.
pub const DRAFTER_MODEL: &str = "gpt-5.2";

/// Model identity behind the critic binding.
pub const CRITIC_MODEL: &str = "gemini-3-pro-preview";

/// Hard cap on review passes per run. Not configurable at the API surface.
pub const MAX_REVIEW_PASSES: usize = 5;

/// Substring in critic output that ends the review loop successfully.
/// Plain case-sensitive match, no normalisation.
pub const SATISFIED_MARKER: &str = "SATISFIED";

/// Placeholder in the drafter template replaced with the target request.
pub const DRAFTER_PLACEHOLDER: &str = "{{TARGET_PROMPT}}";

/// Placeholder in the critic template replaced with the current candidate.
pub const CRITIC_PLACEHOLDER: &str = "{PASTE_PROMPT_HERE}";

/// Delimiter tags around the final prompt in drafter output.
pub const OPTIMIZED_PROMPT_OPEN: &str = "<optimized_prompt>";
pub const OPTIMIZED_PROMPT_CLOSE: &str = "</optimized_prompt>";

/// How long the stream pump waits on the event channel before re-checking
/// whether the background run has finished.
pub const STREAM_POLL_INTERVAL_MS: u64 = 100;

/// Default directory holding the three persona templates.
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Per-request timeout for provider API calls.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;
