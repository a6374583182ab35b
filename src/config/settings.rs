// Environment-backed settings
//
// Provider keys are optional at startup: a missing key surfaces through
// /api/check_keys and as a provider error at call time, not as a crash.

use std::path::PathBuf;

use super::constants::{DEFAULT_HTTP_ADDR, DEFAULT_TEMPLATES_DIR};

/// Server settings, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Bind address (e.g. "127.0.0.1:8000")
    pub bind_address: String,
    /// Directory holding the drafter/critic/coordinator templates
    pub templates_dir: PathBuf,
    /// OpenAI key (coordinator + drafter bindings)
    pub openai_api_key: Option<String>,
    /// Gemini key (critic binding)
    pub gemini_api_key: Option<String>,
}

/// Load settings from the environment.
pub fn load_settings() -> Settings {
    Settings {
        bind_address: env_nonempty("QUILL_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string()),
        templates_dir: env_nonempty("QUILL_TEMPLATES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATES_DIR)),
        openai_api_key: env_nonempty("OPENAI_API_KEY"),
        // GOOGLE_API_KEY is the older name some deployments still set
        gemini_api_key: env_nonempty("GEMINI_API_KEY").or_else(|| env_nonempty("GOOGLE_API_KEY")),
    }
}

/// Read an environment variable, treating blank values as unset.
fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_nonempty_unset() {
        assert_eq!(env_nonempty("QUILL_TEST_VAR_THAT_DOES_NOT_EXIST"), None);
    }

    #[test]
    fn test_env_nonempty_blank_treated_as_unset() {
        std::env::set_var("QUILL_TEST_BLANK_VAR", "   ");
        assert_eq!(env_nonempty("QUILL_TEST_BLANK_VAR"), None);
        std::env::remove_var("QUILL_TEST_BLANK_VAR");
    }

    #[test]
    fn test_env_nonempty_set() {
        std::env::set_var("QUILL_TEST_SET_VAR", "value");
        assert_eq!(env_nonempty("QUILL_TEST_SET_VAR"), Some("value".to_string()));
        std::env::remove_var("QUILL_TEST_SET_VAR");
    }
}
