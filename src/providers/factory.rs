// Role binding factory
//
// Builds the three named role bindings from settings. A binding with a
// missing key still exists so the capability probe can report it; invoking
// it fails with a credential error from the provider.

use std::sync::Arc;

use anyhow::Result;

use crate::config::constants::{COORDINATOR_MODEL, CRITIC_MODEL, DRAFTER_MODEL};
use crate::config::Settings;

use super::gemini::GeminiClient;
use super::openai::OpenAIClient;
use super::{KeyStatus, RoleClient};

/// One named role backed by a provider client.
#[derive(Clone)]
pub struct RoleBinding {
    /// Role name used in progress events ("coordinator", "drafter", "critic")
    pub name: &'static str,
    pub client: Arc<dyn RoleClient>,
    pub status: KeyStatus,
}

/// The three role bindings shared by every optimization run.
///
/// Bindings are stateless (history is threaded explicitly), so one set is
/// safely shared across concurrent runs.
#[derive(Clone)]
pub struct RoleBindings {
    pub coordinator: RoleBinding,
    pub drafter: RoleBinding,
    pub critic: RoleBinding,
}

impl RoleBindings {
    pub fn all(&self) -> [&RoleBinding; 3] {
        [&self.coordinator, &self.drafter, &self.critic]
    }
}

/// Build the coordinator/drafter/critic bindings from settings.
pub fn build_bindings(settings: &Settings) -> Result<RoleBindings> {
    let openai_status = status_for(&settings.openai_api_key);
    let gemini_status = status_for(&settings.gemini_api_key);
    let openai_key = settings.openai_api_key.clone().unwrap_or_default();
    let gemini_key = settings.gemini_api_key.clone().unwrap_or_default();

    Ok(RoleBindings {
        coordinator: RoleBinding {
            name: "coordinator",
            client: Arc::new(OpenAIClient::new(openai_key.clone(), COORDINATOR_MODEL)?),
            status: openai_status,
        },
        drafter: RoleBinding {
            name: "drafter",
            client: Arc::new(OpenAIClient::new(openai_key, DRAFTER_MODEL)?),
            status: openai_status,
        },
        critic: RoleBinding {
            name: "critic",
            client: Arc::new(GeminiClient::new(gemini_key, CRITIC_MODEL)?),
            status: gemini_status,
        },
    })
}

fn status_for(key: &Option<String>) -> KeyStatus {
    if key.is_some() {
        KeyStatus::Active
    } else {
        KeyStatus::Missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn settings(openai: Option<&str>, gemini: Option<&str>) -> Settings {
        Settings {
            bind_address: "127.0.0.1:0".to_string(),
            templates_dir: PathBuf::from("templates"),
            openai_api_key: openai.map(String::from),
            gemini_api_key: gemini.map(String::from),
        }
    }

    #[test]
    fn test_bindings_carry_configured_models() {
        let bindings = build_bindings(&settings(Some("ok"), Some("gk"))).unwrap();
        assert_eq!(bindings.coordinator.client.model(), COORDINATOR_MODEL);
        assert_eq!(bindings.drafter.client.model(), DRAFTER_MODEL);
        assert_eq!(bindings.critic.client.model(), CRITIC_MODEL);
    }

    #[test]
    fn test_missing_keys_still_build_bindings() {
        let bindings = build_bindings(&settings(None, None)).unwrap();
        assert_eq!(bindings.drafter.status, KeyStatus::Missing);
        assert_eq!(bindings.critic.status, KeyStatus::Missing);
    }

    #[test]
    fn test_key_presence_marks_binding_active() {
        let bindings = build_bindings(&settings(Some("ok"), None)).unwrap();
        assert_eq!(bindings.coordinator.status, KeyStatus::Active);
        assert_eq!(bindings.drafter.status, KeyStatus::Active);
        assert_eq!(bindings.critic.status, KeyStatus::Missing);
    }

    #[test]
    fn test_role_names() {
        let bindings = build_bindings(&settings(None, None)).unwrap();
        let names: Vec<&str> = bindings.all().iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["coordinator", "drafter", "critic"]);
    }
}
