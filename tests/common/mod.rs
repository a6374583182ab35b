// Shared test helpers: scripted role clients and binding builders
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use quill::optimizer::ProgressEvent;
use quill::providers::{Completion, KeyStatus, Message, RoleBinding, RoleBindings, RoleClient};

/// One recorded call to a scripted client.
pub struct RecordedCall {
    pub input: String,
    pub history_len: usize,
}

/// Role client that replays a fixed script of responses, recording every
/// call it receives. `Err` entries simulate provider failures.
pub struct ScriptedClient {
    provider: &'static str,
    model: &'static str,
    script: Mutex<Vec<Result<String, String>>>,
    pub calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedClient {
    pub fn new(
        provider: &'static str,
        model: &'static str,
        script: Vec<Result<String, String>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            provider,
            model,
            script: Mutex::new(script),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call(&self, index: usize) -> RecordedCall {
        let calls = self.calls.lock().unwrap();
        RecordedCall {
            input: calls[index].input.clone(),
            history_len: calls[index].history_len,
        }
    }
}

#[async_trait]
impl RoleClient for ScriptedClient {
    async fn complete(&self, input: &str, history: &[Message]) -> Result<Completion> {
        self.calls.lock().unwrap().push(RecordedCall {
            input: input.to_string(),
            history_len: history.len(),
        });
        let next = {
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                return Err(anyhow!("script exhausted for {}", self.model));
            }
            script.remove(0)
        };
        match next {
            Ok(text) => Ok(Completion::new(input, text)),
            Err(message) => Err(anyhow!(message)),
        }
    }

    fn provider(&self) -> &str {
        self.provider
    }

    fn model(&self) -> &str {
        self.model
    }
}

/// Build role bindings around scripted drafter and critic clients. The
/// coordinator never completes text during a run, so it gets an empty script.
pub fn scripted_bindings(
    drafter: Arc<ScriptedClient>,
    critic: Arc<ScriptedClient>,
) -> RoleBindings {
    RoleBindings {
        coordinator: RoleBinding {
            name: "coordinator",
            client: ScriptedClient::new("openai", "gpt-4o", vec![]),
            status: KeyStatus::Active,
        },
        drafter: RoleBinding {
            name: "drafter",
            client: drafter,
            status: KeyStatus::Active,
        },
        critic: RoleBinding {
            name: "critic",
            client: critic,
            status: KeyStatus::Active,
        },
    }
}

/// Write a minimal set of persona templates into a temp directory.
pub fn template_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("drafter.md"), "Draft this:\n{{TARGET_PROMPT}}").unwrap();
    std::fs::write(dir.path().join("critic.md"), "Review this:\n{PASTE_PROMPT_HERE}").unwrap();
    std::fs::write(dir.path().join("coordinator.md"), "Coordinate.").unwrap();
    dir
}

/// Drain everything currently buffered on an event channel.
pub fn drain_events(
    rx: &mut tokio::sync::mpsc::UnboundedReceiver<ProgressEvent>,
) -> Vec<ProgressEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Log messages attributed to one agent, in production order.
pub fn logs_for<'a>(events: &'a [ProgressEvent], agent: &str) -> Vec<&'a str> {
    events
        .iter()
        .filter_map(|event| match event {
            ProgressEvent::Log { agent: a, message } if a == agent => Some(message.as_str()),
            _ => None,
        })
        .collect()
}

pub fn ok(text: &str) -> Result<String, String> {
    Ok(text.to_string())
}

pub fn err(message: &str) -> Result<String, String> {
    Err(message.to_string())
}
