// Progress events streamed to the caller during an optimization run

use serde::{Deserialize, Serialize};

/// One unit of observable run progress.
///
/// `Log` lines are produced by the state machine while the run is in flight;
/// exactly one terminal `Result` or `Error` ends every stream. Events reach
/// the consumer in production order over a single-producer FIFO channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProgressEvent {
    /// A log line attributed to a role
    Log { agent: String, message: String },
    /// Terminal: the final optimized prompt
    Result { content: String },
    /// Terminal: the run failed
    Error { message: String },
}

impl ProgressEvent {
    pub fn log(agent: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Log {
            agent: agent.into(),
            message: message.into(),
        }
    }

    pub fn result(content: impl Into<String>) -> Self {
        Self::Result {
            content: content.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Serialize as one NDJSON line, trailing newline included.
    pub fn to_ndjson(&self) -> String {
        // This enum has no map keys or non-string payloads, so serialization
        // cannot fail; the fallback keeps the stream well-formed regardless.
        let mut line = serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string());
        line.push('\n');
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_log_wire_shape() {
        let event = ProgressEvent::log("drafter", "Draft: hello");
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"type": "log", "agent": "drafter", "message": "Draft: hello"})
        );
    }

    #[test]
    fn test_result_wire_shape() {
        let event = ProgressEvent::result("final prompt");
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"type": "result", "content": "final prompt"})
        );
    }

    #[test]
    fn test_error_wire_shape() {
        let event = ProgressEvent::error("boom");
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"type": "error", "message": "boom"})
        );
    }

    #[test]
    fn test_ndjson_line_ends_with_newline() {
        let line = ProgressEvent::result("x").to_ndjson();
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);
    }

    #[test]
    fn test_roundtrip() {
        let event = ProgressEvent::log("critic", "Review: fine");
        let parsed: ProgressEvent =
            serde_json::from_str(&serde_json::to_string(&event).unwrap()).unwrap();
        assert_eq!(parsed, event);
    }
}
