// Refinement loop runner - iterative drafting + adversarial review

use std::path::Path;

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::sync::mpsc;

use crate::config::constants::{
    CRITIC_PLACEHOLDER, DRAFTER_PLACEHOLDER, MAX_REVIEW_PASSES, OPTIMIZED_PROMPT_OPEN,
    SATISFIED_MARKER,
};
use crate::providers::{Message, RoleBinding, RoleBindings};

use super::events::ProgressEvent;
use super::templates::{render, Templates};

/// Inputs to one optimization run. Immutable for the run's lifetime.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// The user's request describing the prompt to produce
    pub user_request: String,
    /// When set, the run refines this prompt instead of starting fresh
    pub starting_prompt: Option<String>,
}

static OPTIMIZED_PROMPT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<optimized_prompt>(.*?)</optimized_prompt>")
        .expect("optimized prompt regex is valid")
});

/// The refinement state machine for a single run.
///
/// Drives the draft -> review <-> refine loop until the critic is satisfied,
/// the critic (or mid-loop drafter) fails, or the pass cap is reached. The
/// prompt candidate and drafter history are owned here exclusively for the
/// run's lifetime; nothing persists across runs.
pub struct Optimizer {
    bindings: RoleBindings,
    templates: Templates,
    events: mpsc::UnboundedSender<ProgressEvent>,
}

impl Optimizer {
    /// Build an optimizer for one run.
    ///
    /// Templates are loaded here; load problems become coordinator log
    /// events rather than construction failures.
    pub fn new(
        bindings: RoleBindings,
        templates_dir: &Path,
        events: mpsc::UnboundedSender<ProgressEvent>,
    ) -> Self {
        let (templates, load_errors) = Templates::load(templates_dir);
        let optimizer = Self {
            bindings,
            templates,
            events,
        };
        for message in load_errors {
            optimizer.log_coordinator(message);
        }
        optimizer
    }

    /// Run the full refinement loop; returns the final prompt text.
    ///
    /// An initial-draft failure is the only error this returns. Everything
    /// after the first draft degrades to log events and early loop exit, so
    /// the last good candidate is always finalized.
    pub async fn run(&self, config: RunConfig) -> Result<String> {
        self.log_coordinator(format!("Received request: {}", config.user_request));

        let mut history: Vec<Message> = Vec::new();

        // Step 1: initial draft. Fatal on failure, no retry - a broken
        // initial draft has no productive continuation.
        let drafter_input = if let Some(existing) = &config.starting_prompt {
            self.log_coordinator("Refining existing prompt based on new user request...");
            let target = format!(
                "MODIFY EXISTING PROMPT:\nRequest: {}\n\nExisting Prompt:\n{}",
                config.user_request, existing
            );
            self.log_coordinator("Asking the drafter for a refinement...");
            render(&self.templates.drafter, DRAFTER_PLACEHOLDER, &target)
        } else {
            self.log_coordinator("Asking the drafter for an initial draft...");
            render(
                &self.templates.drafter,
                DRAFTER_PLACEHOLDER,
                &config.user_request,
            )
        };

        let mut candidate = match self
            .bindings
            .drafter
            .client
            .complete(&drafter_input, &history)
            .await
        {
            Ok(completion) => {
                history.extend(completion.history_delta);
                self.log(&self.bindings.drafter, format!("Draft: {}", completion.text));
                completion.text
            }
            Err(e) => {
                self.log(&self.bindings.drafter, format!("CRITICAL ERROR: {e:#}"));
                return Err(e.context("Drafter failed on the initial draft"));
            }
        };

        // Step 2: review loop. The counter increments before use, so the
        // first review is pass 1 of MAX_REVIEW_PASSES.
        let mut pass = 0;
        while pass < MAX_REVIEW_PASSES {
            pass += 1;
            self.log_coordinator(format!(
                "Pass {pass}/{MAX_REVIEW_PASSES}: Sending to the critic for review."
            ));

            // The critic is stateless: no history crosses review passes
            let critic_input = render(&self.templates.critic, CRITIC_PLACEHOLDER, &candidate);
            let review = match self.bindings.critic.client.complete(&critic_input, &[]).await {
                Ok(completion) => completion.text,
                Err(e) => {
                    // Terminal for the loop, not the run: an unreliable
                    // critic must not cause unbounded looping
                    self.log(&self.bindings.critic, format!("CRITICAL ERROR: {e:#}"));
                    self.log_coordinator("Critic failed. Stopping optimization.");
                    break;
                }
            };
            self.log(&self.bindings.critic, format!("Review: {review}"));

            if review.contains(SATISFIED_MARKER) {
                self.log_coordinator("The critic is satisfied. Optimization complete.");
                break;
            }

            self.log_coordinator("Passing review comments back to the drafter for refinement.");

            let refine_input = format!(
                "Refine the prompt based on these comments from the Critic:\n\
                 {review}\n\n\
                 Current Prompt Candidates:\n{candidate}\n\n\
                 CRITICAL: Return ONLY the refined prompt text. No conversational filler."
            );

            // The accumulated history keeps the drafter aware of its persona
            // and the original task. A failure here ends the loop like a
            // critic failure: the last good candidate is still worth keeping.
            match self
                .bindings
                .drafter
                .client
                .complete(&refine_input, &history)
                .await
            {
                Ok(completion) => {
                    history.extend(completion.history_delta);
                    candidate = completion.text;
                    self.log(
                        &self.bindings.drafter,
                        format!("Refined Draft: {candidate}"),
                    );
                }
                Err(e) => {
                    self.log(&self.bindings.drafter, format!("CRITICAL ERROR: {e:#}"));
                    self.log_coordinator("Drafter failed mid-refinement. Stopping optimization.");
                    break;
                }
            }
        }

        Ok(self.finalize(candidate))
    }

    /// Extract the text between the optimized-prompt tags if present,
    /// otherwise return the candidate verbatim. Never fails the run.
    fn finalize(&self, candidate: String) -> String {
        if !candidate.contains(OPTIMIZED_PROMPT_OPEN) {
            return candidate;
        }
        match OPTIMIZED_PROMPT_RE
            .captures(&candidate)
            .and_then(|caps| caps.get(1))
        {
            Some(inner) => inner.as_str().trim().to_string(),
            None => {
                tracing::warn!("optimized_prompt open tag present but extraction failed");
                self.log_coordinator(
                    "Could not extract prompt from optimized_prompt tags; returning candidate as-is.",
                );
                candidate
            }
        }
    }

    /// Emit a log event attributed to `binding`. Fire-and-forget: if the
    /// consumer is gone the run still finishes.
    fn log(&self, binding: &RoleBinding, message: impl Into<String>) {
        let _ = self.events.send(ProgressEvent::log(binding.name, message));
    }

    fn log_coordinator(&self, message: impl Into<String>) {
        let _ = self
            .events
            .send(ProgressEvent::log(self.bindings.coordinator.name, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_regex_spans_newlines() {
        let text = "<optimized_prompt>\n  line one\n  line two  \n</optimized_prompt>";
        let caps = OPTIMIZED_PROMPT_RE.captures(text).unwrap();
        assert_eq!(caps.get(1).unwrap().as_str().trim(), "line one\n  line two");
    }

    #[test]
    fn test_extraction_regex_is_non_greedy() {
        let text = "<optimized_prompt>a</optimized_prompt> junk <optimized_prompt>b</optimized_prompt>";
        let caps = OPTIMIZED_PROMPT_RE.captures(text).unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "a");
    }

    #[test]
    fn test_extraction_regex_no_match_without_close_tag() {
        assert!(OPTIMIZED_PROMPT_RE.captures("<optimized_prompt>open only").is_none());
    }
}
