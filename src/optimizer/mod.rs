// Prompt optimization engine
//
// The refinement state machine (draft -> review <-> refine), its progress
// events, and the persona template loader.

mod events;
mod loop_runner;
mod templates;

pub use events::ProgressEvent;
pub use loop_runner::{Optimizer, RunConfig};
pub use templates::{render, Templates};
