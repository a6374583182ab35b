// Configuration module
// Environment-backed settings for the quill server

pub mod constants;
mod settings;

pub use settings::{load_settings, Settings};
