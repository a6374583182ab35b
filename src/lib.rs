// Quill - streaming two-agent prompt optimizer
// Library exports

// Core modules
pub mod config;
pub mod optimizer;
pub mod providers;
pub mod server;
