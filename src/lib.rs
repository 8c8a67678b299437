//! Issueboard - generate a static HTML page from a repository's open issues

pub mod commands;
pub mod config;
pub mod error;
pub mod github;
pub mod preview;
pub mod relations;
pub mod render;
pub mod telemetry;
pub mod template;
