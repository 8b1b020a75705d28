//! Core advise library (advice parsing, prompt assembly, config).

pub mod advice;
pub mod completion;
pub mod config;
pub mod metrics;
pub mod prompt;
