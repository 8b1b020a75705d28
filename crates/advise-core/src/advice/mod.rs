//! Structured advice extraction from model-generated markdown.
//!
//! The completion endpoint is asked to answer with `###`-headed sections,
//! one advice statement per line, and a bolded "参考文献:" block of
//! `[N][text](url)` citation lines per section. This module turns that text
//! back into typed sections. Parsing is best-effort: lines that match no
//! recognized shape degrade to body text, never to an error.

mod parser;
mod types;

pub use parser::parse_advice;
pub use types::{AdviceSection, AdviceStatement, Reference};
