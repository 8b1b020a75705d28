//! Chat-completions wire types.
//!
//! The HTTP transport is owned by the caller; this module only builds the
//! request body for an endpoint profile and decodes the assistant content
//! out of a response body.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::config::EndpointProfile;
use crate::prompt::SYSTEM_PROMPT;

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// One chat message on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

/// Request body for a (non-streaming) completions call.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
}

impl CompletionRequest {
    /// Builds the two-message (system + user) advice request for a profile.
    pub fn new(profile: &EndpointProfile, prompt: &str) -> Self {
        Self {
            model: profile.model.clone(),
            messages: vec![Message::system(SYSTEM_PROMPT), Message::user(prompt)],
            temperature: profile.temperature,
            max_tokens: profile.max_tokens,
            top_p: profile.top_p,
            presence_penalty: profile.presence_penalty,
            frequency_penalty: profile.frequency_penalty,
        }
    }
}

/// The completions URL for a profile's base URL.
pub fn endpoint_url(profile: &EndpointProfile) -> String {
    format!(
        "{}{}",
        profile.base_url.as_str().trim_end_matches('/'),
        CHAT_COMPLETIONS_PATH
    )
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Extracts the assistant content (`choices[0].message.content`) from a
/// completions response body.
pub fn extract_content(body: &str) -> Result<String> {
    let response: CompletionResponse =
        serde_json::from_str(body).context("decode completion response")?;
    let Some(choice) = response.choices.into_iter().next() else {
        bail!("completion response has no choices");
    };
    Ok(choice.message.content)
}
