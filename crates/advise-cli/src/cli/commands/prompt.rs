//! Prompt command handler.

use std::fs;
use std::path::Path;

use advise_core::completion::CompletionRequest;
use advise_core::config::Config;
use advise_core::metrics::{HealthSnapshot, UserContext};
use advise_core::prompt::build_advice_prompt;
use anyhow::{Context, Result};

pub fn run(
    metrics: &Path,
    age: Option<u32>,
    gender: Option<String>,
    describe: Option<String>,
    request: bool,
) -> Result<()> {
    let contents =
        fs::read_to_string(metrics).with_context(|| format!("read {}", metrics.display()))?;
    let snapshot: HealthSnapshot = serde_json::from_str(&contents)
        .with_context(|| format!("parse metrics from {}", metrics.display()))?;
    let user = UserContext {
        age,
        gender,
        description: describe,
    };

    if snapshot.is_empty() {
        tracing::warn!("no health metrics in {}", metrics.display());
    }

    let prompt = build_advice_prompt(&snapshot, &user)?;

    if request {
        let config = Config::load()?;
        let profile = config.active_profile()?;
        profile.ensure_configured()?;
        let body = CompletionRequest::new(profile, &prompt);
        let rendered = serde_json::to_string_pretty(&body).context("serialize request body")?;
        println!("{rendered}");
    } else {
        println!("{prompt}");
    }
    Ok(())
}
