//! Advice prompt assembly (`MiniJinja`).

use anyhow::{Context, Result};
use chrono::Utc;
use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

use crate::metrics::{HealthSnapshot, UserContext};

/// System-role content sent with every advice request.
pub const SYSTEM_PROMPT: &str = "你是一个专业的健康顾问，基于用户的健康数据提供个性化的建议。\
建议应该具体、可操作、并考虑到用户的各项健康指标。\
请从运动建议、睡眠建议、饮食建议和今日特别注意事项四个方面来提供建议。";

/// User-role prompt template for advice generation (`MiniJinja`).
pub const ADVICE_PROMPT_TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/prompts/advice_prompt.md"
));

#[derive(Debug, Clone, Serialize)]
struct AdvicePromptVars {
    metric_lines: Vec<String>,
    demographic_lines: Vec<String>,
    description: Option<String>,
    date: String,
}

/// Builds the user-role advice prompt from a metric snapshot and user
/// context. Absent metrics simply contribute no lines; template errors
/// (malformed template, undefined variable) propagate.
pub fn build_advice_prompt(snapshot: &HealthSnapshot, user: &UserContext) -> Result<String> {
    let vars = AdvicePromptVars {
        metric_lines: snapshot.metric_lines(),
        demographic_lines: user.demographic_lines(),
        description: user
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string),
        date: Utc::now().format("%Y-%m-%d").to_string(),
    };
    render_template(ADVICE_PROMPT_TEMPLATE, &vars)
}

fn render_template(template: &str, vars: &AdvicePromptVars) -> Result<String> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_template("advice_prompt", template)
        .context("parse advice prompt template")?;

    let output = env
        .get_template("advice_prompt")
        .context("load advice prompt template")?
        .render(vars)
        .context("render advice prompt")?;

    Ok(output.replace("\r\n", "\n").trim().to_string())
}
