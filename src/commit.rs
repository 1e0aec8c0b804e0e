use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use tempfile::NamedTempFile;

use crate::config::Config;

const PROMPT: &str = "Write a concise git commit message in imperative mood for the \
following diff. Reply with the commit message only, no surrounding quotes or prose.";

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Ask the configured chat-completions endpoint for a commit message
/// describing `diff`. The blocking HTTP call runs off the event loop so a
/// quit can still unwind promptly.
pub async fn draft_commit_message(config: &Config, diff: String) -> Result<String> {
    let Some(api_key) = config.api_key.clone() else {
        bail!("OPENAI_API_KEY is not set");
    };
    let api_url = config.api_url.clone();
    let model = config.model.clone();

    tokio::task::spawn_blocking(move || request_message(&api_url, &api_key, &model, &diff))
        .await
        .context("Commit drafting task failed")?
}

fn request_message(api_url: &str, api_key: &str, model: &str, diff: &str) -> Result<String> {
    let body = ChatRequest {
        model: model.to_string(),
        messages: vec![ChatMessage {
            role: "user",
            content: format!("{PROMPT}\n\n{diff}"),
        }],
    };

    let mut response = ureq::post(api_url)
        .header("Authorization", format!("Bearer {api_key}"))
        .send_json(&body)
        .context("Commit draft request failed")?;

    let parsed: ChatResponse = response
        .body_mut()
        .read_json()
        .context("Could not parse commit draft response")?;

    let message = parsed
        .choices
        .first()
        .map(|c| c.message.content.trim().to_string())
        .unwrap_or_default();

    if message.is_empty() {
        bail!("The model returned an empty commit message");
    }
    Ok(message)
}

/// Write the drafted message to a temp file for `git commit -eF`. The file
/// must stay alive until the commit command exits.
pub fn write_message_file(message: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("Failed to create commit message file")?;
    writeln!(file, "{message}").context("Failed to write commit message file")?;
    file.flush().context("Failed to flush commit message file")?;
    Ok(file)
}
