use std::env;

pub const MODELS: &[&str] = &[
    "gpt-4o",
    "claude-3-5-sonnet-latest",
    "gemini-2.0-flash",
    "deepseek-chat",
    "qwen2.5",
];

pub const EXAMPLE_TASKS: &[&str] = &[
    "Book a flight to Paris",
    "Find the cheapest hotel near the Eiffel Tower",
    "Compare laptop prices on three different stores",
    "Check the weather forecast in Oslo for the weekend",
];

const LABEL_LIMIT: usize = 30;

/// Note shown under the API key field for the selected model. `None` for an
/// unknown prefix, in which case the caller keeps whatever note it had.
pub fn provider_note(model: &str) -> Option<&'static str> {
    if model.starts_with("gpt") {
        Some("For OpenAI models")
    } else if model.starts_with("claude") {
        Some("For Anthropic models")
    } else if model.starts_with("gemini") {
        Some("For Google models")
    } else if model.starts_with("deepseek") {
        Some("For DeepSeek models")
    } else if model.starts_with("qwen") {
        Some("For local Ollama models")
    } else {
        None
    }
}

pub fn truncate_label(text: &str) -> String {
    if text.chars().count() > LABEL_LIMIT {
        let head: String = text.chars().take(LABEL_LIMIT).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

pub fn parse_on_off(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

pub(crate) fn env_or(key: &str, fallback: String) -> String {
    env_opt(key).unwrap_or(fallback)
}

pub(crate) fn env_opt(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

pub(crate) fn env_u64(key: &str, fallback: u64) -> u64 {
    match env::var(key) {
        Ok(value) => value.trim().parse::<u64>().unwrap_or(fallback),
        Err(_) => fallback,
    }
}
