//! LLM integration for styling suggestions.
//!
//! Provides the OpenRouter chat completion client and the fixed prompts used
//! by the two suggestion calls (outfit recommendations and outfit remixing).

pub(crate) mod openrouter;
pub(crate) mod prompts;

pub use openrouter::OpenRouterClient;

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok()
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
