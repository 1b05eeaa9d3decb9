//! OpenRouter client using the Chat Completions API.
//!
//! Both suggestion calls go through the same `chat` helper: a system prompt
//! fixing the output shape plus a user prompt built from classification.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::config::OpenRouterConfig;
use crate::error::LlmError;

use super::{prompts, resolve_env_var};

/// OpenRouter chat completion client.
#[derive(Clone, Debug)]
pub struct OpenRouterClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    referer: String,
    title: String,
    timeout: Duration,
}

impl OpenRouterClient {
    /// Build a client from config, resolving `${ENV_VAR}` in the API key.
    ///
    /// Fails when the key resolves to nothing, so a misconfigured server
    /// refuses to start instead of failing on the first upload.
    pub fn from_config(config: &OpenRouterConfig) -> Result<Self, LlmError> {
        let api_key = resolve_env_var(&config.api_key).ok_or_else(|| LlmError::Request {
            message: "OpenRouter API key not set. Set OPENROUTER_API_KEY env var.".to_string(),
            status_code: None,
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            referer: config.referer.clone(),
            title: config.title.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Generate three outfit suggestions for the detected style.
    ///
    /// `style` is the whole feedback sentence from classification.
    pub async fn outfit_suggestions(&self, style: &str) -> Result<String, LlmError> {
        self.chat(
            prompts::OUTFIT_SYSTEM_PROMPT,
            &prompts::outfit_user_prompt(style),
        )
        .await
    }

    /// Generate three ways to remix the detected garments.
    pub async fn remix_suggestions(&self, outfit_description: &str) -> Result<String, LlmError> {
        self.chat(
            prompts::REMIX_SYSTEM_PROMPT,
            &prompts::remix_user_prompt(outfit_description),
        )
        .await
    }

    async fn chat(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let start = Instant::now();

        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
        };

        let url = format!("{}/chat/completions", self.endpoint);
        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.title)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| LlmError::Request {
                message: format!("Network error during API call: {e}"),
                status_code: None,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(LlmError::Request {
                message: format!("OpenRouter HTTP {status}: {text}"),
                status_code: Some(status.as_u16()),
            });
        }

        let body_text = resp.text().await.map_err(|e| LlmError::Request {
            message: format!("Failed to read OpenRouter response: {e}"),
            status_code: None,
        })?;

        let chat_resp: ChatResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::Request {
                message: format!("Failed to parse OpenRouter response: {e}"),
                status_code: None,
            })?;

        let text = chat_resp
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| LlmError::Request {
                message: format!("Error: No 'choices' found in API response: {body_text}"),
                status_code: None,
            })?;

        tracing::debug!(
            model = %self.model,
            latency_ms = start.elapsed().as_millis() as u64,
            "OpenRouter call complete"
        );

        Ok(text.trim().to_string())
    }
}

// --- Request types ---

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

// --- Response types ---

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(endpoint: &str) -> OpenRouterConfig {
        OpenRouterConfig {
            endpoint: endpoint.to_string(),
            api_key: "sk-test".to_string(),
            timeout_secs: 5,
            ..OpenRouterConfig::default()
        }
    }

    #[tokio::test]
    async fn test_outfit_suggestions_happy_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(header("X-Title", "Outfit Advisor"))
            .and(body_partial_json(json!({
                "model": "deepseek/deepseek-r1:free",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "1. **Casual Chic**\n2. **Weekend Layers**\n3. **City Stroll**"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenRouterClient::from_config(&test_config(&server.uri())).unwrap();
        let text = client
            .outfit_suggestions("This outfit is casual! It also works well for sporty and streetwear.")
            .await
            .unwrap();
        assert!(text.starts_with("1. **Casual Chic**"));
    }

    #[tokio::test]
    async fn test_remix_suggestions_sends_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "messages": [
                    {"role": "system"},
                    {"role": "user", "content": "The user is wearing: The outfit includes a jacket, jeans, and t-shirt.. Suggest 3 ways to remix this outfit."}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "1. **Streetwear Edge**"}}]
            })))
            .mount(&server)
            .await;

        let client = OpenRouterClient::from_config(&test_config(&server.uri())).unwrap();
        let text = client
            .remix_suggestions("The outfit includes a jacket, jeans, and t-shirt.")
            .await
            .unwrap();
        assert_eq!(text, "1. **Streetwear Edge**");
    }

    #[tokio::test]
    async fn test_http_error_carries_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let client = OpenRouterClient::from_config(&test_config(&server.uri())).unwrap();
        let err = client.outfit_suggestions("casual").await.unwrap_err();
        assert_eq!(err.status_code(), Some(500));
        assert!(err.to_string().contains("OpenRouter HTTP 500"));
        assert!(err.to_string().contains("upstream exploded"));
    }

    #[tokio::test]
    async fn test_missing_choices_reports_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"error": "rate limited"})),
            )
            .mount(&server)
            .await;

        let client = OpenRouterClient::from_config(&test_config(&server.uri())).unwrap();
        let err = client.outfit_suggestions("casual").await.unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Error: No 'choices' found in API response:"));
        assert!(message.contains("rate limited"));
    }

    #[tokio::test]
    async fn test_empty_choices_reports_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let client = OpenRouterClient::from_config(&test_config(&server.uri())).unwrap();
        let err = client.outfit_suggestions("casual").await.unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Error: No 'choices' found in API response:"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        // Nothing listens on port 1.
        let client = OpenRouterClient::from_config(&test_config("http://127.0.0.1:1")).unwrap();
        let err = client.outfit_suggestions("casual").await.unwrap_err();
        assert!(err.to_string().starts_with("Network error during API call:"));
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_from_config_requires_resolvable_key() {
        let mut config = test_config("http://localhost");
        config.api_key = "${FITCHECK_TEST_KEY_THAT_IS_NEVER_SET}".to_string();
        let err = OpenRouterClient::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("OPENROUTER_API_KEY"));
    }
}
