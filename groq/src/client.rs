use serde::Deserialize;
use thiserror::Error;

/// Groq's OpenAI-compatible API root.
const GROQ_API_URL: &str = "https://api.groq.com/openai/v1";

pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

const DEFAULT_MAX_TOKENS: u32 = 2048;
const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Error, Debug)]
pub enum GroqError {
    #[error("invalid Groq API key")]
    Unauthorized,

    #[error("rate limit exceeded; wait a moment and try again")]
    RateLimited,

    #[error("Groq API error: HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

/// Minimal chat-completions client: one system+user exchange per call,
/// response constrained to a JSON object.
pub struct GroqClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl GroqClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: GROQ_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Point the client at a different OpenAI-compatible API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Send one completion request and return the raw message content of the
    /// first choice. HTTP 401 and 429 map to their own variants so callers
    /// can report them distinctly.
    pub async fn chat_json(&self, system: &str, user: &str) -> Result<String, GroqError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "response_format": { "type": "json_object" },
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("completion request failed: HTTP {status}: {body}");
            return Err(match status.as_u16() {
                401 => GroqError::Unauthorized,
                429 => GroqError::RateLimited,
                code => GroqError::Http { status: code, body },
            });
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|err| GroqError::MalformedResponse(err.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GroqError::MalformedResponse("no choices in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GroqClient {
        GroqClient::new("test-key").with_base_url(server.uri())
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": DEFAULT_MODEL,
                "response_format": { "type": "json_object" },
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "{\"slides\":[]}" } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let content = client_for(&server)
            .chat_json("system", "user")
            .await
            .unwrap_or_default();
        assert_eq!(content, "{\"slides\":[]}");
    }

    #[tokio::test]
    async fn maps_unauthorized_and_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).chat_json("s", "u").await;
        assert!(matches!(err, Err(GroqError::Unauthorized)));

        server.reset().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).chat_json("s", "u").await;
        assert!(matches!(err, Err(GroqError::RateLimited)));
    }

    #[tokio::test]
    async fn empty_choices_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).chat_json("s", "u").await;
        assert!(matches!(err, Err(GroqError::MalformedResponse(_))));
    }
}
