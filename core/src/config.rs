use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub github_token: Option<String>,
    pub groq_api_key: Option<String>,
    pub model: String,
    /// Override for the GitHub API root (GitHub Enterprise, tests).
    pub github_api_url: Option<String>,
    /// Override for the completion API root (any OpenAI-compatible server).
    pub groq_api_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            groq_api_key: None,
            model: repodeck_groq::DEFAULT_MODEL.to_string(),
            github_api_url: None,
            groq_api_url: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            if !token.is_empty() {
                config.github_token = Some(token);
            }
        }

        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            if !key.is_empty() {
                config.groq_api_key = Some(key);
            }
        }

        if let Ok(model) = std::env::var("REPODECK_MODEL") {
            if !model.is_empty() {
                config.model = model;
            }
        }

        if let Ok(url) = std::env::var("GITHUB_API_URL") {
            if !url.is_empty() {
                config.github_api_url = Some(url);
            }
        }

        if let Ok(url) = std::env::var("GROQ_API_URL") {
            if !url.is_empty() {
                config.groq_api_url = Some(url);
            }
        }

        config
    }
}
