use repodeck_common::{Deck, GenerationSettings, Slide, Theme};
use repodeck_groq::{GroqClient, GroqError};
use serde_json::Value;

use crate::config::Config;
use crate::error::GenerateError;
use crate::github::RepositoryRecord;

/// How much of the README makes it into the prompt.
const README_EXCERPT_CHARS: usize = 2000;

const SYSTEM_PROMPT: &str = "You are an expert pitch deck creator. Always respond with valid JSON containing slide data. Be concise, compelling, and investor-focused.";

pub struct SlideGenerator {
    client: GroqClient,
}

impl SlideGenerator {
    pub fn from_config(config: &Config) -> Result<Self, GenerateError> {
        let api_key = config
            .groq_api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(GenerateError::MissingApiKey)?;
        let mut client = GroqClient::new(api_key).with_model(config.model.clone());
        if let Some(url) = &config.groq_api_url {
            client = client.with_base_url(url.clone());
        }
        Ok(Self { client })
    }

    pub fn with_client(client: GroqClient) -> Self {
        Self { client }
    }

    /// Draft a deck from the collected repository data. Credential problems
    /// and rate limiting surface as errors the caller can report; every
    /// other failure (transport, bad status, unusable model output) diverts
    /// to the deterministic fallback deck.
    pub async fn generate(
        &self,
        record: &RepositoryRecord,
        settings: &GenerationSettings,
        theme: Theme,
    ) -> Result<Deck, GenerateError> {
        let prompt = build_prompt(record, settings, theme);

        let content = match self.client.chat_json(SYSTEM_PROMPT, &prompt).await {
            Ok(content) => content,
            Err(err @ (GroqError::Unauthorized | GroqError::RateLimited)) => {
                return Err(err.into())
            }
            Err(err) => {
                tracing::warn!("completion request failed, using fallback deck: {err}");
                return Ok(fallback_deck(record));
            }
        };

        match parse_slides(&content) {
            Ok(deck) => Ok(deck),
            Err(err) => {
                tracing::warn!("failed to parse slides from model response: {err}");
                Ok(fallback_deck(record))
            }
        }
    }
}

pub fn build_prompt(
    record: &RepositoryRecord,
    settings: &GenerationSettings,
    theme: Theme,
) -> String {
    let info = &record.info;
    let name = info["name"].as_str().unwrap_or("Unknown");
    let description = info["description"].as_str().unwrap_or("No description");
    let stars = info["stargazers_count"].as_u64().unwrap_or(0);
    let forks = info["forks_count"].as_u64().unwrap_or(0);
    let language = info["language"].as_str().unwrap_or("Unknown");

    let readme = if record.readme.is_empty() {
        "No README available".to_string()
    } else {
        record.readme.chars().take(README_EXCERPT_CHARS).collect()
    };

    format!(
        r#"You are a world-class pitch deck generator specializing in creating compelling startup presentations. Your goal is to transform GitHub repository data into a professional, investor-ready pitch deck.

REPOSITORY DATA:
- Name: {name}
- Description: {description}
- Stars: {stars}
- Forks: {forks}
- Language: {language}
- README: {readme}
- Contributors: {contributors}
- Recent Activity: {commits} recent commits

SETTINGS:
- Tone: {tone} (adjust technical vs business focus accordingly)
- Include Charts: {include_charts}
- Theme: {theme}

CRITICAL INSTRUCTIONS:
1. Create exactly 5-6 slides and make them LEGIBLE, SIMPLE, and OBVIOUS
2. NO EMOJIS in titles or content - use clean, professional text only
3. Each slide should be immediately understandable at a glance
4. Use powerful, action-oriented language
5. Focus on business value and market opportunity

Required slide structure:
1. Title slide - Project name and one-line value proposition
2. Problem slide - What specific problem does this solve?
3. Solution slide - How does this project solve it uniquely?
4. Market/Traction slide - Evidence of demand and growth
5. Technology slide - Key technical differentiators
6. Next Steps slide - Clear roadmap and ask

Each slide must have:
- A clear, bold title (NO EMOJIS)
- Concise, impactful main text
- 2-4 bullet points maximum
- Professional business language

Generate a JSON response with this exact structure:
{{
  "slides": [
    {{
      "title": "Clean title without emojis",
      "text": "One powerful sentence describing the slide",
      "bullets": ["Concise bullet point", "Another key point", "Maximum 4 bullets"]
    }}
  ]
}}

Return ONLY valid JSON, no other text."#,
        contributors = record.contributors.len(),
        commits = record.commits.len(),
        tone = settings.tone,
        include_charts = settings.include_charts,
    )
}

/// Parse the model's JSON object into a deck, normalizing each entry:
/// missing title becomes `Slide N`, missing text is dropped, non-array
/// bullets become empty. Chart and media fields from the model are not
/// trusted and are ignored.
pub fn parse_slides(content: &str) -> Result<Deck, GenerateError> {
    let parsed: Value = serde_json::from_str(content)
        .map_err(|err| GenerateError::ParseFailure(err.to_string()))?;

    let slides = parsed["slides"]
        .as_array()
        .ok_or_else(|| GenerateError::ParseFailure("missing slides array".to_string()))?;
    if slides.is_empty() {
        return Err(GenerateError::ParseFailure("no slides generated".to_string()));
    }

    Ok(slides
        .iter()
        .enumerate()
        .map(|(index, raw)| normalize_slide(raw, index))
        .collect())
}

fn normalize_slide(raw: &Value, index: usize) -> Slide {
    let title = raw["title"]
        .as_str()
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Slide {}", index + 1));

    let text = raw["text"]
        .as_str()
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    let bullets = raw["bullets"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|b| b.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    Slide {
        title,
        text,
        bullets,
        chart: None,
        media: None,
    }
}

/// Deterministic five-slide deck built straight from the repository record.
/// Pure string interpolation; this path has no failure mode.
pub fn fallback_deck(record: &RepositoryRecord) -> Deck {
    let info = &record.info;
    let name = info["name"].as_str().unwrap_or("GitHub Project");
    let description = info["description"]
        .as_str()
        .unwrap_or("An innovative software project");
    let stars = info["stargazers_count"].as_u64().unwrap_or(0);
    let language = info["language"].as_str().unwrap_or("Unknown");
    let contributors = record.contributors.len();

    vec![
        Slide {
            title: name.to_string(),
            text: Some(description.to_string()),
            bullets: vec![
                "Built with modern technology stack".to_string(),
                "Open source and community-driven".to_string(),
                "Ready for production deployment".to_string(),
            ],
            chart: None,
            media: None,
        },
        Slide {
            title: "The Problem".to_string(),
            text: Some(
                "Addressing critical challenges in the software development ecosystem".to_string(),
            ),
            bullets: vec![
                "Current solutions lack key features".to_string(),
                "Users need more efficient tools".to_string(),
                "Market demand for better alternatives".to_string(),
            ],
            chart: None,
            media: None,
        },
        Slide {
            title: "Our Solution".to_string(),
            text: Some(format!(
                "Leveraging {language} to deliver superior performance and reliability"
            )),
            bullets: vec![
                "Modern, scalable architecture".to_string(),
                "User-centric design approach".to_string(),
                "Proven development methodology".to_string(),
            ],
            chart: None,
            media: None,
        },
        Slide {
            title: "Market Traction".to_string(),
            text: Some("Strong community engagement and growing adoption".to_string()),
            bullets: vec![
                format!("{stars} GitHub stars and growing"),
                format!("{contributors} active contributors"),
                "Continuous development and support".to_string(),
            ],
            chart: None,
            media: None,
        },
        Slide {
            title: "Next Steps".to_string(),
            text: Some("Strategic roadmap for scaling and market expansion".to_string()),
            bullets: vec![
                "Feature enhancement and optimization".to_string(),
                "Community growth initiatives".to_string(),
                "Strategic partnerships and integrations".to_string(),
            ],
            chart: None,
            media: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn record() -> RepositoryRecord {
        RepositoryRecord {
            readme: "# Widget\nMakes widgets fast.".to_string(),
            info: serde_json::json!({
                "name": "widget",
                "description": "A widget factory",
                "stargazers_count": 42,
                "forks_count": 7,
                "language": "Rust"
            }),
            contributors: vec![serde_json::json!({ "login": "a" })],
            commits: vec![serde_json::json!({ "sha": "abc" })],
            issues: Vec::new(),
        }
    }

    #[test]
    fn prompt_embeds_repository_facts_and_settings() {
        let settings = GenerationSettings::default();
        let prompt = build_prompt(&record(), &settings, Theme::Bold);
        assert!(prompt.contains("- Name: widget"));
        assert!(prompt.contains("- Stars: 42"));
        assert!(prompt.contains("- Language: Rust"));
        assert!(prompt.contains("Makes widgets fast."));
        assert!(prompt.contains("- Tone: balanced"));
        assert!(prompt.contains("- Theme: bold"));
        assert!(prompt.contains("- Recent Activity: 1 recent commits"));
    }

    #[test]
    fn prompt_truncates_long_readmes() {
        let mut long = record();
        long.readme = "x".repeat(5000);
        let prompt = build_prompt(&long, &GenerationSettings::default(), Theme::Modern);
        assert!(prompt.contains(&"x".repeat(2000)));
        assert!(!prompt.contains(&"x".repeat(2001)));
    }

    #[test]
    fn normalizes_partial_slides() {
        let deck = parse_slides(
            r#"{"slides":[
                {"text":"no title here"},
                {"title":"Real","bullets":"not an array"},
                {"title":"","bullets":["a","b"]}
            ]}"#,
        )
        .unwrap_or_default();

        assert_eq!(deck.len(), 3);
        assert_eq!(deck[0].title, "Slide 1");
        assert_eq!(deck[0].text.as_deref(), Some("no title here"));
        assert_eq!(deck[1].title, "Real");
        assert!(deck[1].bullets.is_empty());
        assert_eq!(deck[2].title, "Slide 3");
        assert_eq!(deck[2].bullets, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn rejects_missing_or_empty_slides() {
        assert!(parse_slides("not json").is_err());
        assert!(parse_slides(r#"{"answer":42}"#).is_err());
        assert!(parse_slides(r#"{"slides":[]}"#).is_err());
    }

    #[test]
    fn fallback_deck_interpolates_record_fields() {
        let deck = fallback_deck(&record());
        assert_eq!(deck.len(), 5);
        assert!(deck.iter().all(|s| !s.title.is_empty()));
        assert_eq!(deck[0].title, "widget");
        assert_eq!(deck[0].text.as_deref(), Some("A widget factory"));
        assert!(deck[2].text.as_deref().unwrap_or("").contains("Rust"));
        assert!(deck[3].bullets[0].contains("42"));
        assert!(deck[3].bullets[1].contains('1'));
    }

    #[test]
    fn fallback_deck_survives_an_empty_record() {
        let deck = fallback_deck(&RepositoryRecord::default());
        assert_eq!(deck.len(), 5);
        assert_eq!(deck[0].title, "GitHub Project");
        assert!(deck.iter().all(|s| !s.title.is_empty()));
    }

    fn completion_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [ { "message": { "role": "assistant", "content": content } } ]
        })
    }

    #[tokio::test]
    async fn unparsable_content_falls_back_to_record_deck() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body("sorry, I cannot do that")),
            )
            .mount(&server)
            .await;

        let generator =
            SlideGenerator::with_client(GroqClient::new("key").with_base_url(server.uri()));
        let deck = generator
            .generate(&record(), &GenerationSettings::default(), Theme::Modern)
            .await
            .unwrap_or_default();

        assert_eq!(deck.len(), 5);
        assert_eq!(deck[0].title, "widget");
    }

    #[tokio::test]
    async fn generic_upstream_failure_falls_back_to_record_deck() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let generator =
            SlideGenerator::with_client(GroqClient::new("key").with_base_url(server.uri()));
        let deck = generator
            .generate(&record(), &GenerationSettings::default(), Theme::Modern)
            .await
            .unwrap_or_default();

        assert_eq!(deck.len(), 5);
        assert!(deck.iter().all(|s| !s.title.is_empty()));
    }

    #[tokio::test]
    async fn http_401_and_429_surface_as_typed_errors() {
        for (status, is_auth) in [(401, true), (429, false)] {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/chat/completions"))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;

            let generator =
                SlideGenerator::with_client(GroqClient::new("key").with_base_url(server.uri()));
            let result = generator
                .generate(&record(), &GenerationSettings::default(), Theme::Modern)
                .await;

            match result {
                Err(GenerateError::InvalidApiKey) => assert!(is_auth),
                Err(GenerateError::RateLimited) => assert!(!is_auth),
                other => panic!("unexpected result for HTTP {status}: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn well_formed_response_passes_through() {
        let server = MockServer::start().await;
        let slides = r#"{"slides":[{"title":"Widget","text":"t","bullets":["b1"]}]}"#;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(slides)))
            .mount(&server)
            .await;

        let generator =
            SlideGenerator::with_client(GroqClient::new("key").with_base_url(server.uri()));
        let deck = generator
            .generate(&record(), &GenerationSettings::default(), Theme::Modern)
            .await
            .unwrap_or_default();

        assert_eq!(deck.len(), 1);
        assert_eq!(deck[0].title, "Widget");
        assert_eq!(deck[0].bullets, vec!["b1".to_string()]);
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let config = Config::default();
        assert!(matches!(
            SlideGenerator::from_config(&config),
            Err(GenerateError::MissingApiKey)
        ));
    }
}
