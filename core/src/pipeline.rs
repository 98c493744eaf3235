use tokio::sync::mpsc;

use repodeck_common::{Deck, GenerationSettings, Theme};

use crate::assemble;
use crate::config::Config;
use crate::demo;
use crate::error::{CollectError, GenerateError};
use crate::generate::SlideGenerator;
use crate::github::{GithubCollector, RepositoryRecord};

/// Progress reports from the background generation task. Exactly one
/// terminal event (`Completed` or `Failed`) is sent per run, and both carry
/// a fully assembled, viewable deck.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    Status(String),
    Completed { deck: Deck },
    Failed { message: String, deck: Deck },
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub repo_url: String,
    pub settings: GenerationSettings,
    pub theme: Theme,
}

/// Run collect -> generate -> assemble on a background task, reporting over
/// the returned channel. The two network stages are strictly sequential;
/// there is no cancellation once the task starts.
pub fn spawn(config: Config, request: GenerationRequest) -> mpsc::Receiver<PipelineEvent> {
    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(async move {
        let terminal = run(&config, request, &tx).await;
        let _ = tx.send(terminal).await;
    });
    rx
}

async fn run(
    config: &Config,
    request: GenerationRequest,
    tx: &mpsc::Sender<PipelineEvent>,
) -> PipelineEvent {
    let GenerationRequest {
        repo_url,
        settings,
        theme,
    } = request;

    status(tx, "Analyzing your GitHub repository...").await;
    let record = match collect(config, &repo_url).await {
        Ok(record) => record,
        Err(err) => return failed(err.to_string(), &settings, theme),
    };

    status(tx, "Extracting project insights...").await;
    status(tx, "Generating slides with AI...").await;
    let deck = match generate(config, &record, &settings, theme).await {
        Ok(deck) => deck,
        Err(err) => return failed(err.to_string(), &settings, theme),
    };

    status(tx, "Adding finishing touches...").await;
    PipelineEvent::Completed {
        deck: assemble::assemble(&deck, &settings, theme),
    }
}

async fn collect(config: &Config, repo_url: &str) -> Result<RepositoryRecord, CollectError> {
    GithubCollector::from_config(config)?.collect(repo_url).await
}

async fn generate(
    config: &Config,
    record: &RepositoryRecord,
    settings: &GenerationSettings,
    theme: Theme,
) -> Result<Deck, GenerateError> {
    SlideGenerator::from_config(config)?
        .generate(record, settings, theme)
        .await
}

async fn status(tx: &mpsc::Sender<PipelineEvent>, message: &str) {
    let _ = tx.send(PipelineEvent::Status(message.to_string())).await;
}

/// Every failure lands the user on a viewable deck: the demo deck with the
/// user's custom slides assembled onto it, plus an explanatory message.
fn failed(message: String, settings: &GenerationSettings, theme: Theme) -> PipelineEvent {
    tracing::warn!("generation pipeline failed: {message}");
    PipelineEvent::Failed {
        message: format!("{message}. Don't worry - we've prepared a demo deck for you to explore!"),
        deck: assemble::assemble(&demo::demo_deck(), settings, theme),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(github: &MockServer, groq: &MockServer) -> Config {
        Config {
            github_token: Some("gh-token".to_string()),
            groq_api_key: Some("groq-key".to_string()),
            github_api_url: Some(github.uri()),
            groq_api_url: Some(groq.uri()),
            ..Config::default()
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            repo_url: "https://github.com/acme/widget".to_string(),
            settings: GenerationSettings::default(),
            theme: Theme::Modern,
        }
    }

    async fn drain(mut rx: mpsc::Receiver<PipelineEvent>) -> (Vec<String>, PipelineEvent) {
        let mut statuses = Vec::new();
        while let Some(event) = rx.recv().await {
            match event {
                PipelineEvent::Status(s) => statuses.push(s),
                terminal => return (statuses, terminal),
            }
        }
        panic!("pipeline ended without a terminal event");
    }

    #[tokio::test]
    async fn happy_path_ends_with_an_assembled_deck() {
        let github = MockServer::start().await;
        let groq = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/acme/widget"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "widget", "stargazers_count": 3
            })))
            .mount(&github)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "content":
                    "{\"slides\":[{\"title\":\"Widget\"},{\"title\":\"Problem\"}]}" } }]
            })))
            .mount(&groq)
            .await;

        let mut req = request();
        req.settings.media_embed_url = Some("https://youtu.be/abc".to_string());
        let rx = spawn(config_for(&github, &groq), req);
        let (statuses, terminal) = drain(rx).await;

        assert!(statuses
            .iter()
            .any(|s| s.contains("Analyzing your GitHub repository")));
        assert!(statuses.iter().any(|s| s.contains("Generating slides")));

        match terminal {
            PipelineEvent::Completed { deck } => {
                // Two generated slides plus the media slide clamped to the end.
                assert_eq!(deck.len(), 3);
                assert_eq!(deck[2].title, "Demo in Action");
            }
            other => panic!("expected Completed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn repository_not_found_still_produces_a_deck() {
        let github = MockServer::start().await;
        let groq = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/widget"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&github)
            .await;

        let (_, terminal) = drain(spawn(config_for(&github, &groq), request())).await;
        match terminal {
            PipelineEvent::Failed { message, deck } => {
                assert!(message.contains("repository not found"));
                assert!(message.contains("demo deck"));
                assert_eq!(deck.len(), 5);
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rate_limited_generation_falls_back_to_demo_deck() {
        let github = MockServer::start().await;
        let groq = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/widget"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "name": "widget" })),
            )
            .mount(&github)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&groq)
            .await;

        let (_, terminal) = drain(spawn(config_for(&github, &groq), request())).await;
        match terminal {
            PipelineEvent::Failed { message, deck } => {
                assert!(message.contains("rate limit"));
                assert!(deck.len() >= 5);
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_credentials_fail_without_network() {
        let github = MockServer::start().await;
        let groq = MockServer::start().await;
        let mut config = config_for(&github, &groq);
        config.github_token = None;

        let (_, terminal) = drain(spawn(config, request())).await;
        match terminal {
            PipelineEvent::Failed { message, deck } => {
                assert!(message.contains("GITHUB_TOKEN"));
                assert_eq!(deck.len(), 5);
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
