use repodeck_groq::GroqError;
use thiserror::Error;

/// Failures from the repository data collector. Only the repo-info lookup is
/// fatal; the other lookups degrade their field to empty.
#[derive(Error, Debug)]
pub enum CollectError {
    #[error("invalid GitHub repository URL '{0}'; use the format https://github.com/owner/repo")]
    InvalidUrl(String),

    #[error("GitHub API token not configured; set GITHUB_TOKEN in the environment")]
    MissingToken,

    #[error("repository not found; check the URL and make sure the repository is public")]
    RepositoryNotFound,

    #[error("access denied; the repository might be private or the token has insufficient permissions")]
    AccessDenied,

    #[error("failed to fetch repository data: {0}")]
    UpstreamUnavailable(String),
}

/// Failures from the slide generator. Parse-level problems are absorbed into
/// the fallback deck and never reach callers; the variants here cover the
/// transport and credential failures that the wizard reports to the user.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Groq API key not configured; set GROQ_API_KEY in the environment")]
    MissingApiKey,

    #[error("invalid Groq API key; check GROQ_API_KEY")]
    InvalidApiKey,

    #[error("rate limit exceeded; wait a moment and try again")]
    RateLimited,

    #[error("slide generation failed: {0}")]
    Upstream(String),

    #[error("could not parse slides from the model response: {0}")]
    ParseFailure(String),
}

impl From<GroqError> for GenerateError {
    fn from(err: GroqError) -> Self {
        match err {
            GroqError::Unauthorized => GenerateError::InvalidApiKey,
            GroqError::RateLimited => GenerateError::RateLimited,
            GroqError::MalformedResponse(msg) => GenerateError::ParseFailure(msg),
            GroqError::Http { status, body } => {
                GenerateError::Upstream(format!("HTTP {status}: {body}"))
            }
            GroqError::Transport(err) => GenerateError::Upstream(err.to_string()),
        }
    }
}
