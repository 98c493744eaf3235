use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::error::CollectError;

const GITHUB_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = "repodeck";
const ACCEPT: &str = "application/vnd.github.v3+json";

/// How many contributors/commits/issues to pull per repository.
const PER_PAGE: usize = 5;

/// Consolidated repository data handed to the slide generator. `info` is the
/// provider's repository object, passed through opaquely; the other fields
/// degrade independently to empty on partial failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryRecord {
    #[serde(default)]
    pub readme: String,
    #[serde(rename = "repoInfo", default)]
    pub info: Value,
    #[serde(default)]
    pub contributors: Vec<Value>,
    #[serde(default)]
    pub commits: Vec<Value>,
    #[serde(default)]
    pub issues: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

/// Extract `owner/name` from a repository URL. The name is terminated by the
/// end of the string, `/`, `?`, or `#`.
pub fn parse_repo_url(url: &str) -> Result<RepoRef, CollectError> {
    let invalid = || CollectError::InvalidUrl(url.to_string());

    let (_, rest) = url.split_once("github.com/").ok_or_else(invalid)?;
    let (owner, rest) = rest.split_once('/').ok_or_else(invalid)?;
    let name = rest.split(['/', '?', '#']).next().unwrap_or("");

    if owner.is_empty() || name.is_empty() {
        return Err(invalid());
    }

    Ok(RepoRef {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}

pub struct GithubCollector {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl GithubCollector {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.into(),
            base_url: GITHUB_API_URL.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, CollectError> {
        let token = config
            .github_token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or(CollectError::MissingToken)?;
        let mut collector = Self::new(token);
        if let Some(url) = &config.github_api_url {
            collector = collector.with_base_url(url.clone());
        }
        Ok(collector)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch everything we know about a repository. The five lookups are
    /// issued together and settled independently; only the repo-info lookup
    /// is fatal.
    pub async fn collect(&self, repo_url: &str) -> Result<RepositoryRecord, CollectError> {
        let RepoRef { owner, name } = parse_repo_url(repo_url)?;

        let contributors_query = format!("per_page={PER_PAGE}");
        let commits_query = format!("per_page={PER_PAGE}");
        let issues_query = format!("state=open&per_page={PER_PAGE}");
        let (info, readme, contributors, commits, issues) = tokio::join!(
            self.fetch_info(&owner, &name),
            self.fetch_readme(&owner, &name),
            self.fetch_list(&owner, &name, "contributors", &contributors_query),
            self.fetch_list(&owner, &name, "commits", &commits_query),
            self.fetch_list(&owner, &name, "issues", &issues_query),
        );

        let info = info?;

        Ok(RepositoryRecord {
            readme: readme.unwrap_or_else(|err| {
                tracing::warn!("readme lookup degraded to empty: {err}");
                String::new()
            }),
            info,
            contributors: degraded("contributors", contributors),
            commits: degraded("commits", commits),
            issues: degraded("issues", issues),
        })
    }

    async fn fetch_info(&self, owner: &str, name: &str) -> Result<Value, CollectError> {
        let response = self
            .get(&format!("{}/repos/{owner}/{name}", self.base_url))
            .await
            .map_err(|err| CollectError::UpstreamUnavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status.as_u16() {
                404 => CollectError::RepositoryNotFound,
                403 => CollectError::AccessDenied,
                code => CollectError::UpstreamUnavailable(format!("HTTP {code}")),
            });
        }

        response
            .json()
            .await
            .map_err(|err| CollectError::UpstreamUnavailable(err.to_string()))
    }

    async fn fetch_readme(&self, owner: &str, name: &str) -> Result<String, CollectError> {
        let response = self
            .get(&format!("{}/repos/{owner}/{name}/readme", self.base_url))
            .await
            .map_err(|err| CollectError::UpstreamUnavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollectError::UpstreamUnavailable(format!("HTTP {status}")));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| CollectError::UpstreamUnavailable(err.to_string()))?;

        let Some(content) = body["content"].as_str() else {
            return Ok(String::new());
        };

        // GitHub wraps the base64 payload across lines.
        let compact: String = content.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        match B64.decode(compact).map(String::from_utf8) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(err)) => {
                tracing::warn!("readme is not valid UTF-8: {err}");
                Ok(String::new())
            }
            Err(err) => {
                tracing::warn!("failed to decode readme content: {err}");
                Ok(String::new())
            }
        }
    }

    async fn fetch_list(
        &self,
        owner: &str,
        name: &str,
        resource: &str,
        query: &str,
    ) -> Result<Vec<Value>, CollectError> {
        let url = format!("{}/repos/{owner}/{name}/{resource}?{query}", self.base_url);
        let response = self
            .get(&url)
            .await
            .map_err(|err| CollectError::UpstreamUnavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollectError::UpstreamUnavailable(format!("HTTP {status}")));
        }

        response
            .json()
            .await
            .map_err(|err| CollectError::UpstreamUnavailable(err.to_string()))
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, reqwest::Error> {
        self.http
            .get(url)
            .bearer_auth(&self.token)
            .header("User-Agent", USER_AGENT)
            .header("Accept", ACCEPT)
            .send()
            .await
    }
}

fn degraded(field: &str, result: Result<Vec<Value>, CollectError>) -> Vec<Value> {
    result.unwrap_or_else(|err| {
        tracing::warn!("{field} lookup degraded to empty: {err}");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn parses_plain_and_decorated_urls() {
        let cases = [
            "https://github.com/acme/widget",
            "https://github.com/acme/widget/",
            "https://github.com/acme/widget?tab=readme",
            "https://github.com/acme/widget#usage",
            "https://github.com/acme/widget/tree/main/src",
        ];
        for url in cases {
            let repo = parse_repo_url(url).unwrap_or(RepoRef {
                owner: String::new(),
                name: String::new(),
            });
            assert_eq!(repo.owner, "acme", "{url}");
            assert_eq!(repo.name, "widget", "{url}");
        }
    }

    #[test]
    fn rejects_urls_without_owner_and_name() {
        for url in [
            "https://example.com/acme/widget",
            "https://github.com/acme",
            "https://github.com/acme/",
            "not a url",
        ] {
            assert!(
                matches!(parse_repo_url(url), Err(CollectError::InvalidUrl(_))),
                "{url}"
            );
        }
    }

    fn repo_info() -> Value {
        serde_json::json!({
            "name": "widget",
            "description": "A widget factory",
            "stargazers_count": 42,
            "forks_count": 7,
            "language": "Rust"
        })
    }

    async fn mount_info(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/repos/acme/widget"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_info()))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn collects_all_five_lookups() {
        let server = MockServer::start().await;
        mount_info(&server).await;

        // GitHub returns readme base64 wrapped across lines.
        let encoded = B64.encode("# Widget\nMakes widgets.");
        let wrapped = format!("{}\n{}", &encoded[..8], &encoded[8..]);
        Mock::given(method("GET"))
            .and(path("/repos/acme/widget/readme"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "content": wrapped })),
            )
            .mount(&server)
            .await;

        for resource in ["contributors", "commits"] {
            Mock::given(method("GET"))
                .and(path(format!("/repos/acme/widget/{resource}")))
                .and(query_param("per_page", "5"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(serde_json::json!([{ "id": 1 }, { "id": 2 }])),
                )
                .mount(&server)
                .await;
        }
        Mock::given(method("GET"))
            .and(path("/repos/acme/widget/issues"))
            .and(query_param("state", "open"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let collector = GithubCollector::new("token").with_base_url(server.uri());
        let record = collector
            .collect("https://github.com/acme/widget")
            .await
            .unwrap_or_default();

        assert_eq!(record.readme, "# Widget\nMakes widgets.");
        assert_eq!(record.info["name"], "widget");
        assert_eq!(record.contributors.len(), 2);
        assert_eq!(record.commits.len(), 2);
        assert!(record.issues.is_empty());
    }

    #[tokio::test]
    async fn info_status_maps_to_typed_errors() {
        for (status, expect_not_found, expect_denied) in
            [(404, true, false), (403, false, true), (500, false, false)]
        {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/repos/acme/widget"))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;

            let collector = GithubCollector::new("token").with_base_url(server.uri());
            let err = collector.collect("https://github.com/acme/widget").await;
            match err {
                Err(CollectError::RepositoryNotFound) => assert!(expect_not_found),
                Err(CollectError::AccessDenied) => assert!(expect_denied),
                Err(CollectError::UpstreamUnavailable(_)) => {
                    assert!(!expect_not_found && !expect_denied)
                }
                other => panic!("unexpected result for HTTP {status}: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn optional_lookups_degrade_independently() {
        let server = MockServer::start().await;
        mount_info(&server).await;
        // Everything except repo info fails; the record still comes back.
        let collector = GithubCollector::new("token").with_base_url(server.uri());
        let record = collector
            .collect("https://github.com/acme/widget")
            .await
            .unwrap_or_default();

        assert_eq!(record.info["stargazers_count"], 42);
        assert_eq!(record.readme, "");
        assert!(record.contributors.is_empty());
        assert!(record.commits.is_empty());
        assert!(record.issues.is_empty());
    }

    #[tokio::test]
    async fn undecodable_readme_degrades_to_empty() {
        let server = MockServer::start().await;
        mount_info(&server).await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/widget/readme"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "content": "!!! not base64 !!!" })),
            )
            .mount(&server)
            .await;

        let collector = GithubCollector::new("token").with_base_url(server.uri());
        let record = collector
            .collect("https://github.com/acme/widget")
            .await
            .unwrap_or_default();
        assert_eq!(record.readme, "");
        assert_eq!(record.info["name"], "widget");
    }

    #[test]
    fn missing_token_is_a_config_error() {
        let config = Config::default();
        assert!(matches!(
            GithubCollector::from_config(&config),
            Err(CollectError::MissingToken)
        ));
    }
}
