use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::ui::Language;

/// Client for the auto-post backend.
///
/// All four operations of the application go through this client: OAuth
/// login start, OAuth callback exchange, draft generation and publishing.
/// The backend tracks the session through cookies, so the client keeps a
/// cookie store for the lifetime of the process (the browser's cookie jar
/// in the original web client).
pub struct ApiClient {
    http: Client,
    base_url: String,
}

/// Response of the OAuth login start endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginStart {
    /// URL of the provider's consent page. The backend may legitimately
    /// respond `200 {}` when it could not build one.
    pub authorization_url: Option<String>,
}

/// An AI-generated post draft and the commit it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TweetDraft {
    pub tweet_text: String,
    pub commit_message: String,
    pub repository: String,
}

/// Outcome of publishing a post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PublishResult {
    pub success: bool,
    pub tweet_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct CallbackRequest<'a> {
    code: &'a str,
    state: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerateTweetRequest<'a> {
    repository: &'a str,
    language: Language,
}

#[derive(Debug, Serialize)]
struct PostTweetRequest<'a> {
    tweet_text: &'a str,
}

impl ApiClient {
    /// Create a client bound to the configured backend origin.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config.api_base_url.clone())
    }

    /// Create a client against an explicit origin (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// The origin this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Raw-response form: a single attempt, returned unconditionally.
    ///
    /// Status inspection is left to the caller. No retries, no timeout.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response> {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let mut request = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        request
            .send()
            .await
            .with_context(|| format!("{method} {url} failed"))
    }

    /// JSON-decoding form: unwrap a JSON response into `T` or an error.
    ///
    /// On a non-success status the error body is parsed best-effort for a
    /// `detail` string; a missing or malformed body degrades to a generic
    /// message embedding the status code.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let response = self.request(method, path, body).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("API error on {}: status {}", path, status.as_u16());
            match extract_detail(&body) {
                Some(detail) => anyhow::bail!("{detail}"),
                None => anyhow::bail!("API request failed with status {}", status.as_u16()),
            }
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse response from {path}"))
    }

    /// Ask the backend to start the OAuth flow.
    pub async fn begin_login(&self) -> Result<LoginStart> {
        self.request_json(Method::GET, "/api/auth/twitter/login", None)
            .await
    }

    /// Exchange the OAuth `code` and `state` for a backend session.
    ///
    /// The success body is opaque to this client; only the status matters.
    pub async fn complete_callback(&self, code: &str, state: &str) -> Result<serde_json::Value> {
        let body = serde_json::to_value(CallbackRequest { code, state })?;
        self.request_json(Method::POST, "/api/auth/twitter/callback", Some(body))
            .await
    }

    /// Generate a post draft from the repository's latest commit.
    pub async fn generate_tweet(&self, repository: &str, language: Language) -> Result<TweetDraft> {
        let body = serde_json::to_value(GenerateTweetRequest {
            repository,
            language,
        })?;
        self.request_json(Method::POST, "/api/generate_tweet", Some(body))
            .await
    }

    /// Publish the (possibly edited) post text.
    pub async fn post_tweet(&self, tweet_text: &str) -> Result<PublishResult> {
        let body = serde_json::to_value(PostTweetRequest { tweet_text })?;
        self.request_json(Method::POST, "/api/post_tweet", Some(body))
            .await
    }
}

/// Pull the human-readable `detail` string out of an error body, if any.
///
/// The backend contract is `{"detail": "..."}` or nothing; anything else is
/// treated as no detail.
fn extract_detail(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("detail")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = ApiClient::with_base_url("http://localhost:8000/").unwrap();
        assert_eq!(
            client.url("/api/post_tweet"),
            "http://localhost:8000/api/post_tweet"
        );
        assert_eq!(
            client.url("api/post_tweet"),
            "http://localhost:8000/api/post_tweet"
        );
    }

    #[test]
    fn test_extract_detail_present() {
        assert_eq!(
            extract_detail(r#"{"detail": "Session expired"}"#),
            Some("Session expired".to_string())
        );
    }

    #[test]
    fn test_extract_detail_missing_or_malformed() {
        assert_eq!(extract_detail(r#"{"error": "nope"}"#), None);
        assert_eq!(extract_detail("not json at all"), None);
        assert_eq!(extract_detail(""), None);
        // A non-string detail is ignored rather than stringified.
        assert_eq!(extract_detail(r#"{"detail": {"code": 3}}"#), None);
    }

    #[test]
    fn test_request_bodies_match_wire_format() {
        let body = serde_json::to_value(GenerateTweetRequest {
            repository: "octocat/Hello-World",
            language: Language::En,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"repository": "octocat/Hello-World", "language": "en"})
        );

        let body = serde_json::to_value(PostTweetRequest {
            tweet_text: "Fixed the bug",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"tweet_text": "Fixed the bug"}));
    }
}
