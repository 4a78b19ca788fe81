use crate::traits::PublishSink;
use crate::types::{AggregatorError, FormattedPost, PostRef, PublishState, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

const PROBE_TIMEOUT_SECS: u64 = 10;
const SUBMIT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct PostResponse {
    id: u64,
    link: String,
}

#[derive(Debug, Deserialize)]
struct TermResponse {
    id: u64,
    name: String,
}

/// WordPress REST API client (`/wp-json/wp/v2`), authenticated with an
/// application password over HTTP Basic auth.
pub struct WordPressClient {
    api_base: String,
    username: String,
    app_password: String,
    client: Client,
}

impl WordPressClient {
    pub fn new(site_url: &str, username: String, app_password: String) -> Result<Self> {
        // Fail early on a malformed site URL instead of on the first request.
        url::Url::parse(site_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(SUBMIT_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            api_base: format!("{}/wp-json/wp/v2", site_url.trim_end_matches('/')),
            username,
            app_password,
            client,
        })
    }

    /// Read `WP_SITE_URL`, `WP_USERNAME` and `WP_APP_PASSWORD` from the
    /// environment.
    pub fn from_env() -> Result<Self> {
        let site_url = require_env("WP_SITE_URL")?;
        let username = require_env("WP_USERNAME")?;
        let app_password = require_env("WP_APP_PASSWORD")?;
        Self::new(&site_url, username, app_password)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }

    /// Look a term up by name. WordPress search is fuzzy, so the result is
    /// re-checked for an exact (case-insensitive) name match.
    async fn find_term(&self, path: &str, name: &str) -> Result<Option<u64>> {
        let terms: Vec<TermResponse> = self
            .client
            .get(self.endpoint(path))
            .basic_auth(&self.username, Some(&self.app_password))
            .query(&[("search", name)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(terms
            .into_iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .map(|t| t.id))
    }

    /// Create a taxonomy term, falling back to a lookup when the sink
    /// reports it already exists.
    async fn create_term(&self, path: &str, body: serde_json::Value, name: &str) -> Result<u64> {
        let response = self
            .client
            .post(self.endpoint(path))
            .basic_auth(&self.username, Some(&self.app_password))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::CREATED {
            let term: TermResponse = response.json().await?;
            debug!("Created term '{}' (id {})", name, term.id);
            return Ok(term.id);
        }

        let text = response.text().await.unwrap_or_default();
        if status == StatusCode::BAD_REQUEST && text.contains("term_exists") {
            if let Some(id) = self.find_term(path, name).await? {
                debug!("Term '{}' already exists (id {})", name, id);
                return Ok(id);
            }
        }

        Err(AggregatorError::Submission {
            status: status.as_u16(),
            message: text,
        })
    }
}

#[async_trait]
impl PublishSink for WordPressClient {
    async fn check_reachable(&self) -> bool {
        let result = self
            .client
            .get(self.endpoint("users/me"))
            .basic_auth(&self.username, Some(&self.app_password))
            .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                info!("WordPress connection ok");
                true
            }
            Ok(response) => {
                warn!("WordPress liveness probe returned HTTP {}", response.status());
                false
            }
            Err(e) => {
                warn!("WordPress unreachable: {}", e);
                false
            }
        }
    }

    async fn ensure_category(&self, name: &str, slug: &str, description: &str) -> Result<u64> {
        self.create_term(
            "categories",
            json!({ "name": name, "slug": slug, "description": description }),
            name,
        )
        .await
    }

    async fn ensure_tag(&self, name: &str) -> Result<u64> {
        self.create_term("tags", json!({ "name": name }), name).await
    }

    async fn create_post(
        &self,
        post: &FormattedPost,
        category_ids: &[u64],
        tag_ids: &[u64],
        state: PublishState,
    ) -> Result<PostRef> {
        let body = json!({
            "title": post.title,
            "content": post.body,
            "excerpt": post.excerpt,
            "status": state.as_status(),
            "categories": category_ids,
            "tags": tag_ids,
        });

        let response = self
            .client
            .post(self.endpoint("posts"))
            .basic_auth(&self.username, Some(&self.app_password))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::CREATED {
            let created: PostResponse = response.json().await?;
            info!("Published post: {}", created.link);
            return Ok(PostRef {
                id: created.id,
                url: created.link,
            });
        }

        let message = response.text().await.unwrap_or_default();
        Err(AggregatorError::Submission {
            status: status.as_u16(),
            message,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| AggregatorError::Config(format!("{} is not set", key)))
}
