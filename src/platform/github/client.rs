use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::GitHubConfig;
use crate::error::{AppError, Result};
use crate::platform::types::*;
use crate::platform::Platform;

use super::mapper::{self, ApiPullRequest, ApiRepository, ApiReview};

const MEDIA_TYPE: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("review-digest/", env!("CARGO_PKG_VERSION"));

/// GitHub REST client authenticated with a personal access token.
pub struct GitHubPlatform {
    client: Client,
    token: String,
    base_url: String,
}

impl GitHubPlatform {
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            token: config.token.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET a JSON document. Anything other than `200 OK` is an error.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header(ACCEPT, MEDIA_TYPE)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::GitHubApi(format!(
                "GET {path} returned {status}: {}",
                truncate(&body, 200)
            )));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn segment(s: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(s)
}

#[async_trait]
impl Platform for GitHubPlatform {
    async fn list_org_repos_page(
        &self,
        org: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Repository>> {
        let path = format!("/orgs/{}/repos", segment(org));
        let repos: Vec<ApiRepository> = self
            .get_json(
                &path,
                &[("per_page", per_page.to_string()), ("page", page.to_string())],
            )
            .await?;

        Ok(repos.into_iter().map(mapper::map_repository).collect())
    }

    async fn list_recent_pull_requests(
        &self,
        org: &str,
        repo: &str,
        per_page: u32,
    ) -> Result<Vec<PullRequest>> {
        let path = format!("/repos/{}/{}/pulls", segment(org), segment(repo));
        let pulls: Vec<ApiPullRequest> = self
            .get_json(
                &path,
                &[
                    ("state", "all".to_string()),
                    ("sort", "created".to_string()),
                    ("direction", "desc".to_string()),
                    ("per_page", per_page.to_string()),
                ],
            )
            .await?;

        Ok(pulls.into_iter().map(mapper::map_pull_request).collect())
    }

    async fn list_reviews(&self, org: &str, repo: &str, pr_number: u64) -> Result<Vec<Review>> {
        let path = format!(
            "/repos/{}/{}/pulls/{pr_number}/reviews",
            segment(org),
            segment(repo)
        );
        let reviews: Vec<ApiReview> = self.get_json(&path, &[]).await?;

        Ok(reviews.into_iter().map(mapper::map_review).collect())
    }
}
