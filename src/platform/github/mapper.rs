use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::platform::types::{self, PrState};

// Wire shapes of the v3 REST payloads. Only the fields the digest reads are
// declared; serde ignores the rest.

#[derive(Debug, Deserialize)]
pub struct ApiRepository {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiUser {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiPullRequest {
    pub number: u64,
    #[serde(default)]
    pub title: Option<String>,
    /// `null` for accounts that have since been deleted.
    #[serde(default)]
    pub user: Option<ApiUser>,
    pub state: PrState,
    pub created_at: DateTime<Utc>,
    pub html_url: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiReview {
    #[serde(default)]
    pub user: Option<ApiUser>,
    #[serde(default)]
    pub body: Option<String>,
}

const GHOST_LOGIN: &str = "ghost";

pub fn map_repository(repo: ApiRepository) -> types::Repository {
    types::Repository { name: repo.name }
}

pub fn map_pull_request(pr: ApiPullRequest) -> types::PullRequest {
    types::PullRequest {
        number: pr.number,
        title: pr.title.unwrap_or_default(),
        author: pr
            .user
            .map(|u| u.login)
            .unwrap_or_else(|| GHOST_LOGIN.to_string()),
        created_at: pr.created_at,
        state: pr.state,
        url: pr.html_url,
    }
}

pub fn map_review(review: ApiReview) -> types::Review {
    types::Review {
        author: review
            .user
            .map(|u| u.login)
            .unwrap_or_else(|| GHOST_LOGIN.to_string()),
        body: review.body.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_pull_request() {
        let json = serde_json::json!({
            "number": 42,
            "title": "Fix auth bug",
            "user": { "login": "alice", "id": 1 },
            "state": "open",
            "created_at": "2025-06-23T10:00:00Z",
            "html_url": "https://github.com/acme/api/pull/42",
            "draft": false
        });
        let api: ApiPullRequest = serde_json::from_value(json).unwrap();
        let pr = map_pull_request(api);

        assert_eq!(pr.number, 42);
        assert_eq!(pr.title, "Fix auth bug");
        assert_eq!(pr.author, "alice");
        assert_eq!(pr.state, PrState::Open);
        assert_eq!(pr.created_at.to_rfc3339(), "2025-06-23T10:00:00+00:00");
    }

    #[test]
    fn test_map_review_with_deleted_user_and_null_body() {
        let json = serde_json::json!({ "id": 7, "user": null, "body": null, "state": "COMMENTED" });
        let api: ApiReview = serde_json::from_value(json).unwrap();
        let review = map_review(api);

        assert_eq!(review.author, "ghost");
        assert_eq!(review.body, "");
    }

    #[test]
    fn test_unknown_state_is_rejected() {
        let json = serde_json::json!({
            "number": 1,
            "title": "x",
            "user": { "login": "a" },
            "state": "merged",
            "created_at": "2025-06-23T10:00:00Z",
            "html_url": "https://github.com/acme/api/pull/1"
        });
        assert!(serde_json::from_value::<ApiPullRequest>(json).is_err());
    }
}
