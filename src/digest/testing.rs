//! In-memory [`Platform`] for pipeline tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};
use crate::platform::types::*;
use crate::platform::Platform;

#[derive(Default)]
pub struct FakePlatform {
    /// Repository pages, 1-based. Pages past the end are empty.
    pub repo_pages: Vec<Vec<&'static str>>,
    /// Pages that answer with a server error.
    pub failing_repo_pages: HashSet<u32>,
    pub pulls: HashMap<&'static str, Vec<PullRequest>>,
    pub failing_pulls: HashSet<&'static str>,
    pub reviews: HashMap<(&'static str, u64), Vec<Review>>,
    pub failing_reviews: HashSet<(&'static str, u64)>,
    pub calls: Mutex<Vec<String>>,
}

impl FakePlatform {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn pull(number: u64, state: PrState, created_at: &str) -> PullRequest {
    PullRequest {
        number,
        title: format!("PR {number}"),
        author: "alice".to_string(),
        created_at: DateTime::parse_from_rfc3339(created_at)
            .unwrap()
            .with_timezone(&Utc),
        state,
        url: format!("https://github.com/acme/repo/pull/{number}"),
    }
}

pub fn review(author: &str, body: &str) -> Review {
    Review {
        author: author.to_string(),
        body: body.to_string(),
    }
}

fn server_error(what: &str) -> AppError {
    AppError::GitHubApi(format!("GET {what} returned 500 Internal Server Error"))
}

#[async_trait]
impl Platform for FakePlatform {
    async fn list_org_repos_page(
        &self,
        org: &str,
        page: u32,
        _per_page: u32,
    ) -> Result<Vec<Repository>> {
        self.record(format!("repos:{org}:{page}"));
        if self.failing_repo_pages.contains(&page) {
            return Err(server_error("repos"));
        }
        let names = self
            .repo_pages
            .get((page as usize).saturating_sub(1))
            .cloned()
            .unwrap_or_default();
        Ok(names
            .into_iter()
            .map(|name| Repository {
                name: name.to_string(),
            })
            .collect())
    }

    async fn list_recent_pull_requests(
        &self,
        _org: &str,
        repo: &str,
        _per_page: u32,
    ) -> Result<Vec<PullRequest>> {
        self.record(format!("pulls:{repo}"));
        if self.failing_pulls.contains(repo) {
            return Err(server_error("pulls"));
        }
        Ok(self.pulls.get(repo).cloned().unwrap_or_default())
    }

    async fn list_reviews(&self, _org: &str, repo: &str, pr_number: u64) -> Result<Vec<Review>> {
        self.record(format!("reviews:{repo}:{pr_number}"));
        let key = self
            .reviews
            .keys()
            .chain(self.failing_reviews.iter())
            .find(|(r, n)| *r == repo && *n == pr_number)
            .copied();
        match key {
            Some(k) if self.failing_reviews.contains(&k) => Err(server_error("reviews")),
            Some(k) => Ok(self.reviews.get(&k).cloned().unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }
}
