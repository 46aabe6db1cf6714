pub mod github;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;
use types::*;

/// Read-only view of the source-control host used to build the digest.
///
/// Every method maps to exactly one HTTP request. Callers decide how a
/// failed request degrades; implementations just report it.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Fetch one page (1-based) of the organization's repositories.
    async fn list_org_repos_page(
        &self,
        org: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Repository>>;

    /// Fetch the most recently created pull requests of a repository, in
    /// any state, newest first. Only the first page is requested.
    async fn list_recent_pull_requests(
        &self,
        org: &str,
        repo: &str,
        per_page: u32,
    ) -> Result<Vec<PullRequest>>;

    /// Fetch the reviews submitted on a pull request.
    async fn list_reviews(&self, org: &str, repo: &str, pr_number: u64) -> Result<Vec<Review>>;
}
