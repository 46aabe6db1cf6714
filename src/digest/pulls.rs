use crate::platform::types::{PrState, PullRequest};
use crate::platform::Platform;

use super::{DateWindow, FetchStats};

/// Pull requests of one repository created inside the report window.
#[derive(Debug, Clone, Default)]
pub struct RecentPullRequests {
    pub open: Vec<PullRequest>,
    pub closed: Vec<PullRequest>,
}

impl RecentPullRequests {
    pub fn is_empty(&self) -> bool {
        self.open.is_empty() && self.closed.is_empty()
    }
}

/// Split `pulls` into open and closed sets, keeping only those created
/// inside `window`. API order is preserved.
pub fn partition_by_window(pulls: Vec<PullRequest>, window: &DateWindow) -> RecentPullRequests {
    let mut recent = RecentPullRequests::default();
    for pr in pulls.into_iter().filter(|pr| window.contains(&pr.created_at)) {
        match pr.state {
            PrState::Open => recent.open.push(pr),
            PrState::Closed => recent.closed.push(pr),
        }
    }
    recent
}

/// Fetch the newest pull requests of `repo` and keep those created today or
/// yesterday.
///
/// Only the first page (`per_page` items, newest first) is requested, so a
/// repository with more than `per_page` pull requests in the window loses
/// the oldest ones. A failed request yields two empty sets.
pub async fn fetch_recent_pull_requests(
    platform: &dyn Platform,
    org: &str,
    repo: &str,
    per_page: u32,
    window: &DateWindow,
    stats: &mut FetchStats,
) -> RecentPullRequests {
    let pulls = match platform.list_recent_pull_requests(org, repo, per_page).await {
        Ok(pulls) => pulls,
        Err(e) => {
            tracing::warn!(repo = repo, error = %e, "Failed to fetch pull requests");
            stats.fetch_errors += 1;
            return RecentPullRequests::default();
        }
    };

    let recent = partition_by_window(pulls, window);

    tracing::info!(
        repo = repo,
        open = recent.open.len(),
        closed = recent.closed.len(),
        "Pull requests in window"
    );
    stats.open_in_window += recent.open.len();
    stats.closed_in_window += recent.closed.len();

    recent
}
