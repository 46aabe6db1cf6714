//! The fetch side of the report: list repositories, pick the pull requests
//! created inside the report window and keep the ones the bot reviewed.
//!
//! Nothing in here fails. A request that does not come back `200 OK` is
//! logged, counted in [`FetchStats`] and treated as an empty result, so one
//! broken repository never stops the rest of the organization from being
//! reported.

pub mod collect;
pub mod pulls;
pub mod repos;
pub mod reviews;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

use crate::platform::types::{PrState, PullRequest, Review};

pub use collect::collect_digest;
pub use window::DateWindow;

/// A pull request with at least one bot review, ready to render.
#[derive(Debug, Clone)]
pub struct ReviewedPullRequest {
    pub pull: PullRequest,
    pub reviews: Vec<Review>,
    /// Concatenated review blocks, as produced by
    /// [`reviews::render_bot_reviews`].
    pub comments_html: String,
}

/// Qualifying pull requests of one repository, in API order.
#[derive(Debug, Clone, Default)]
pub struct RepoDigest {
    pub repo: String,
    pub open: Vec<ReviewedPullRequest>,
    pub closed: Vec<ReviewedPullRequest>,
}

impl RepoDigest {
    pub fn pulls(&self, state: PrState) -> &[ReviewedPullRequest] {
        match state {
            PrState::Open => &self.open,
            PrState::Closed => &self.closed,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty() && self.closed.is_empty()
    }
}

/// Counters for the end-of-run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    pub repositories: usize,
    pub open_in_window: usize,
    pub closed_in_window: usize,
    pub reported: usize,
    pub fetch_errors: usize,
}

/// Everything gathered for one organization.
#[derive(Debug, Clone, Default)]
pub struct Digest {
    pub repos: Vec<RepoDigest>,
    pub stats: FetchStats,
}

impl Digest {
    pub fn has_pulls(&self, state: PrState) -> bool {
        self.repos.iter().any(|r| !r.pulls(state).is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.repos.iter().all(RepoDigest::is_empty)
    }
}
