use crate::config::AppConfig;
use crate::platform::types::PullRequest;
use crate::platform::Platform;

use super::pulls::fetch_recent_pull_requests;
use super::repos::list_repositories;
use super::reviews::{fetch_bot_reviews, render_bot_reviews};
use super::{DateWindow, Digest, FetchStats, RepoDigest, ReviewedPullRequest};

/// Walk the whole organization and gather every pull request in `window`
/// that the bot reviewed.
///
/// Requests are issued one at a time. Repositories without a qualifying
/// pull request are left out of the result entirely.
pub async fn collect_digest(
    platform: &dyn Platform,
    config: &AppConfig,
    window: &DateWindow,
) -> Digest {
    let org = config.org();
    let github = &config.github;
    let mut stats = FetchStats::default();

    let repos = list_repositories(platform, org, github.repo_page_size, &mut stats).await;
    tracing::info!(org = org, count = repos.len(), "Processing repositories");

    let mut digests = Vec::new();
    for repo in repos {
        let recent = fetch_recent_pull_requests(
            platform,
            org,
            &repo.name,
            github.pull_page_size,
            window,
            &mut stats,
        )
        .await;
        if recent.is_empty() {
            continue;
        }

        let digest = RepoDigest {
            open: review_pulls(platform, config, &repo.name, recent.open, &mut stats).await,
            closed: review_pulls(platform, config, &repo.name, recent.closed, &mut stats).await,
            repo: repo.name,
        };

        if !digest.is_empty() {
            stats.reported += digest.open.len() + digest.closed.len();
            digests.push(digest);
        }
    }

    Digest {
        repos: digests,
        stats,
    }
}

async fn review_pulls(
    platform: &dyn Platform,
    config: &AppConfig,
    repo: &str,
    pulls: Vec<PullRequest>,
    stats: &mut FetchStats,
) -> Vec<ReviewedPullRequest> {
    let mut reviewed = Vec::new();
    for pull in pulls {
        let reviews = fetch_bot_reviews(
            platform,
            config.org(),
            repo,
            pull.number,
            &config.github.bot_login,
            stats,
        )
        .await;
        if reviews.is_empty() {
            tracing::debug!(repo = repo, pr = pull.number, "No bot review");
            continue;
        }

        let comments_html = render_bot_reviews(&reviews, &config.report.bot_display_name);
        reviewed.push(ReviewedPullRequest {
            pull,
            reviews,
            comments_html,
        });
    }
    reviewed
}
