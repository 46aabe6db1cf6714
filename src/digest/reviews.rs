use crate::platform::types::Review;
use crate::platform::Platform;
use crate::render::markup::render_review_block;

use super::FetchStats;

/// Keep the reviews written by `bot_login`. The match is exact and
/// case-sensitive; order is preserved.
pub fn retain_bot_reviews(reviews: Vec<Review>, bot_login: &str) -> Vec<Review> {
    reviews
        .into_iter()
        .filter(|r| r.author == bot_login)
        .collect()
}

/// Render retained reviews as consecutive labelled blocks. Empty input
/// renders as an empty string.
pub fn render_bot_reviews(reviews: &[Review], bot_display_name: &str) -> String {
    reviews
        .iter()
        .map(|r| render_review_block(bot_display_name, &r.body))
        .collect()
}

/// Fetch the reviews of one pull request and keep the bot's. A failed
/// request counts as "no reviews".
pub async fn fetch_bot_reviews(
    platform: &dyn Platform,
    org: &str,
    repo: &str,
    pr_number: u64,
    bot_login: &str,
    stats: &mut FetchStats,
) -> Vec<Review> {
    match platform.list_reviews(org, repo, pr_number).await {
        Ok(reviews) => retain_bot_reviews(reviews, bot_login),
        Err(e) => {
            tracing::warn!(
                repo = repo,
                pr = pr_number,
                error = %e,
                "Failed to fetch reviews"
            );
            stats.fetch_errors += 1;
            Vec::new()
        }
    }
}

/// Fetch, filter and render the bot reviews of one pull request. An empty
/// string means the pull request has nothing to report.
pub async fn extract_bot_review_html(
    platform: &dyn Platform,
    org: &str,
    repo: &str,
    pr_number: u64,
    bot_login: &str,
    bot_display_name: &str,
    stats: &mut FetchStats,
) -> String {
    let reviews = fetch_bot_reviews(platform, org, repo, pr_number, bot_login, stats).await;
    render_bot_reviews(&reviews, bot_display_name)
}
