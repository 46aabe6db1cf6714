use crate::platform::types::Repository;
use crate::platform::Platform;

use super::FetchStats;

/// List every repository of `org`, following pages until one comes back
/// empty.
///
/// A failed page ends the listing early and the repositories gathered so
/// far are returned; the failure only shows up in the logs and in
/// `stats.fetch_errors`.
pub async fn list_repositories(
    platform: &dyn Platform,
    org: &str,
    per_page: u32,
    stats: &mut FetchStats,
) -> Vec<Repository> {
    let mut repos = Vec::new();
    let mut page = 1;

    loop {
        match platform.list_org_repos_page(org, page, per_page).await {
            Ok(batch) if batch.is_empty() => break,
            Ok(batch) => {
                tracing::debug!(org = org, page = page, count = batch.len(), "Fetched repository page");
                repos.extend(batch);
                page += 1;
            }
            Err(e) => {
                tracing::warn!(
                    org = org,
                    page = page,
                    error = %e,
                    "Repository listing stopped early"
                );
                stats.fetch_errors += 1;
                break;
            }
        }
    }

    stats.repositories = repos.len();
    repos
}
