//! Plain-text rendering, sent as the `text/plain` alternative. Review bodies
//! are included verbatim.

use crate::digest::RepoDigest;
use crate::platform::types::PrState;

use super::ReportContext;

const RULE_WIDTH: usize = 138;

fn banner(title: &str) -> String {
    let title = format!(" {title} ");
    let fill = RULE_WIDTH.saturating_sub(title.chars().count());
    let left = fill / 2;
    format!("{}{}{}", "*".repeat(left), title, "*".repeat(fill - left))
}

fn render_repository(digest: &RepoDigest, state: PrState, bot_display_name: &str) -> String {
    let pulls = digest.pulls(state);
    if pulls.is_empty() {
        return String::new();
    }

    let mut out = format!("Repository: {}\n\n", digest.repo);
    for item in pulls {
        let pr = &item.pull;
        out.push_str(&format!("--- PR #{}: {} ({})\n\n", pr.number, pr.title, pr.url));
        for review in &item.reviews {
            out.push_str(&format!(
                "------- Review by {bot_display_name}:\n{}\n\n",
                review.body
            ));
        }
    }
    let rule = "-".repeat(RULE_WIDTH);
    out.push_str(&format!("{rule}\n{rule}\n\n\n"));
    out
}

fn render_section(digests: &[RepoDigest], state: PrState, ctx: &ReportContext<'_>) -> String {
    let heading = match state {
        PrState::Open => "LIST OF OPEN PRs",
        PrState::Closed => "LIST OF CLOSED PRs",
    };
    let body: String = digests
        .iter()
        .map(|d| render_repository(d, state, ctx.bot_display_name))
        .collect();

    let mut out = format!("{}\n\n\n", banner(heading));
    if body.is_empty() {
        out.push_str(&format!(
            "No {state} pull requests with {} reviews found for today/yesterday.\n\n\n",
            ctx.bot_display_name
        ));
    } else {
        out.push_str(&body);
    }
    out
}

pub fn render_text_report(digests: &[RepoDigest], ctx: &ReportContext<'_>) -> String {
    let title = format!(
        "DAILY REPORT FOR {} REVIEWS IN {} REPOSITORIES - {}",
        ctx.bot_display_name.to_uppercase(),
        ctx.org_label.to_uppercase(),
        ctx.date.format("%Y-%m-%d")
    );

    let mut out = format!("{}\n\n\n", banner(&title));
    out.push_str(&render_section(digests, PrState::Open, ctx));
    out.push_str(&render_section(digests, PrState::Closed, ctx));
    out.push_str(ctx.footer);
    out.push('\n');
    out
}
