use std::fmt::Write;

use chrono::NaiveDate;

use crate::digest::{RepoDigest, ReviewedPullRequest};
use crate::platform::types::PrState;

use super::markup::escape_html;
use super::ReportContext;

const STYLESHEET: &str = r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
            line-height: 1.6;
            color: #24292e;
            max-width: 1200px;
            margin: 0 auto;
            padding: 20px;
            background-color: #ffffff;
        }
        .header {
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
            padding: 30px;
            border-radius: 10px;
            text-align: center;
            margin-bottom: 30px;
            box-shadow: 0 4px 6px rgba(0,0,0,0.1);
        }
        .header h1 { margin: 0; font-size: 28px; font-weight: 600; }
        .header p { margin: 10px 0 0 0; opacity: 0.9; font-size: 16px; }
        .section-title {
            background-color: #f6f8fa;
            padding: 20px;
            border-radius: 8px;
            border-left: 4px solid #0366d6;
            margin: 30px 0 20px 0;
        }
        .section-title h2 { margin: 0; color: #0366d6; font-size: 24px; }
        .no-data {
            text-align: center;
            padding: 40px;
            color: #586069;
            font-style: italic;
            background-color: #f8f9fa;
            border-radius: 8px;
            margin: 20px 0;
        }
        .footer {
            margin-top: 40px;
            padding: 20px;
            text-align: center;
            color: #586069;
            font-size: 14px;
            border-top: 1px solid #e1e4e8;
        }
"#;

const CELL_STYLE: &str = "border: 1px solid #d0d7de; padding: 12px; vertical-align: top;";
const HEADER_CELL_STYLE: &str =
    "border: 1px solid #d0d7de; padding: 12px; text-align: left; font-weight: 600;";

/// Table of one repository's qualifying pull requests in `state`. Renders
/// nothing when there are none.
pub fn render_repository_fragment(
    digest: &RepoDigest,
    state: PrState,
    bot_display_name: &str,
) -> String {
    let pulls = digest.pulls(state);
    if pulls.is_empty() {
        return String::new();
    }

    let mut html = String::new();
    let _ = write!(
        html,
        r#"
<div style="margin-bottom: 40px;">
    <h2 style="color: #0366d6; border-bottom: 2px solid #e1e4e8; padding-bottom: 10px;">📁 Repository: {repo}</h2>
    <table style="width: 100%; border-collapse: collapse; margin-top: 20px; box-shadow: 0 2px 4px rgba(0,0,0,0.1);">
        <thead>
            <tr style="background-color: #f6f8fa;">
                <th style="{HEADER_CELL_STYLE}">Pull Request</th>
                <th style="{HEADER_CELL_STYLE}">{bot} Review Comments</th>
            </tr>
        </thead>
        <tbody>"#,
        repo = escape_html(&digest.repo),
        bot = escape_html(bot_display_name),
    );

    for item in pulls {
        html.push_str(&render_row(item));
    }

    html.push_str(
        r#"
        </tbody>
    </table>
</div>"#,
    );
    html
}

fn render_row(item: &ReviewedPullRequest) -> String {
    let pr = &item.pull;
    format!(
        r#"
            <tr style="border-bottom: 1px solid #e1e4e8;">
                <td style="{CELL_STYLE} width: 30%;">
                    <div style="margin-bottom: 8px;"><strong>#{number}: {title}</strong></div>
                    <div style="margin-bottom: 8px;"><span style="background-color: {color}; color: white; padding: 2px 8px; border-radius: 12px; font-size: 12px;">{state}</span></div>
                    <div style="margin-bottom: 8px;"><strong>Author:</strong> {author}</div>
                    <div style="margin-bottom: 8px;"><strong>Created:</strong> {created}</div>
                    <div><a href="{url}" style="color: #0366d6; text-decoration: none;">🔗 View PR</a></div>
                </td>
                <td style="{CELL_STYLE}">
                    <div style="background-color: #f8f9fa; padding: 12px; border-radius: 6px; border-left: 4px solid #0366d6;">{comments}</div>
                </td>
            </tr>"#,
        number = pr.number,
        title = escape_html(&pr.title),
        color = pr.state.badge_color(),
        state = pr.state.as_str().to_uppercase(),
        author = escape_html(&pr.author),
        created = pr.created_at.format("%Y-%m-%d"),
        url = escape_html(&pr.url),
        comments = item.comments_html,
    )
}

/// All repository tables for one state, in repository order.
pub fn render_pull_request_section(
    digests: &[RepoDigest],
    state: PrState,
    bot_display_name: &str,
) -> String {
    digests
        .iter()
        .map(|d| render_repository_fragment(d, state, bot_display_name))
        .collect()
}

fn placeholder(state: PrState, bot_display_name: &str) -> String {
    format!(
        r#"<div class="no-data">No {state} pull requests with {} reviews found for today/yesterday.</div>"#,
        escape_html(bot_display_name)
    )
}

fn long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Wrap the open and closed sections in the full email document. An empty
/// section is replaced by a placeholder message.
pub fn render_document(open_section: &str, closed_section: &str, ctx: &ReportContext<'_>) -> String {
    let bot = escape_html(ctx.bot_display_name);
    let org = escape_html(ctx.org_label);

    let open = if open_section.is_empty() {
        placeholder(PrState::Open, ctx.bot_display_name)
    } else {
        open_section.to_string()
    };
    let closed = if closed_section.is_empty() {
        placeholder(PrState::Closed, ctx.bot_display_name)
    } else {
        closed_section.to_string()
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Daily {bot} Report</title>
    <style>{STYLESHEET}    </style>
</head>
<body>
    <div class="header">
        <h1>🤖 Daily {bot} Review Report</h1>
        <p>{org} Repositories • {date}</p>
    </div>

    <div class="section-title">
        <h2>🟢 Open Pull Requests with {bot} Reviews</h2>
    </div>
    {open}

    <div class="section-title">
        <h2>🔴 Closed Pull Requests with {bot} Reviews</h2>
    </div>
    {closed}

    <div class="footer">
        <p>{footer}</p>
        <p>📧 This report includes PRs created today and yesterday with {bot} review comments</p>
    </div>
</body>
</html>
"#,
        date = long_date(ctx.date),
        footer = escape_html(ctx.footer),
    )
}
