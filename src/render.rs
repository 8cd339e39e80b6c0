//! Terminal rendering of posts: summary cards, the detail view and JSON output.
use chrono::{DateTime, Utc};
use console::style;

use crate::{BlogPost, Result};

/// Characters of content shown on a summary card
pub const CARD_PREVIEW_CHARS: usize = 150;

/// Long form date, e.g. "March 5, 2025"
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Cuts `content` to `max_chars` characters, adding "..." when something was cut
pub fn truncate_content(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &content[..byte_idx]),
        None => content.to_string(),
    }
}

/// Splits content into its blank-line separated paragraphs
pub fn paragraphs(content: &str) -> Vec<&str> {
    content
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

fn date_line(post: &BlogPost) -> String {
    match post.updated_at {
        Some(updated) => format!(
            "{} {}",
            format_date(post.created_at),
            style(format!("(Updated: {})", format_date(updated))).magenta()
        ),
        None => format_date(post.created_at),
    }
}

fn badge(post: &BlogPost) -> String {
    style(format!("[{}]", post.category)).cyan().to_string()
}

/// Summary card shown in listings
pub fn render_card(post: &BlogPost) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", badge(post), style(&post.title).bold()));
    out.push_str(&format!("{}\n", truncate_content(&post.content, CARD_PREVIEW_CHARS)));
    out.push_str(&format!(
        "{} | ID: {}",
        date_line(post),
        style(&post.id).dim()
    ));
    out
}

/// Full view of a single post
pub fn render_detail(post: &BlogPost) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", style(&post.title).bold().underlined()));
    out.push_str(&format!("{} {}\n", badge(post), date_line(post)));
    if let Some(url) = &post.image_url {
        out.push_str(&format!("Image: {}\n", url));
    }
    out.push_str(&format!("ID: {}\n", post.id));

    for paragraph in paragraphs(&post.content) {
        out.push('\n');
        out.push_str(paragraph);
        out.push('\n');
    }
    out
}

/// Header line with the number of posts, e.g. "Blog Posts (3)"
pub fn render_header(count: usize) -> String {
    format!("{} ({})", style("Blog Posts").bold(), count)
}

/// Shown instead of cards when nothing matched
pub fn empty_state(filtered: bool) -> &'static str {
    if filtered {
        "No blog posts match your search."
    } else {
        "No blog posts yet. Create your first one with `blogger add`."
    }
}

/// JSON output: full records, or just the fields a card shows
pub fn render_json(posts: &[BlogPost], detailed: bool) -> Result<String> {
    if detailed {
        return Ok(serde_json::to_string_pretty(posts)?);
    }

    let simplified: Vec<serde_json::Value> = posts
        .iter()
        .map(|post| {
            serde_json::json!({
                "id": post.id,
                "title": post.title,
                "category": post.category,
                "excerpt": truncate_content(&post.content, CARD_PREVIEW_CHARS),
                "createdAt": post.created_at,
                "updatedAt": post.updated_at,
            })
        })
        .collect();

    Ok(serde_json::to_string_pretty(&simplified)?)
}
