//! Core data structures for the blogger application.
//!
//! This module contains the persisted `BlogPost` record, its `Category`,
//! and the caller-supplied `PostDraft` the store turns into a record.
use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::BlogError;

/// Fixed set of categories a post can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Technology,
    Lifestyle,
    Travel,
    Health,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Technology,
        Category::Lifestyle,
        Category::Travel,
        Category::Health,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technology => "Technology",
            Category::Lifestyle => "Lifestyle",
            Category::Travel => "Travel",
            Category::Health => "Health",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = BlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| BlogError::InvalidFormat {
                message: format!("Unknown category: {}", wanted),
            })
    }
}

/// Represents a single blog post as it is persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    /// Unique identifier, assigned by the store
    pub id: String,
    /// Post title
    pub title: String,
    pub category: Category,
    /// Body text, paragraphs separated by blank lines
    pub content: String,
    /// Optional cover image
    #[serde(default)]
    pub image_url: Option<String>,
    /// When the post was created
    pub created_at: DateTime<Utc>,
    /// Last edit time, absent until the first edit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BlogPost {
    /// Builds a fresh record from a draft, stamping id and creation time
    pub fn from_draft(draft: PostDraft) -> Self {
        BlogPost {
            id: generate_id(),
            title: draft.title,
            category: draft.category,
            content: draft.content,
            image_url: draft.image_url,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Overwrites the editable fields and stamps `updated_at`.
    /// `id` and `created_at` are left alone.
    pub fn apply(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.category = draft.category;
        self.content = draft.content;
        self.image_url = draft.image_url;

        let now = Utc::now();
        // clock skew must not put the edit before the creation
        self.updated_at = Some(now.max(self.created_at));
    }

    /// Case-insensitive substring match against title or content.
    /// `needle` must already be lowercased.
    pub fn matches_term(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }
}

/// Caller-supplied fields of a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub category: Category,
    pub content: String,
    pub image_url: Option<String>,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, category: Category, content: impl Into<String>) -> Self {
        PostDraft {
            title: title.into(),
            category,
            content: content.into(),
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

impl From<&BlogPost> for PostDraft {
    fn from(post: &BlogPost) -> Self {
        PostDraft {
            title: post.title.clone(),
            category: post.category,
            content: post.content.clone(),
            image_url: post.image_url.clone(),
        }
    }
}

const ID_SUFFIX_LEN: u32 = 5;

/// Generates a post id: base-36 milliseconds since the epoch followed by a
/// short random base-36 suffix. Not checked for collisions.
pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u128;
    let random = Uuid::new_v4().as_u128() % 36u128.pow(ID_SUFFIX_LEN);

    let mut suffix = to_base36(random);
    while suffix.len() < ID_SUFFIX_LEN as usize {
        suffix.insert(0, '0');
    }

    format!("{}{}", to_base36(millis), suffix)
}

fn to_base36(mut value: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    // only ASCII digits were pushed
    String::from_utf8(out).unwrap_or_default()
}
