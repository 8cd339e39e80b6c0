//! Input collection and validation for adding and editing posts.
//!
//! A `PostForm` holds raw user input. Only a form that passes `validate`
//! becomes a `PostDraft`, so nothing invalid ever reaches the store.
use std::fmt;

use url::Url;

use crate::{BlogPost, Category, PostDraft};

/// Form fields that can carry a validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Category,
    Content,
    ImageUrl,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Title => "title",
            Field::Category => "category",
            Field::Content => "content",
            Field::ImageUrl => "image url",
        };
        f.write_str(name)
    }
}

/// A message attached to one form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Raw, unvalidated post input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub category: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
}

impl PostForm {
    /// Pre-fills a form with an existing post, for editing
    pub fn from_post(post: &BlogPost) -> Self {
        PostForm {
            title: post.title.clone(),
            category: Some(post.category.to_string()),
            content: post.content.clone(),
            image_url: post.image_url.clone(),
        }
    }

    /// Checks every field and returns the trimmed draft, or all field errors
    pub fn validate(&self) -> Result<PostDraft, Vec<FieldError>> {
        let mut errors = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(FieldError::new(Field::Title, "Title is required"));
        }

        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push(FieldError::new(Field::Category, "Please select a category"));
                None
            }
            Some(name) => match name.parse::<Category>() {
                Ok(category) => Some(category),
                Err(_) => {
                    errors.push(FieldError::new(
                        Field::Category,
                        format!("Unknown category: {}", name),
                    ));
                    None
                }
            },
        };

        let content = self.content.trim();
        if content.is_empty() {
            errors.push(FieldError::new(Field::Content, "Content is required"));
        }

        let image_url = self
            .image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty());
        if let Some(url) = image_url {
            if let Err(e) = validate_image_url(url) {
                errors.push(e);
            }
        }

        match category {
            Some(category) if errors.is_empty() => Ok(PostDraft {
                title: title.to_string(),
                category,
                content: content.to_string(),
                image_url: image_url.map(str::to_string),
            }),
            _ => Err(errors),
        }
    }
}

/// Accepts anything that parses as an absolute URL
pub fn validate_image_url(raw: &str) -> Result<(), FieldError> {
    Url::parse(raw)
        .map(|_| ())
        .map_err(|_| FieldError::new(Field::ImageUrl, "Please enter a valid URL"))
}
