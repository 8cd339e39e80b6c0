//! Shared types for the blogger application: the crate `Result` alias and
//! the commands the CLI dispatches.
use std::path::PathBuf;

use clap::Subcommand;

use crate::BlogError;

/// A specialized Result type for blogger operations.
pub type Result<T> = std::result::Result<T, BlogError>;

/// Available subcommands for the blogger application
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a new blog post
    Add {
        /// Title of the post
        #[clap(short = 'T', long)]
        title: String,

        /// Category: Technology, Lifestyle, Travel or Health
        #[clap(short = 'C', long)]
        category: String,

        /// Content of the post, paragraphs separated by blank lines
        #[clap(short, long)]
        content: Option<String>,

        /// Path to a file containing the post's content
        #[clap(short, long, conflicts_with = "content")]
        file: Option<PathBuf>,

        /// Optional cover image URL
        #[clap(short, long)]
        image_url: Option<String>,
    },

    /// Edit an existing post
    Edit {
        /// ID of the post to edit
        id: String,

        /// New title
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// New category
        #[clap(short = 'C', long)]
        category: Option<String>,

        /// New content
        #[clap(short, long)]
        content: Option<String>,

        /// Path to a file containing the new content
        #[clap(short, long, conflicts_with = "content")]
        file: Option<PathBuf>,

        /// Open the current content in an editor
        #[clap(short, long, conflicts_with_all = ["content", "file"])]
        edit: bool,

        /// New cover image URL
        #[clap(short, long)]
        image_url: Option<String>,

        /// Remove the cover image
        #[clap(long, conflicts_with = "image_url")]
        clear_image: bool,
    },

    /// View a post by ID
    View {
        /// ID of the post to view
        id: String,

        /// Format output as raw JSON
        #[clap(short, long)]
        json: bool,
    },

    /// List posts, optionally filtered by search term and category
    List {
        /// Only posts whose title or content contains this text (case-insensitive)
        #[clap(short, long)]
        search: Option<String>,

        /// Only posts in this category
        #[clap(short = 'C', long)]
        category: Option<String>,

        /// Limit the number of posts shown
        #[clap(short = 'n', long)]
        limit: Option<usize>,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,

        /// Include full content in JSON output
        #[clap(short, long)]
        detailed: bool,
    },

    /// Delete a post by ID
    Delete {
        /// ID of the post to delete
        id: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Delete every post, then restore the sample posts
    Clear {
        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,

        /// Leave the collection empty instead of adding samples
        #[clap(long)]
        no_samples: bool,
    },

    /// Add the sample posts if there are no posts yet
    Seed,
}

impl Commands {
    /// Whether startup seeding of an empty collection should run before this command
    pub fn seeds_on_first_run(&self) -> bool {
        !matches!(self, Commands::Clear { .. } | Commands::Seed)
    }
}
