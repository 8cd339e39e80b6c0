//! Command dispatcher for the blogger CLI.
//!
//! Each `Commands` value runs to completion against the `BlogStorage`
//! before the next one is handled, then renders the result.
use std::{
    fs::{read_to_string, OpenOptions},
    io::{stdin, stdout, Stdout, Write},
    path::{Path, PathBuf},
    process::Command,
};

use log::{debug, info};
use shell_words::split;
use tempfile::Builder;

use crate::{
    empty_state, render_card, render_detail, render_header, render_json, BlogError, BlogPost,
    BlogStorage, Category, Commands, Config, KeyValueStore, PostForm, Result,
};

/// CLI Application handler - processes CLI commands and interfaces with BlogStorage
pub struct App<S: KeyValueStore, W: Write = Stdout> {
    /// The post storage backend
    storage: BlogStorage<S>,

    /// Application configuration
    config: Config,

    /// Whether to display verbose output
    verbose: bool,

    /// Where command output goes
    out: W,
}

impl<S: KeyValueStore> App<S> {
    /// Create a new CLI application writing to stdout
    pub fn new(storage: BlogStorage<S>, config: Config, verbose: bool) -> Self {
        Self::with_output(storage, config, verbose, stdout())
    }
}

impl<S: KeyValueStore, W: Write> App<S, W> {
    /// Create a new CLI application writing its output to `out`
    pub fn with_output(storage: BlogStorage<S>, config: Config, verbose: bool, out: W) -> Self {
        Self {
            storage,
            config,
            verbose,
            out,
        }
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn storage(&self) -> &BlogStorage<S> {
        &self.storage
    }

    /// Seeds the sample posts into an empty collection when enabled in config
    pub fn prepare(&mut self, command: &Commands) -> Result<()> {
        if self.config.seed_on_first_run && command.seeds_on_first_run() && self.storage.is_empty()
        {
            let added = self.storage.seed_samples()?;
            info!("Seeded {} sample posts on first run", added);
            // stdout stays clean for --json output
            eprintln!("Sample blog posts added ({}).", added);
        }
        Ok(())
    }

    /// Run the CLI application with the given command
    pub fn run(&mut self, command: Commands) -> Result<()> {
        debug!("Dispatching command: {:?}", command);

        match command {
            Commands::Add {
                title,
                category,
                content,
                file,
                image_url,
            } => self.handle_add(title, category, content, file, image_url),

            Commands::Edit {
                id,
                title,
                category,
                content,
                file,
                edit,
                image_url,
                clear_image,
            } => self.handle_edit(EditRequest {
                id,
                title,
                category,
                content,
                file,
                edit,
                image_url,
                clear_image,
            }),

            Commands::View { id, json } => self.handle_view(&id, json),

            Commands::List {
                search,
                category,
                limit,
                json,
                detailed,
            } => self.handle_list(search, category, limit, json, detailed),

            Commands::Delete { id, force } => self.handle_delete(&id, force),

            Commands::Clear { force, no_samples } => self.handle_clear(force, no_samples),

            Commands::Seed => {
                let added = self.storage.seed_samples()?;
                if added == 0 {
                    writeln!(self.out, "Posts already exist; no samples added.")?;
                } else {
                    writeln!(self.out, "Sample blog posts added ({}).", added)?;
                }
                Ok(())
            }
        }
    }

    fn handle_add(
        &mut self,
        title: String,
        category: String,
        content: Option<String>,
        file: Option<PathBuf>,
        image_url: Option<String>,
    ) -> Result<()> {
        let content = match (content, file) {
            (Some(c), _) => c,
            (None, Some(path)) => read_content_from_file(&path)?,
            (None, None) => self.open_editor(&title, "")?,
        };

        let form = PostForm {
            title,
            category: Some(category),
            content,
            image_url,
        };
        let draft = form
            .validate()
            .map_err(|errors| BlogError::Validation { errors })?;

        let post = self.storage.add(draft)?;
        writeln!(self.out, "Blog added successfully! ID: {}", post.id)?;
        if self.verbose {
            writeln!(self.out, "\n{}", render_card(&post))?;
        }
        Ok(())
    }

    fn handle_edit(&mut self, request: EditRequest) -> Result<()> {
        let post = self
            .storage
            .get_by_id(&request.id)
            .ok_or_else(|| BlogError::PostNotFound {
                id: request.id.clone(),
            })?;

        let mut form = PostForm::from_post(&post);
        if let Some(title) = request.title {
            form.title = title;
        }
        if let Some(category) = request.category {
            form.category = Some(category);
        }
        if let Some(content) = request.content {
            form.content = content;
        } else if let Some(path) = request.file {
            form.content = read_content_from_file(&path)?;
        } else if request.edit {
            form.content = self.open_editor(&form.title, &post.content)?;
        }
        if request.clear_image {
            form.image_url = None;
        } else if let Some(url) = request.image_url {
            form.image_url = Some(url);
        }

        let draft = form
            .validate()
            .map_err(|errors| BlogError::Validation { errors })?;

        match self.storage.update(&request.id, draft)? {
            Some(updated) => {
                writeln!(self.out, "Blog updated successfully!")?;
                if self.verbose {
                    writeln!(self.out, "\n{}", render_card(&updated))?;
                }
                Ok(())
            }
            None => Err(BlogError::PostNotFound { id: request.id }),
        }
    }

    fn handle_view(&mut self, id: &str, json: bool) -> Result<()> {
        let post = self
            .storage
            .get_by_id(id)
            .ok_or_else(|| BlogError::PostNotFound { id: id.to_string() })?;

        if json {
            writeln!(self.out, "{}", serde_json::to_string_pretty(&post)?)?;
        } else {
            write!(self.out, "{}", render_detail(&post))?;
        }
        Ok(())
    }

    /// Posts matching the search term and category name, newest first
    pub fn filtered_posts(
        &self,
        search: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<BlogPost>> {
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|c| c.parse::<Category>())
            .transpose()?;

        Ok(self.storage.filter(search.unwrap_or(""), category))
    }

    fn handle_list(
        &mut self,
        search: Option<String>,
        category: Option<String>,
        limit: Option<usize>,
        json: bool,
        detailed: bool,
    ) -> Result<()> {
        let filtered = search.as_deref().is_some_and(|s| !s.trim().is_empty())
            || category.as_deref().is_some_and(|c| !c.trim().is_empty());

        let search = search.as_deref().map(str::trim);
        let mut posts = self.filtered_posts(search, category.as_deref())?;
        let total = posts.len();
        if let Some(limit) = limit {
            posts.truncate(limit);
        }

        if json {
            writeln!(self.out, "{}", render_json(&posts, detailed)?)?;
            return Ok(());
        }

        writeln!(self.out, "{}", render_header(total))?;
        if total == 0 {
            writeln!(self.out, "\n{}", empty_state(filtered))?;
            return Ok(());
        }

        let term_width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);

        for post in &posts {
            writeln!(self.out, "{}", "-".repeat(term_width.min(60)))?;
            writeln!(self.out, "{}", render_card(post))?;
        }

        if posts.len() < total {
            writeln!(self.out, "\n... and {} more", total - posts.len())?;
        }
        Ok(())
    }

    fn handle_delete(&mut self, id: &str, force: bool) -> Result<()> {
        let post = self
            .storage
            .get_by_id(id)
            .ok_or_else(|| BlogError::PostNotFound { id: id.to_string() })?;

        if !force {
            writeln!(self.out, "You are about to delete the following post:")?;
            writeln!(self.out, "\n{}\n", render_card(&post))?;
            if !self.confirm("Are you sure you want to delete this post? [y/N]: ")? {
                writeln!(self.out, "Deletion cancelled.")?;
                return Ok(());
            }
        }

        if self.storage.delete_by_id(id)? {
            writeln!(self.out, "Blog deleted successfully!")?;
            Ok(())
        } else {
            Err(BlogError::PostNotFound { id: id.to_string() })
        }
    }

    fn handle_clear(&mut self, force: bool, no_samples: bool) -> Result<()> {
        if !force
            && !self.confirm(
                "Are you sure you want to delete all blogs? This action cannot be undone. [y/N]: ",
            )?
        {
            writeln!(self.out, "Nothing deleted.")?;
            return Ok(());
        }

        if no_samples {
            self.storage.delete_all()?;
            writeln!(self.out, "All blogs deleted!")?;
        } else {
            self.storage.reset_with_samples()?;
            writeln!(self.out, "All blogs deleted and sample blogs added!")?;
        }
        Ok(())
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;

        let mut input = String::new();
        stdin().read_line(&mut input)?;

        let input = input.trim().to_lowercase();
        Ok(input == "y" || input == "yes")
    }

    /// Opens the configured editor on a temporary file and returns what was written
    fn open_editor(&self, title: &str, existing: &str) -> Result<String> {
        let temp_file = Builder::new().suffix(".md").tempfile()?;
        let temp_path = temp_file.path().to_path_buf();

        write_editor_template(&temp_path, title, existing)?;

        let editor_cmd = self.config.get_editor_command();
        info!("Opening editor to write post content. Save and exit when done...");
        launch_editor(&editor_cmd, &temp_path)?;

        let content = read_to_string(&temp_path)?;
        Ok(strip_editor_template(&content))
    }
}

/// Optional field changes for an edit
struct EditRequest {
    id: String,
    title: Option<String>,
    category: Option<String>,
    content: Option<String>,
    file: Option<PathBuf>,
    edit: bool,
    image_url: Option<String>,
    clear_image: bool,
}

fn read_content_from_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(BlogError::ApplicationError {
            message: format!("File not found: {}", path.display()),
        });
    }
    Ok(read_to_string(path)?)
}

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

fn write_editor_template(path: &Path, title: &str, existing: &str) -> Result<()> {
    let mut file = OpenOptions::new().write(true).truncate(true).open(path)?;

    writeln!(file, "{} Writing: {}", COMMENT_START, title)?;
    writeln!(file, "Separate paragraphs with a blank line.")?;
    writeln!(file, "This header is removed. Save and exit when done.")?;
    writeln!(file, "{}", COMMENT_END)?;
    write!(file, "{}", existing)?;

    Ok(())
}

fn launch_editor(editor_cmd: &str, file_path: &Path) -> Result<()> {
    let args = split(editor_cmd).map_err(|e| BlogError::EditorError {
        message: format!("Failed to parse editor command: {}", e),
    })?;

    let Some((program, rest)) = args.split_first() else {
        return Err(BlogError::EditorError {
            message: "Empty editor command".to_string(),
        });
    };

    let status = Command::new(program).args(rest).arg(file_path).status()?;

    if !status.success() {
        return Err(BlogError::EditorError {
            message: "Editor exited with non-zero status".to_string(),
        });
    }

    Ok(())
}

/// Drops the comment block the editor template starts with.
/// Comments further down belong to the post and are kept.
fn strip_editor_template(content: &str) -> String {
    let mut lines = content.lines().peekable();

    if lines
        .peek()
        .is_some_and(|line| line.trim_start().starts_with(COMMENT_START))
    {
        for line in lines.by_ref() {
            if line.trim_end().ends_with(COMMENT_END) {
                break;
            }
        }
    }

    lines.collect::<Vec<_>>().join("\n").trim().to_string()
}
