use log::{debug, error, info, trace, warn};

use crate::{sample_posts, BlogPost, Category, KeyValueStore, PostDraft, Result, DEFAULT_STORAGE_KEY};

/// Manages the blog post collection stored under a single key.
///
/// Every mutation reads the whole collection, changes it and writes it back.
/// The newest post is always first.
pub struct BlogStorage<S: KeyValueStore> {
    /// Backend holding the serialized collection
    backend: S,

    /// Key the collection is stored under
    storage_key: String,
}

impl<S: KeyValueStore> BlogStorage<S> {
    /// Creates a store using the default storage key
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    /// Creates a store reading and writing `storage_key` in `backend`
    pub fn with_key(backend: S, storage_key: impl Into<String>) -> Self {
        Self {
            backend,
            storage_key: storage_key.into(),
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Gives the backend back, e.g. to reopen it under another key
    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Returns every post, newest first.
    ///
    /// A missing or unreadable collection is treated as empty.
    pub fn list_all(&self) -> Vec<BlogPost> {
        let raw = match self.backend.get_item(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                trace!("No collection stored under '{}'", self.storage_key);
                return Vec::new();
            }
            Err(e) => {
                error!("Failed to read collection '{}': {}", self.storage_key, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<BlogPost>>(&raw) {
            Ok(posts) => posts,
            Err(e) => {
                warn!(
                    "Stored collection '{}' is malformed, treating as empty: {}",
                    self.storage_key, e
                );
                Vec::new()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.list_all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retrieves a post by its ID
    pub fn get_by_id(&self, id: &str) -> Option<BlogPost> {
        debug!("Retrieving post by ID: {}", id);
        self.list_all().into_iter().find(|post| post.id == id)
    }

    /// Copies a stored collection that no longer parses to `<key>.corrupt`
    /// so the write that follows does not destroy it.
    fn preserve_unreadable(&mut self) -> Result<()> {
        let Some(raw) = self.backend.get_item(&self.storage_key)? else {
            return Ok(());
        };
        if serde_json::from_str::<Vec<BlogPost>>(&raw).is_ok() {
            return Ok(());
        }

        let backup_key = self.corrupt_backup_key();
        self.backend.set_item(&backup_key, &raw)?;
        warn!(
            "Moved unreadable collection '{}' to '{}' before overwriting",
            self.storage_key, backup_key
        );
        Ok(())
    }

    /// Key an unreadable collection is copied to before the next write
    pub fn corrupt_backup_key(&self) -> String {
        format!("{}.corrupt", self.storage_key)
    }

    fn save_all(&mut self, posts: &[BlogPost]) -> Result<()> {
        self.preserve_unreadable()?;
        let json = serde_json::to_string(posts).map_err(|e| {
            error!("Failed to serialize collection: {}", e);
            e
        })?;
        self.backend.set_item(&self.storage_key, &json)?;
        trace!("Persisted {} posts under '{}'", posts.len(), self.storage_key);
        Ok(())
    }

    /// Stores a new post at the front of the collection and returns it
    /// with its assigned id and creation time.
    pub fn add(&mut self, draft: PostDraft) -> Result<BlogPost> {
        let mut posts = self.list_all();
        let post = BlogPost::from_draft(draft);

        posts.insert(0, post.clone());
        self.save_all(&posts)?;

        info!("Added post {} '{}'", post.id, post.title);
        Ok(post)
    }

    /// Replaces the editable fields of post `id`.
    ///
    /// Returns `Ok(None)` without writing anything when no such post exists.
    pub fn update(&mut self, id: &str, draft: PostDraft) -> Result<Option<BlogPost>> {
        let mut posts = self.list_all();

        let Some(post) = posts.iter_mut().find(|post| post.id == id) else {
            warn!("Cannot update post {}: not found", id);
            return Ok(None);
        };

        post.apply(draft);
        let updated = post.clone();

        self.save_all(&posts)?;

        info!("Updated post {}", id);
        Ok(Some(updated))
    }

    /// Removes post `id`; `false` when it did not exist
    pub fn delete_by_id(&mut self, id: &str) -> Result<bool> {
        let mut posts = self.list_all();
        let before = posts.len();
        posts.retain(|post| post.id != id);

        if posts.len() == before {
            warn!("Cannot delete post {}: not found", id);
            return Ok(false);
        }

        self.save_all(&posts)?;
        info!("Deleted post {}", id);
        Ok(true)
    }

    /// Drops the whole collection
    pub fn delete_all(&mut self) -> Result<()> {
        self.backend.remove_item(&self.storage_key)?;
        info!("Deleted all posts under '{}'", self.storage_key);
        Ok(())
    }

    /// Returns posts whose title or content contains `search_term`
    /// (ignoring case) and, when given, whose category equals `category`.
    /// An empty term matches everything. The term is used as given, so
    /// whitespace is part of the match. Order is preserved.
    pub fn filter(&self, search_term: &str, category: Option<Category>) -> Vec<BlogPost> {
        let needle = search_term.to_lowercase();

        let matching: Vec<BlogPost> = self
            .list_all()
            .into_iter()
            .filter(|post| needle.is_empty() || post.matches_term(&needle))
            .filter(|post| category.map_or(true, |c| post.category == c))
            .collect();

        debug!(
            "Filter term='{}' category={:?} matched {} posts",
            search_term,
            category,
            matching.len()
        );
        matching
    }

    /// Inserts the sample posts if the collection is empty.
    /// Returns how many posts were added.
    pub fn seed_samples(&mut self) -> Result<usize> {
        if !self.is_empty() {
            debug!("Collection not empty, skipping samples");
            return Ok(0);
        }

        let samples = sample_posts();
        let count = samples.len();
        for draft in samples {
            self.add(draft)?;
        }

        info!("Seeded {} sample posts", count);
        Ok(count)
    }

    /// Clears the collection and inserts the sample posts
    pub fn reset_with_samples(&mut self) -> Result<usize> {
        self.delete_all()?;
        self.seed_samples()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlogError, MemoryKeyValueStore};

    fn store() -> BlogStorage<MemoryKeyValueStore> {
        BlogStorage::new(MemoryKeyValueStore::new())
    }

    fn draft(title: &str, category: Category, content: &str) -> PostDraft {
        PostDraft::new(title, category, content)
    }

    #[test]
    fn add_assigns_id_and_prepends() {
        let mut store = store();
        let first = store.add(draft("First", Category::Health, "a")).unwrap();
        let second = store.add(draft("Second", Category::Travel, "b")).unwrap();

        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);
        assert!(second.updated_at.is_none());

        let all = store.list_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[test]
    fn add_then_get_round_trips() {
        let mut store = store();
        let added = store
            .add(draft("Pics", Category::Lifestyle, "p1\n\np2").with_image_url("https://example.com/i.png"))
            .unwrap();

        assert_eq!(store.get_by_id(&added.id), Some(added));
    }

    #[test]
    fn get_unknown_is_none() {
        let mut store = store();
        store.add(draft("x", Category::Health, "y")).unwrap();
        assert_eq!(store.get_by_id("missing"), None);
    }

    #[test]
    fn update_preserves_identity_and_position() {
        let mut store = store();
        let older = store.add(draft("Old", Category::Health, "a")).unwrap();
        let newer = store.add(draft("New", Category::Health, "b")).unwrap();

        let updated = store
            .update(&older.id, draft("Old edited", Category::Travel, "c"))
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, older.id);
        assert_eq!(updated.created_at, older.created_at);
        assert!(updated.updated_at.unwrap() >= updated.created_at);
        assert_eq!(updated.title, "Old edited");

        let all = store.list_all();
        assert_eq!(all[0].id, newer.id);
        assert_eq!(all[1], updated);
    }

    #[test]
    fn update_can_clear_image() {
        let mut store = store();
        let post = store
            .add(draft("Img", Category::Travel, "a").with_image_url("https://example.com/a.jpg"))
            .unwrap();

        let updated = store
            .update(&post.id, draft("Img", Category::Travel, "a"))
            .unwrap()
            .unwrap();
        assert_eq!(updated.image_url, None);
    }

    #[test]
    fn update_unknown_leaves_collection_unchanged() {
        let mut store = store();
        store.add(draft("Keep", Category::Health, "a")).unwrap();
        let before = store.list_all();

        let result = store.update("nope", draft("X", Category::Travel, "y")).unwrap();

        assert!(result.is_none());
        assert_eq!(store.list_all(), before);
    }

    #[test]
    fn delete_by_id_reports_presence() {
        let mut store = store();
        let a = store.add(draft("A", Category::Health, "a")).unwrap();
        let b = store.add(draft("B", Category::Health, "b")).unwrap();

        assert!(store.delete_by_id(&a.id).unwrap());
        assert!(!store.delete_by_id(&a.id).unwrap());

        let all = store.list_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, b.id);
    }

    #[test]
    fn delete_all_empties_collection() {
        let mut store = store();
        store.add(draft("A", Category::Health, "a")).unwrap();
        store.add(draft("B", Category::Travel, "b")).unwrap();

        store.delete_all().unwrap();
        assert!(store.list_all().is_empty());

        // deleting an already empty collection is fine
        store.delete_all().unwrap();
    }

    fn filter_fixture() -> BlogStorage<MemoryKeyValueStore> {
        let mut store = store();
        store
            .add(draft("Alpha Guide", Category::Technology, "Intro to things"))
            .unwrap();
        store
            .add(draft("Beta Notes", Category::Travel, "Trip journal, ALPHAbet soup"))
            .unwrap();
        store
            .add(draft("Gamma Walk", Category::Travel, "Hills and rivers"))
            .unwrap();
        store
    }

    #[test]
    fn filter_does_not_trim_the_term() {
        let mut store = store();
        store
            .add(draft("Two words", Category::Health, "spaced out"))
            .unwrap();
        store
            .add(draft("Single", Category::Health, "word"))
            .unwrap();

        let found = store.filter(" ", None);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Two words");

        assert!(store.filter(" single", None).is_empty());
    }

    #[test]
    fn filter_without_criteria_returns_everything_in_order() {
        let store = filter_fixture();
        assert_eq!(store.filter("", None), store.list_all());
    }

    #[test]
    fn filter_by_term_matches_title_or_content_ignoring_case() {
        let store = filter_fixture();

        let titles: Vec<String> = store
            .filter("alpha", None)
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["Beta Notes", "Alpha Guide"]);

        let titles: Vec<String> = store
            .filter("GUIDE", None)
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["Alpha Guide"]);
    }

    #[test]
    fn filter_title_only_example() {
        let mut store = store();
        store.add(draft("Alpha Guide", Category::Technology, "one")).unwrap();
        store.add(draft("Beta Notes", Category::Technology, "two")).unwrap();

        let found = store.filter("alpha", None);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Alpha Guide");
    }

    #[test]
    fn filter_by_category_is_exact() {
        let store = filter_fixture();
        let travel = store.filter("", Some(Category::Travel));
        assert_eq!(travel.len(), 2);
        assert!(travel.iter().all(|p| p.category == Category::Travel));

        assert!(store.filter("", Some(Category::Health)).is_empty());
    }

    #[test]
    fn filter_combines_term_and_category() {
        let store = filter_fixture();
        let found = store.filter("alpha", Some(Category::Technology));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Alpha Guide");
    }

    #[test]
    fn corrupt_blob_reads_as_empty_and_is_overwritten() {
        let mut backend = MemoryKeyValueStore::new();
        backend.set_item(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        let mut store = BlogStorage::new(backend);

        assert!(store.list_all().is_empty());
        assert!(store.get_by_id("anything").is_none());

        store.add(draft("Fresh", Category::Health, "start")).unwrap();
        assert_eq!(store.list_all().len(), 1);
    }

    #[test]
    fn corrupt_blob_is_backed_up_before_first_overwrite() {
        let mut backend = MemoryKeyValueStore::new();
        backend.set_item(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        let mut store = BlogStorage::new(backend);

        store.seed_samples().unwrap();
        assert_eq!(store.len(), sample_posts().len());

        let backup_key = store.corrupt_backup_key();
        assert_eq!(backup_key, "blogger_posts.corrupt");
        let backend = store.into_backend();
        assert_eq!(
            backend.get_item(&backup_key).unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn readable_collection_is_not_backed_up() {
        let mut store = store();
        store.add(draft("A", Category::Health, "a")).unwrap();
        store.add(draft("B", Category::Health, "b")).unwrap();

        let backup_key = store.corrupt_backup_key();
        assert_eq!(store.into_backend().get_item(&backup_key).unwrap(), None);
    }

    #[test]
    fn separate_keys_are_isolated() {
        let mut store = BlogStorage::with_key(MemoryKeyValueStore::new(), "one");
        store.add(draft("A", Category::Health, "a")).unwrap();

        let other = BlogStorage::with_key(store.into_backend(), "two");
        assert!(other.list_all().is_empty());

        let first_again = BlogStorage::with_key(other.into_backend(), "one");
        assert_eq!(first_again.list_all().len(), 1);
    }

    #[test]
    fn seed_only_when_empty() {
        let mut store = store();
        let count = store.seed_samples().unwrap();
        assert_eq!(count, sample_posts().len());

        let all = store.list_all();
        assert_eq!(all.len(), count);
        // samples are added in order, so the last one ends up first
        assert_eq!(all[0].title, sample_posts().last().unwrap().title);

        assert_eq!(store.seed_samples().unwrap(), 0);
        assert_eq!(store.len(), count);
    }

    #[test]
    fn reset_replaces_user_posts_with_samples() {
        let mut store = store();
        let mine = store.add(draft("Mine", Category::Health, "a")).unwrap();

        store.reset_with_samples().unwrap();

        assert!(store.get_by_id(&mine.id).is_none());
        assert_eq!(store.len(), sample_posts().len());
    }

    struct FailingBackend;

    impl KeyValueStore for FailingBackend {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(BlogError::ApplicationError {
                message: "quota exceeded".to_string(),
            })
        }

        fn remove_item(&mut self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_reported() {
        let mut store = BlogStorage::new(FailingBackend);
        assert!(store.add(draft("A", Category::Health, "a")).is_err());
    }
}
