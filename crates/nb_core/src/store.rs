use async_trait::async_trait;

use crate::models::Article;
use crate::Result;

/// Persistence contract for locally saved articles.
///
/// The `url` is the natural key for "is this article already saved"; the
/// document id only identifies a record that already exists. `save` and
/// `remove` return the document id instead of mutating the caller's
/// `Article`; attach or clear it on your own copy.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// All saved articles, each carrying its document id. Store-native order.
    async fn list_saved(&self) -> Result<Vec<Article>>;

    /// Number of saved articles.
    async fn count(&self) -> Result<u64>;

    /// Whether an article with this URL is already saved.
    async fn is_saved(&self, url: &str) -> Result<bool>;

    /// Persist a new document for the article and return its id.
    /// Fails with [`crate::Error::AlreadySaved`] when the URL is taken.
    async fn save(&self, article: &Article) -> Result<String>;

    /// Delete the document behind `article.id` and return that id. Deleting
    /// an id with no document left is not an error. Fails with
    /// [`crate::Error::MissingId`] when the article was never saved.
    async fn remove(&self, article: &Article) -> Result<String>;
}
