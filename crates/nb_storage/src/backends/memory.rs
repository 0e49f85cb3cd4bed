use async_trait::async_trait;
use nb_core::{Article, BookmarkStore, Error, Result};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::document::{article_to_document, document_to_article, document_url};

/// Non-persistent bookmark store. Documents keep insertion order, which is
/// as close to "store-native order" as an in-memory engine gets.
pub struct MemoryStore {
    documents: Arc<RwLock<Vec<(String, Value)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookmarkStore for MemoryStore {
    async fn list_saved(&self) -> Result<Vec<Article>> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .map(|(id, doc)| document_to_article(id, doc))
            .collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.documents.read().await.len() as u64)
    }

    async fn is_saved(&self, url: &str) -> Result<bool> {
        let documents = self.documents.read().await;
        Ok(documents.iter().any(|(_, doc)| document_url(doc) == url))
    }

    async fn save(&self, article: &Article) -> Result<String> {
        if self.is_saved(&article.url).await? {
            return Err(Error::AlreadySaved);
        }

        let id = Uuid::new_v4().to_string();
        let mut documents = self.documents.write().await;
        documents.push((id.clone(), article_to_document(article)));
        Ok(id)
    }

    async fn remove(&self, article: &Article) -> Result<String> {
        let id = article.id.clone().ok_or(Error::MissingId)?;

        let mut documents = self.documents.write().await;
        if let Some(position) = documents.iter().position(|(doc_id, _)| *doc_id == id) {
            documents.remove(position);
        }
        Ok(id)
    }
}
