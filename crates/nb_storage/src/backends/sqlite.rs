use async_trait::async_trait;
use nb_core::{Article, BookmarkStore, Error, Result};
use sqlx::{sqlite::SqlitePool, Row};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

use crate::document::{article_to_document, document_to_article};

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS bookmarks (
        id TEXT PRIMARY KEY,
        doc TEXT NOT NULL
    )
    "#,
    // Add future migrations here
];

/// On-disk bookmark store. Each row is one schema-less JSON document; the
/// engine never sees the article field set, so the document shape can evolve
/// without schema migrations.
pub struct SqliteStore {
    pool: SqlitePool,
    db_path: PathBuf,
}

impl SqliteStore {
    pub async fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path.display()))
            .await
            .map_err(|e| Error::Storage(format!("failed to open bookmark database: {e}")))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Storage(format!("failed to run migration {i}: {e}")))?;
        }

        debug!("bookmark database open at {}", db_path.display());
        Ok(Self {
            pool,
            db_path: db_path.to_path_buf(),
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

#[async_trait]
impl BookmarkStore for SqliteStore {
    async fn list_saved(&self) -> Result<Vec<Article>> {
        let rows = sqlx::query("SELECT id, doc FROM bookmarks")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        let mut articles = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.get("id");
            let raw: String = row.get("doc");
            let doc = serde_json::from_str(&raw)?;
            articles.push(document_to_article(&id, &doc));
        }
        Ok(articles)
    }

    async fn count(&self) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM bookmarks")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        let n: i64 = row.get("n");
        Ok(n as u64)
    }

    async fn is_saved(&self, url: &str) -> Result<bool> {
        // Projection over the one field the check needs. Still a scan, but a
        // bookmark list stays small.
        let rows = sqlx::query("SELECT json_extract(doc, '$.url') AS url FROM bookmarks")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        Ok(rows
            .iter()
            .any(|row| row.get::<Option<String>, _>("url").as_deref() == Some(url)))
    }

    async fn save(&self, article: &Article) -> Result<String> {
        if self.is_saved(&article.url).await? {
            return Err(Error::AlreadySaved);
        }

        let id = Uuid::new_v4().to_string();
        let doc = serde_json::to_string(&article_to_document(article))?;

        sqlx::query("INSERT INTO bookmarks (id, doc) VALUES (?, ?)")
            .bind(&id)
            .bind(doc)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        Ok(id)
    }

    async fn remove(&self, article: &Article) -> Result<String> {
        let id = article.id.clone().ok_or(Error::MissingId)?;

        // A row that is already gone deletes to nothing, which is fine.
        sqlx::query("DELETE FROM bookmarks WHERE id = ?")
            .bind(&id)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        Ok(id)
    }
}
