//! Mapping between [`Article`] and the schema-less documents the backends
//! persist. Documents keep the wire field names (`publishedAt`, `urlToImage`)
//! so a stored bookmark reads the same as the API payload it was cloned from.

use nb_core::{Article, Source};
use serde_json::{json, Value};

pub fn article_to_document(article: &Article) -> Value {
    json!({
        "author": article.author,
        "content": article.content,
        "description": article.description,
        "publishedAt": article.published_at,
        "source": { "id": article.source.id, "name": article.source.name },
        "title": article.title,
        "url": article.url,
        "urlToImage": article.url_to_image,
    })
}

/// Field-by-field extraction; any missing or mistyped string field falls back
/// to `""`, including the nested source fields. `author` keeps its optionality
/// so a saved article compares equal to the one that was saved.
pub fn document_to_article(id: &str, doc: &Value) -> Article {
    let source = doc.get("source");

    Article {
        author: doc
            .get("author")
            .and_then(Value::as_str)
            .map(str::to_string),
        content: string_field(doc, "content"),
        description: string_field(doc, "description"),
        published_at: string_field(doc, "publishedAt"),
        source: Source {
            id: nested_field(source, "id"),
            name: nested_field(source, "name"),
        },
        title: string_field(doc, "title"),
        url: string_field(doc, "url"),
        url_to_image: string_field(doc, "urlToImage"),
        id: Some(id.to_string()),
    }
}

/// Projection of the one field the duplicate check needs.
pub(crate) fn document_url(doc: &Value) -> &str {
    doc.get("url").and_then(Value::as_str).unwrap_or_default()
}

fn string_field(doc: &Value, key: &str) -> String {
    doc.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn nested_field(parent: Option<&Value>, key: &str) -> String {
    parent
        .and_then(|value| value.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
