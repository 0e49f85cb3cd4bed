use serde::{Deserialize, Deserializer, Serialize};

/// A single news item, optionally bookmarked locally.
///
/// Articles come off the wire without an `id`; the id is the local store's
/// document identifier and is only present once the article has been saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub content: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub published_at: String,
    #[serde(default, deserialize_with = "source_or_empty")]
    pub source: Source,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub url_to_image: String,
    #[serde(skip)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total_results: u32,
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// Selector for which remote query shape to use. The two shapes are mutually
/// exclusive and each carries its own filter parameters; the page number is
/// supplied per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    TopNews {
        country: Option<String>,
        category: Option<String>,
        keywords: Option<String>,
    },
    AllNews {
        keywords: Option<String>,
        domains: Option<String>,
        from: Option<String>,
        to: Option<String>,
        language: Option<String>,
    },
}

// The news API reports absent fields as JSON null as often as it omits them.
fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn source_or_empty<'de, D>(deserializer: D) -> Result<Source, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Source>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_full_article() {
        let json = r#"{
            "author": "A. Writer",
            "content": "Body",
            "description": "Desc",
            "publishedAt": "2024-05-01T12:00:00Z",
            "source": {"id": "the-wire", "name": "The Wire"},
            "title": "T",
            "url": "http://x",
            "urlToImage": "http://x/img.png"
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.author.as_deref(), Some("A. Writer"));
        assert_eq!(article.title, "T");
        assert_eq!(article.url, "http://x");
        assert_eq!(article.source.name, "The Wire");
        assert_eq!(article.id, None);
    }

    #[test]
    fn null_and_missing_fields_default_to_empty() {
        let json = r#"{
            "author": null,
            "content": null,
            "title": "T",
            "url": "http://x",
            "source": null
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.author, None);
        assert_eq!(article.content, "");
        assert_eq!(article.description, "");
        assert_eq!(article.url_to_image, "");
        assert_eq!(article.source, Source::default());
    }

    #[test]
    fn the_local_id_never_reaches_the_wire() {
        let article = Article {
            author: None,
            content: String::new(),
            description: String::new(),
            published_at: String::new(),
            source: Source::default(),
            title: "T".to_string(),
            url: "http://x".to_string(),
            url_to_image: String::new(),
            id: Some("doc-1".to_string()),
        };

        let json = serde_json::to_value(&article).unwrap();
        assert!(json.get("id").is_none());
    }

    #[test]
    fn deserializes_a_news_response() {
        let json = r#"{"status":"ok","totalResults":1,"articles":[
            {"title":"T","url":"http://x","source":{"id":"","name":"S"}}
        ]}"#;

        let response: NewsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, "ok");
        assert_eq!(response.total_results, 1);
        assert_eq!(response.articles.len(), 1);
        assert_eq!(response.articles[0].source.name, "S");
        assert_eq!(response.articles[0].id, None);
    }
}
