use std::time::Duration;

use nb_core::{Error, Feed, NewsResponse, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/";

const USER_AGENT: &str = concat!("nb/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the remote news API. Stateless between calls: no retries, no
/// caching, no pagination bookkeeping. The caller supplies the page number.
pub struct NewsClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl NewsClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the client somewhere other than the production API.
    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid base URL {base_url}: {e}")))?;

        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Fetch one page of the given feed.
    pub async fn fetch_news(&self, feed: &Feed, page: u32) -> Result<NewsResponse> {
        let url = request_url(&self.base_url, feed, page)?;
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        decode_response(status, &body)
    }
}

fn request_url(base_url: &Url, feed: &Feed, page: u32) -> Result<Url> {
    let (endpoint, params) = match feed {
        Feed::TopNews {
            country,
            category,
            keywords,
        } => (
            "top-headlines",
            vec![
                ("country", country),
                ("category", category),
                ("q", keywords),
            ],
        ),
        Feed::AllNews {
            keywords,
            domains,
            from,
            to,
            language,
        } => (
            "everything",
            vec![
                ("q", keywords),
                ("domains", domains),
                ("from", from),
                ("to", to),
                ("language", language),
            ],
        ),
    };

    let mut url = base_url
        .join(endpoint)
        .map_err(|e| Error::Config(format!("invalid request URL: {e}")))?;
    {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in params {
            if let Some(value) = value {
                pairs.append_pair(name, value);
            }
        }
        pairs.append_pair("page", &page.to_string());
    }

    Ok(url)
}

/// Error envelope the news API sends alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

fn decode_response(status: StatusCode, body: &[u8]) -> Result<NewsResponse> {
    if !status.is_success() {
        let message = serde_json::from_slice::<ApiError>(body)
            .ok()
            .map(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("news API request failed (HTTP {status})"));
        return Err(Error::Api(message));
    }

    if body.is_empty() {
        return Err(Error::Api("news API returned an empty response".to_string()));
    }

    serde_json::from_slice(body)
        .map_err(|e| Error::Api(format!("news API returned an unreadable response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse(DEFAULT_BASE_URL).unwrap()
    }

    #[test]
    fn top_news_uses_the_headlines_endpoint() {
        let feed = Feed::TopNews {
            country: Some("us".to_string()),
            category: None,
            keywords: None,
        };

        let url = request_url(&base(), &feed, 1).unwrap();
        assert_eq!(url.path(), "/v2/top-headlines");
        assert_eq!(url.query(), Some("country=us&page=1"));
    }

    #[test]
    fn all_news_uses_the_everything_endpoint() {
        let feed = Feed::AllNews {
            keywords: Some("rust".to_string()),
            domains: Some("example.com".to_string()),
            from: Some("2024-05-01".to_string()),
            to: None,
            language: Some("en".to_string()),
        };

        let url = request_url(&base(), &feed, 3).unwrap();
        assert_eq!(url.path(), "/v2/everything");
        assert_eq!(
            url.query(),
            Some("q=rust&domains=example.com&from=2024-05-01&language=en&page=3")
        );
    }

    #[test]
    fn unset_filters_stay_off_the_query_string() {
        let feed = Feed::TopNews {
            country: None,
            category: None,
            keywords: None,
        };

        let url = request_url(&base(), &feed, 2).unwrap();
        assert_eq!(url.query(), Some("page=2"));
    }

    #[test]
    fn decodes_a_successful_response() {
        let body = br#"{"status":"ok","totalResults":1,"articles":[
            {"title":"T","url":"http://x","source":{"id":"","name":"S"}}
        ]}"#;

        let response = decode_response(StatusCode::OK, body).unwrap();
        assert_eq!(response.total_results, 1);
        assert_eq!(response.articles[0].title, "T");
        assert_eq!(response.articles[0].url, "http://x");
        assert_eq!(response.articles[0].id, None);
    }

    #[test]
    fn an_empty_success_body_is_an_api_error() {
        let err = decode_response(StatusCode::OK, b"").unwrap_err();
        assert!(matches!(err, Error::Api(_)));
    }

    #[test]
    fn an_unreadable_success_body_is_an_api_error() {
        let err = decode_response(StatusCode::OK, b"<html>gateway</html>").unwrap_err();
        assert!(matches!(err, Error::Api(_)));
    }

    #[test]
    fn a_server_error_carries_the_server_message() {
        let body = br#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid"}"#;

        let err = decode_response(StatusCode::INTERNAL_SERVER_ERROR, body).unwrap_err();
        assert_eq!(err.to_string(), "Your API key is invalid");
    }

    #[test]
    fn a_server_error_without_an_envelope_gets_a_fallback_message() {
        let err = decode_response(StatusCode::INTERNAL_SERVER_ERROR, b"boom").unwrap_err();
        match err {
            Error::Api(message) => assert!(message.contains("500")),
            other => panic!("expected an API error, got {other:?}"),
        }
    }
}
