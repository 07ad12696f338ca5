//! External content sources: encyclopedia summaries, jokes, book lookups.
//!
//! One [`WebSearcher`] owns the HTTP client and the shared outbound rate
//! limiter. Every fetch is a single attempt with no retries; transport
//! errors, bad statuses, unparseable payloads, and missing fields all
//! degrade to `None` at the [`WebSearcher::search`] boundary, so "nothing
//! found" and "the network failed" look the same to the caller.

use crate::classifier::Intent;
use crate::config::WebConfig;
use crate::rate_limit::RateLimiter;
use anyhow::{Context, Result};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Words dropped when shaping a prompt into a lookup topic.
const TOPIC_STOPWORDS: &[&str] = &[
    "what", "who", "where", "when", "is", "are", "the", "a", "an", "of", "in", "on",
];

/// Errors at the fetch boundary. These never escape `search`.
#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
}

/// Rate-limited client for the three external answer sources.
pub struct WebSearcher {
    http: reqwest::Client,
    limiter: RateLimiter,
    cfg: WebConfig,
}

impl WebSearcher {
    pub fn new(cfg: WebConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(&cfg.user_agent)
            .connect_timeout(Duration::from_millis(cfg.connect_timeout_ms))
            .timeout(Duration::from_millis(cfg.request_timeout_ms))
            .build()
            .context("failed to build HTTP client")?;
        let limiter = RateLimiter::new(Duration::from_millis(cfg.min_request_interval_ms));
        Ok(Self { http, limiter, cfg })
    }

    /// Fetch an answer for `intent`, or `None` when the source has nothing
    /// or anything goes wrong along the way.
    ///
    /// `Joke` ignores the prompt entirely. `Book` and `Knowledge` shape it
    /// into a lookup topic first and skip the network when nothing
    /// survives sanitization.
    pub async fn search(&self, intent: Intent, prompt: &str) -> Option<String> {
        let outcome = match intent {
            Intent::Joke => self.fetch_joke().await,
            Intent::Book => match sanitize_topic(prompt) {
                Some(topic) => self.fetch_book(&topic).await,
                None => return None,
            },
            Intent::Knowledge => match sanitize_topic(prompt) {
                Some(topic) => self.fetch_wiki_summary(&topic).await,
                None => return None,
            },
            Intent::Unknown => return None,
        };

        match outcome {
            Ok(answer) => answer,
            Err(e) => {
                debug!("External fetch failed, degrading to no answer: {}", e);
                None
            }
        }
    }

    async fn fetch_wiki_summary(&self, topic: &str) -> Result<Option<String>, FetchError> {
        let url = format!("{}{}", self.cfg.wiki_summary_url, urlencoding::encode(topic));
        let doc = self.get_json(&url).await?;
        Ok(render_wiki_summary(topic, &doc))
    }

    async fn fetch_joke(&self) -> Result<Option<String>, FetchError> {
        let doc = self.get_json(&self.cfg.joke_url).await?;
        Ok(render_joke(&doc))
    }

    async fn fetch_book(&self, topic: &str) -> Result<Option<String>, FetchError> {
        let url = format!(
            "{}{}&limit=1",
            self.cfg.book_search_url,
            urlencoding::encode(topic)
        );
        let doc = self.get_json(&url).await?;
        Ok(render_book(&doc, &self.cfg.book_cover_url))
    }

    /// GET `url` and parse the body as JSON. Rate-limited.
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        self.limiter.acquire().await;

        debug!("Fetching {}", url);
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }
        Ok(response.json().await?)
    }
}

/// Shape a prompt into an encyclopedia/book lookup key.
///
/// Keeps ASCII alphanumerics, parentheses and whitespace, drops question
/// stopwords, Title_Cases the remaining words and joins them with
/// underscores. Returns `None` when nothing survives.
fn sanitize_topic(prompt: &str) -> Option<String> {
    let cleaned: String = prompt
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '(' || *c == ')' || c.is_whitespace())
        .collect();

    let topic = cleaned
        .split_whitespace()
        .filter(|w| !TOPIC_STOPWORDS.contains(w))
        .map(capitalize)
        .collect::<Vec<_>>()
        .join("_");

    if topic.is_empty() {
        None
    } else {
        Some(topic)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Markdown for an encyclopedia summary payload: the extract, then image,
/// article link and license line when present. `None` when the extract is
/// missing or blank.
fn render_wiki_summary(topic: &str, doc: &Value) -> Option<String> {
    let extract = doc.get("extract").and_then(Value::as_str).unwrap_or("");
    if extract.trim().is_empty() {
        return None;
    }

    let image_url = doc
        .pointer("/originalimage/source")
        .and_then(Value::as_str)
        .unwrap_or("");
    let page_url = doc
        .pointer("/content_urls/desktop/page")
        .and_then(Value::as_str)
        .unwrap_or("");

    let mut result = String::from(extract);
    if !image_url.is_empty() {
        result.push_str(&format!("<br>![{}]({})", topic, image_url));
    }
    if !page_url.is_empty() {
        result.push_str(&format!("<br>Source: [Wikipedia Article]({})", page_url));
    }
    result.push_str("<br>*(Information from Wikipedia, CC BY-SA 3.0)*");
    Some(result)
}

/// Markdown for a joke payload: single jokes verbatim, two-part jokes as
/// setup and delivery on separate lines, both with the attribution line.
/// `None` for any other shape.
fn render_joke(doc: &Value) -> Option<String> {
    let joke = match doc.get("type").and_then(Value::as_str) {
        Some("single") => doc.get("joke").and_then(Value::as_str)?.to_string(),
        Some("twopart") => {
            let setup = doc.get("setup").and_then(Value::as_str).unwrap_or("");
            let delivery = doc.get("delivery").and_then(Value::as_str).unwrap_or("");
            format!("{}<br>{}", setup, delivery)
        }
        _ => return None,
    };
    Some(format!("{}<br>*(Joke from JokeAPI, free to use)*", joke))
}

/// Markdown for the first book hit: title heading, then author, year,
/// cover and source link when present, plus the attribution line. `None`
/// when there are no hits or the first has no title.
fn render_book(doc: &Value, cover_base_url: &str) -> Option<String> {
    let book = doc.get("docs").and_then(Value::as_array)?.first()?;

    let title = book.get("title").and_then(Value::as_str).unwrap_or("");
    if title.trim().is_empty() {
        return None;
    }

    let author = book
        .pointer("/author_name/0")
        .and_then(Value::as_str)
        .unwrap_or("");
    let year = number_or_string(book.get("first_publish_year"));
    let cover_id = number_or_string(book.get("cover_i"));
    let work_key = book.get("key").and_then(Value::as_str).unwrap_or("");

    let mut result = format!("### {}", title);
    if !author.is_empty() {
        result.push_str(&format!("<br>**Author:** {}", author));
    }
    if !year.is_empty() {
        result.push_str(&format!("<br>**First Published:** {}", year));
    }
    if !cover_id.is_empty() {
        result.push_str(&format!(
            "<br>![{} Cover]({}{}-L.jpg)",
            title, cover_base_url, cover_id
        ));
    }
    if !work_key.is_empty() {
        result.push_str(&format!(
            "<br>Source: [Open Library](https://openlibrary.org{})",
            work_key
        ));
    }
    result.push_str("<br>*(Information from Open Library — Free & Open API)*");
    Some(result)
}

/// Stringify a JSON field that the upstream API serves as either a number
/// or a string. Empty string when absent.
fn number_or_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}
