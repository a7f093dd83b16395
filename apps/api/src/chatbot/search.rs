//! Web search for the chatbot: keyword search, page scraping and HTML-to-text
//! reduction. The model only ever sees the reduced text.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use scraper::{Html, Node, Selector};
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::ChatbotSettings;

const DUCKDUCKGO_HTML_URL: &str = "https://html.duckduckgo.com/html/";
/// Characters kept from a scraped page.
pub const MAX_PAGE_CHARS: usize = 1000;
/// Characters of page text carried into a search hit.
pub const MAX_HIT_CHARS: usize = 500;
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript"];

/// One scraped search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub url: String,
    pub title: String,
    pub content: String,
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>>;
}

/// Searches DuckDuckGo's HTML endpoint (no key required) and scrapes the
/// first result pages.
pub struct DuckDuckGoSearch {
    client: Client,
}

impl DuckDuckGoSearch {
    pub fn new(settings: &ChatbotSettings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_secs(settings.web_timeout_secs))
            .build()
            .context("failed to build search HTTP client")?;
        Ok(Self { client })
    }

    async fn result_urls(&self, query: &str) -> Result<Vec<Url>> {
        let html = self
            .client
            .get(DUCKDUCKGO_HTML_URL)
            .query(&[("q", query)])
            .send()
            .await
            .context("search request failed")?
            .error_for_status()
            .context("search endpoint returned an error")?
            .text()
            .await?;

        parse_result_links(&html)
    }

    async fn fetch_page(&self, url: &Url) -> Result<Option<PageText>> {
        let response = self.client.get(url.as_str()).send().await?;
        if response.status() != StatusCode::OK {
            debug!("Skipping {url}: status {}", response.status());
            return Ok(None);
        }
        let html = response.text().await?;
        Ok(Some(html_to_text(&html)))
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearch {
    fn name(&self) -> &'static str {
        "duckduckgo"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        let urls = self.result_urls(query).await?;
        let mut hits = Vec::new();

        for url in urls.into_iter().take(max_results) {
            match self.fetch_page(&url).await {
                Ok(Some(page)) => hits.push(SearchHit {
                    url: url.to_string(),
                    title: page.title,
                    content: truncate_chars(&page.content, MAX_HIT_CHARS),
                }),
                Ok(None) => {}
                Err(e) => warn!("Failed to extract content from {url}: {e:#}"),
            }
        }

        Ok(hits)
    }
}

/// Reads result anchors from a DuckDuckGo HTML results page. Redirect links
/// (`/l/?uddg=...`) are resolved to their target; only http(s) URLs survive.
pub fn parse_result_links(html: &str) -> Result<Vec<Url>> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a.result__a")
        .map_err(|e| anyhow::anyhow!("invalid result selector: {e:?}"))?;

    let mut urls: Vec<Url> = Vec::new();
    for anchor in document.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if let Some(url) = resolve_result_href(href) {
            if !urls.contains(&url) {
                urls.push(url);
            }
        }
    }
    Ok(urls)
}

fn resolve_result_href(href: &str) -> Option<Url> {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };
    let url = Url::parse(&absolute).ok()?;

    let target = match url.query_pairs().find(|(key, _)| key == "uddg") {
        Some((_, target)) => Url::parse(&target).ok()?,
        None => url,
    };

    matches!(target.scheme(), "http" | "https")
        .then_some(target)
        .filter(|u| u.host_str().is_some())
}

/// Title and visible text of a web page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageText {
    pub title: String,
    pub content: String,
}

/// Reduces an HTML page to its title and whitespace-normalized visible text,
/// truncated to `MAX_PAGE_CHARS` characters. Text inside script, style and
/// noscript elements is dropped.
pub fn html_to_text(html: &str) -> PageText {
    let document = Html::parse_document(html);

    let title = Selector::parse("title")
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .map(|t| t.text().collect::<String>().trim().to_string())
        })
        .unwrap_or_default();

    let mut raw = String::new();
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map(|el| SKIPPED_ELEMENTS.contains(&el.name()))
                .unwrap_or(false)
        });
        if !hidden {
            raw.push_str(text);
        }
    }

    PageText {
        title,
        content: truncate_chars(&collapse_whitespace(&raw), MAX_PAGE_CHARS),
    }
}

/// Trims every line, splits on runs of two spaces and joins the non-empty
/// chunks with single spaces.
fn collapse_whitespace(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncates on a character boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
