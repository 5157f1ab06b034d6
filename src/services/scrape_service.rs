use reqwest::header::CONTENT_TYPE;
use scraper::{ElementRef, Html, Node, Selector};
use std::time::Duration;
use url::Url;

use crate::{
    config::Config,
    constants::{prompts::floor_char_boundary, MIN_PAGE_TEXT_LEN},
    errors::AppResult,
};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Subtrees that carry no page content.
const SKIP_TAGS: &[&str] = &["script", "style", "nav", "header", "footer", "noscript", "svg"];
/// Elements that imply a line break in the extracted text.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "h1", "h2", "h3", "h4", "h5", "h6", "li", "tr", "article", "section",
    "main", "blockquote", "pre",
];

/// Best-effort page fetcher. Every failure mode (bad URL, network error,
/// non-2xx, non-HTML body) collapses to an empty string; nothing here is
/// ever fatal to the search pipeline.
pub struct PageFetcher {
    http: reqwest::Client,
    courtesy_delay: Duration,
    text_limit: usize,
}

impl PageFetcher {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.scrape_timeout_secs))
            .build()
            .map_err(|e| {
                crate::errors::AppError::InternalError(format!("HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            courtesy_delay: Duration::from_millis(config.scrape_delay_ms),
            text_limit: config.page_text_limit,
        })
    }

    /// Fetches a program page and returns cleaned plain text, or an empty
    /// string on any failure.
    pub async fn fetch_text(&self, url: &str) -> String {
        match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => {}
            _ => {
                log::warn!("skipping scrape of malformed url: {}", url);
                return String::new();
            }
        }

        // Courtesy pause toward the origin server before every fetch.
        tokio::time::sleep(self.courtesy_delay).await;

        let response = match self.http.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                log::warn!("fetch failed for {}: {}", url, e);
                return String::new();
            }
        };

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                log::warn!("non-success status for {}: {}", url, e);
                return String::new();
            }
        };

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !content_type.contains("html") {
                log::warn!("skipping non-HTML content type '{}' for {}", content_type, url);
                return String::new();
            }
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                log::warn!("unreadable body for {}: {}", url, e);
                return String::new();
            }
        };

        html_to_text(&body, self.text_limit)
    }
}

/// Extracts readable text from an HTML document. Prefers a structurally
/// identifiable content region (`main`, `article`, `[role="main"]`) and
/// falls back to `body` with boilerplate subtrees skipped.
pub fn html_to_text(html: &str, max_chars: usize) -> String {
    let doc = Html::parse_document(html);

    for sel_str in ["main", "article", "[role=\"main\"]"] {
        if let Ok(sel) = Selector::parse(sel_str) {
            if let Some(el) = doc.select(&sel).next() {
                let text = clean_lines(&element_text(&el), max_chars);
                // A region thinner than the extraction threshold is likely a
                // shell element; fall through to the body.
                if text.len() >= MIN_PAGE_TEXT_LEN {
                    return text;
                }
            }
        }
    }

    if let Ok(body_sel) = Selector::parse("body") {
        if let Some(body) = doc.select(&body_sel).next() {
            return clean_lines(&element_text(&body), max_chars);
        }
    }

    let raw: String = doc.root_element().text().collect();
    clean_lines(&raw, max_chars)
}

fn element_text(el: &ElementRef<'_>) -> String {
    let mut buf = String::new();
    collect_text(el, &mut buf);
    buf
}

fn collect_text(node: &ElementRef<'_>, buf: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => buf.push_str(text),
            Node::Element(el) => {
                let tag = el.name();
                if SKIP_TAGS.contains(&tag) {
                    continue;
                }
                if BLOCK_TAGS.contains(&tag) {
                    buf.push('\n');
                }
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_text(&child_ref, buf);
                }
            }
            _ => {}
        }
    }
}

/// Collapses whitespace within lines, drops near-empty lines, and truncates
/// to `max_chars` on a character boundary.
fn clean_lines(text: &str, max_chars: usize) -> String {
    let cleaned = text
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| line.chars().count() > 3)
        .collect::<Vec<_>>()
        .join("\n");

    let end = floor_char_boundary(&cleaned, max_chars);
    cleaned[..end].to_string()
}
