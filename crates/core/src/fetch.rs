//! Page retrieval from URLs, files, and stdin.
//!
//! This module provides functions for retrieving article HTML from
//! HTTP/HTTPS URLs, local files, and standard input.

use std::fs;
use std::path::PathBuf;

#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
#[cfg(feature = "fetch")]
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, COOKIE, USER_AGENT};
use url::Url;

use crate::{Result, ScribeError};

/// HTTP client configuration for fetching pages.
///
/// Controls timeout, user agent, and the optional session cookie sent with
/// every request.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// User-Agent header.
    pub user_agent: String,
    /// Raw `Cookie` header value, if any.
    pub cookie: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36"
                .to_string(),
            cookie: None,
        }
    }
}

/// Parse and check an http(s) URL.
pub fn parse_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| ScribeError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ScribeError::InvalidUrl(format!(
            "unsupported scheme `{}` (expected http or https)",
            other
        ))),
    }
}

/// Fetches HTML content from a URL.
///
/// Performs a GET request with browser-like headers and the configured
/// cookie, follows redirects, and fails on non-success status codes.
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = parse_url(url)?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(ScribeError::HttpError)?;

    let mut request = client
        .get(parsed_url)
        .header(USER_AGENT, &config.user_agent)
        .header(ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .header(ACCEPT_LANGUAGE, "zh-CN,zh;q=0.9,en;q=0.8");

    if let Some(cookie) = &config.cookie {
        request = request.header(COOKIE, cookie);
    }

    tracing::debug!(url, timeout = config.timeout, cookie = config.cookie.is_some(), "fetching page");

    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            ScribeError::Timeout { timeout: config.timeout }
        } else {
            ScribeError::HttpError(e)
        }
    })?;

    let content = response.error_for_status()?.text().await?;

    Ok(content)
}

/// Reads HTML content from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(ScribeError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(ScribeError::from)
    }
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(ScribeError::from)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 30);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert!(config.cookie.is_none());
    }

    #[test]
    fn test_parse_url() {
        assert!(parse_url("https://zhuanlan.example.com/p/1").is_ok());
        assert!(matches!(parse_url("not-a-url"), Err(ScribeError::InvalidUrl(_))));
        assert!(matches!(parse_url("ftp://example.com/x"), Err(ScribeError::InvalidUrl(_))));
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_fetch_url_invalid() {
        let config = FetchConfig::default();
        let result = tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(fetch_url("not-a-url", &config));

        assert!(matches!(result, Err(ScribeError::InvalidUrl(_))));
    }

    #[test]
    fn test_fetch_file_not_found() {
        let result = fetch_file("/nonexistent/path/file.html");
        assert!(matches!(result, Err(ScribeError::FileNotFound(_))));
    }

    #[test]
    fn test_fetch_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<p>hi</p>").unwrap();

        let content = fetch_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(content, "<p>hi</p>");
    }
}
