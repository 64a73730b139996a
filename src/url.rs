//! # URL Resolution
//!
//! Computes the "current page" path relative to the configured site root.
//! The result is what the [`Router`](crate::router::Router) matches against.
//!
//! ```rust
//! use frontrouter::url::{RequestContext, SiteConfig, UrlResolver};
//! use http::Method;
//!
//! let site = SiteConfig::new("http://example.com/", true);
//! let request = RequestContext::new(Method::GET, "example.com", "//foo/bar//?x=1");
//! let resolver = UrlResolver::new(&site, &request);
//!
//! assert_eq!(resolver.relative_page_url(false), "foo/bar");
//! assert_eq!(resolver.relative_page_url(true), "foo/bar?x=1");
//! ```

use http::Method;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Runs of slashes collapsed to one
static SLASH_RUN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/{2,}").expect("slash run regex should be valid"));

/// Entry point appended to the site root when pretty URLs are off
const ENTRY_POINT: &str = "index.php";

/// Query prefix carrying the page path when pretty URLs are off
const PAGE_QUERY_PREFIX: &str = "?id=";

/// Site-wide URL settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute site root, e.g. `http://example.com/`
    pub site_url: String,
    /// When false, pages are addressed as `index.php?id=<path>`
    pub pretty_urls: bool,
}

impl SiteConfig {
    pub fn new(site_url: impl Into<String>, pretty_urls: bool) -> Self {
        Self {
            site_url: site_url.into(),
            pretty_urls,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::new("http://localhost/", true)
    }
}

/// The parts of an incoming request URL resolution reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub method: Method,
    /// `Host` header value, port included if present
    pub host: String,
    /// Raw request target: path plus optional `?query`
    pub request_uri: String,
    /// Secure-transport indicator as the front server reports it (`on`/`off`)
    pub https: Option<String>,
}

impl RequestContext {
    pub fn new(method: Method, host: impl Into<String>, request_uri: impl Into<String>) -> Self {
        Self {
            method,
            host: host.into(),
            request_uri: request_uri.into(),
            https: None,
        }
    }

    #[must_use]
    pub fn with_https(mut self, https: impl Into<String>) -> Self {
        self.https = Some(https.into());
        self
    }
}

/// Resolves request URLs against a [`SiteConfig`]
#[derive(Debug, Clone, Copy)]
pub struct UrlResolver<'a> {
    site: &'a SiteConfig,
    request: &'a RequestContext,
}

impl<'a> UrlResolver<'a> {
    pub fn new(site: &'a SiteConfig, request: &'a RequestContext) -> Self {
        Self { site, request }
    }

    /// Site root, with `index.php` appended when pretty URLs are off
    #[must_use]
    pub fn site_url(&self) -> String {
        if self.site.pretty_urls {
            self.site.site_url.clone()
        } else {
            format!("{}{ENTRY_POINT}", self.site.site_url)
        }
    }

    /// Current page path relative to the site root.
    ///
    /// With pretty URLs off the root also covers the `?id=` prefix, so
    /// `index.php?id=users/42` resolves to `users/42`.
    #[must_use]
    pub fn relative_page_url(&self, include_query: bool) -> String {
        let mut root = self.site_url();
        if !self.site.pretty_urls {
            root.push_str(PAGE_QUERY_PREFIX);
        }
        self.current_page_url(Some(&root), include_query)
    }

    /// Current page URL with `root` shaved off.
    ///
    /// Both the request URL and `root` lose everything before their first
    /// `//`, so the protocol never affects the result. Every occurrence of the
    /// root is then removed. The path part is trimmed of leading and trailing
    /// slashes and slash runs are collapsed; the query (after the first `?`)
    /// is appended unchanged when `include_query` is set.
    #[must_use]
    pub fn current_page_url(&self, root: Option<&str>, include_query: bool) -> String {
        let full = format!(
            "{}://{}{}",
            self.url_protocol(),
            self.request.host,
            self.request.request_uri
        );
        let mut url = strip_protocol(&full).unwrap_or(&full).to_owned();

        // A root without `//` strips nothing
        if let Some(root) = root.and_then(strip_protocol) {
            if !root.is_empty() {
                url = url.replace(root, "");
            }
        }

        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (url.as_str(), None),
        };

        let mut resolved = SLASH_RUN_REGEX
            .replace_all(path.trim_matches('/'), "/")
            .into_owned();
        if include_query {
            if let Some(query) = query {
                resolved.push('?');
                resolved.push_str(query);
            }
        }
        resolved
    }

    /// `https` or `http` from the secure-transport indicator.
    ///
    /// `on` (any case) means https and any other value means http. A missing
    /// indicator is reported as https.
    ///
    /// Compatibility: front controllers that read `HTTPS=on` as plain http
    /// (and every other value, missing included, as https) disagree with this
    /// for every explicit value. Only the missing case answers the same. The
    /// protocol is stripped before root removal, so a resolved path is never
    /// affected.
    #[must_use]
    pub fn url_protocol(&self) -> &'static str {
        match self.request.https.as_deref() {
            Some(flag) if flag.eq_ignore_ascii_case("on") => "https",
            Some(_) => "http",
            None => "https",
        }
    }
}

/// Slice starting at the first `//`, or `None` when there is none
fn strip_protocol(url: &str) -> Option<&str> {
    url.find("//").map(|idx| &url[idx..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &str) -> RequestContext {
        RequestContext::new(Method::GET, "example.com", uri)
    }

    #[test]
    fn test_current_page_url_trims_and_collapses() {
        let site = SiteConfig::new("http://example.com/", true);
        let req = request("//foo/bar//?x=1");
        let resolver = UrlResolver::new(&site, &req);
        assert_eq!(
            resolver.current_page_url(Some("http://example.com/"), false),
            "foo/bar"
        );
        assert_eq!(
            resolver.current_page_url(Some("http://example.com/"), true),
            "foo/bar?x=1"
        );
    }

    #[test]
    fn test_current_page_url_without_root_keeps_host() {
        let site = SiteConfig::default();
        let req = request("/a//b/");
        let resolver = UrlResolver::new(&site, &req);
        assert_eq!(resolver.current_page_url(None, false), "example.com/a/b");
    }

    #[test]
    fn test_root_without_double_slash_strips_nothing() {
        let site = SiteConfig::default();
        let req = request("/a");
        let resolver = UrlResolver::new(&site, &req);
        assert_eq!(
            resolver.current_page_url(Some("example.com"), false),
            "example.com/a"
        );
    }

    #[test]
    fn test_protocol_ignores_root_scheme() {
        let site = SiteConfig::new("https://example.com/", true);
        let req = request("/users/42").with_https("off");
        let resolver = UrlResolver::new(&site, &req);
        assert_eq!(resolver.url_protocol(), "http");
        assert_eq!(resolver.relative_page_url(false), "users/42");
    }

    #[test]
    fn test_url_protocol_polarity() {
        let site = SiteConfig::default();
        let on = request("/").with_https("ON");
        let off = request("/").with_https("off");
        let absent = request("/");
        assert_eq!(UrlResolver::new(&site, &on).url_protocol(), "https");
        assert_eq!(UrlResolver::new(&site, &off).url_protocol(), "http");
        assert_eq!(UrlResolver::new(&site, &absent).url_protocol(), "https");
        for other in ["1", "", "true"] {
            let req = request("/").with_https(other);
            assert_eq!(UrlResolver::new(&site, &req).url_protocol(), "http", "HTTPS={other:?}");
        }
    }

    #[test]
    fn test_site_url_entry_point() {
        let req = request("/");
        let pretty = SiteConfig::new("http://example.com/", true);
        let plain = SiteConfig::new("http://example.com/", false);
        assert_eq!(UrlResolver::new(&pretty, &req).site_url(), "http://example.com/");
        assert_eq!(
            UrlResolver::new(&plain, &req).site_url(),
            "http://example.com/index.php"
        );
    }
}
