//! Router core: the ordered route table and first-match lookup.

use http::Method;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::config::FrontConfig;
use crate::dispatcher::{self, DispatchError, Dispatched};
use crate::error::RouterError;
use crate::handler::Handler;

/// Result of matching a path against the route table
///
/// Borrowed from the router; produced per lookup and never stored.
#[derive(Debug, Clone)]
pub struct MatchResult<'a> {
    /// Pattern of the first route that matched
    pub pattern: &'a str,
    /// Parenthesized captures in left-to-right order (whole match excluded).
    /// A group that did not participate in the match yields an empty string.
    pub params: Vec<String>,
    /// Handler registered for `pattern`
    pub handler: &'a Handler,
}

/// Ordered table of route patterns and their handlers.
///
/// Insertion order is match priority: [`Router::find_matched_route`] returns
/// the earliest registered pattern that matches, even when a later pattern is
/// more specific.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<(String, Handler)>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a router from the `routes` section of a config file.
    ///
    /// Each entry becomes a [`Handler::Source`]; file order is match order.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Template`] when a route's source does not compile.
    pub fn from_config(config: &FrontConfig) -> Result<Self, RouterError> {
        let mut router = Self::new();
        for route in &config.routes {
            router.add_route(&route.pattern, Handler::from_source(&route.source)?);
        }

        // RT5: Routing table loaded
        info!(
            routes_count = router.len(),
            routes_summary = ?router.patterns().take(10).collect::<Vec<_>>(),
            "Routing table loaded"
        );
        Ok(router)
    }

    /// Register `handler` for `pattern`.
    ///
    /// Re-registering an existing pattern replaces its handler but keeps its
    /// position in match order. The pattern is not validated here; a pattern
    /// that fails to compile is skipped at match time.
    pub fn add_route(&mut self, pattern: impl Into<String>, handler: Handler) {
        let pattern = pattern.into();
        if let Some(slot) = self.routes.iter_mut().find(|(p, _)| *p == pattern) {
            debug!(route_pattern = %pattern, "Replacing handler for registered route");
            slot.1 = handler;
        } else {
            debug!(route_pattern = %pattern, position = self.routes.len(), "Registering route");
            self.routes.push((pattern, handler));
        }
    }

    /// Register every `(pattern, handler)` pair in iteration order
    pub fn add_routes<I, P>(&mut self, routes: I)
    where
        I: IntoIterator<Item = (P, Handler)>,
        P: Into<String>,
    {
        for (pattern, handler) in routes {
            self.add_route(pattern, handler);
        }
    }

    /// Registered routes in match order
    pub fn registered_routes(&self) -> impl ExactSizeIterator<Item = (&str, &Handler)> + '_ {
        self.routes.iter().map(|(p, h)| (p.as_str(), h))
    }

    /// Registered patterns in match order
    pub fn patterns(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.routes.iter().map(|(p, _)| p.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Compile a route pattern into an anchored regex.
    ///
    /// Every `/` is escaped and the result is wrapped as `^pattern$`. No other
    /// character is escaped: a pattern is a regex body, not a literal path, so
    /// `.` matches any character and `users/(\d+)` captures a number.
    /// Callers wanting literal text must escape metacharacters themselves.
    ///
    /// # Errors
    ///
    /// Returns the regex error when the pattern is not a valid regex.
    pub fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
        let mut expr = String::with_capacity(pattern.len() + pattern.matches('/').count() + 2);
        expr.push('^');
        for ch in pattern.chars() {
            if ch == '/' {
                expr.push_str("\\/");
            } else {
                expr.push(ch);
            }
        }
        expr.push('$');
        Regex::new(&expr)
    }

    /// Find the first registered route whose pattern matches `path`.
    ///
    /// Patterns are compiled on every call. A pattern that fails to compile is
    /// logged and skipped; matching continues with the next route.
    #[must_use]
    pub fn find_matched_route(&self, path: &str) -> Option<MatchResult<'_>> {
        // RT1: Route match attempt
        debug!(path = %path, routes_count = self.routes.len(), "Route match attempt");

        for (pattern, handler) in &self.routes {
            let regex = match Self::compile_pattern(pattern) {
                Ok(regex) => regex,
                Err(e) => {
                    // RT2: Malformed pattern skipped
                    warn!(route_pattern = %pattern, error = %e, "Skipping malformed route pattern");
                    continue;
                }
            };

            if let Some(captures) = regex.captures(path) {
                let params = captures
                    .iter()
                    .skip(1)
                    .map(|group| group.map(|m| m.as_str().to_owned()).unwrap_or_default())
                    .collect();

                // RT3: Route matched
                debug!(path = %path, route_pattern = %pattern, "Route matched");
                return Some(MatchResult {
                    pattern,
                    params,
                    handler,
                });
            }
        }

        // RT4: No route found
        debug!(path = %path, "No route matched");
        None
    }

    /// Dispatch `path` and return the resolved content.
    ///
    /// Returns `None` when no route matches, when the matched handler requires
    /// another method, or when a source handler fails to render. Use
    /// [`Router::try_dispatch`] to tell these apart.
    #[must_use]
    pub fn dispatch(&self, method: &Method, path: &str) -> Option<Dispatched> {
        self.try_dispatch(method, path).ok()
    }

    /// Dispatch `path`, reporting why no content was produced.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::NoMatch`] when no pattern matches `path`
    /// - [`DispatchError::MethodMismatch`] when the handler requires another method
    /// - [`DispatchError::Render`] when a source handler fails to render
    pub fn try_dispatch(&self, method: &Method, path: &str) -> Result<Dispatched, DispatchError> {
        let matched = self
            .find_matched_route(path)
            .ok_or_else(|| DispatchError::NoMatch {
                path: path.to_owned(),
            })?;
        dispatcher::execute(matched, method)
    }
}
