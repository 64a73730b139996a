//! # frontrouter
//!
//! **frontrouter** is a minimal front-controller for Rust: an ordered table of
//! regex route patterns, first-match-wins dispatch with positional parameters,
//! optional method gating, and a helper that turns the current request URL
//! into a path relative to the site root.
//!
//! ## Architecture
//!
//! - **[`router`]** - Ordered route table, pattern compilation and matching
//! - **[`dispatcher`]** - Handler invocation, method gating, content resolution
//! - **[`handler`]** - Handler kinds, route results and the output sink
//! - **[`url`]** - Site-relative URL normalization
//! - **[`config`]** - YAML configuration with environment overrides
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `frontrouter` command-line shell
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Url as UrlResolver
//!     participant Router
//!     participant Dispatcher
//!     participant Handler
//!
//!     Caller->>Url: relative_page_url(false)
//!     Url-->>Caller: "users/42"
//!     Caller->>Router: dispatch(GET, "users/42")
//!     Router->>Router: Compile patterns in order<br/>first match wins
//!
//!     alt No Route Match
//!         Router-->>Caller: None
//!     end
//!
//!     Router->>Dispatcher: MatchResult (pattern, ["42"], handler)
//!     Dispatcher->>Handler: invoke(["42"], sink)
//!     Handler-->>Dispatcher: RouteResult { method, content }
//!
//!     alt Method Mismatch
//!         Dispatcher-->>Caller: None
//!     end
//!
//!     Dispatcher->>Handler: content producer(["42"], sink)
//!     Dispatcher->>Dispatcher: sink text if non-empty<br/>else returned content
//!     Dispatcher-->>Caller: Dispatched { pattern, params, method, content }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use frontrouter::handler::{Handler, RouteResult};
//! use frontrouter::router::Router;
//! use frontrouter::url::{RequestContext, SiteConfig, UrlResolver};
//! use http::Method;
//!
//! let mut router = Router::new();
//! router.add_routes([
//!     (
//!         "users/([0-9]+)",
//!         Handler::native(|_, _| RouteResult::producer(|args, _| format!("user {}", args[0]))),
//!     ),
//!     (
//!         "users/([0-9]+)/delete",
//!         Handler::native(|args, out| {
//!             out.push_str(&format!("deleted {}", args[0]));
//!             RouteResult::new().with_method("POST")
//!         }),
//!     ),
//! ]);
//!
//! let site = SiteConfig::new("http://example.com/", true);
//! let request = RequestContext::new(Method::GET, "example.com", "/users/42/");
//! let path = UrlResolver::new(&site, &request).relative_page_url(false);
//!
//! let hit = router.dispatch(&request.method, &path).unwrap();
//! assert_eq!(hit.content, "user 42");
//! assert!(router.dispatch(&Method::GET, "users/42/delete").is_none());
//! ```
//!
//! ## Patterns Are Regexes
//!
//! Only `/` is escaped when a pattern is compiled. `.`, `+`, `(` and friends
//! keep their regex meaning; see [`Router::compile_pattern`](router::Router::compile_pattern).

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod logging;
pub mod router;
pub mod url;

pub use config::FrontConfig;
pub use dispatcher::{DispatchError, Dispatched};
pub use error::RouterError;
pub use handler::{Content, Handler, OutputSink, RouteResult};
pub use router::{MatchResult, Router};
pub use url::{RequestContext, SiteConfig, UrlResolver};
