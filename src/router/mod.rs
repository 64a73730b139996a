//! # Router Module
//!
//! The router module holds the ordered route table and resolves request paths
//! against it.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Registering route patterns and their handlers, in priority order
//! - Compiling patterns into anchored regexes
//! - Finding the first registered pattern matching a path
//! - Extracting positional capture groups as parameters
//! - Handing the match to the [`dispatcher`](crate::dispatcher)
//!
//! ## Patterns
//!
//! A pattern is a regex body. At match time every `/` is escaped and the
//! pattern is anchored as `^pattern$`, so `users/([0-9]+)` matches
//! `users/42` and captures `"42"`. Nothing else is escaped.
//!
//! ## Matching
//!
//! Matching is first-match-wins in registration order. Re-registering a
//! pattern replaces its handler without moving it. Patterns are compiled on
//! every lookup; a pattern that fails to compile is skipped.
//!
//! ## Example
//!
//! ```rust
//! use frontrouter::handler::{Handler, RouteResult};
//! use frontrouter::router::Router;
//! use http::Method;
//!
//! let mut router = Router::new();
//! router.add_route(
//!     "users/([0-9]+)",
//!     Handler::native(|_, _| RouteResult::producer(|args, _| args[0].clone())),
//! );
//!
//! let hit = router.dispatch(&Method::GET, "users/42").unwrap();
//! assert_eq!(hit.content, "42");
//! assert!(router.dispatch(&Method::GET, "users/abc").is_none());
//! ```

mod core;

pub use self::core::{MatchResult, Router};
