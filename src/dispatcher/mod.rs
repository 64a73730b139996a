//! # Dispatcher Module
//!
//! The dispatcher turns a route match into response content. It runs after the
//! [`Router`](crate::router::Router) has selected the first matching pattern
//! and is responsible for:
//!
//! - Invoking the matched [`Handler`](crate::handler::Handler) with the
//!   captured parameters and a fresh [`OutputSink`](crate::handler::OutputSink)
//! - Method gating: rejecting the dispatch when the handler requires a method
//!   other than the request's (compared case-insensitively)
//! - Content resolution: sink output wins when non-empty, otherwise the
//!   handler's content value is used
//!
//! ## Request Flow
//!
//! 1. Router finds the first pattern matching the path
//! 2. Handler runs with `(params, sink)` and returns a `RouteResult`
//! 3. `RouteResult.method`, if set, must equal the request method
//! 4. A content producer runs with the same `(params, sink)`
//! 5. Final content = sink text if non-empty, else the producer's/literal text
//!
//! ## Error Handling
//!
//! Every failure is "no successful dispatch". [`Router::dispatch`] collapses
//! all [`DispatchError`] variants into `None`; callers that need the reason use
//! [`Router::try_dispatch`].
//!
//! [`Router::dispatch`]: crate::router::Router::dispatch
//! [`Router::try_dispatch`]: crate::router::Router::try_dispatch

mod core;

pub use self::core::{DispatchError, Dispatched};
pub(crate) use self::core::execute;
