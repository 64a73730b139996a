//! # Handler Module
//!
//! Handlers are the units a route pattern is mapped to. A handler receives the
//! positional parameters captured by the route pattern together with an
//! [`OutputSink`], and produces a [`RouteResult`] describing the required
//! HTTP method (if any) and how the response content is obtained.
//!
//! ## Handler Kinds
//!
//! - [`Handler::Native`] wraps a Rust closure.
//! - [`Handler::Source`] wraps template text. The text is compiled once with
//!   minijinja when the handler is constructed and rendered into the sink on
//!   every invocation, with the captured parameters exposed as `args`.
//!
//! ```rust
//! use frontrouter::handler::{Handler, RouteResult};
//!
//! let native = Handler::native(|args, out| {
//!     out.push_str(&format!("user {}", args[0]));
//!     RouteResult::new()
//! });
//!
//! let source = Handler::from_source("user {{ args[0] }}").unwrap();
//! assert!(native.is_native());
//! assert!(!source.is_native());
//! ```

use std::fmt;
use std::sync::Arc;

use minijinja::{context, Environment};
use tracing::debug;

use crate::error::RouterError;

/// Template name used for the single template held by a source handler
const SOURCE_TEMPLATE: &str = "handler";

/// Signature of a native handler
pub type HandlerFn = dyn Fn(&[String], &mut OutputSink) -> RouteResult + Send + Sync;

/// Signature of a deferred content producer returned in [`Content::Producer`]
pub type ContentFn = dyn Fn(&[String], &mut OutputSink) -> String + Send + Sync;

/// Text writer handed to handlers during dispatch.
///
/// Anything written here takes precedence over the content a handler returns:
/// if the sink is non-empty after the handler and its content producer ran,
/// the sink's text becomes the response content.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OutputSink {
    buf: String,
}

impl OutputSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text to the sink
    pub fn push_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

impl fmt::Write for OutputSink {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.push_str(s);
        Ok(())
    }
}

/// How a route's content is obtained after method gating succeeded
#[derive(Clone, Default)]
pub enum Content {
    /// No content value; only sink output can supply the response
    #[default]
    None,
    /// Invoked with the same parameters (and sink) after method gating
    Producer(Arc<ContentFn>),
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::None => f.write_str("None"),
            Content::Producer(_) => f.write_str("Producer(<fn>)"),
        }
    }
}

/// Structured value produced by invoking a [`Handler`]
#[derive(Debug, Clone, Default)]
pub struct RouteResult {
    /// Required request method, compared case-insensitively
    pub method: Option<String>,
    pub content: Content,
}

impl RouteResult {
    /// An empty result: any method, content comes from the sink only
    pub fn new() -> Self {
        Self::default()
    }

    /// Result whose content is produced lazily from the captured parameters
    pub fn producer<F>(f: F) -> Self
    where
        F: Fn(&[String], &mut OutputSink) -> String + Send + Sync + 'static,
    {
        Self {
            method: None,
            content: Content::Producer(Arc::new(f)),
        }
    }

    /// Require the request to use `method` (case-insensitive)
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }
}

/// A compiled template body.
pub struct SourceHandler {
    source: String,
    env: Environment<'static>,
}

impl SourceHandler {
    fn compile(source: &str) -> Result<Self, RouterError> {
        let mut env = Environment::new();
        env.add_template_owned(SOURCE_TEMPLATE, source.to_owned())?;
        debug!(source_len = source.len(), "Compiled handler source");
        Ok(Self {
            source: source.to_owned(),
            env,
        })
    }

    /// Original template text
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    fn render(&self, args: &[String]) -> Result<String, minijinja::Error> {
        self.env
            .get_template(SOURCE_TEMPLATE)?
            .render(context! { args => args })
    }
}

/// Unit of work a route pattern maps to.
#[derive(Clone)]
pub enum Handler {
    /// A Rust closure
    Native(Arc<HandlerFn>),
    /// Template text compiled at construction
    Source(Arc<SourceHandler>),
}

impl Handler {
    pub fn native<F>(f: F) -> Self
    where
        F: Fn(&[String], &mut OutputSink) -> RouteResult + Send + Sync + 'static,
    {
        Handler::Native(Arc::new(f))
    }

    /// Compile template text into a handler.
    ///
    /// The template sees the captured route parameters as `args`. Whatever it
    /// renders is written to the output sink, so it becomes the response
    /// content.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Template`] if the text is not a valid template.
    pub fn from_source(source: &str) -> Result<Self, RouterError> {
        Ok(Handler::Source(Arc::new(SourceHandler::compile(source)?)))
    }

    #[must_use]
    pub fn is_native(&self) -> bool {
        matches!(self, Handler::Native(_))
    }

    /// Short label for listings: `native` or `source`
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Handler::Native(_) => "native",
            Handler::Source(_) => "source",
        }
    }

    /// Run the handler with the captured parameters.
    ///
    /// Source handlers yield an empty [`RouteResult`] after rendering into
    /// `out`.
    ///
    /// # Errors
    ///
    /// A source handler whose template fails while rendering returns the
    /// minijinja error; nothing is written to `out` in that case.
    pub fn invoke(
        &self,
        args: &[String],
        out: &mut OutputSink,
    ) -> Result<RouteResult, minijinja::Error> {
        match self {
            Handler::Native(f) => Ok(f(args, out)),
            Handler::Source(compiled) => {
                let rendered = compiled.render(args)?;
                out.push_str(&rendered);
                Ok(RouteResult::new())
            }
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Native(_) => f.write_str("Native(<fn>)"),
            Handler::Source(compiled) => f.debug_tuple("Source").field(&compiled.source).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_handler_writes_to_sink() {
        let handler = Handler::native(|args, out| {
            out.push_str(&format!("hello {}", args[0]));
            RouteResult::new()
        });
        let mut sink = OutputSink::new();
        let result = handler.invoke(&["bob".to_string()], &mut sink).unwrap();
        assert_eq!(sink.as_str(), "hello bob");
        assert!(result.method.is_none());
        assert!(matches!(result.content, Content::None));
    }

    #[test]
    fn test_source_handler_renders_args() {
        let handler = Handler::from_source("post {{ args[0] }}/{{ args[1] }}").unwrap();
        let mut sink = OutputSink::new();
        handler
            .invoke(&["2024".to_string(), "hello".to_string()], &mut sink)
            .unwrap();
        assert_eq!(sink.into_string(), "post 2024/hello");
    }

    #[test]
    fn test_source_handler_rejects_bad_template() {
        let err = Handler::from_source("{% if %}").unwrap_err();
        assert!(matches!(err, RouterError::Template { .. }));
    }

    #[test]
    fn test_handler_kind_labels() {
        assert_eq!(Handler::native(|_, _| RouteResult::new()).kind(), "native");
        assert_eq!(Handler::from_source("x").unwrap().kind(), "source");
    }

    #[test]
    fn test_with_method_sets_requirement() {
        let result = RouteResult::producer(|_, _| "body".to_string()).with_method("POST");
        assert_eq!(result.method.as_deref(), Some("POST"));
        assert!(matches!(result.content, Content::Producer(_)));
    }

    #[test]
    fn test_sink_accepts_fmt_write() {
        use std::fmt::Write;

        let mut sink = OutputSink::new();
        write!(sink, "{}-{}", 1, 2).unwrap();
        assert_eq!(sink.as_str(), "1-2");
    }
}
