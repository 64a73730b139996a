use std::fmt;

use http::Method;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::handler::{Content, OutputSink};
use crate::router::MatchResult;

/// Successful dispatch: the matched pattern and the resolved content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dispatched {
    /// Pattern of the route that handled the request
    pub pattern: String,
    /// Captured parameters, in capture-group order
    pub params: Vec<String>,
    /// Method the route declared, if it gated on one
    pub method: Option<String>,
    /// Resolved response content
    pub content: String,
}

/// Reason a dispatch did not produce content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No registered pattern matched the path
    NoMatch { path: String },
    /// A route matched but its handler requires a different method
    MethodMismatch {
        pattern: String,
        required: String,
        actual: String,
    },
    /// A source handler's template failed while rendering
    Render { pattern: String, message: String },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::NoMatch { path } => write!(f, "no route matched '{path}'"),
            DispatchError::MethodMismatch {
                pattern,
                required,
                actual,
            } => write!(
                f,
                "route '{pattern}' requires method {required}, request used {actual}"
            ),
            DispatchError::Render { pattern, message } => {
                write!(f, "route '{pattern}' failed to render: {message}")
            }
        }
    }
}

impl std::error::Error for DispatchError {}

/// Run a matched route to completion.
///
/// The sink is owned by this call, so it is dropped on every return path,
/// including method mismatch.
pub(crate) fn execute(matched: MatchResult<'_>, method: &Method) -> Result<Dispatched, DispatchError> {
    let MatchResult {
        pattern,
        params,
        handler,
    } = matched;

    let mut sink = OutputSink::new();

    // D1: Handler invocation
    debug!(
        route_pattern = %pattern,
        handler_kind = handler.kind(),
        params = ?params,
        "Invoking route handler"
    );

    let result = handler.invoke(&params, &mut sink).map_err(|e| {
        // D2: Source handler failed to render
        error!(route_pattern = %pattern, error = %e, "Handler source failed to render");
        DispatchError::Render {
            pattern: pattern.to_owned(),
            message: e.to_string(),
        }
    })?;

    // D3: Method gating
    if let Some(required) = result.method.as_deref() {
        if !required.eq_ignore_ascii_case(method.as_str()) {
            warn!(
                route_pattern = %pattern,
                required_method = %required,
                request_method = %method,
                "Route matched but method was rejected"
            );
            return Err(DispatchError::MethodMismatch {
                pattern: pattern.to_owned(),
                required: required.to_owned(),
                actual: method.as_str().to_owned(),
            });
        }
    }

    // D4: Content resolution, sink output takes precedence.
    // Only a producer yields a candidate; anything else is empty.
    let candidate = match result.content {
        Content::Producer(produce) => produce(&params, &mut sink),
        Content::None => String::new(),
    };

    let (content, content_source) = if sink.is_empty() {
        (candidate, "return")
    } else {
        (sink.into_string(), "sink")
    };

    info!(
        route_pattern = %pattern,
        request_method = %method,
        content_len = content.len(),
        content_source = content_source,
        "Route dispatched"
    );

    Ok(Dispatched {
        pattern: pattern.to_owned(),
        params,
        method: result.method,
        content,
    })
}
