use std::fmt;
use std::io;
use std::path::PathBuf;

/// Construction and configuration errors.
///
/// Returned while building a [`Router`](crate::router::Router): compiling a
/// template-source handler, or reading and parsing a configuration file.
/// Dispatch itself never produces a `RouterError`; see
/// [`DispatchError`](crate::dispatcher::DispatchError) for that.
#[derive(Debug)]
pub enum RouterError {
    /// A `Handler::Source` body failed to compile as a template
    Template {
        /// Compiler error reported by minijinja
        source: minijinja::Error,
    },
    /// The configuration file could not be read
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
    /// The configuration file is not valid YAML for [`FrontConfig`](crate::config::FrontConfig)
    Config {
        /// Path of the offending file, if it came from disk
        path: Option<PathBuf>,
        /// Underlying parse error
        source: serde_yaml::Error,
    },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::Template { source } => {
                write!(f, "handler source failed to compile: {source}")
            }
            RouterError::Io { path, source } => {
                write!(f, "failed to read config '{}': {source}", path.display())
            }
            RouterError::Config {
                path: Some(path),
                source,
            } => {
                write!(f, "invalid config '{}': {source}", path.display())
            }
            RouterError::Config { path: None, source } => {
                write!(f, "invalid config: {source}")
            }
        }
    }
}

impl std::error::Error for RouterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouterError::Template { source } => Some(source),
            RouterError::Io { source, .. } => Some(source),
            RouterError::Config { source, .. } => Some(source),
        }
    }
}

impl From<minijinja::Error> for RouterError {
    fn from(source: minijinja::Error) -> Self {
        RouterError::Template { source }
    }
}
