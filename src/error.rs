//! Error taxonomy for the search tools

use thiserror::Error;

/// Errors surfaced at the tool boundary.
///
/// Transport-level failures are never exposed verbatim; they are folded into
/// `BackendUnavailable` with enough context (sub-query text, backend message)
/// to debug without leaking internals.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A caller-supplied parameter violated its schema or bounds.
    #[error("invalid argument `{parameter}`: {message}")]
    InvalidArgument {
        parameter: &'static str,
        message: String,
    },

    /// Unrecognized research depth value.
    #[error("unrecognized research depth `{0}` (expected quick, standard or deep)")]
    InvalidDepth(String),

    /// One sub-query's backend call failed (timeout, connection error,
    /// non-success status). Recoverable by the aggregator.
    #[error("backend unavailable for `{query}`: {message}")]
    BackendUnavailable { query: String, message: String },

    /// Every sub-query in a plan failed.
    #[error("all {attempted} planned searches failed")]
    AllSourcesFailed { attempted: usize },
}

impl SearchError {
    pub fn invalid_argument(parameter: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            parameter,
            message: message.into(),
        }
    }

    pub fn backend_unavailable(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            query: query.into(),
            message: message.into(),
        }
    }

    /// Stable kind string for structured tool payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::InvalidDepth(_) => "invalid_depth",
            Self::BackendUnavailable { .. } => "backend_unavailable",
            Self::AllSourcesFailed { .. } => "all_sources_failed",
        }
    }

    /// Name of the offending parameter, for validation errors.
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            Self::InvalidArgument { parameter, .. } => Some(parameter),
            Self::InvalidDepth(_) => Some("depth"),
            _ => None,
        }
    }
}
