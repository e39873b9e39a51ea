use thiserror::Error;

use crate::codec::Span;

/// Errors raised by the mention codec.
///
/// Scanning never fails: text without mentions simply yields no matches.
/// These variants cover encoding, route inspection and buffer collapse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("display name {name:?} is empty or contains a reserved delimiter (<, > or |)")]
    InvalidDisplayName { name: String },

    #[error("route {route:?} is not of the form route://<host>/<id>")]
    MalformedRoute { route: String },

    #[error("token body {body:?} has no display name / route separator")]
    MalformedToken { body: String },

    #[error("mention span {next:?} overlaps {previous:?}")]
    OverlappingSpans { previous: Span, next: Span },

    #[error("mention span {span:?} is outside a text of {len} bytes or splits a character")]
    SpanOutOfBounds { span: Span, len: usize },
}
