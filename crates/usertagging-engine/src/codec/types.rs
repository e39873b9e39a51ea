use serde::{Deserialize, Serialize};

use super::{span::Span, token::MentionToken};

/// A mention token found in a text.
///
/// `span` is end-exclusive: `&text[m.span.start..m.span.end]` is exactly the
/// canonical `<<name|route>>` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionMatch {
    pub span: Span,
    pub token: MentionToken,
}

/// A piece of scanned text: either plain text or a mention.
///
/// A sequence of segments covers the whole input with no gaps, so
/// concatenating the slices of every segment reproduces the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text that isn't part of any mention.
    Text(Span),
    Mention(MentionMatch),
}

impl Segment {
    pub fn span(&self) -> Span {
        match self {
            Segment::Text(sp) => *sp,
            Segment::Mention(m) => m.span,
        }
    }
}

/// A mentioned member as reported to the host: id and `@name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaggedMember {
    pub member_id: String,
    /// Display name with its `@` sigil.
    pub mention: String,
}
