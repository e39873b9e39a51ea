//! # Splicing
//!
//! Moves text between its stored form, where mentions are canonical
//! `<<name|route>>` tokens, and its display form, where each mention is an
//! `@name` span carrying a host-defined payload (a styled chip, a click
//! target, ...).
//!
//! Both directions rebuild a new string in a single left-to-right pass over
//! ordered spans; nothing is edited in place.

use crate::{
    codec::{MentionToken, Span, scan},
    error::CodecError,
};

/// A located mention that knows its canonical encoding.
pub trait CanonicalSpan {
    /// Range of the displayed mention in the buffer text.
    fn span(&self) -> Span;
    /// The `<<name|route>>` text the span collapses to.
    fn canonical(&self) -> &str;
}

/// A mention span with no payload, e.g. one reported back by a host UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedMention {
    pub span: Span,
    pub canonical: String,
}

impl CanonicalSpan for LocatedMention {
    fn span(&self) -> Span {
        self.span
    }

    fn canonical(&self) -> &str {
        &self.canonical
    }
}

/// A displayed mention inside a [`StyledBuffer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan<T> {
    /// Range of the `@name` text in the buffer.
    pub span: Span,
    pub token: MentionToken,
    /// Pre-computed canonical encoding of `token`.
    pub canonical: String,
    /// Whatever the host's render callback produced.
    pub payload: T,
}

impl<T> CanonicalSpan for StyledSpan<T> {
    fn span(&self) -> Span {
        self.span
    }

    fn canonical(&self) -> &str {
        &self.canonical
    }
}

/// Display text plus the mention spans located in it, ordered by start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledBuffer<T> {
    text: String,
    spans: Vec<StyledSpan<T>>,
}

impl<T> StyledBuffer<T> {
    /// A buffer of plain text with no mentions.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &[StyledSpan<T>] {
        &self.spans
    }

    pub fn into_parts(self) -> (String, Vec<StyledSpan<T>>) {
        (self.text, self.spans)
    }

    /// Tokens of every mention in the buffer, in display order.
    pub fn mentions(&self) -> impl Iterator<Item = &MentionToken> {
        self.spans.iter().map(|s| &s.token)
    }

    /// Replaces `range` of the display text with a mention chip for `token`.
    ///
    /// Used when the user picks someone from the suggestion list: `range` is
    /// the `@query` they typed. Spans after `range` shift by the change in
    /// length. Fails if `range` is out of bounds or cuts into an existing
    /// mention.
    pub fn replace_with_mention(
        &mut self,
        range: Span,
        token: MentionToken,
        payload: T,
    ) -> Result<Span, CodecError> {
        if range.start > range.end || range.slice(&self.text).is_none() {
            return Err(CodecError::SpanOutOfBounds {
                span: range,
                len: self.text.len(),
            });
        }
        if let Some(hit) = self.spans.iter().find(|s| s.span.overlaps(range)) {
            return Err(CodecError::OverlappingSpans {
                previous: hit.span,
                next: range,
            });
        }

        let display = token.mention_text();
        let inserted = Span::new(range.start, range.start + display.len());
        self.text.replace_range(range.start..range.end, &display);

        let shift = |offset: usize| offset - range.len() + display.len();
        for span in self.spans.iter_mut().filter(|s| s.span.start >= range.end) {
            span.span = Span::new(shift(span.span.start), shift(span.span.end));
        }

        let at = self.spans.partition_point(|s| s.span.start < inserted.start);
        log::debug!("tagged {} at {:?}", token, inserted);
        self.spans.insert(
            at,
            StyledSpan {
                span: inserted,
                canonical: token.encode(),
                token,
                payload,
            },
        );
        Ok(inserted)
    }

    /// Stored form of the buffer.
    pub fn collapse(&self) -> Result<String, CodecError> {
        collapse_styled_spans_to_canonical_text(&self.text, &self.spans)
    }
}

/// Decodes every mention in `text` for display.
///
/// Each canonical token becomes `@name` in the buffer text, with a
/// [`StyledSpan`] holding the payload `render` built for it. Text outside
/// tokens is copied unchanged. Absent text gives an empty buffer.
pub fn replace_all_with_placeholder<T, F>(text: Option<&str>, mut render: F) -> StyledBuffer<T>
where
    F: FnMut(&MentionToken) -> T,
{
    let Some(text) = text else {
        return StyledBuffer::plain(String::new());
    };

    let mut out = String::with_capacity(text.len());
    let mut spans = Vec::new();
    let mut last = 0;

    for m in scan(text) {
        out.push_str(&text[last..m.span.start]);
        let start = out.len();
        out.push_str(&m.token.mention_text());
        let payload = render(&m.token);
        spans.push(StyledSpan {
            span: Span::new(start, out.len()),
            canonical: m.token.encode(),
            token: m.token,
            payload,
        });
        last = m.span.end;
    }
    out.push_str(&text[last..]);

    log::trace!("decoded {} mention(s) for display", spans.len());
    StyledBuffer { text: out, spans }
}

/// Rebuilds the stored form of a display buffer.
///
/// Plain text between spans is copied verbatim and each span is replaced by
/// its canonical encoding. Spans may be given in any order. Overlapping spans
/// are a caller bug and fail with [`CodecError::OverlappingSpans`]; spans
/// outside `text` fail with [`CodecError::SpanOutOfBounds`].
pub fn collapse_styled_spans_to_canonical_text<S: CanonicalSpan>(
    text: &str,
    spans: &[S],
) -> Result<String, CodecError> {
    let mut ordered: Vec<&S> = spans.iter().collect();
    ordered.sort_by_key(|s| s.span());

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut previous: Option<Span> = None;

    for s in ordered {
        let span = s.span();
        if let Some(prev) = previous
            && span.start < prev.end
        {
            log::error!("overlapping mention spans {prev:?} and {span:?}");
            return Err(CodecError::OverlappingSpans {
                previous: prev,
                next: span,
            });
        }
        if span.start > span.end || span.slice(text).is_none() {
            return Err(CodecError::SpanOutOfBounds {
                span,
                len: text.len(),
            });
        }
        out.push_str(&text[last..span.start]);
        out.push_str(s.canonical());
        last = span.end;
        previous = Some(span);
    }
    out.push_str(&text[last..]);
    Ok(out)
}
