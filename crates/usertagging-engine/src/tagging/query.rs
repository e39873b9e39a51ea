use crate::codec::{Span, kinds::Mention};

/// An `@query` the user is typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagQuery<'a> {
    /// Range of `@query` in the text, ending at the cursor.
    pub span: Span,
    /// The query without its `@`; empty right after typing `@`.
    pub search: &'a str,
}

/// Finds the `@query` ending at byte offset `cursor`.
///
/// The `@` must start the text or follow whitespace, and no whitespace may
/// sit between it and the cursor. Returns `None` when `cursor` is out of
/// range or not on a char boundary.
pub fn active_query(text: &str, cursor: usize) -> Option<TagQuery<'_>> {
    let before = text.get(..cursor)?;
    let at = before.rfind(Mention::SIGIL)?;
    let search = &before[at + Mention::SIGIL.len_utf8()..];
    if search.chars().any(char::is_whitespace) {
        return None;
    }
    if let Some(prev) = before[..at].chars().next_back()
        && !prev.is_whitespace()
    {
        return None;
    }
    Some(TagQuery {
        span: Span::new(at, cursor),
        search,
    })
}
