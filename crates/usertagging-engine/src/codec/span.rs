/// A byte range `[start, end)` into a text buffer.
///
/// Matches and styled spans store ranges rather than copied text, so slicing
/// the source with a match's span reproduces the exact canonical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// True when the two ranges share at least one byte.
    #[must_use]
    pub fn overlaps(self, other: Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Slices `text` with this span, or `None` if it is out of range or not
    /// on a char boundary.
    pub fn slice(self, text: &str) -> Option<&str> {
        text.get(self.start..self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_and_empty() {
        assert_eq!(Span::new(3, 8).len(), 5);
        assert!(Span::new(4, 4).is_empty());
        // inverted spans are treated as empty rather than underflowing
        assert_eq!(Span::new(8, 3).len(), 0);
    }

    #[test]
    fn overlap_is_end_exclusive() {
        let a = Span::new(0, 5);
        assert!(!a.overlaps(Span::new(5, 9)));
        assert!(a.overlaps(Span::new(4, 9)));
        assert!(Span::new(1, 2).overlaps(a));
    }

    #[test]
    fn slice_respects_char_boundaries() {
        let text = "héllo";
        assert_eq!(Span::new(0, 1).slice(text), Some("h"));
        assert_eq!(Span::new(1, 3).slice(text), Some("é"));
        assert_eq!(Span::new(1, 2).slice(text), None);
        assert_eq!(Span::new(0, 99).slice(text), None);
    }
}
