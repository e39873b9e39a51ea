/// A cursor for character-by-character scanning with position tracking.
///
/// Always sits on a char boundary of `s`, so byte offsets it reports can be
/// used to slice the scanned text directly.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Returns the current byte position.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current character without advancing.
    pub fn peek(&self) -> Option<char> {
        self.s.get(self.i..)?.chars().next()
    }

    /// Checks if the remaining input starts with `pat`.
    pub fn starts_with(&self, pat: &str) -> bool {
        self.s.get(self.i..).is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances by one character, returning it.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.i += c.len_utf8();
        Some(c)
    }

    /// Consumes `pat` if the remaining input starts with it.
    pub fn eat(&mut self, pat: &str) -> bool {
        if self.starts_with(pat) {
            self.i += pat.len();
            true
        } else {
            false
        }
    }

    /// Advances while `keep` holds for the next character.
    pub fn bump_while(&mut self, mut keep: impl FnMut(char) -> bool) {
        while let Some(c) = self.peek() {
            if !keep(c) {
                break;
            }
            self.i += c.len_utf8();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("hello");
        assert_eq!(cur.pos(), 0);
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some('h'));
        assert_eq!(cur.bump(), Some('h'));
        assert_eq!(cur.pos(), 1);
    }

    #[test]
    fn bump_steps_over_multibyte_characters() {
        let mut cur = Cursor::new("é<<");
        assert_eq!(cur.bump(), Some('é'));
        assert_eq!(cur.pos(), 2);
        assert!(cur.starts_with("<<"));
    }

    #[test]
    fn eat_only_consumes_on_match() {
        let mut cur = Cursor::new("<<name");
        assert!(!cur.eat(">>"));
        assert_eq!(cur.pos(), 0);
        assert!(cur.eat("<<"));
        assert_eq!(cur.pos(), 2);
    }

    #[test]
    fn bump_while_stops_at_predicate() {
        let mut cur = Cursor::new("Zoë|route");
        cur.bump_while(|c| c != '|');
        assert_eq!(cur.pos(), 4);
        assert_eq!(cur.peek(), Some('|'));
    }

    #[test]
    fn empty_string_input() {
        let mut cur = Cursor::new("");
        assert!(cur.eof());
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.bump(), None);
        assert!(cur.starts_with(""));
        assert!(!cur.starts_with("<"));
    }
}
