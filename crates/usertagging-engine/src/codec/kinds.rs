//! Delimiters of the mention syntax.
//!
//! The scanner, the encoder and the route helpers all read these constants;
//! none of them hardcodes `<<` or `route://`.

pub struct Mention;

impl Mention {
    pub const OPEN: &'static str = "<<";
    pub const CLOSE: &'static str = ">>";
    pub const SEPARATOR: char = '|';
    pub const ROUTE_SCHEME: &'static str = "route://";
    /// Prefix shown in front of a display name when rendered.
    pub const SIGIL: char = '@';

    /// Characters that may never appear inside a display name.
    ///
    /// Older stored text such as `<<A|B|route://user/1>>` has a `|` in the
    /// name and is left as raw text by the scanner.
    pub fn is_reserved_in_name(c: char) -> bool {
        matches!(c, '<' | '>' | '|')
    }

    /// Characters that terminate the route part of a token.
    pub fn ends_route(c: char) -> bool {
        c.is_whitespace() || matches!(c, '<' | '>')
    }
}
