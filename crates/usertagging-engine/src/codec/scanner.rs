use crate::error::CodecError;

use super::{
    cursor::Cursor,
    kinds::Mention,
    route::extract_member_id_from_route,
    span::Span,
    token::MentionToken,
    types::{MentionMatch, Segment, TaggedMember},
};

/// Lazily scans `text` for mention tokens, left to right.
///
/// Matches never overlap and come out in ascending start order. After a
/// failed attempt at a `<<` the scan resumes one character later, so
/// `<<<<Ann|route://user/1>>` still finds the token at offset 2.
pub fn scan(text: &str) -> Scan<'_> {
    Scan {
        cur: Cursor::new(text),
    }
}

/// Iterator returned by [`scan`].
pub struct Scan<'a> {
    cur: Cursor<'a>,
}

impl Iterator for Scan<'_> {
    type Item = MentionMatch;

    fn next(&mut self) -> Option<MentionMatch> {
        while !self.cur.eof() {
            if let Some(m) = try_parse_mention(&mut self.cur) {
                return Some(m);
            }
            self.cur.bump();
        }
        None
    }
}

/// Every mention in `text`. Absent and empty text both yield nothing.
pub fn scan_all(text: Option<&str>) -> Vec<MentionMatch> {
    text.map(|t| scan(t).collect()).unwrap_or_default()
}

/// The first mention in `text`, if any.
pub fn decode_first(text: Option<&str>) -> Option<MentionMatch> {
    scan(text?).next()
}

/// Splits a token body (the text between `<<` and `>>`) into display name
/// and route on the first `|`. Any later `|` stays in the route.
pub fn split_token(body: &str) -> Result<(&str, &str), CodecError> {
    body.split_once(Mention::SEPARATOR)
        .ok_or_else(|| CodecError::MalformedToken {
            body: body.to_string(),
        })
}

/// Splits `text` into plain text and mention segments covering all of it.
pub fn segments(text: &str) -> Vec<Segment> {
    let mut out = vec![];
    let mut text_start = 0;

    for m in scan(text) {
        if m.span.start > text_start {
            out.push(Segment::Text(Span::new(text_start, m.span.start)));
        }
        text_start = m.span.end;
        out.push(Segment::Mention(m));
    }

    if text.len() > text_start {
        out.push(Segment::Text(Span::new(text_start, text.len())));
    }
    out
}

/// `(member id, "@name")` for each mention in document order.
///
/// Tokens whose route has no id segment (`route://user`) are skipped.
pub fn tagged_members(text: Option<&str>) -> Vec<TaggedMember> {
    scan_all(text)
        .into_iter()
        .filter_map(|m| {
            let Some(id) = m.token.resource_id() else {
                log::debug!("skipping mention without resource id: {}", m.token);
                return None;
            };
            Some(TaggedMember {
                member_id: id.to_string(),
                mention: m.token.mention_text(),
            })
        })
        .collect()
}

/// Member id of the first mention in `text`, when its route is a member route
/// with one of `allowed_hosts`.
pub fn member_id_in<S: AsRef<str>>(text: Option<&str>, allowed_hosts: &[S]) -> Option<String> {
    let m = decode_first(text)?;
    extract_member_id_from_route(m.token.route(), allowed_hosts).map(str::to_string)
}

/// Attempts to read a mention token starting at the current position.
///
/// Returns `None` if the input here is not a complete token; the cursor is
/// then restored.
fn try_parse_mention(cur: &mut Cursor<'_>) -> Option<MentionMatch> {
    if !cur.starts_with(Mention::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.eat(Mention::OPEN);

    let name_start = cur.pos();
    cur.bump_while(|c| !Mention::is_reserved_in_name(c));
    let name_end = cur.pos();

    if name_end == name_start || cur.peek() != Some(Mention::SEPARATOR) {
        *cur = saved;
        return None;
    }
    cur.bump(); // |

    let route_start = cur.pos();
    if !cur.eat(Mention::ROUTE_SCHEME) {
        *cur = saved;
        return None;
    }
    let rest_start = cur.pos();
    cur.bump_while(|c| !Mention::ends_route(c));
    let route_end = cur.pos();

    if route_end == rest_start || !cur.eat(Mention::CLOSE) {
        *cur = saved;
        return None;
    }
    let end = cur.pos();

    let name = &cur.s[name_start..name_end];
    let route = &cur.s[route_start..route_end];
    Some(MentionMatch {
        span: Span::new(start, end),
        token: MentionToken::from_scanned(name, route),
    })
}
