//! # Mention Codec
//!
//! Recognizes, decodes and encodes mention tokens embedded in plain text.
//!
//! ## Grammar
//!
//! ```text
//! <<DisplayName|route://host/segment/.../id>>
//! ```
//!
//! - the display name is one or more characters, none of `<`, `>` or `|`
//! - the route starts with `route://` followed by one or more characters that
//!   are neither whitespace nor `<` / `>`
//!
//! Scanning is left to right and never produces overlapping matches. Anything
//! that does not match (`<<Alice>>`, `<<Alice|user/1>>`, an unclosed token) is
//! ordinary text and passes through untouched.
//!
//! ## Modules
//!
//! - **`kinds`**: delimiter constants owned by the mention syntax
//! - **`cursor`**: `Cursor` for character-by-character scanning
//! - **`scanner`**: `scan()` / `scan_all()` entry points and decode helpers
//! - **`route`**: route inspection (`resource_id_from_route`, member ids)
//! - **`token`**: the `MentionToken` value type and its canonical encoding
//! - **`types`**: `MentionMatch`, `Segment`, `TaggedMember`
//! - **`span`**: byte ranges into the scanned text

pub mod cursor;
pub mod kinds;
pub mod route;
pub mod scanner;
pub mod span;
pub mod token;
pub mod types;

pub use route::{DEFAULT_MEMBER_HOSTS, extract_member_id_from_route, resource_id_from_route};
pub use scanner::{
    decode_first, member_id_in, scan, scan_all, segments, split_token, tagged_members,
};
pub use span::Span;
pub use token::{MentionToken, encode};
pub use types::{MentionMatch, Segment, TaggedMember};
