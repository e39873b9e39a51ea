//! # Tagging
//!
//! Non-visual state of a tagging text input: spotting the `@query` being
//! typed, paging through candidate users, and tracking who has been tagged.
//!
//! The host owns the widget and the network. It asks [`active_query`] whether
//! the cursor sits in an `@query`, fetches candidates for the
//! [`PageRequest`]s the [`TaggingSession`] hands out, and calls
//! [`TaggingSession::tag_user`] when one is picked.

pub mod query;
pub mod session;

pub use query::{TagQuery, active_query};
pub use session::{MemberDirectory, PageRequest, TagUser, TaggingSession};
