pub mod codec;
pub mod error;
pub mod splice;
pub mod tagging;

// Re-export key types for easier usage
pub use codec::{
    DEFAULT_MEMBER_HOSTS, MentionMatch, MentionToken, Segment, Span, TaggedMember, decode_first,
    encode, extract_member_id_from_route, member_id_in, resource_id_from_route, scan, scan_all,
    segments, split_token, tagged_members,
};
pub use error::CodecError;
pub use splice::{
    CanonicalSpan, LocatedMention, StyledBuffer, StyledSpan,
    collapse_styled_spans_to_canonical_text, replace_all_with_placeholder,
};
pub use tagging::{MemberDirectory, PageRequest, TagQuery, TagUser, TaggingSession, active_query};
