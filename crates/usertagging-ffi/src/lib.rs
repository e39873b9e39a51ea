//! UniFFI bindings for usertagging mobile apps
//!
//! Exposes the mention codec and tagging session to the Kotlin Android
//! host. All text offsets crossing this boundary are UTF-16 code unit
//! indices, matching `String` / `Editable` positions on the Kotlin side.

use std::sync::Mutex;

use usertagging_config::Config;
use usertagging_engine::{self as engine, LocatedMention, Segment, Span, TagUser, TaggingSession};

uniffi::setup_scaffolding!();

// ============ Errors ============

/// Errors that can cross the FFI boundary
/// Note: Field is named `reason` not `message` to avoid conflict with Throwable.message in Kotlin
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("Mention error: {reason}")]
    Mention { reason: String },
    #[error("Config error: {reason}")]
    Config { reason: String },
}

impl From<engine::CodecError> for FfiError {
    fn from(e: engine::CodecError) -> Self {
        FfiError::Mention {
            reason: e.to_string(),
        }
    }
}

// ============ Logging ============

/// Route `log` output to logcat on Android, stderr elsewhere. Safe to call
/// more than once.
#[uniffi::export]
pub fn init_logging() {
    #[cfg(target_os = "android")]
    {
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(log::LevelFilter::Debug)
                .with_tag("UserTagging"),
        );
    }

    #[cfg(not(target_os = "android"))]
    {
        let _ = env_logger::try_init();
    }
}

// ============ Offsets ============

fn utf16_offset(text: &str, byte: usize) -> u32 {
    text[..byte].encode_utf16().count() as u32
}

/// Byte offset of UTF-16 index `units`, or `None` if it is past the end or
/// splits a surrogate pair.
fn byte_offset(text: &str, units: u32) -> Option<usize> {
    let mut seen = 0u32;
    for (i, c) in text.char_indices() {
        if seen == units {
            return Some(i);
        }
        if seen > units {
            return None;
        }
        seen += c.len_utf16() as u32;
    }
    (seen == units).then_some(text.len())
}

// ============ DTOs ============

/// A mentioned member: id and `@name`.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct TaggedMemberDto {
    pub member_id: String,
    pub mention: String,
}

/// A mention located in display text (UTF-16 offsets, end exclusive).
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct MentionSpanDto {
    pub start: u32,
    pub end: u32,
    /// The `<<name|route>>` form this span is stored as.
    pub canonical: String,
}

/// Text ready for display with the mention chips to style in it.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct DisplayTextDto {
    pub text: String,
    pub mentions: Vec<MentionSpanDto>,
}

/// A segment of stored text, for hosts that render segment by segment.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct SegmentDto {
    /// Segment type: "text" or "mention"
    pub kind: String,
    /// The plain text, or `@name` for a mention
    pub content: String,
    pub start: u32,
    pub end: u32,
    /// Route of a mention, `None` for plain text
    pub route: Option<String>,
}

impl SegmentDto {
    fn from_engine(text: &str, segment: Segment) -> Self {
        let span = segment.span();
        let (kind, content, route) = match segment {
            Segment::Text(sp) => ("text", text[sp.start..sp.end].to_string(), None),
            Segment::Mention(m) => (
                "mention",
                m.token.mention_text(),
                Some(m.token.route().to_string()),
            ),
        };
        Self {
            kind: kind.to_string(),
            content,
            start: utf16_offset(text, span.start),
            end: utf16_offset(text, span.end),
            route,
        }
    }
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct TagUserDto {
    pub id: String,
    pub name: String,
}

impl From<TagUser> for TagUserDto {
    fn from(u: TagUser) -> Self {
        Self {
            id: u.id,
            name: u.name,
        }
    }
}

/// The `@query` under the cursor (UTF-16 offsets).
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct TagQueryDto {
    pub start: u32,
    pub end: u32,
    pub search: String,
}

/// A page of candidates the host should fetch.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct PageRequestDto {
    pub search: String,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct TaggingConfigDto {
    pub member_hosts: Vec<String>,
    pub route_host: String,
    pub page_size: u32,
}

impl From<Config> for TaggingConfigDto {
    fn from(c: Config) -> Self {
        Self {
            member_hosts: c.member_hosts,
            route_host: c.route_host,
            page_size: c.page_size,
        }
    }
}

// ============ Standalone Functions ============

/// Load tagging settings from `path`, or the default config location when
/// `None`. A missing file yields the defaults.
#[uniffi::export]
pub fn load_tagging_config(path: Option<String>) -> Result<TaggingConfigDto, FfiError> {
    let path = path.map(Into::into).unwrap_or_else(Config::config_path);
    Config::load_or_default(&path)
        .map(TaggingConfigDto::from)
        .map_err(|e| FfiError::Config {
            reason: e.to_string(),
        })
}

#[uniffi::export]
pub fn default_member_hosts() -> Vec<String> {
    engine::DEFAULT_MEMBER_HOSTS.map(String::from).to_vec()
}

/// Canonical `<<name|route>>` for a display name and route.
#[uniffi::export]
pub fn encode_mention(display_name: String, route: String) -> Result<String, FfiError> {
    Ok(engine::encode(&display_name, &route)?)
}

#[uniffi::export]
pub fn resource_id_from_route(route: String) -> Result<String, FfiError> {
    Ok(engine::resource_id_from_route(&route)?.to_string())
}

/// Members mentioned in `text`, in document order.
#[uniffi::export]
pub fn tagged_members(text: Option<String>) -> Vec<TaggedMemberDto> {
    engine::tagged_members(text.as_deref())
        .into_iter()
        .map(|m| TaggedMemberDto {
            member_id: m.member_id,
            mention: m.mention,
        })
        .collect()
}

/// Member id of the first mention in `text` whose route host is allowed.
#[uniffi::export]
pub fn member_id_in(text: Option<String>, allowed_hosts: Vec<String>) -> Option<String> {
    engine::member_id_in(text.as_deref(), allowed_hosts.as_slice())
}

/// Converts stored text to display text plus the spans to style.
#[uniffi::export]
pub fn decode_for_display(text: Option<String>) -> DisplayTextDto {
    let buffer = engine::replace_all_with_placeholder(text.as_deref(), |_| ());
    let mentions = buffer
        .spans()
        .iter()
        .map(|s| MentionSpanDto {
            start: utf16_offset(buffer.text(), s.span.start),
            end: utf16_offset(buffer.text(), s.span.end),
            canonical: s.canonical.clone(),
        })
        .collect();
    DisplayTextDto {
        text: buffer.text().to_string(),
        mentions,
    }
}

#[uniffi::export]
pub fn segments(text: String) -> Vec<SegmentDto> {
    engine::segments(&text)
        .into_iter()
        .map(|s| SegmentDto::from_engine(&text, s))
        .collect()
}

/// Converts display text and its mention spans back to stored text.
#[uniffi::export]
pub fn collapse_mentions(text: String, spans: Vec<MentionSpanDto>) -> Result<String, FfiError> {
    let located = spans
        .into_iter()
        .map(|s| {
            let span = byte_offset(&text, s.start)
                .zip(byte_offset(&text, s.end))
                .map(|(start, end)| Span::new(start, end))
                .ok_or_else(|| FfiError::Mention {
                    reason: format!("span {}..{} is outside the text", s.start, s.end),
                })?;
            Ok(LocatedMention {
                span,
                canonical: s.canonical,
            })
        })
        .collect::<Result<Vec<_>, FfiError>>()?;
    Ok(engine::collapse_styled_spans_to_canonical_text(
        &text, &located,
    )?)
}

/// The `@query` ending at UTF-16 index `cursor`, if any.
#[uniffi::export]
pub fn active_query(text: String, cursor: u32) -> Option<TagQueryDto> {
    let q = engine::active_query(&text, byte_offset(&text, cursor)?)?;
    Some(TagQueryDto {
        start: utf16_offset(&text, q.span.start),
        end: utf16_offset(&text, q.span.end),
        search: q.search.to_string(),
    })
}

// ============ Session Handle ============

/// A tagging session for one text input.
#[derive(uniffi::Object)]
pub struct TaggingSessionHandle {
    inner: Mutex<TaggingSession>,
    member_hosts: Vec<String>,
    page_size: u32,
}

impl TaggingSessionHandle {
    fn session(&self) -> std::sync::MutexGuard<'_, TaggingSession> {
        // Recover from poisoned mutex (another thread panicked while holding lock)
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn page_request(&self, request: engine::PageRequest) -> PageRequestDto {
        PageRequestDto {
            search: request.search,
            page: request.page,
            page_size: self.page_size,
        }
    }
}

#[uniffi::export]
impl TaggingSessionHandle {
    #[uniffi::constructor]
    pub fn new(config: TaggingConfigDto) -> Self {
        Self {
            inner: Mutex::new(TaggingSession::new(config.route_host)),
            member_hosts: config.member_hosts,
            page_size: config.page_size,
        }
    }

    pub fn begin_search(&self, query: String) -> PageRequestDto {
        let request = self.session().begin_search(&query);
        self.page_request(request)
    }

    pub fn load_more(&self) -> Option<PageRequestDto> {
        let request = self.session().load_more()?;
        Some(self.page_request(request))
    }

    pub fn end_search(&self) {
        self.session().end_search();
    }

    /// Record the picked user and return the canonical token to insert.
    pub fn tag_user(&self, user: TagUserDto) -> Result<String, FfiError> {
        let token = self.session().tag_user(TagUser::new(user.id, user.name))?;
        Ok(token.encode())
    }

    pub fn remove_tag(&self, canonical: String) -> Option<TagUserDto> {
        self.session().remove_tag(&canonical).map(Into::into)
    }

    pub fn sync_with_text(&self, text: String) -> Vec<TagUserDto> {
        self.session()
            .sync_with_text(&text)
            .into_iter()
            .map(Into::into)
            .collect()
    }

    pub fn tagged_users(&self) -> Vec<TagUserDto> {
        self.session()
            .tagged_users()
            .iter()
            .cloned()
            .map(Into::into)
            .collect()
    }

    pub fn tagged_count(&self) -> u32 {
        self.session().tagged_count() as u32
    }

    /// Member id of the first mention in `text`, using the configured hosts.
    pub fn member_id_in(&self, text: Option<String>) -> Option<String> {
        engine::member_id_in(text.as_deref(), self.member_hosts.as_slice())
    }
}
