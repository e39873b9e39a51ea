use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

use super::{kinds::Mention, route::resource_id_from_route};

/// A reference to a taggable resource, embedded in text as
/// `<<display_name|route>>`.
///
/// The display name is stored without the `@` sigil. Tokens built through
/// [`MentionToken::new`] always have a valid display name and a route with a
/// resource id; tokens produced by the scanner carry exactly what the text
/// contained.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMentionToken")]
pub struct MentionToken {
    display_name: String,
    route: String,
}

#[derive(Deserialize)]
struct RawMentionToken {
    display_name: String,
    route: String,
}

impl TryFrom<RawMentionToken> for MentionToken {
    type Error = CodecError;

    fn try_from(raw: RawMentionToken) -> Result<Self, Self::Error> {
        MentionToken::new(raw.display_name, raw.route)
    }
}

impl MentionToken {
    /// Builds a token, rejecting display names that would break the grammar
    /// and routes the scanner could not read back.
    pub fn new(
        display_name: impl Into<String>,
        route: impl Into<String>,
    ) -> Result<Self, CodecError> {
        let display_name = display_name.into();
        let route = route.into();
        validate_display_name(&display_name)?;
        validate_route(&route)?;
        Ok(Self {
            display_name,
            route,
        })
    }

    /// Token for a member, routed as `route://<host>/<id>`.
    ///
    /// `id` must read back as the route's single path segment, so it may not
    /// be empty or contain `/`, `?`, `#` or a character that ends a route.
    pub fn for_member(
        display_name: impl Into<String>,
        host: &str,
        id: &str,
    ) -> Result<Self, CodecError> {
        let route = format!("{}{host}/{id}", Mention::ROUTE_SCHEME);
        if id.is_empty()
            || id
                .chars()
                .any(|c| matches!(c, '/' | '?' | '#') || Mention::ends_route(c))
        {
            return Err(CodecError::MalformedRoute { route });
        }
        Self::new(display_name, route)
    }

    /// Constructor for spans the scanner has already matched.
    pub(crate) fn from_scanned(display_name: &str, route: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            route: route.to_string(),
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    /// Last path segment of the route, if the route has one.
    pub fn resource_id(&self) -> Option<&str> {
        resource_id_from_route(&self.route).ok()
    }

    /// The display name with its `@` sigil, as shown to users.
    pub fn mention_text(&self) -> String {
        format!("{}{}", Mention::SIGIL, self.display_name)
    }

    /// Canonical form: `<<display_name|route>>`.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MentionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            Mention::OPEN,
            self.display_name,
            Mention::SEPARATOR,
            self.route,
            Mention::CLOSE
        )
    }
}

/// Encodes a display name and route in one step.
pub fn encode(display_name: &str, route: &str) -> Result<String, CodecError> {
    MentionToken::new(display_name, route).map(|t| t.encode())
}

fn validate_display_name(name: &str) -> Result<(), CodecError> {
    if name.is_empty() || name.chars().any(Mention::is_reserved_in_name) {
        return Err(CodecError::InvalidDisplayName {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn validate_route(route: &str) -> Result<(), CodecError> {
    let malformed = || CodecError::MalformedRoute {
        route: route.to_string(),
    };
    let rest = route
        .strip_prefix(Mention::ROUTE_SCHEME)
        .ok_or_else(malformed)?;
    if rest.chars().any(Mention::ends_route) {
        return Err(malformed());
    }
    resource_id_from_route(route)?;
    Ok(())
}
