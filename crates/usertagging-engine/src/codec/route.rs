use crate::error::CodecError;

use super::kinds::Mention;

/// Route hosts that denote a taggable member.
pub const DEFAULT_MEMBER_HOSTS: [&str; 3] = ["member_profile", "member", "user_profile"];

/// Splits `route://host/path` into `(host, path)`.
fn host_and_path(route: &str) -> Option<(&str, &str)> {
    let rest = route.strip_prefix(Mention::ROUTE_SCHEME)?;
    rest.split_once('/')
}

/// Returns the last path segment of `route`.
///
/// Fails with [`CodecError::MalformedRoute`] when the `route://` prefix is
/// missing, there is no path after the host, or the last segment is empty
/// (`route://user/1/`).
pub fn resource_id_from_route(route: &str) -> Result<&str, CodecError> {
    let malformed = || CodecError::MalformedRoute {
        route: route.to_string(),
    };
    let (host, path) = host_and_path(route).ok_or_else(malformed)?;
    if host.is_empty() {
        return Err(malformed());
    }
    match path.rsplit('/').next() {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(malformed()),
    }
}

/// Returns the member id of `route` when it points at a member resource.
///
/// The route must have exactly one non-empty path segment and its host must
/// be one of `allowed_hosts`. Query strings and fragments are ignored.
///
/// ```
/// use usertagging_engine::{DEFAULT_MEMBER_HOSTS, extract_member_id_from_route};
///
/// assert_eq!(extract_member_id_from_route("route://member/7", &DEFAULT_MEMBER_HOSTS), Some("7"));
/// assert_eq!(extract_member_id_from_route("route://post/7", &DEFAULT_MEMBER_HOSTS), None);
/// ```
pub fn extract_member_id_from_route<'r, S: AsRef<str>>(
    route: &'r str,
    allowed_hosts: &[S],
) -> Option<&'r str> {
    let (host, path) = host_and_path(route)?;
    if !allowed_hosts.iter().any(|h| h.as_ref() == host) {
        return None;
    }
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let id = segments.next()?;
    if segments.next().is_some() {
        return None;
    }
    Some(id)
}
