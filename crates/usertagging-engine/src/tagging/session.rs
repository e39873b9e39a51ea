use serde::{Deserialize, Serialize};

use crate::{
    codec::{MentionToken, decode_first, tagged_members},
    error::CodecError,
};

/// Route host used for new mention tokens unless configured otherwise.
pub const DEFAULT_ROUTE_HOST: &str = "user";

/// A user that can be tagged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagUser {
    pub id: String,
    pub name: String,
}

impl TagUser {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Host-side source of candidate users, searched one page at a time.
///
/// Pages are numbered from 1.
pub trait MemberDirectory {
    type Error;

    fn search(&self, query: &str, page: u32) -> Result<Vec<TagUser>, Self::Error>;
}

/// One page of candidates to fetch for the current search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub search: String,
    pub page: u32,
}

impl PageRequest {
    pub fn fetch<D: MemberDirectory>(&self, directory: &D) -> Result<Vec<TagUser>, D::Error> {
        directory.search(&self.search, self.page)
    }
}

/// Tracks the search in progress and the users tagged so far.
#[derive(Debug, Clone)]
pub struct TaggingSession {
    route_host: String,
    selected: Vec<TagUser>,
    search: Option<PageRequest>,
}

impl Default for TaggingSession {
    fn default() -> Self {
        Self::new(DEFAULT_ROUTE_HOST)
    }
}

impl TaggingSession {
    pub fn new(route_host: impl Into<String>) -> Self {
        Self {
            route_host: route_host.into(),
            selected: Vec::new(),
            search: None,
        }
    }

    pub fn route_host(&self) -> &str {
        &self.route_host
    }

    /// Starts a new search and returns its first page request.
    pub fn begin_search(&mut self, query: &str) -> PageRequest {
        let request = PageRequest {
            search: query.to_string(),
            page: 1,
        };
        log::trace!("searching members for {query:?}");
        self.search = Some(request.clone());
        request
    }

    /// Next page of the current search, or `None` when no search is active.
    pub fn load_more(&mut self) -> Option<PageRequest> {
        let current = self.search.as_mut()?;
        current.page += 1;
        Some(current.clone())
    }

    /// Ends the current search, e.g. when the suggestion list is hidden.
    pub fn end_search(&mut self) {
        self.search = None;
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_some()
    }

    /// Token that mentions `user` under this session's route host.
    pub fn token_for(&self, user: &TagUser) -> Result<MentionToken, CodecError> {
        MentionToken::for_member(user.name.as_str(), &self.route_host, &user.id)
    }

    /// Records that `user` was picked and returns the token to insert.
    ///
    /// A user tagged twice is tracked once. Picking a user ends the search.
    pub fn tag_user(&mut self, user: TagUser) -> Result<MentionToken, CodecError> {
        let token = self.token_for(&user)?;
        if !self.selected.iter().any(|u| u.id == user.id) {
            log::debug!("tagged member {}", user.id);
            self.selected.push(user);
        }
        self.end_search();
        Ok(token)
    }

    /// Forgets the user whose canonical token was deleted from the text.
    pub fn remove_tag(&mut self, canonical: &str) -> Option<TagUser> {
        let m = decode_first(Some(canonical))?;
        let id = m.token.resource_id()?;
        let index = self.selected.iter().position(|u| u.id == id)?;
        log::debug!("untagged member {id}");
        Some(self.selected.remove(index))
    }

    /// Drops tracked users that no longer appear in the canonical `text`.
    pub fn sync_with_text(&mut self, text: &str) -> Vec<TagUser> {
        let present: Vec<String> = tagged_members(Some(text))
            .into_iter()
            .map(|m| m.member_id)
            .collect();
        let (kept, removed): (Vec<_>, Vec<_>) = std::mem::take(&mut self.selected)
            .into_iter()
            .partition(|u| present.contains(&u.id));
        self.selected = kept;
        removed
    }

    pub fn tagged_users(&self) -> &[TagUser] {
        &self.selected
    }

    pub fn tagged_count(&self) -> usize {
        self.selected.len()
    }
}
