//! Tenant identity and the content model handed to the indexer.
//!
//! These types mirror what the content-persistence layer stores: published
//! or draft blog entries with their moderated responses, and static pages.
//! The indexer never mutates content; it only reads it to build engine
//! documents.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{IndexError, Result};

/// Character budget for the stored short form of a body.
pub const EXCERPT_CHARS: usize = 255;

/// Longest accepted tenant id.
pub const MAX_TENANT_ID_CHARS: usize = 64;

// ===== TENANT IDENTITY =====

/// Validated identifier of one blog instance.
///
/// Tenant ids become path components under the index root, so validation
/// happens here, before any path is formed. Accepted: ASCII alphanumerics
/// plus `-`, `_` and `.`, starting with an alphanumeric, at most
/// [`MAX_TENANT_ID_CHARS`] long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if let Err(reason) = check_tenant_id(&id) {
            return Err(IndexError::InvalidTenantId { id, reason });
        }
        Ok(Self(id))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn check_tenant_id(id: &str) -> std::result::Result<(), String> {
    if id.is_empty() {
        return Err("empty".to_string());
    }
    if id.chars().count() > MAX_TENANT_ID_CHARS {
        return Err(format!("longer than {MAX_TENANT_ID_CHARS} characters"));
    }
    let mut chars = id.chars();
    let first = chars.next().unwrap_or('\0');
    if !first.is_ascii_alphanumeric() {
        return Err("must start with an ASCII letter or digit".to_string());
    }
    for ch in chars {
        if !(ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '.') {
            return Err(format!("character {ch:?} not allowed"));
        }
    }
    Ok(())
}

// ===== CONTENT MODEL =====

/// Moderation state of a comment or trackback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationState {
    Approved,
    Pending,
    Rejected,
}

impl ModerationState {
    #[must_use]
    pub const fn is_approved(self) -> bool {
        matches!(self, Self::Approved)
    }
}

/// A reader comment attached to an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub body: String,
    pub state: ModerationState,
}

/// A trackback ping attached to an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackBack {
    pub excerpt: String,
    pub state: ModerationState,
}

/// One blog entry as the persistence layer stores it.
///
/// Only published entries are ever indexed; the `published` flag is checked
/// by the document builder, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogEntry {
    pub id: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub permalink: String,
    pub date: NaiveDate,
    pub body: String,
    /// Precomputed short form for result display. Absent means "derive one
    /// by truncating the body".
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub published: bool,
    pub comments: Vec<Comment>,
    pub trackbacks: Vec<TrackBack>,
}

impl BlogEntry {
    /// Stored short form: the precomputed excerpt, or a truncation of the
    /// body when none was provided.
    #[must_use]
    pub fn excerpt_text(&self) -> String {
        self.excerpt
            .clone()
            .unwrap_or_else(|| truncate_excerpt(&self.body, EXCERPT_CHARS))
    }
}

/// A static page. Always indexable, carries no responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticPage {
    pub id: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub permalink: String,
    pub date: NaiveDate,
    pub body: String,
    pub excerpt: Option<String>,
    pub author: Option<String>,
}

impl StaticPage {
    #[must_use]
    pub fn excerpt_text(&self) -> String {
        self.excerpt
            .clone()
            .unwrap_or_else(|| truncate_excerpt(&self.body, EXCERPT_CHARS))
    }
}

/// Any content item the coordinator can be asked to index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Content {
    Entry(BlogEntry),
    Page(StaticPage),
}

impl Content {
    /// The id used as the engine's delete-match key.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Entry(entry) => &entry.id,
            Self::Page(page) => &page.id,
        }
    }
}

/// Truncate to at most `max_chars` characters, marking the cut with `...`.
/// Cuts on char boundaries only.
#[must_use]
pub fn truncate_excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars < 3 {
        return "...".to_string();
    }
    let cut: String = text.chars().take(max_chars - 3).collect();
    format!("{cut}...")
}
