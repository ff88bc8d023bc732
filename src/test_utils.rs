//! Shared test fixtures for inkdex.
//!
//! Plain module rather than `#[cfg(test)]` so integration tests and benches
//! can use the same content builders.

use std::path::Path;

use chrono::NaiveDate;

use crate::config::SearchConfig;
use crate::content::{BlogEntry, Comment, ModerationState, StaticPage, TrackBack};

/// A published entry with deterministic metadata and the given body.
#[must_use]
pub fn entry(id: &str, body: &str) -> BlogEntry {
    BlogEntry {
        id: id.to_string(),
        title: Some(format!("Entry {id}")),
        subtitle: None,
        permalink: format!("/entries/{id}.html"),
        date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid fixture date"),
        body: body.to_string(),
        excerpt: None,
        author: Some("alice".to_string()),
        categories: Vec::new(),
        tags: Vec::new(),
        published: true,
        comments: Vec::new(),
        trackbacks: Vec::new(),
    }
}

/// A static page with deterministic metadata and the given body.
#[must_use]
pub fn page(id: &str, body: &str) -> StaticPage {
    StaticPage {
        id: id.to_string(),
        title: Some(format!("Page {id}")),
        subtitle: None,
        permalink: format!("/pages/{id}.html"),
        date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid fixture date"),
        body: body.to_string(),
        excerpt: None,
        author: None,
    }
}

#[must_use]
pub fn comment(body: &str, state: ModerationState) -> Comment {
    Comment {
        body: body.to_string(),
        state,
    }
}

#[must_use]
pub fn trackback(excerpt: &str, state: ModerationState) -> TrackBack {
    TrackBack {
        excerpt: excerpt.to_string(),
        state,
    }
}

/// Default configuration rooted at a scratch directory.
#[must_use]
pub fn config_at(root: &Path) -> SearchConfig {
    let mut config = SearchConfig::default();
    config.index.root = root.to_path_buf();
    config
}
