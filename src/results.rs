//! Search result shaping.
//!
//! Raw engine hits become [`SearchHit`] summaries here. The shaper is a pure
//! mapping: stored fields in, display fields out, missing strings defaulted
//! to empty, the stored day-resolution date parsed back into a structured
//! one. Ranking is the engine's; hits stay in the order they arrived.

use chrono::NaiveDate;
use serde::Serialize;
use tantivy::schema::{Field, Value};
use tantivy::{Score, TantivyDocument};

use crate::content::TenantId;
use crate::index::schema::{DATE_WIRE_FORMAT, DocFields};

/// Message carried by a result set whose query did not parse.
pub const PARSE_FAILURE_MESSAGE: &str =
    "Sorry, that query could not be understood. Please try a different search.";

/// One ranked summary record. Higher score means more relevant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub tenant: TenantId,
    pub id: String,
    pub permalink: String,
    pub title: String,
    pub subtitle: String,
    pub truncated_body: String,
    /// Day resolution. `None` when the stored form is absent or malformed.
    pub date: Option<NaiveDate>,
    pub score: Score,
}

impl SearchHit {
    /// Shape one stored document into a summary record.
    pub(crate) fn from_stored(
        tenant: &TenantId,
        doc: &TantivyDocument,
        fields: DocFields,
        score: Score,
    ) -> Self {
        Self {
            tenant: tenant.clone(),
            id: stored_text(doc, fields.id),
            permalink: stored_text(doc, fields.permalink),
            title: stored_text(doc, fields.title),
            subtitle: stored_text(doc, fields.subtitle),
            truncated_body: stored_text(doc, fields.truncated_body),
            date: parse_wire_date(&stored_text(doc, fields.date)),
            score,
        }
    }
}

/// The outcome of one search call. A failed parse is represented as data:
/// empty hits plus a human-readable `message`, never an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub message: Option<String>,
    pub hits: Vec<SearchHit>,
}

impl SearchResults {
    #[must_use]
    pub fn empty(query: &str) -> Self {
        Self {
            query: query.to_string(),
            message: None,
            hits: Vec::new(),
        }
    }

    #[must_use]
    pub fn unparsable(query: &str) -> Self {
        Self {
            query: query.to_string(),
            message: Some(PARSE_FAILURE_MESSAGE.to_string()),
            hits: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_hits(query: &str, hits: Vec<SearchHit>) -> Self {
        Self {
            query: query.to_string(),
            message: None,
            hits,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

fn stored_text(doc: &TantivyDocument, field: Field) -> String {
    doc.get_first(field)
        .and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_string()
}

fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_WIRE_FORMAT).ok()
}
