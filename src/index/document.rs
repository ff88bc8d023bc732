//! Document Builder: one content item in, one flat field set out.
//!
//! Two business rules live here and nowhere else:
//! - an entry is indexable only while it is published; the builder returns
//!   `None` for drafts so the coordinator's delete-then-add upsert leaves
//!   nothing behind when an entry is unpublished,
//! - comment and trackback text joins the aggregated searchable field only
//!   in the approved moderation state.
//!
//! Every optional text field is normalized to an empty string so field
//! presence is uniform across documents.

use chrono::NaiveDate;
use tantivy::TantivyDocument;

use crate::content::{BlogEntry, Content, StaticPage};
use crate::index::schema::{DATE_WIRE_FORMAT, DocFields};

/// Flat, normalized field set for one content item. Ephemeral: built per
/// operation, handed to a writer session, never persisted as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexableDocument {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub permalink: String,
    pub date: NaiveDate,
    pub body: String,
    pub truncated_body: String,
    pub author: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    /// title + body + approved comment bodies + approved trackback
    /// excerpts. The default query field.
    pub searchable_text: String,
}

impl IndexableDocument {
    /// Build the field set for a content item, or `None` when the item is
    /// not indexable (an unpublished entry). Pure, no I/O.
    #[must_use]
    pub fn build(content: &Content) -> Option<Self> {
        match content {
            Content::Entry(entry) => Self::from_entry(entry),
            Content::Page(page) => Some(Self::from_page(page)),
        }
    }

    fn from_entry(entry: &BlogEntry) -> Option<Self> {
        if !entry.published {
            return None;
        }

        let title = entry.title.clone().unwrap_or_default();
        let searchable_text = aggregate_entry_text(entry, &title);
        Some(Self {
            id: entry.id.clone(),
            title,
            subtitle: entry.subtitle.clone().unwrap_or_default(),
            permalink: entry.permalink.clone(),
            date: entry.date,
            body: entry.body.clone(),
            truncated_body: entry.excerpt_text(),
            author: entry.author.clone().unwrap_or_default(),
            categories: entry.categories.clone(),
            tags: entry.tags.clone(),
            searchable_text,
        })
    }

    fn from_page(page: &StaticPage) -> Self {
        let title = page.title.clone().unwrap_or_default();
        let searchable_text = format!("{title} {}", page.body);
        Self {
            id: page.id.clone(),
            title,
            subtitle: page.subtitle.clone().unwrap_or_default(),
            permalink: page.permalink.clone(),
            date: page.date,
            body: page.body.clone(),
            truncated_body: page.excerpt_text(),
            author: page.author.clone().unwrap_or_default(),
            categories: Vec::new(),
            tags: Vec::new(),
            searchable_text,
        }
    }

    /// Lower the field set into an engine document.
    pub(crate) fn to_engine_doc(&self, fields: DocFields) -> TantivyDocument {
        let mut doc = TantivyDocument::new();
        doc.add_text(fields.id, &self.id);
        doc.add_text(fields.title, &self.title);
        doc.add_text(fields.subtitle, &self.subtitle);
        doc.add_text(fields.permalink, &self.permalink);
        doc.add_text(fields.date, self.date.format(DATE_WIRE_FORMAT).to_string());
        doc.add_text(fields.body, &self.body);
        doc.add_text(fields.truncated_body, &self.truncated_body);
        doc.add_text(fields.author, &self.author);
        for category in &self.categories {
            doc.add_text(fields.category, category);
        }
        for tag in &self.tags {
            doc.add_text(fields.tag, tag);
        }
        doc.add_text(fields.searchable_text, &self.searchable_text);
        doc
    }
}

/// One searchable blob per entry: title, body, then the bodies of approved
/// comments and the excerpts of approved trackbacks, space-joined.
fn aggregate_entry_text(entry: &BlogEntry, title: &str) -> String {
    let mut text = String::new();
    text.push_str(title);
    text.push(' ');
    text.push_str(&entry.body);
    text.push(' ');
    for comment in &entry.comments {
        if comment.state.is_approved() {
            text.push_str(&comment.body);
            text.push(' ');
        }
    }
    for trackback in &entry.trackbacks {
        if trackback.state.is_approved() {
            text.push_str(&trackback.excerpt);
            text.push(' ');
        }
    }
    text
}
