//! Engine field layout shared by writer and reader sessions.
//!
//! The layout is fixed: adding or changing a field changes the schema, and
//! existing tenant indexes would need a rebuild to pick it up.

use tantivy::schema::{
    Field, IndexRecordOption, STORED, STRING, Schema, TextFieldIndexing, TextOptions,
};

use crate::analyzer::TOKENIZER_NAME;

/// Wire form of the stored date field, day resolution.
pub const DATE_WIRE_FORMAT: &str = "%Y%m%d";

/// Handles to every field in the schema, resolved once at build time.
#[derive(Debug, Clone, Copy)]
pub struct DocFields {
    /// Raw stored id, the delete-match key.
    pub id: Field,
    pub title: Field,
    pub subtitle: Field,
    /// Raw stored permalink, never analyzed.
    pub permalink: Field,
    /// Stored only, not searchable. Day resolution.
    pub date: Field,
    /// Searchable, not stored.
    pub body: Field,
    pub truncated_body: Field,
    pub author: Field,
    /// Multi-valued.
    pub category: Field,
    /// Multi-valued.
    pub tag: Field,
    /// The aggregated default query field. Searchable, never stored.
    pub searchable_text: Field,
}

/// Build the schema and its field handles.
#[must_use]
pub fn build_schema() -> (Schema, DocFields) {
    let indexing = TextFieldIndexing::default()
        .set_tokenizer(TOKENIZER_NAME)
        .set_index_option(IndexRecordOption::WithFreqsAndPositions);
    let analyzed = TextOptions::default().set_indexing_options(indexing.clone());
    let analyzed_stored = TextOptions::default()
        .set_indexing_options(indexing)
        .set_stored();

    let mut builder = Schema::builder();
    let id = builder.add_text_field("id", STRING | STORED);
    let title = builder.add_text_field("title", analyzed_stored.clone());
    let subtitle = builder.add_text_field("subtitle", analyzed_stored.clone());
    let permalink = builder.add_text_field("permalink", STRING | STORED);
    let date = builder.add_text_field("date", STORED);
    let body = builder.add_text_field("body", analyzed.clone());
    let truncated_body = builder.add_text_field("truncated_body", analyzed_stored.clone());
    let author = builder.add_text_field("author", analyzed_stored.clone());
    let category = builder.add_text_field("category", analyzed_stored.clone());
    let tag = builder.add_text_field("tag", analyzed_stored);
    let searchable_text = builder.add_text_field("searchable_text", analyzed);

    let fields = DocFields {
        id,
        title,
        subtitle,
        permalink,
        date,
        body,
        truncated_body,
        author,
        category,
        tag,
        searchable_text,
    };
    (builder.build(), fields)
}
