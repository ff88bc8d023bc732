//! Per-blog full-text search index orchestration, built on Tantivy.
//!
//! A multi-tenant blogging platform keeps one inverted index per blog.
//! This crate is the layer between the platform's content store and the
//! text index engine: it builds engine documents from entries and pages,
//! owns the delete-then-add update protocol and the per-tenant locking
//! that keep each index consistent under concurrent writers, and shapes
//! ranked engine hits into display-ready summaries.
//!
//! The engine itself (tokenization, postings, scoring) is Tantivy's job;
//! nothing here reimplements it.
//!
//! ```no_run
//! use inkdex::{SearchConfig, SearchService};
//!
//! fn main() -> inkdex::Result<()> {
//!     let config = SearchConfig::load(None)?;
//!     let service = SearchService::open(config)?;
//!     let results = service.search("alice", "sourdough rye")?;
//!     for hit in &results.hits {
//!         println!("{:.2} {} {}", hit.score, hit.permalink, hit.title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod analyzer;
pub mod config;
pub mod content;
pub mod error;
pub mod index;
pub mod results;
pub mod test_utils;

pub use analyzer::AnalyzerKind;
pub use config::SearchConfig;
pub use content::{
    BlogEntry, Comment, Content, ModerationState, StaticPage, TenantId, TrackBack,
};
pub use error::{IndexError, Result};
pub use index::{IndexableDocument, SearchService, TenantIndex};
pub use results::{SearchHit, SearchResults};
