//! Index Session Manager: scoped writer and reader handles for one tenant's
//! index storage location.
//!
//! Sessions live for a single logical operation. A [`WriterSession`] stages
//! deletes and adds and makes them visible all at once on [`WriterSession::commit`];
//! dropping it without committing discards everything staged, which is the
//! abort path. A [`ReaderSession`] snapshots the last committed state at open
//! time, so anything committed before the open is visible and nothing
//! in-flight ever is.
//!
//! Mutual exclusion is the coordinator's job. If a second writer is opened
//! for a location that already has one, the engine's directory lock refuses
//! it and the open fails with [`IndexError::WriterConflict`].

use std::path::{Path, PathBuf};

use tantivy::collector::TopDocs;
use tantivy::directory::MmapDirectory;
use tantivy::query::{Query, QueryParser, QueryParserError};
use tantivy::{
    DocAddress, Index, IndexWriter, Score, Searcher, TantivyDocument, TantivyError, Term,
};
use tracing::debug;

use crate::analyzer::{AnalyzerKind, TOKENIZER_NAME};
use crate::error::{IndexError, Result};
use crate::index::document::IndexableDocument;
use crate::index::schema::{DocFields, build_schema};

/// Write handle over one tenant's index storage. Commit-on-close.
pub struct WriterSession {
    writer: IndexWriter,
    fields: DocFields,
    location: PathBuf,
}

impl WriterSession {
    /// Open the location in create-or-append mode, creating the directory
    /// and an empty index on first write.
    pub fn open(location: &Path, analyzer: AnalyzerKind, heap_bytes: usize) -> Result<Self> {
        std::fs::create_dir_all(location)
            .map_err(|err| IndexError::storage(location, err))?;
        let dir = MmapDirectory::open(location).map_err(TantivyError::from)?;
        let (schema, fields) = build_schema();
        let index = Index::open_or_create(dir, schema)?;
        index.tokenizers().register(TOKENIZER_NAME, analyzer.build());

        // One indexing thread: sessions span a single logical operation.
        let writer: IndexWriter = index
            .writer_with_num_threads(1, heap_bytes)
            .map_err(|err| match err {
                TantivyError::LockFailure(..) => IndexError::WriterConflict {
                    path: location.to_path_buf(),
                },
                other => IndexError::Engine(other),
            })?;

        debug!(target: "index", location = %location.display(), "writer session opened");
        Ok(Self {
            writer,
            fields,
            location: location.to_path_buf(),
        })
    }

    /// Stage a document add.
    pub fn add(&mut self, doc: &IndexableDocument) -> Result<()> {
        self.writer.add_document(doc.to_engine_doc(self.fields))?;
        Ok(())
    }

    /// Stage deletion of every document whose id matches.
    pub fn delete_by_id(&mut self, id: &str) {
        self.writer
            .delete_term(Term::from_field_text(self.fields.id, id));
    }

    /// Stage deletion of every document in the index.
    pub fn delete_all(&mut self) -> Result<()> {
        self.writer.delete_all_documents()?;
        Ok(())
    }

    /// Commit everything staged and close the session. Readers opened after
    /// this returns observe the new state.
    pub fn commit(mut self) -> Result<()> {
        self.writer.commit()?;
        debug!(target: "index", location = %self.location.display(), "writer session committed");
        Ok(())
    }
}

/// Read handle over one tenant's index storage, fixed to the committed
/// state at open time.
pub struct ReaderSession {
    searcher: Searcher,
    parser: QueryParser,
    fields: DocFields,
}

impl ReaderSession {
    /// Open the location for reading. Returns `Ok(None)` when the tenant has
    /// never been written (no directory, or a directory without an index),
    /// which callers treat as an empty index rather than an error.
    pub fn open(location: &Path, analyzer: AnalyzerKind) -> Result<Option<Self>> {
        if !location.is_dir() {
            return Ok(None);
        }
        let dir = MmapDirectory::open(location).map_err(TantivyError::from)?;
        if !Index::exists(&dir).map_err(TantivyError::from)? {
            return Ok(None);
        }
        let index = Index::open(dir)?;
        index.tokenizers().register(TOKENIZER_NAME, analyzer.build());

        let (_, fields) = build_schema();
        let reader = index.reader()?;
        let searcher = reader.searcher();
        let parser = QueryParser::for_index(&index, vec![fields.searchable_text]);
        Ok(Some(Self {
            searcher,
            parser,
            fields,
        }))
    }

    /// Parse a query against the aggregated default field. Malformed input
    /// comes back as the engine's parse error, which the coordinator turns
    /// into a result-set message rather than a failure.
    pub fn parse_query(
        &self,
        query: &str,
    ) -> std::result::Result<Box<dyn Query>, QueryParserError> {
        self.parser.parse_query(query)
    }

    /// Execute a parsed query, returning at most `max_hits` scored hits in
    /// the engine's descending-score order.
    pub fn search(&self, query: &dyn Query, max_hits: usize) -> Result<Vec<(Score, DocAddress)>> {
        let hits = self.searcher.search(query, &TopDocs::with_limit(max_hits))?;
        Ok(hits)
    }

    /// Fetch the stored fields of one hit.
    pub fn stored_doc(&self, address: DocAddress) -> Result<TantivyDocument> {
        let doc = self.searcher.doc(address)?;
        Ok(doc)
    }

    pub(crate) const fn fields(&self) -> DocFields {
        self.fields
    }
}
