//! Content Index Coordinator: the per-tenant update protocol and
//! concurrency contract.
//!
//! One [`TenantIndex`] owns one tenant's index storage and the lock that
//! serializes access to it:
//! - mutating operations (`clear`, `rebuild`, `upsert`, `delete`) hold the
//!   write guard across the whole open→stage→commit sequence,
//! - `search` holds the read guard across open→query→shape, so searches run
//!   concurrently with each other and a search started after a commit sees
//!   that commit.
//!
//! The lock is scoped to this tenant. Operations on different tenants go
//! through different `TenantIndex` instances and never contend.
//!
//! The update protocol is delete-then-add: every upsert first stages the
//! deletion of the id, then stages the rebuilt document only if the item is
//! still indexable. Both steps happen inside one writer session under one
//! write guard, which is what keeps duplicate and stale documents out.

use std::path::PathBuf;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::analyzer::AnalyzerKind;
use crate::content::{Content, TenantId};
use crate::error::Result;
use crate::index::document::IndexableDocument;
use crate::index::session::{ReaderSession, WriterSession};
use crate::results::{SearchHit, SearchResults};

/// Coordinates all index operations for a single tenant.
pub struct TenantIndex {
    tenant: TenantId,
    location: PathBuf,
    analyzer: AnalyzerKind,
    heap_bytes: usize,
    max_hits: usize,
    lock: RwLock<()>,
}

impl TenantIndex {
    pub(crate) fn new(
        tenant: TenantId,
        location: PathBuf,
        analyzer: AnalyzerKind,
        heap_bytes: usize,
        max_hits: usize,
    ) -> Self {
        Self {
            tenant,
            location,
            analyzer,
            heap_bytes,
            max_hits,
            lock: RwLock::new(()),
        }
    }

    #[must_use]
    pub const fn tenant(&self) -> &TenantId {
        &self.tenant
    }

    /// Recreate the tenant's index empty. Creates the storage location if
    /// this tenant was never written before.
    pub fn clear(&self) -> Result<()> {
        let _guard = self.lock.write();
        let mut session = self.open_writer()?;
        session.delete_all()?;
        session.commit()?;
        info!(target: "index", tenant = %self.tenant, "index cleared");
        Ok(())
    }

    /// Replace the index contents with documents built from `all_content`,
    /// in iteration order.
    ///
    /// The batch is atomic: prior contents are cleared and the new documents
    /// added inside one session with a single commit at the end. If any
    /// build or add fails the session is dropped uncommitted and the
    /// previously committed state remains in place.
    pub fn rebuild(&self, all_content: &[Content]) -> Result<()> {
        let _guard = self.lock.write();
        let mut session = self.open_writer()?;
        session.delete_all()?;
        let mut added = 0usize;
        for content in all_content {
            if let Some(doc) = IndexableDocument::build(content) {
                session.add(&doc)?;
                added += 1;
            }
        }
        session.commit()?;
        info!(
            target: "index",
            tenant = %self.tenant,
            total = all_content.len(),
            added,
            "index rebuilt"
        );
        Ok(())
    }

    /// Bring the index in line with one content item.
    ///
    /// Delete-then-add, in that order: any document carrying this id is
    /// staged for deletion first, and the rebuilt document is staged after
    /// it only when the item is still indexable. An entry that was just
    /// unpublished therefore ends up deleted and not re-added.
    pub fn upsert(&self, content: &Content) -> Result<()> {
        let _guard = self.lock.write();
        let mut session = self.open_writer()?;
        session.delete_by_id(content.id());
        let added = match IndexableDocument::build(content) {
            Some(doc) => {
                session.add(&doc)?;
                true
            }
            None => false,
        };
        session.commit()?;
        debug!(
            target: "index",
            tenant = %self.tenant,
            id = content.id(),
            added,
            "content upserted"
        );
        Ok(())
    }

    /// Remove any document matching the id. Succeeds as a no-op when none
    /// matches.
    pub fn delete(&self, content_id: &str) -> Result<()> {
        let _guard = self.lock.write();
        let mut session = self.open_writer()?;
        session.delete_by_id(content_id);
        session.commit()?;
        debug!(target: "index", tenant = %self.tenant, id = content_id, "content deleted");
        Ok(())
    }

    /// Run a free-text query against the aggregated searchable field and
    /// shape up to `max_hits` results.
    ///
    /// A blank query returns an empty result set without touching the
    /// engine, as does a query against a tenant that has never been
    /// written. A query the engine cannot parse comes back as an empty
    /// result set carrying a message; it is never an error.
    pub fn search(&self, query: &str) -> Result<SearchResults> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(SearchResults::empty(query));
        }

        let _guard = self.lock.read();
        let Some(session) = ReaderSession::open(&self.location, self.analyzer)? else {
            return Ok(SearchResults::empty(query));
        };
        let parsed = match session.parse_query(trimmed) {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!(
                    target: "search",
                    tenant = %self.tenant,
                    query = trimmed,
                    error = %err,
                    "query did not parse"
                );
                return Ok(SearchResults::unparsable(query));
            }
        };

        let raw_hits = session.search(parsed.as_ref(), self.max_hits)?;
        let mut hits = Vec::with_capacity(raw_hits.len());
        for (score, address) in raw_hits {
            let doc = session.stored_doc(address)?;
            hits.push(SearchHit::from_stored(
                &self.tenant,
                &doc,
                session.fields(),
                score,
            ));
        }
        debug!(
            target: "search",
            tenant = %self.tenant,
            query = trimmed,
            hits = hits.len(),
            "search completed"
        );
        Ok(SearchResults::with_hits(query, hits))
    }

    fn open_writer(&self) -> Result<WriterSession> {
        WriterSession::open(&self.location, self.analyzer, self.heap_bytes)
    }
}
