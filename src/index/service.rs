//! Multi-tenant front door.
//!
//! A [`SearchService`] hands out one [`TenantIndex`] per tenant id, created
//! lazily and cached, so every caller addressing the same tenant shares the
//! same coordinator and therefore the same lock. Tenant storage lives at
//! `{index.root}/{tenant}/`; analyzer identifiers from configuration are
//! resolved once, when the service is built.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::analyzer::AnalyzerKind;
use crate::config::SearchConfig;
use crate::content::{Content, TenantId};
use crate::error::Result;
use crate::index::coordinator::TenantIndex;
use crate::results::SearchResults;

pub struct SearchService {
    config: SearchConfig,
    default_analyzer: AnalyzerKind,
    tenant_analyzers: HashMap<String, AnalyzerKind>,
    tenants: RwLock<HashMap<TenantId, Arc<TenantIndex>>>,
}

impl SearchService {
    /// Validate the configuration, resolve every analyzer identifier, and
    /// build the service. No tenant storage is touched until first use.
    pub fn open(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let default_analyzer = AnalyzerKind::resolve(&config.analyzers.default)?;
        let mut tenant_analyzers = HashMap::new();
        for (tenant, analyzer) in &config.analyzers.tenants {
            tenant_analyzers.insert(tenant.clone(), AnalyzerKind::resolve(analyzer)?);
        }
        info!(
            target: "index",
            root = %config.index.root.display(),
            analyzer = default_analyzer.id(),
            "search service ready"
        );
        Ok(Self {
            config,
            default_analyzer,
            tenant_analyzers,
            tenants: RwLock::new(HashMap::new()),
        })
    }

    /// The coordinator for one tenant. The same id always yields the same
    /// instance, which is what keeps per-tenant operations serialized.
    pub fn tenant(&self, id: &str) -> Result<Arc<TenantIndex>> {
        let tenant = TenantId::new(id)?;
        if let Some(existing) = self.tenants.read().get(&tenant) {
            return Ok(Arc::clone(existing));
        }

        let mut tenants = self.tenants.write();
        let index = tenants
            .entry(tenant.clone())
            .or_insert_with(|| Arc::new(self.build_coordinator(tenant)));
        Ok(Arc::clone(index))
    }

    pub fn clear(&self, tenant: &str) -> Result<()> {
        self.tenant(tenant)?.clear()
    }

    pub fn rebuild(&self, tenant: &str, all_content: &[Content]) -> Result<()> {
        self.tenant(tenant)?.rebuild(all_content)
    }

    pub fn upsert(&self, tenant: &str, content: &Content) -> Result<()> {
        self.tenant(tenant)?.upsert(content)
    }

    pub fn delete(&self, tenant: &str, content_id: &str) -> Result<()> {
        self.tenant(tenant)?.delete(content_id)
    }

    pub fn search(&self, tenant: &str, query: &str) -> Result<SearchResults> {
        self.tenant(tenant)?.search(query)
    }

    fn build_coordinator(&self, tenant: TenantId) -> TenantIndex {
        let analyzer = self
            .tenant_analyzers
            .get(tenant.as_str())
            .copied()
            .unwrap_or(self.default_analyzer);
        let location = self.config.index.location_for(&tenant);
        TenantIndex::new(
            tenant,
            location,
            analyzer,
            self.config.index.writer_heap_bytes(),
            self.config.query.max_hits as usize,
        )
    }
}
