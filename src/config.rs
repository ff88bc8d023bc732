use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analyzer::AnalyzerKind;
use crate::content::TenantId;
use crate::error::{IndexError, Result};

/// The engine rejects writer arenas smaller than this.
const MIN_WRITER_HEAP_MB: u32 = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub analyzers: AnalyzersConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index: IndexConfig::default(),
            query: QueryConfig::default(),
            analyzers: AnalyzersConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Build from defaults, an optional TOML file (falling back to the
    /// `INKDEX_CONFIG` path if set), and `INKDEX_*` environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("INKDEX_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parse a TOML document over the defaults. Used heavily by tests.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut config = Self::default();
        let patch = toml::from_str(raw)
            .map_err(|err| IndexError::Config(format!("parse config: {err}")))?;
        config.merge_patch(patch);
        config.validate()?;
        Ok(config)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| IndexError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| IndexError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.index {
            self.index.merge(patch);
        }
        if let Some(patch) = patch.query {
            self.query.merge(patch);
        }
        if let Some(patch) = patch.analyzers {
            self.analyzers.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_string("INKDEX_INDEX_ROOT") {
            self.index.root = PathBuf::from(value);
        }
        if let Some(value) = env_u32("INKDEX_INDEX_WRITER_HEAP_MB")? {
            self.index.writer_heap_mb = value;
        }
        if let Some(value) = env_u32("INKDEX_QUERY_MAX_HITS")? {
            self.query.max_hits = value;
        }
        if let Some(value) = env_string("INKDEX_ANALYZERS_DEFAULT") {
            self.analyzers.default = value;
        }
        Ok(())
    }

    /// Check bounds and resolve every configured analyzer identifier, so a
    /// bad configuration fails here instead of inside a later operation.
    pub fn validate(&self) -> Result<()> {
        if self.index.writer_heap_mb < MIN_WRITER_HEAP_MB {
            return Err(IndexError::Config(format!(
                "index.writer_heap_mb must be at least {MIN_WRITER_HEAP_MB}, got {}",
                self.index.writer_heap_mb
            )));
        }
        if self.query.max_hits == 0 {
            return Err(IndexError::Config(
                "query.max_hits must be at least 1".to_string(),
            ));
        }
        AnalyzerKind::resolve(&self.analyzers.default)?;
        for (tenant, analyzer) in &self.analyzers.tenants {
            TenantId::new(tenant.clone())?;
            AnalyzerKind::resolve(analyzer)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Directory the per-tenant index locations live under.
    #[serde(default)]
    pub root: PathBuf,
    #[serde(default)]
    pub writer_heap_mb: u32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./search-index"),
            writer_heap_mb: 16,
        }
    }
}

impl IndexConfig {
    fn merge(&mut self, patch: IndexPatch) {
        if let Some(value) = patch.root {
            self.root = value;
        }
        if let Some(value) = patch.writer_heap_mb {
            self.writer_heap_mb = value;
        }
    }

    /// Index storage location for one tenant: `{root}/{tenant}`.
    #[must_use]
    pub fn location_for(&self, tenant: &TenantId) -> PathBuf {
        self.root.join(tenant.as_str())
    }

    #[must_use]
    pub const fn writer_heap_bytes(&self) -> usize {
        self.writer_heap_mb as usize * 1024 * 1024
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Result-set cap applied to every search.
    #[serde(default)]
    pub max_hits: u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self { max_hits: 100 }
    }
}

impl QueryConfig {
    fn merge(&mut self, patch: QueryPatch) {
        if let Some(value) = patch.max_hits {
            self.max_hits = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzersConfig {
    /// Analyzer identifier used by tenants without an override.
    #[serde(default)]
    pub default: String,
    /// Per-tenant overrides, keyed by tenant id.
    #[serde(default)]
    pub tenants: BTreeMap<String, String>,
}

impl Default for AnalyzersConfig {
    fn default() -> Self {
        Self {
            default: "simple".to_string(),
            tenants: BTreeMap::new(),
        }
    }
}

impl AnalyzersConfig {
    fn merge(&mut self, patch: AnalyzersPatch) {
        if let Some(value) = patch.default {
            self.default = value;
        }
        if let Some(values) = patch.tenants {
            self.tenants.extend(values);
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub index: Option<IndexPatch>,
    pub query: Option<QueryPatch>,
    pub analyzers: Option<AnalyzersPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct IndexPatch {
    pub root: Option<PathBuf>,
    pub writer_heap_mb: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct QueryPatch {
    pub max_hits: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AnalyzersPatch {
    pub default: Option<String>,
    pub tenants: Option<BTreeMap<String, String>>,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_u32(key: &str) -> Result<Option<u32>> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<u32>()
            .map(Some)
            .map_err(|err| IndexError::Config(format!("invalid {key} value {value}: {err}"))),
        Err(_) => Ok(None),
    }
}
