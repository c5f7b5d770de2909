use super::ddg::DataDependencyGraph;
use super::paths::ConcretePath;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cache identity for one (procedure, call site, callee) request. The underlying CFGs
/// are immutable, so identical keys always denote identical results.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathKey {
    pub procedure: String,
    pub call_site: String,
    pub callee: String,
}

impl PathKey {
    pub fn new(
        procedure: impl Into<String>,
        call_site: impl Into<String>,
        callee: impl Into<String>,
    ) -> Self {
        Self {
            procedure: procedure.into(),
            call_site: call_site.into(),
            callee: callee.into(),
        }
    }
}

impl std::fmt::Display for PathKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:callsite@{}->{}",
            self.procedure, self.call_site, self.callee
        )
    }
}

/// Everything computed for one call site: the concrete paths plus the predicate and
/// DDG for each, index-aligned with `paths`.
#[derive(Debug, Clone, Default)]
pub struct PathBundle {
    pub paths: Vec<ConcretePath>,
    pub predicates: Vec<Vec<String>>,
    pub ddgs: Vec<DataDependencyGraph>,
}

impl PathBundle {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CacheStatistics {
    pub hits: u64,
    pub misses: u64,
    pub total_compute_time: Duration,
}

/// Memoizes path bundles per key. Entries are never evicted within one analysis run;
/// batch runs are one-shot and the working set is bounded by the chain input.
#[derive(Debug, Default)]
pub struct PathCache {
    entries: HashMap<PathKey, Arc<PathBundle>>,
    stats: CacheStatistics,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute<F>(&mut self, key: PathKey, compute: F) -> Arc<PathBundle>
    where
        F: FnOnce() -> PathBundle,
    {
        if let Some(bundle) = self.entries.get(&key) {
            self.stats.hits += 1;
            tracing::debug!(key = %key, "reusing cached path bundle");
            return bundle.clone();
        }

        self.stats.misses += 1;
        let start = Instant::now();
        let bundle = Arc::new(compute());
        self.stats.total_compute_time += start.elapsed();

        self.entries.insert(key, bundle.clone());
        bundle
    }

    pub fn statistics(&self) -> &CacheStatistics {
        &self.stats
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.stats.hits + self.stats.misses;
        if total == 0 {
            0.0
        } else {
            self.stats.hits as f64 / total as f64
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
