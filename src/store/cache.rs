use super::snapshot::Snapshot;
use super::source::{TableSource, XlsxSource};
use crate::error::LoadError;
use crate::utils::today;
use moka::sync::Cache;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Default freshness window: 5 minutes
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(300);

/// Owns the current snapshot and decides when to re-read the source.
///
/// A single-entry cache with a time-to-live of `freshness`. Concurrent misses share one
/// read of the source. The snapshot is swapped as a whole; readers holding an `Arc` keep
/// their copy while a reload happens. A failed forced reload leaves the previous snapshot
/// in place.
pub struct RecordStore {
    source: Box<dyn TableSource>,
    freshness: Duration,
    cache: Cache<(), Arc<Snapshot>>,
}

impl RecordStore {
    pub fn new(source: impl TableSource + 'static, freshness: Duration) -> Self {
        Self {
            source: Box::new(source),
            freshness,
            cache: Cache::builder().max_capacity(1).time_to_live(freshness).build(),
        }
    }

    pub fn open_xlsx(path: impl AsRef<Path>, freshness: Duration) -> Self {
        Self::new(XlsxSource::new(path), freshness)
    }

    pub fn freshness(&self) -> Duration {
        self.freshness
    }

    /// Current snapshot, re-reading the source when forced, never loaded, or expired.
    #[instrument(name = "record_store_snapshot", skip(self), fields(source = %self.source.describe()))]
    pub fn get_snapshot(&self, force_reload: bool) -> Result<Arc<Snapshot>, LoadError> {
        if force_reload {
            let snapshot = self.load(true)?;
            self.cache.insert((), Arc::clone(&snapshot));
            return Ok(snapshot);
        }

        self.cache
            .try_get_with((), || self.load(false))
            .map_err(Arc::unwrap_or_clone)
    }

    /// True when nothing is cached or the cached copy has outlived the freshness window.
    pub fn is_stale(&self) -> bool {
        !self.cache.contains_key(&())
    }

    fn load(&self, forced: bool) -> Result<Arc<Snapshot>, LoadError> {
        debug!(forced, "Reading source");
        let raw = self.source.read_tables()?;
        let snapshot = Snapshot::from_tables(&raw, today())?;

        info!(
            employees = snapshot.employees.len(),
            projects = snapshot.projects.len(),
            assignments = snapshot.assignments.len(),
            daily_billing = snapshot.daily_billing.len(),
            billing_origin = ?snapshot.billing_origin,
            date_fallbacks = snapshot.date_fallbacks,
            forced,
            "Snapshot loaded"
        );

        Ok(Arc::new(snapshot))
    }
}
