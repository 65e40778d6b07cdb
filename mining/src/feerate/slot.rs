use super::{FeeEstimator, FeeEstimatorConfig};
use arc_swap::ArcSwapOption;
use std::sync::Arc;

/// Holds the optional fee estimator of a transaction manager.
///
/// Replacement is atomic: a concurrent reader observes either the previous instance or the
/// new one, and a reader still holding the previous instance keeps it alive until done.
pub struct FeeEstimatorSlot {
    config: FeeEstimatorConfig,
    current: ArcSwapOption<FeeEstimator>,
}

impl FeeEstimatorSlot {
    /// A slot holding a fresh estimator built from `config`
    pub fn new(config: FeeEstimatorConfig) -> Self {
        let current = ArcSwapOption::from_pointee(FeeEstimator::new(config.clone()));
        Self { config, current }
    }

    /// A slot without an estimator. [`Self::reset_default`] installs one.
    pub fn empty(config: FeeEstimatorConfig) -> Self {
        Self { config, current: ArcSwapOption::empty() }
    }

    pub fn load(&self) -> Option<Arc<FeeEstimator>> {
        self.current.load_full()
    }

    /// Discards the current estimator and installs a freshly initialized one
    pub fn reset_default(&self) -> Arc<FeeEstimator> {
        let fresh = Arc::new(FeeEstimator::new(self.config.clone()));
        self.current.store(Some(fresh.clone()));
        fresh
    }
}

impl Default for FeeEstimatorSlot {
    fn default() -> Self {
        Self::new(FeeEstimatorConfig::default())
    }
}
