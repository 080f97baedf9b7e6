//! Pluggable key extraction capability
//!
//! Key estimation is the one stage hosts may want to replace with a heavier
//! engine (template matching, a trained model). The active extractor lives
//! in a process-wide slot that is initialized lazily on first use; when
//! nothing has been installed, initialization falls back to the built-in
//! chroma-third estimator.
//!
//! Initialization runs at most once. A successful [`initialize`] caches its
//! extractor for the lifetime of the process; [`install`] only wins if it
//! runs before the first initialization.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::analysis::result::KeyEstimate;
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;

/// A key extraction engine
pub trait KeyExtractor: Send + Sync {
    /// Extract the musical key of a mono buffer
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::CapabilityUnavailable`] when the engine
    /// cannot service the request (missing model, unsupported input)
    fn extract(&self, samples: &[f32], sample_rate: u32) -> Result<KeyEstimate, AnalysisError>;
}

/// Built-in extractor backed by the chroma-third estimator
///
/// Always available; it is the fallback when no external engine is installed.
pub struct ChromaKeyExtractor {
    config: AnalysisConfig,
}

impl ChromaKeyExtractor {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }
}

impl KeyExtractor for ChromaKeyExtractor {
    fn extract(&self, samples: &[f32], sample_rate: u32) -> Result<KeyEstimate, AnalysisError> {
        Ok(super::estimate_key(samples, sample_rate, &self.config))
    }
}

static CAPABILITY: OnceCell<Arc<dyn KeyExtractor>> = OnceCell::new();

/// Resolve the active key extractor, initializing the slot on first call
///
/// # Returns
///
/// The installed extractor, or the built-in chroma estimator when nothing
/// was installed beforehand
pub fn initialize() -> Arc<dyn KeyExtractor> {
    CAPABILITY
        .get_or_init(|| {
            log::debug!("No key extractor installed, using the built-in chroma estimator");
            Arc::new(ChromaKeyExtractor::new(AnalysisConfig::default()))
        })
        .clone()
}

/// Install an external key extractor
///
/// # Returns
///
/// `true` when the extractor was installed; `false` when the slot was
/// already initialized (the earlier extractor stays active)
pub fn install(extractor: Arc<dyn KeyExtractor>) -> bool {
    CAPABILITY.set(extractor).is_ok()
}

/// Whether the capability slot has been initialized
pub fn is_ready() -> bool {
    CAPABILITY.get().is_some()
}
