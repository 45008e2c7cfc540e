use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::filter::parameters::{ChromaKeyUniforms, FilterParameters};

/// The current filter parameters, shared between the settings handler that
/// writes them and the render path that reads them.
///
/// Clones share the same underlying value. Readers always see either the
/// state before or after a whole update, never a partial merge.
#[derive(Debug, Clone, Default)]
pub struct SharedFilterParameters {
    inner: Arc<RwLock<FilterParameters>>,
}

impl SharedFilterParameters {
    pub fn new(initial: FilterParameters) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn update_with(&self, changes: &FilterParameters) {
        self.inner.write().update_with(changes);
    }

    /// Parses `settings` and merges them in. A malformed map leaves the
    /// current parameters untouched.
    pub fn apply_settings(&self, settings: &Map<String, Value>) -> Result<()> {
        let changes = FilterParameters::from_map(settings).inspect_err(|e| {
            warn!("Rejected filter settings update: {}", e);
        })?;
        debug!("Applying filter settings update");
        self.update_with(&changes);
        Ok(())
    }

    pub fn snapshot(&self) -> FilterParameters {
        self.inner.read().clone()
    }

    pub fn uniforms(&self) -> ChromaKeyUniforms {
        self.inner.read().uniforms()
    }
}
