//! Process-wide cache of loaded detection models.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{CenfindError, Result};

/// Loads each model directory at most once and hands out shared handles.
///
/// The registry is an explicit value rather than a global, so callers
/// decide its lifetime and tests can use their own.
pub struct ModelRegistry<S> {
    models: Mutex<HashMap<PathBuf, Arc<S>>>,
}

impl<S> Default for ModelRegistry<S> {
    fn default() -> Self {
        Self {
            models: Mutex::new(HashMap::new()),
        }
    }
}

impl<S> ModelRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the model stored for `path`, loading it with `loader` on first
    /// use.
    ///
    /// The lock is held while loading, so concurrent callers asking for the
    /// same path never load it twice.
    ///
    /// # Errors
    ///
    /// `ModelUnavailable` if `path` is not an existing directory. Errors from
    /// `loader` are returned as is and nothing is cached.
    pub fn get_or_load<F>(&self, path: impl AsRef<Path>, loader: F) -> Result<Arc<S>>
    where
        F: FnOnce(&Path) -> Result<S>,
    {
        let path = path.as_ref();
        let mut models = self.models.lock();
        if let Some(model) = models.get(path) {
            return Ok(Arc::clone(model));
        }

        if !path.is_dir() {
            return Err(CenfindError::ModelUnavailable(format!(
                "model directory {} does not exist",
                path.display()
            )));
        }

        log::info!("Loading model from {}", path.display());
        let model = Arc::new(loader(path)?);
        models.insert(path.to_path_buf(), Arc::clone(&model));
        Ok(model)
    }

    /// Whether a model for `path` is already loaded.
    pub fn is_loaded(&self, path: impl AsRef<Path>) -> bool {
        self.models.lock().contains_key(path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.models.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.lock().is_empty()
    }
}
