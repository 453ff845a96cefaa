//! Editor configuration

use std::path::PathBuf;

use crate::defaults;
use crate::types::NumericError;

/// Settings an [`Editor`](crate::Editor) is opened with
#[derive(Clone, Debug, PartialEq)]
pub struct EditorConfig {
    /// Directory holding the per-slot shape files
    pub storage_dir: PathBuf,
    /// Squared hit-test radius at zoom 1.0
    pub select_radius_sq: f64,
    /// Load every slot that has a file when the editor opens
    pub autoload: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(defaults::STORAGE_DIR),
            select_radius_sq: defaults::SELECT_DISTANCE_SQ,
            autoload: true,
        }
    }
}

impl EditorConfig {
    /// Defaults, with the storage directory taken from `POLYDESIGNER_DIR` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = std::env::var_os(defaults::STORAGE_DIR_ENV) {
            config.storage_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    pub fn with_autoload(mut self, autoload: bool) -> Self {
        self.autoload = autoload;
        self
    }

    /// Set the hit radius (in grid units at zoom 1.0).
    pub fn with_select_radius(mut self, radius: f64) -> Result<Self, NumericError> {
        if radius.is_nan() {
            return Err(NumericError::NaN);
        } else if radius.is_infinite() {
            return Err(NumericError::Infinite);
        } else if radius < 0.0 {
            return Err(NumericError::Negative);
        }
        self.select_radius_sq = radius * radius;
        Ok(self)
    }
}
