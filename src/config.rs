// src/config.rs

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::DatasetError;
use crate::generator::ShapeKind;
use crate::transform::{NoiseConfig, Rotation};

pub const DEFAULT_SAMPLES_PER_KIND: usize = 10;
pub const DEFAULT_POINTS_PER_SHAPE: usize = 64;

/// Settings for generating a dataset. Every field has a default, so a JSON
/// file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub kinds: Vec<ShapeKind>,
    pub samples_per_kind: usize,
    /// Points per shape. `None` keeps each kind's own default, which gives
    /// items of differing lengths.
    pub n_points: Option<usize>,
    pub rotation: Option<Rotation>,
    pub noise: Option<NoiseConfig>,
    pub seed: Option<u64>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            kinds: ShapeKind::ALL.to_vec(),
            samples_per_kind: DEFAULT_SAMPLES_PER_KIND,
            n_points: Some(DEFAULT_POINTS_PER_SHAPE),
            rotation: None,
            noise: None,
            seed: None,
        }
    }
}

impl DatasetConfig {
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let config: DatasetConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        log::debug!("loading dataset config from {}", path.display());
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.kinds.is_empty() {
            return Err(DatasetError::InvalidConfig("at least one shape kind is required".to_owned()));
        }
        if let Some(points) = self.n_points {
            if points < 2 {
                return Err(DatasetError::InvalidConfig(format!("n_points must be at least 2, got {}", points)));
            }
        }
        if let Some(rotation) = &self.rotation {
            rotation.validate()?;
        }
        if let Some(noise) = &self.noise {
            noise.validate()?;
        }
        Ok(())
    }

    /// Seeded generator when `seed` is set, otherwise one seeded from the OS.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
