// src/dataset.rs

use std::ops::Index;

use rand::Rng;

use crate::config::DatasetConfig;
use crate::error::{DatasetError, ShapeError, ShapeResult};
use crate::generator::{ShapeKind, ShapeParams};
use crate::geometry::Shape;
use crate::transform::{add_noise, rotate_shape};

/// Sized, indexable collection of training samples.
pub trait Dataset {
    type Item;

    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<Self::Item>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fixed list of pre-generated shapes. Each item is the shape's coordinates
/// flattened row-major (`x0, y0, x1, y1, ...`).
#[derive(Clone, Debug, Default)]
pub struct ShapeDataset {
    shapes: Vec<Shape>,
    labels: Option<Vec<ShapeKind>>,
}

impl ShapeDataset {
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self { shapes, labels: None }
    }

    pub fn labelled(items: Vec<(ShapeKind, Shape)>) -> Self {
        let (labels, shapes): (Vec<ShapeKind>, Vec<Shape>) = items.into_iter().unzip();
        Self { shapes, labels: Some(labels) }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&[f32]> {
        self.shapes.get(index).map(Shape::flattened)
    }

    pub fn item(&self, index: usize) -> ShapeResult<&[f32]> {
        self.shapes
            .get(index)
            .map(Shape::flattened)
            .ok_or(ShapeError::IndexOutOfRange { index, len: self.shapes.len() })
    }

    pub fn label(&self, index: usize) -> Option<ShapeKind> {
        self.labels.as_ref().and_then(|labels| labels.get(index).copied())
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f32]> + '_ {
        self.shapes.iter().map(Shape::flattened)
    }
}

impl<'a> Dataset for &'a ShapeDataset {
    type Item = &'a [f32];

    fn len(&self) -> usize {
        ShapeDataset::len(self)
    }

    fn get(&self, index: usize) -> Option<&'a [f32]> {
        let dataset: &'a ShapeDataset = *self;
        dataset.get(index)
    }
}

impl Index<usize> for ShapeDataset {
    type Output = [f32];

    fn index(&self, index: usize) -> &[f32] {
        self.shapes[index].flattened()
    }
}

/// Generates a labelled dataset from a [`DatasetConfig`].
pub struct DatasetBuilder {
    config: DatasetConfig,
}

impl DatasetBuilder {
    pub fn from_config(config: &DatasetConfig) -> Result<Self, DatasetError> {
        config.validate()?;
        Ok(Self { config: config.clone() })
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    pub fn build<R: Rng>(&self, rng: &mut R) -> Result<ShapeDataset, DatasetError> {
        let config = &self.config;
        let mut items = Vec::with_capacity(config.kinds.len() * config.samples_per_kind);

        for &kind in &config.kinds {
            for _ in 0..config.samples_per_kind {
                let mut shape = ShapeParams::random(kind).generate(config.n_points, rng)?;
                if let Some(rotation) = config.rotation {
                    shape = rotate_shape(&shape, rotation, rng)?;
                }
                if let Some(noise) = &config.noise {
                    shape = add_noise(&shape, noise, rng)?;
                }
                items.push((kind, shape));
            }
            log::debug!("generated {} {} samples", config.samples_per_kind, kind);
        }

        log::info!(
            "built dataset with {} shapes across {} kinds",
            items.len(),
            config.kinds.len()
        );
        Ok(ShapeDataset::labelled(items))
    }
}
