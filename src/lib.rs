// src/lib.rs

pub mod config;
pub mod dataset;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod resample;
pub mod transform;

pub use config::DatasetConfig;
pub use dataset::{Dataset, DatasetBuilder, ShapeDataset};
pub use error::{DatasetError, ShapeError, ShapeResult};
pub use generator::{ShapeGenerator, ShapeKind, ShapeParams};
pub use geometry::{normalise, Point2, Shape};
pub use resample::resample_closed;
pub use transform::{add_noise, rotate_points, rotate_shape, NoiseConfig, Rotation};
