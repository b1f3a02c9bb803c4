// src/transform.rs

use glam::{Mat2, Vec2};
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ShapeError, ShapeResult};
use crate::geometry::{Point2, Shape};

/// Rotates `points` by `degrees` counter-clockwise about the origin.
pub fn rotate_points(points: &[Point2], degrees: f32) -> Vec<Point2> {
    let rotation = Mat2::from_angle(degrees.to_radians());
    points
        .iter()
        .map(|&p| Point2::from(rotation * Vec2::from(p)))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    /// Exact angle in degrees.
    Fixed(f32),
    /// Uniform angle in `[0, max_degrees)`.
    Random { max_degrees: f32 },
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation::Random { max_degrees: 360.0 }
    }
}

impl Rotation {
    pub fn validate(&self) -> ShapeResult<()> {
        let usable = match *self {
            Rotation::Fixed(degrees) => degrees.is_finite(),
            Rotation::Random { max_degrees } => max_degrees.is_finite() && max_degrees >= 0.0,
        };
        if usable {
            Ok(())
        } else {
            Err(ShapeError::invalid("rotation", format!("unusable rotation {:?}", self)))
        }
    }

    pub fn angle<R: Rng>(&self, rng: &mut R) -> ShapeResult<f32> {
        self.validate()?;
        Ok(match *self {
            Rotation::Fixed(degrees) => degrees,
            Rotation::Random { max_degrees } if max_degrees > 0.0 => rng.gen_range(0.0..max_degrees),
            Rotation::Random { .. } => 0.0,
        })
    }
}

/// Rotates a shape and runs it back through resample + normalise at the same
/// point count.
pub fn rotate_shape<R: Rng>(shape: &Shape, rotation: Rotation, rng: &mut R) -> ShapeResult<Shape> {
    let degrees = rotation.angle(rng)?;
    log::debug!("rotating {}-point shape by {:.2} degrees", shape.len(), degrees);
    let rotated = rotate_points(shape.points(), degrees);
    Shape::new(&rotated, Some(rotated.len()))
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Maximum absolute perturbation per coordinate.
    pub level: f32,
    /// Share of points that get perturbed, in [0, 1].
    pub fraction: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self { level: 0.05, fraction: 0.3 }
    }
}

impl NoiseConfig {
    pub fn validate(&self) -> ShapeResult<()> {
        if !self.level.is_finite() || self.level < 0.0 {
            return Err(ShapeError::invalid("noise_level", format!("must be finite and >= 0, got {}", self.level)));
        }
        // The draw range is `2 * level` wide and must stay finite.
        if self.level > f32::MAX / 2.0 {
            return Err(ShapeError::invalid("noise_level", format!("too large, got {}", self.level)));
        }
        if !(0.0..=1.0).contains(&self.fraction) {
            return Err(ShapeError::invalid("noise_fraction", format!("must lie in [0, 1], got {}", self.fraction)));
        }
        Ok(())
    }

    /// Number of points touched in a shape of `num_points`.
    pub fn noisy_count(&self, num_points: usize) -> usize {
        ((self.fraction * num_points as f64).floor() as usize).min(num_points)
    }
}

/// Copies `points` and adds uniform noise to a random subset of them.
/// Returns the perturbed copy and the sorted indices that were touched.
pub fn perturb_points<R: Rng>(points: &[Point2], config: &NoiseConfig, rng: &mut R) -> ShapeResult<(Vec<Point2>, Vec<usize>)> {
    config.validate()?;
    let mut noisy = points.to_vec();
    let amount = config.noisy_count(points.len());

    let mut indices = index::sample(rng, points.len(), amount).into_vec();
    indices.sort_unstable();

    let level = config.level;
    for &i in &indices {
        noisy[i].x += level * rng.gen_range(-1.0f32..=1.0);
        noisy[i].y += level * rng.gen_range(-1.0f32..=1.0);
    }
    Ok((noisy, indices))
}

/// Perturbs a fraction of a shape's points, then resamples to the original
/// count and renormalises.
pub fn add_noise<R: Rng>(shape: &Shape, config: &NoiseConfig, rng: &mut R) -> ShapeResult<Shape> {
    let (noisy, indices) = perturb_points(shape.points(), config, rng)?;
    log::debug!("perturbed {} of {} points (level {})", indices.len(), shape.len(), config.level);
    Shape::new(&noisy, Some(shape.len()))
}
