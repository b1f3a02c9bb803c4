// src/generator.rs

use std::f32::consts::PI;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ShapeError, ShapeResult};
use crate::geometry::{Point2, Shape};

/// Minimum |cross| for three vertices to count as a real triangle.
pub const TRIANGLE_EPSILON: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Triangle,
    Rectangle,
    Diamond,
    Heart,
    Oval,
    Pentagon,
    Star,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 8] = [
        ShapeKind::Circle,
        ShapeKind::Triangle,
        ShapeKind::Rectangle,
        ShapeKind::Diamond,
        ShapeKind::Heart,
        ShapeKind::Oval,
        ShapeKind::Pentagon,
        ShapeKind::Star,
    ];

    pub fn default_points(&self) -> usize {
        match self {
            ShapeKind::Rectangle | ShapeKind::Heart => 100,
            _ => 50,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Diamond => "diamond",
            ShapeKind::Heart => "heart",
            ShapeKind::Oval => "oval",
            ShapeKind::Pentagon => "pentagon",
            ShapeKind::Star => "star",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Generative parameters for each shape family. `None` fields are drawn at
/// generation time from the family's distribution.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeParams {
    Circle { radius: Option<f32> },
    Triangle { vertices: Option<[Point2; 3]> },
    Rectangle { width: Option<f32>, height: Option<f32> },
    Diamond { width: Option<f32>, height: Option<f32> },
    Heart { scale: f32 },
    Oval { major_axis: Option<f32>, minor_axis: Option<f32> },
    Pentagon { radius: Option<f32> },
    Star { arms: Option<usize>, outer_radius: Option<f32>, inner_radius: Option<f32> },
}

impl ShapeParams {
    /// Fully randomised parameters for `kind`.
    pub fn random(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Circle => ShapeParams::Circle { radius: None },
            ShapeKind::Triangle => ShapeParams::Triangle { vertices: None },
            ShapeKind::Rectangle => ShapeParams::Rectangle { width: None, height: None },
            ShapeKind::Diamond => ShapeParams::Diamond { width: None, height: None },
            ShapeKind::Heart => ShapeParams::Heart { scale: 1.0 },
            ShapeKind::Oval => ShapeParams::Oval { major_axis: None, minor_axis: None },
            ShapeKind::Pentagon => ShapeParams::Pentagon { radius: None },
            ShapeKind::Star => ShapeParams::Star { arms: None, outer_radius: None, inner_radius: None },
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeParams::Circle { .. } => ShapeKind::Circle,
            ShapeParams::Triangle { .. } => ShapeKind::Triangle,
            ShapeParams::Rectangle { .. } => ShapeKind::Rectangle,
            ShapeParams::Diamond { .. } => ShapeKind::Diamond,
            ShapeParams::Heart { .. } => ShapeKind::Heart,
            ShapeParams::Oval { .. } => ShapeKind::Oval,
            ShapeParams::Pentagon { .. } => ShapeKind::Pentagon,
            ShapeParams::Star { .. } => ShapeKind::Star,
        }
    }

    /// Builds the shape: raw points, resampled to `n_points` (or the kind's
    /// default), then normalised.
    pub fn generate<R: Rng>(&self, n_points: Option<usize>, rng: &mut R) -> ShapeResult<Shape> {
        let count = n_points.unwrap_or_else(|| self.kind().default_points());
        let raw = self.raw_points_with_count(count, rng)?;
        log::debug!("generated {} with {} raw points, resampling to {}", self.kind(), raw.len(), count);
        Shape::new(&raw, Some(count))
    }

    /// Points before resampling, using the kind's default sampling density.
    pub fn raw_points<R: Rng>(&self, rng: &mut R) -> ShapeResult<Vec<Point2>> {
        self.raw_points_with_count(self.kind().default_points(), rng)
    }

    fn raw_points_with_count<R: Rng>(&self, count: usize, rng: &mut R) -> ShapeResult<Vec<Point2>> {
        match *self {
            ShapeParams::Circle { radius } => {
                let radius = positive_or_sample("radius", radius, || rng.gen_range(0.1..1.0))?;
                Ok(ShapeGenerator::circle_points(radius, count))
            }
            ShapeParams::Triangle { vertices } => match vertices {
                Some(vertices) if is_valid_triangle(&vertices) => Ok(vertices.to_vec()),
                Some(_) => Err(ShapeError::invalid("vertices", "triangle vertices are collinear")),
                None => Ok(ShapeGenerator::random_triangle(rng).to_vec()),
            },
            ShapeParams::Rectangle { width, height } => {
                let width = positive_or_sample("width", width, || rng.gen_range(0.5..1.5))?;
                let height = positive_or_sample("height", height, || rng.gen_range(0.5..1.5))?;
                Ok(vec![
                    Point2::new(-width / 2.0, -height / 2.0),
                    Point2::new(width / 2.0, -height / 2.0),
                    Point2::new(width / 2.0, height / 2.0),
                    Point2::new(-width / 2.0, height / 2.0),
                ])
            }
            ShapeParams::Diamond { width, height } => {
                let width = positive_or_sample("width", width, || rng.gen_range(0.1..0.5))?;
                let height = positive_or_sample("height", height, || rng.gen_range(0.5..1.0))?;
                Ok(vec![
                    Point2::new(0.0, -height / 2.0),
                    Point2::new(width / 2.0, 0.0),
                    Point2::new(0.0, height / 2.0),
                    Point2::new(-width / 2.0, 0.0),
                ])
            }
            ShapeParams::Heart { scale } => {
                let scale = positive_or_sample("scale", Some(scale), || 1.0)?;
                Ok(ShapeGenerator::heart_points(scale, count))
            }
            ShapeParams::Oval { major_axis, minor_axis } => {
                let major = positive_or_sample("major_axis", major_axis, || rng.gen_range(1.0..2.0))?;
                let minor = positive_or_sample("minor_axis", minor_axis, || rng.gen_range(0.5..1.0))?;
                Ok(ShapeGenerator::oval_points(major, minor, count))
            }
            ShapeParams::Pentagon { radius } => {
                let radius = positive_or_sample("radius", radius, || rng.gen_range(0.1..1.0))?;
                // 6-way division of the full turn; the closing point repeats the first.
                let mut points: Vec<Point2> = (0..6)
                    .map(|i| Point2::polar(radius, 2.0 * PI * (i as f32) / 5.0))
                    .collect();
                points.pop();
                Ok(points)
            }
            ShapeParams::Star { arms, outer_radius, inner_radius } => {
                let arms = arms.unwrap_or_else(|| rng.gen_range(5..10));
                if arms < 2 {
                    return Err(ShapeError::invalid("arms", format!("a star needs at least 2 arms, got {}", arms)));
                }
                let outer = positive_or_sample("outer_radius", outer_radius, || rng.gen_range(0.1..1.0))?;
                let inner = positive_or_sample("inner_radius", inner_radius, || outer / rng.gen_range(1.5..4.0))?;
                Ok(ShapeGenerator::star_points(arms, outer, inner))
            }
        }
    }
}

fn positive_or_sample(name: &'static str, value: Option<f32>, sample: impl FnOnce() -> f32) -> ShapeResult<f32> {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        Some(v) => Err(ShapeError::invalid(name, format!("must be positive and finite, got {}", v))),
        None => Ok(sample()),
    }
}

/// True when the three vertices span a non-zero area.
pub fn is_valid_triangle(vertices: &[Point2; 3]) -> bool {
    let v1 = vertices[1].sub(&vertices[0]);
    let v2 = vertices[2].sub(&vertices[0]);
    v1.cross(&v2).abs() > TRIANGLE_EPSILON
}

pub struct ShapeGenerator;

impl ShapeGenerator {
    pub fn random_shape<R: Rng>(kind: ShapeKind, n_points: Option<usize>, rng: &mut R) -> ShapeResult<Shape> {
        ShapeParams::random(kind).generate(n_points, rng)
    }

    pub fn circle_points(radius: f32, num_vertices: usize) -> Vec<Point2> {
        let mut points = Vec::with_capacity(num_vertices);
        for i in 0..num_vertices {
            let angle = (i as f32) * 2.0 * PI / (num_vertices as f32);
            points.push(Point2::polar(radius, angle));
        }
        points
    }

    pub fn oval_points(major_axis: f32, minor_axis: f32, num_vertices: usize) -> Vec<Point2> {
        (0..num_vertices)
            .map(|i| {
                let t = (i as f32) * 2.0 * PI / (num_vertices as f32);
                Point2::new(major_axis / 2.0 * t.cos(), minor_axis / 2.0 * t.sin())
            })
            .collect()
    }

    pub fn heart_points(scale: f32, num_vertices: usize) -> Vec<Point2> {
        (0..num_vertices)
            .map(|i| {
                let t = (i as f32) * 2.0 * PI / (num_vertices as f32);
                let x = 16.0 * t.sin().powi(3);
                let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
                Point2::new(scale * x, scale * y)
            })
            .collect()
    }

    /// `2 * arms` spokes, even indices on the outer radius.
    pub fn star_points(arms: usize, outer_radius: f32, inner_radius: f32) -> Vec<Point2> {
        let spokes = arms * 2;
        (0..spokes)
            .map(|i| {
                let angle = (i as f32) * 2.0 * PI / (spokes as f32);
                let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
                Point2::polar(radius, angle)
            })
            .collect()
    }

    /// Draws vertices in [-1, 1]^2 until they form a non-degenerate triangle.
    pub fn random_triangle<R: Rng>(rng: &mut R) -> [Point2; 3] {
        let mut attempts = 0usize;
        loop {
            attempts += 1;
            let vertices = [
                Point2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)),
                Point2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)),
                Point2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)),
            ];
            if is_valid_triangle(&vertices) {
                if attempts > 1 {
                    log::trace!("triangle accepted after {} attempts", attempts);
                }
                return vertices;
            }
        }
    }
}
