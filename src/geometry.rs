// src/geometry.rs

use bytemuck::{Pod, Zeroable};

use crate::error::{ShapeError, ShapeResult};
use crate::resample;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable, PartialEq)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point at `radius` along the direction `angle_rad` from the origin.
    pub fn polar(radius: f32, angle_rad: f32) -> Self {
        Self::new(radius * angle_rad.cos(), radius * angle_rad.sin())
    }

    pub fn dot(&self, other: &Point2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// z component of the 3D cross product.
    pub fn cross(&self, other: &Point2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    pub fn sub(&self, other: &Point2) -> Point2 {
        Point2::new(self.x - other.x, self.y - other.y)
    }

    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn distance(&self, other: &Point2) -> f32 {
        self.sub(other).length()
    }

    pub fn lerp(&self, other: &Point2, t: f32) -> Point2 {
        Point2::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<glam::Vec2> for Point2 {
    fn from(v: glam::Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point2> for glam::Vec2 {
    fn from(p: Point2) -> Self {
        glam::Vec2::new(p.x, p.y)
    }
}

/// Maps points into [0, 1] using one min/max shared by both axes, so the
/// aspect ratio survives.
pub fn normalise(points: &[Point2]) -> ShapeResult<Vec<Point2>> {
    if points.is_empty() {
        return Err(ShapeError::NotEnoughPoints { min: 1, actual: 0 });
    }
    if !points.iter().all(Point2::is_finite) {
        return Err(ShapeError::NonFinite);
    }

    let (min_val, max_val) = points.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p.x).min(p.y), hi.max(p.x).max(p.y))
    });

    let extent = max_val - min_val;
    if !extent.is_finite() {
        return Err(ShapeError::NonFinite);
    }
    if extent == 0.0 {
        return Err(ShapeError::ZeroExtent);
    }

    Ok(points
        .iter()
        .map(|p| Point2::new((p.x - min_val) / extent, (p.y - min_val) / extent))
        .collect())
}

/// A closed curve held as normalised points in the unit square. The last
/// point connects back to the first.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    points: Vec<Point2>, // Kept private: a Shape is immutable once built
}

impl Shape {
    /// Resamples `raw` to `n_points` (when given) and normalises the result.
    pub fn new(raw: &[Point2], n_points: Option<usize>) -> ShapeResult<Self> {
        let points = match n_points {
            Some(count) => normalise(&resample::resample_closed(raw, count)?)?,
            None => normalise(raw)?,
        };
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Row-major `x0, y0, x1, y1, ...` view over the points.
    pub fn flattened(&self) -> &[f32] {
        bytemuck::cast_slice(&self.points)
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.flattened().to_vec()
    }

    pub fn area(&self) -> f32 {
        polygon_area(&self.points)
    }

    pub fn perimeter(&self) -> f32 {
        resample::perimeter(&self.points)
    }

    /// Axis-aligned (min, max) corners.
    pub fn bounds(&self) -> (Point2, Point2) {
        self.points.iter().fold(
            (Point2::new(f32::INFINITY, f32::INFINITY), Point2::new(f32::NEG_INFINITY, f32::NEG_INFINITY)),
            |(lo, hi), p| (Point2::new(lo.x.min(p.x), lo.y.min(p.y)), Point2::new(hi.x.max(p.x), hi.y.max(p.y))),
        )
    }
}

/// Unsigned shoelace area of a closed polygon.
pub fn polygon_area(points: &[Point2]) -> f32 {
    let count = points.len();
    if count < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..count {
        let j = (i + 1) % count;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area.abs() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalise_uses_shared_extent_for_both_axes() {
        let pts = [Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), Point2::new(4.0, 2.0), Point2::new(0.0, 2.0)];
        let out = normalise(&pts).unwrap();
        assert_eq!(out[2], Point2::new(1.0, 0.5));
        assert_eq!(out[3], Point2::new(0.0, 0.5));
    }

    #[test]
    fn normalise_shifts_by_global_minimum() {
        let pts = [Point2::new(-1.0, 3.0), Point2::new(1.0, 1.0)];
        let out = normalise(&pts).unwrap();
        // min = -1, max = 3 across both axes
        assert_eq!(out[0], Point2::new(0.0, 1.0));
        assert_eq!(out[1], Point2::new(0.5, 0.5));
    }

    #[test]
    fn normalise_rejects_constant_points() {
        let pts = [Point2::new(2.0, 2.0); 4];
        assert_eq!(normalise(&pts), Err(ShapeError::ZeroExtent));
    }

    #[test]
    fn normalise_rejects_nan() {
        let pts = [Point2::new(0.0, f32::NAN), Point2::new(1.0, 1.0)];
        assert_eq!(normalise(&pts), Err(ShapeError::NonFinite));
    }

    #[test]
    fn normalise_rejects_overflowing_extent() {
        let pts = [Point2::new(3e38, 0.0), Point2::new(-3e38, 0.0), Point2::new(0.0, 3e38)];
        assert_eq!(normalise(&pts), Err(ShapeError::NonFinite));
        assert_eq!(Shape::new(&pts, None), Err(ShapeError::NonFinite));
    }

    #[test]
    fn bounds_of_normalised_shape_touch_zero_and_one() {
        let pts = [Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), Point2::new(4.0, 2.0), Point2::new(0.0, 2.0)];
        let shape = Shape::new(&pts, None).unwrap();
        assert_eq!(shape.bounds(), (Point2::new(0.0, 0.0), Point2::new(1.0, 0.5)));
    }

    #[test]
    fn shape_perimeter_matches_closed_loop_length() {
        let pts = [Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), Point2::new(4.0, 2.0), Point2::new(0.0, 2.0)];
        let shape = Shape::new(&pts, Some(12)).unwrap();
        assert_eq!(shape.perimeter(), resample::perimeter(shape.points()));
        assert!((shape.perimeter() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn flattened_is_row_major() {
        let shape = Shape::new(&[Point2::new(0.0, 0.0), Point2::new(2.0, 0.0), Point2::new(0.0, 1.0)], None).unwrap();
        assert_eq!(shape.flattened(), &[0.0, 0.0, 1.0, 0.0, 0.0, 0.5]);
        assert_eq!(shape.to_vec().len(), 2 * shape.len());
    }

    #[test]
    fn unit_square_area() {
        let pts = [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(1.0, 1.0), Point2::new(0.0, 1.0)];
        assert!((polygon_area(&pts) - 1.0).abs() < 1e-6);
        assert_eq!(polygon_area(&pts[..2]), 0.0);
    }

    #[test]
    fn cross_of_axes() {
        assert_eq!(Point2::new(1.0, 0.0).cross(&Point2::new(0.0, 1.0)), 1.0);
    }
}
