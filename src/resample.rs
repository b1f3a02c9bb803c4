// src/resample.rs

use crate::error::{ShapeError, ShapeResult};
use crate::geometry::Point2;

#[derive(Debug, Clone, Copy)]
struct Segment {
    start: Point2,
    end: Point2,
    length: f32,
}

fn closed_segments(points: &[Point2]) -> Vec<Segment> {
    let closing = points.last().copied().zip(points.first().copied());
    points
        .windows(2)
        .map(|pair| (pair[0], pair[1]))
        .chain(closing)
        .map(|(start, end)| Segment { start, end, length: start.distance(&end) })
        .collect()
}

/// Length of the closed loop through `points`, including the closing edge.
pub fn perimeter(points: &[Point2]) -> f32 {
    closed_segments(points).iter().map(|s| s.length).sum()
}

/// Arc length at each vertex of the closed loop, starting at 0. The final
/// entry is the perimeter (the distance back to the first point).
pub fn cumulative_lengths(points: &[Point2]) -> Vec<f32> {
    let mut lengths = Vec::with_capacity(points.len() + 1);
    let mut accumulated = 0.0;
    lengths.push(accumulated);
    for segment in closed_segments(points) {
        accumulated += segment.length;
        lengths.push(accumulated);
    }
    lengths
}

/// Redistributes `count` points evenly by arc length along the closed polygon
/// through `points`.
///
/// Samples sit at `perimeter * i / count` for `i in 0..count`, so the first
/// output point is the first input point and the seam is never duplicated.
pub fn resample_closed(points: &[Point2], count: usize) -> ShapeResult<Vec<Point2>> {
    if count < 2 {
        return Err(ShapeError::TooFewSamples { requested: count });
    }
    if points.is_empty() {
        return Err(ShapeError::NotEnoughPoints { min: 2, actual: 0 });
    }
    if !points.iter().all(Point2::is_finite) {
        return Err(ShapeError::NonFinite);
    }

    let segments = closed_segments(points);
    if let Some(segment) = segments.iter().position(|s| s.length == 0.0) {
        return Err(ShapeError::DegeneratePolygon { segment });
    }

    let total_length: f32 = segments.iter().map(|s| s.length).sum();
    if !total_length.is_finite() {
        return Err(ShapeError::NonFinite);
    }
    log::trace!(
        "resampling {} points (perimeter {:.4}) to {}",
        points.len(),
        total_length,
        count
    );

    let mut output = Vec::with_capacity(count);
    let mut index = 0;
    let mut accumulated = 0.0;
    for i in 0..count {
        let target = total_length * (i as f32) / (count as f32);

        // Targets only grow, so the segment cursor never moves backwards.
        while index + 1 < segments.len() && accumulated + segments[index].length < target {
            accumulated += segments[index].length;
            index += 1;
        }

        let segment = &segments[index];
        let factor = ((target - accumulated) / segment.length).clamp(0.0, 1.0);
        output.push(segment.start.lerp(&segment.end, factor));
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Point2> {
        vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(1.0, 1.0), Point2::new(0.0, 1.0)]
    }

    fn assert_close(a: &[Point2], b: &[Point2], tol: f32) {
        assert_eq!(a.len(), b.len());
        for (p, q) in a.iter().zip(b) {
            assert!(p.distance(q) < tol, "{:?} vs {:?}", p, q);
        }
    }

    #[test]
    fn square_perimeter_includes_closing_edge() {
        assert!((perimeter(&unit_square()) - 4.0).abs() < 1e-6);
        assert_eq!(cumulative_lengths(&unit_square()), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn resample_square_to_eight_hits_corners_and_midpoints() {
        let out = resample_closed(&unit_square(), 8).unwrap();
        let expected = [
            Point2::new(0.0, 0.0),
            Point2::new(0.5, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 0.5),
            Point2::new(1.0, 1.0),
            Point2::new(0.5, 1.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.0, 0.5),
        ];
        assert_close(&out, &expected, 1e-6);
    }

    #[test]
    fn resample_returns_requested_count() {
        for count in [2, 3, 7, 50, 257] {
            assert_eq!(resample_closed(&unit_square(), count).unwrap().len(), count);
        }
    }

    #[test]
    fn resample_is_stable_at_same_count() {
        let once = resample_closed(&unit_square(), 40).unwrap();
        let twice = resample_closed(&once, 40).unwrap();
        assert_close(&once, &twice, 1e-5);
    }

    #[test]
    fn resample_spacing_is_even() {
        let out = resample_closed(&unit_square(), 20).unwrap();
        for pair in out.windows(2) {
            assert!((pair[0].distance(&pair[1]) - 0.2).abs() < 1e-5);
        }
    }

    #[test]
    fn too_few_samples_is_rejected() {
        assert_eq!(resample_closed(&unit_square(), 1), Err(ShapeError::TooFewSamples { requested: 1 }));
        assert_eq!(resample_closed(&unit_square(), 0), Err(ShapeError::TooFewSamples { requested: 0 }));
    }

    #[test]
    fn repeated_vertex_is_degenerate() {
        let mut pts = unit_square();
        pts.insert(2, pts[1]);
        assert_eq!(resample_closed(&pts, 10), Err(ShapeError::DegeneratePolygon { segment: 1 }));
    }

    #[test]
    fn duplicated_seam_is_degenerate() {
        let mut pts = unit_square();
        pts.push(pts[0]);
        assert_eq!(resample_closed(&pts, 10), Err(ShapeError::DegeneratePolygon { segment: 4 }));
    }

    #[test]
    fn overflowing_perimeter_is_rejected() {
        let pts = [Point2::new(3e38, 0.0), Point2::new(-3e38, 0.0), Point2::new(0.0, 3e38)];
        assert_eq!(resample_closed(&pts, 4), Err(ShapeError::NonFinite));
    }

    #[test]
    fn single_point_is_degenerate() {
        assert_eq!(
            resample_closed(&[Point2::new(1.0, 1.0)], 4),
            Err(ShapeError::DegeneratePolygon { segment: 0 })
        );
        assert!(matches!(resample_closed(&[], 4), Err(ShapeError::NotEnoughPoints { .. })));
    }
}
