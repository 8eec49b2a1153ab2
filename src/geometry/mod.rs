//! Geometric primitives for PAGE-XML polygons.
//!
//! Outlines are stored in `points` attributes as whitespace separated
//! `x,y` pairs of integer pixel coordinates, e.g. `"0,0 10,0 10,10 0,10"`.

/// A 2D point in image space (pixels, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    /// X coordinate
    pub x: i64,
    /// Y coordinate
    pub y: i64,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagexml::geometry::Point;
    ///
    /// let point = Point::new(10, 20);
    /// assert_eq!(point.x, 10);
    /// assert_eq!(point.y, 20);
    /// ```
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Coordinate of this point on the given axis.
    pub fn coordinate(&self, axis: Axis) -> i64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

/// Image axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal axis (left to right)
    X,
    /// Vertical axis (top to bottom)
    Y,
}

/// Parse a `points` attribute value.
///
/// Returns `None` if the list is empty or any pair is malformed.
///
/// # Examples
///
/// ```
/// use pagexml::geometry::{parse_points, Point};
///
/// let points = parse_points("0,0 10,0 10,10").unwrap();
/// assert_eq!(points[1], Point::new(10, 0));
/// assert!(parse_points("0,0 10").is_none());
/// ```
pub fn parse_points(value: &str) -> Option<Vec<Point>> {
    let points = value
        .split_whitespace()
        .map(|pair| {
            let (x, y) = pair.split_once(',')?;
            Some(Point::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
        })
        .collect::<Option<Vec<_>>>()?;

    if points.is_empty() {
        None
    } else {
        Some(points)
    }
}

/// Format points as a `points` attribute value.
pub fn format_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Smallest coordinate on `axis`, `None` for an empty slice.
pub fn minimum(points: &[Point], axis: Axis) -> Option<i64> {
    points.iter().map(|p| p.coordinate(axis)).min()
}

/// Largest coordinate on `axis`, `None` for an empty slice.
pub fn maximum(points: &[Point], axis: Axis) -> Option<i64> {
    points.iter().map(|p| p.coordinate(axis)).max()
}

/// Arithmetic mean of the coordinates on `axis`, `None` for an empty slice.
pub fn centroid(points: &[Point], axis: Axis) -> Option<f64> {
    if points.is_empty() {
        return None;
    }
    let sum: f64 = points.iter().map(|p| p.coordinate(axis) as f64).sum();
    Some(sum / points.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_points() {
        let points = parse_points("0,0 10,0 10,10 0,10").unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[2], Point::new(10, 10));
    }

    #[test]
    fn test_parse_points_extra_whitespace() {
        let points = parse_points("  1,2\n\t3,4  ").unwrap();
        assert_eq!(points, vec![Point::new(1, 2), Point::new(3, 4)]);
    }

    #[test]
    fn test_parse_points_negative() {
        let points = parse_points("-5,3").unwrap();
        assert_eq!(points[0], Point::new(-5, 3));
    }

    #[test]
    fn test_parse_points_invalid() {
        assert!(parse_points("").is_none());
        assert!(parse_points("   ").is_none());
        assert!(parse_points("1,2 3").is_none());
        assert!(parse_points("1.5,2").is_none());
        assert!(parse_points("a,b").is_none());
    }

    #[test]
    fn test_format_points() {
        let points = vec![Point::new(0, 0), Point::new(10, 5)];
        assert_eq!(format_points(&points), "0,0 10,5");
        assert_eq!(parse_points(&format_points(&points)).unwrap(), points);
    }

    #[test]
    fn test_extremum_and_centroid() {
        let points = parse_points("0,20 10,20 10,30 0,30").unwrap();
        assert_eq!(minimum(&points, Axis::Y), Some(20));
        assert_eq!(maximum(&points, Axis::Y), Some(30));
        assert_eq!(maximum(&points, Axis::X), Some(10));
        assert_eq!(centroid(&points, Axis::Y), Some(25.0));
        assert_eq!(centroid(&points, Axis::X), Some(5.0));
    }

    #[test]
    fn test_empty_slice() {
        assert_eq!(minimum(&[], Axis::X), None);
        assert_eq!(centroid(&[], Axis::Y), None);
    }
}
