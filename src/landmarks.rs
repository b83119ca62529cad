//! Landmark frame type and fixed-index accessors for the facial features
//! the gesture engine consumes.
//!
//! A [`LandmarkFrame`] is the full landmark set reported by the upstream
//! face-mesh detector for one camera frame. The engine only ever reads the
//! two six-point eye contours and the nose tip; the indices follow the
//! MediaPipe FaceMesh numbering.

use crate::constants::{LEFT_EYE_INDICES, NOSE_TIP_INDEX, RIGHT_EYE_INDICES};
use crate::{Error, Result};

/// A 2-D landmark position in camera pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        f64::from(self.x - other.x).hypot(f64::from(self.y - other.y))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// One face's full landmark set for a single camera frame.
///
/// Transient: owned by the current loop iteration, never retained.
#[derive(Debug, Clone)]
pub struct LandmarkFrame {
    points: Vec<Point>,
}

impl LandmarkFrame {
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn point(&self, index: usize) -> Result<Point> {
        self.points.get(index).copied().ok_or_else(|| {
            Error::InvalidInput(format!(
                "landmark index {index} out of range ({} points in frame)",
                self.points.len()
            ))
        })
    }

    fn contour(&self, indices: &[usize; 6]) -> Result<[Point; 6]> {
        Ok([
            self.point(indices[0])?,
            self.point(indices[1])?,
            self.point(indices[2])?,
            self.point(indices[3])?,
            self.point(indices[4])?,
            self.point(indices[5])?,
        ])
    }

    /// Six-point contour of the left eye, in aperture order.
    pub fn left_eye(&self) -> Result<[Point; 6]> {
        self.contour(&LEFT_EYE_INDICES)
    }

    /// Six-point contour of the right eye, in aperture order.
    pub fn right_eye(&self) -> Result<[Point; 6]> {
        self.contour(&RIGHT_EYE_INDICES)
    }

    /// The nose tip, used as the head-reference point.
    pub fn nose_tip(&self) -> Result<Point> {
        self.point(NOSE_TIP_INDEX)
    }
}

impl From<Vec<(i32, i32)>> for LandmarkFrame {
    fn from(points: Vec<(i32, i32)>) -> Self {
        Self::new(points.into_iter().map(Point::from).collect())
    }
}
