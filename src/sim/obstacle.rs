//! Rectangular obstacles the snake must avoid
//!
//! An obstacle is an axis-aligned rectangle anchored at its top-left corner.
//! Because the anchor lives on the wrapping plane, an obstacle can straddle a
//! world edge; [`Obstacle::split`] decomposes it into non-wrapping pieces so
//! overlap tests and renderers only ever see plain rectangles.
//!
//! Precondition (not runtime-checked): an obstacle's span is strictly smaller
//! than the world dimension it wraps, otherwise `split` cannot terminate.

use serde::{Deserialize, Serialize};

use super::circle::Circle;
use super::coord::Coordinates;
use crate::consts::SEGMENT_RADIUS;

/// Axis-aligned rectangle on the wrapping plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    coordinates: Coordinates,
    width: f64,
    height: f64,
}

/// Half-open interval overlap: `[start1, end1)` meets `[start2, end2)`
#[inline]
fn ranges_overlap(start1: f64, end1: f64, start2: f64, end2: f64) -> bool {
    start1 < end2 && end1 > start2
}

impl Obstacle {
    pub fn new(coordinates: Coordinates, width: f64, height: f64) -> Self {
        Self {
            coordinates,
            width,
            height,
        }
    }

    #[inline]
    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// x of the left side
    pub fn left_x(&self) -> f64 {
        self.coordinates.x()
    }

    /// x of the right side, wrapped back into the world if the rectangle
    /// hangs over the right edge. A right side exactly on the edge stays at
    /// `width`, so an edge-flush rectangle does not count as wrapping.
    pub fn right_x(&self) -> f64 {
        let world = self.coordinates.torus().width;
        let r = self.left_x() + self.width;
        if r > world { r - world } else { r }
    }

    /// y of the top side
    pub fn top_y(&self) -> f64 {
        self.coordinates.y()
    }

    /// y of the bottom side, wrapped like [`Obstacle::right_x`]
    pub fn bottom_y(&self) -> f64 {
        let world = self.coordinates.torus().height;
        let b = self.top_y() + self.height;
        if b > world { b - world } else { b }
    }

    /// Split into 1, 2, or 4 pieces that cover the same area but none of
    /// which hang over a world edge.
    pub fn split(&self) -> Vec<Obstacle> {
        let torus = self.coordinates.torus();
        let mut pieces = Vec::new();

        if self.right_x() <= self.left_x() {
            let left = Obstacle::new(
                Coordinates::new(torus, self.left_x(), self.top_y()),
                torus.width - self.left_x(),
                self.height,
            );
            let right = Obstacle::new(
                Coordinates::new(torus, 0.0, self.top_y()),
                self.right_x(),
                self.height,
            );
            pieces.extend(left.split());
            pieces.extend(right.split());
        } else if self.bottom_y() <= self.top_y() {
            let top = Obstacle::new(
                Coordinates::new(torus, self.left_x(), 0.0),
                self.width,
                self.bottom_y(),
            );
            let bottom = Obstacle::new(
                Coordinates::new(torus, self.left_x(), self.top_y()),
                self.width,
                torus.height - self.top_y(),
            );
            pieces.extend(top.split());
            pieces.extend(bottom.split());
        } else {
            pieces.push(self.clone());
        }

        pieces
    }

    /// Whether this obstacle overlaps a circle, wrap-safe via [`Obstacle::split`]
    pub fn overlaps_circle(&self, c: &Circle) -> bool {
        let cx = c.coordinates.x();
        let cy = c.coordinates.y();
        self.split().iter().any(|piece| {
            ranges_overlap(
                piece.left_x(),
                piece.left_x() + piece.width,
                cx - c.radius,
                cx + c.radius,
            ) && ranges_overlap(
                piece.top_y(),
                piece.top_y() + piece.height,
                cy - c.radius,
                cy + c.radius,
            )
        })
    }

    /// Height of this obstacle in the 3D world, evaluated at its vertical
    /// center with the same tangent correction as circle radii so walls and
    /// spheres shrink and grow together.
    pub fn apparent_height(&self) -> f64 {
        let torus = self.coordinates.torus();
        let center = Coordinates::new(torus, self.left_x(), self.top_y() + self.height / 2.0);
        center.apparent_size(SEGMENT_RADIUS)
    }
}
