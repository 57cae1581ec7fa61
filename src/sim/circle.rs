//! Circle collision geometry
//!
//! Food and snake segments are all circles on the flat plane. Collision is a
//! plain squared-distance test; tangency does not count as overlap.

use serde::{Deserialize, Serialize};

use super::coord::Coordinates;

/// A circle on the wrapping plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub coordinates: Coordinates,
    pub radius: f64,
}

impl Circle {
    pub fn new(coordinates: Coordinates, radius: f64) -> Self {
        Self {
            coordinates,
            radius,
        }
    }

    /// Whether this circle overlaps another. Strict: touching circles do not
    /// overlap.
    pub fn overlaps(&self, other: &Circle) -> bool {
        let dx = other.coordinates.x() - self.coordinates.x();
        let dy = other.coordinates.y() - self.coordinates.y();
        let radii = self.radius + other.radius;
        dx * dx + dy * dy < radii * radii
    }

    /// Radius of the sphere in the 3D world that corresponds to this circle.
    /// Varies with position: smaller on the inside of the torus, bigger on
    /// the outside.
    pub fn apparent_radius(&self) -> f64 {
        self.coordinates.apparent_size(self.radius)
    }
}
