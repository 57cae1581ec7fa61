//! Toroidal coordinate model
//!
//! A position in the game world is a point on a flat rectangle that wraps at
//! both edges. The same point can be read back as a position on the surface
//! of a torus: `x` maps to the angle the long way around the donut, `y` to
//! the angle the short way around the tube. [`Coordinates::embedding_transform`]
//! is the single source of truth for that mapping - anything that needs a 3D
//! position (sphere placement, obstacle wireframes) must route through it
//! rather than reimplement the trigonometry.

use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Wrap bounds of the playfield, doubling as the torus the field maps onto.
///
/// Copied into every [`Coordinates`] so a point can normalize itself on every
/// write without holding a reference back to its schema.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Torus {
    pub width: f64,
    pub height: f64,
}

impl Torus {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Minor radius of the torus: the tube the world height wraps around
    #[inline]
    pub fn inner_radius(&self) -> f64 {
        self.height / TAU
    }

    /// Major radius of the torus: the ring the world width wraps around
    #[inline]
    pub fn outer_radius(&self) -> f64 {
        self.width / TAU
    }

    /// Convert an x displacement to an angle the long way around the torus
    #[inline]
    pub fn x_to_angle(&self, x: f64) -> f64 {
        (x / self.width) * TAU
    }

    /// Convert a y displacement to an angle the short way around the torus
    #[inline]
    pub fn y_to_angle(&self, y: f64) -> f64 {
        (y / self.height) * TAU
    }
}

/// Normalize `v` into `[0, bound)`, congruent to `v` modulo `bound`.
///
/// A single fp modulo plus a fix-up: `rem_euclid` can round a tiny negative
/// input up to exactly `bound`, which would break the half-open invariant.
#[inline]
fn wrap(v: f64, bound: f64) -> f64 {
    let r = v.rem_euclid(bound);
    if r >= bound { 0.0 } else { r }
}

/// A point on the wrapping plane
///
/// Invariant: `0 <= x < width` and `0 <= y < height` after construction and
/// after every write.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    torus: Torus,
    x: f64,
    y: f64,
}

impl Coordinates {
    pub fn new(torus: Torus, x: f64, y: f64) -> Self {
        Self {
            torus,
            x: wrap(x, torus.width),
            y: wrap(y, torus.height),
        }
    }

    #[inline]
    pub fn torus(&self) -> Torus {
        self.torus
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Store `x`, wrap-normalized into `[0, width)`
    pub fn set_x(&mut self, x: f64) {
        self.x = wrap(x, self.torus.width);
    }

    /// Store `y`, wrap-normalized into `[0, height)`
    pub fn set_y(&mut self, y: f64) {
        self.y = wrap(y, self.torus.height);
    }

    /// Angle of this point the long way around the torus
    #[inline]
    pub fn x_angle(&self) -> f64 {
        self.torus.x_to_angle(self.x)
    }

    /// Angle of this point the short way around the torus
    #[inline]
    pub fn y_angle(&self) -> f64 {
        self.torus.y_to_angle(self.y)
    }

    /// 4x4 transform that carries the origin to this point's position on the
    /// torus surface, `height_above_surface` units out along the tube normal.
    ///
    /// Composition: rotate by the x angle around the torus's central axis,
    /// translate out by the major radius, rotate by the negated y angle around
    /// the tube's local axis, translate out by the minor radius plus height.
    pub fn embedding_transform(&self, height_above_surface: f64) -> DMat4 {
        let first_rotation = DMat4::from_rotation_z(self.x_angle());
        let first_translation =
            DMat4::from_translation(DVec3::new(0.0, self.torus.outer_radius(), 0.0));
        let second_rotation = DMat4::from_rotation_x(-self.y_angle());
        let second_translation = DMat4::from_translation(DVec3::new(
            0.0,
            self.torus.inner_radius() + height_above_surface,
            0.0,
        ));

        first_rotation * first_translation * second_rotation * second_translation
    }

    /// 3D embedding-space position of this point
    pub fn to_3d(&self, height_above_surface: f64) -> DVec3 {
        self.embedding_transform(height_above_surface)
            .transform_point3(DVec3::ZERO)
    }

    /// Apparent size in the 3D world of a flat-world radius centered here.
    ///
    /// The flat-to-torus mapping distorts sizes: a circle looks smaller on
    /// the inside of the torus and bigger on the outside. The correction is
    /// the chord subtended by the radius's x angle, scaled by the distance of
    /// this point from the torus's central axis.
    pub fn apparent_size(&self, flat_radius: f64) -> f64 {
        (self.torus.x_to_angle(flat_radius) / 2.0).tan()
            * 2.0
            * (self.torus.outer_radius() + self.y_angle().cos() * self.torus.inner_radius())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn torus() -> Torus {
        Torus::new(400.0, 200.0)
    }

    #[test]
    fn test_wrap_on_construction() {
        let c = Coordinates::new(torus(), 450.0, -30.0);
        assert!((c.x() - 50.0).abs() < 1e-9);
        assert!((c.y() - 170.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_x_wraps_large_magnitudes() {
        let mut c = Coordinates::new(torus(), 0.0, 0.0);
        c.set_x(-1e12 + 3.0);
        assert!(c.x() >= 0.0 && c.x() < 400.0);
        c.set_x(1e12 + 3.0);
        assert!(c.x() >= 0.0 && c.x() < 400.0);
    }

    #[test]
    fn test_wrap_tiny_negative_stays_half_open() {
        let mut c = Coordinates::new(torus(), 0.0, 0.0);
        c.set_x(-1e-18);
        assert!(c.x() < 400.0);
        c.set_y(-1e-18);
        assert!(c.y() < 200.0);
    }

    #[test]
    fn test_angles() {
        let t = torus();
        let c = Coordinates::new(t, 100.0, 50.0);
        assert!((c.x_angle() - TAU / 4.0).abs() < 1e-9);
        assert!((c.y_angle() - TAU / 4.0).abs() < 1e-9);
        assert!((t.x_to_angle(400.0) - TAU).abs() < 1e-9);
    }

    #[test]
    fn test_radii_from_dimensions() {
        let t = torus();
        assert!((t.outer_radius() - 400.0 / TAU).abs() < 1e-9);
        assert!((t.inner_radius() - 200.0 / TAU).abs() < 1e-9);
    }

    #[test]
    fn test_embedding_origin_sits_on_outside_of_torus() {
        let t = torus();
        let p = Coordinates::new(t, 0.0, 0.0).to_3d(0.0);
        assert!(p.abs_diff_eq(
            DVec3::new(0.0, t.outer_radius() + t.inner_radius(), 0.0),
            1e-9
        ));
    }

    #[test]
    fn test_embedding_half_height_sits_on_inside_of_torus() {
        let t = torus();
        let p = Coordinates::new(t, 0.0, 100.0).to_3d(0.0);
        assert!(p.abs_diff_eq(
            DVec3::new(0.0, t.outer_radius() - t.inner_radius(), 0.0),
            1e-9
        ));
    }

    #[test]
    fn test_embedding_height_moves_along_tube_normal() {
        let c = Coordinates::new(torus(), 37.0, 81.0);
        let on_surface = c.to_3d(0.0);
        let lifted = c.to_3d(5.0);
        assert!((on_surface.distance(lifted) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_apparent_size_larger_outside_than_inside() {
        let t = torus();
        let outside = Coordinates::new(t, 0.0, 0.0).apparent_size(10.0);
        let inside = Coordinates::new(t, 0.0, 100.0).apparent_size(10.0);
        assert!(outside > inside);
    }

    proptest! {
        #[test]
        fn prop_wrap_normalizes_and_preserves_congruence(x in -1e6f64..1e6f64) {
            let mut c = Coordinates::new(torus(), 0.0, 0.0);
            c.set_x(x);
            prop_assert!(c.x() >= 0.0 && c.x() < 400.0);
            // Congruent mod width: difference is an integer multiple of width
            let k = (x - c.x()) / 400.0;
            prop_assert!((k - k.round()).abs() < 1e-6);
        }

        #[test]
        fn prop_wrap_is_idempotent(y in -1e6f64..1e6f64) {
            let mut c = Coordinates::new(torus(), 0.0, 0.0);
            c.set_y(y);
            let once = c.y();
            c.set_y(once);
            prop_assert_eq!(once, c.y());
        }
    }
}
