//! Toro Snake - a snake arcade game on the surface of a torus
//!
//! Core modules:
//! - `sim`: Deterministic simulation (toroidal geometry, snake motion, collisions, level state)
//! - `schema`: Static level descriptions and the JSON level-file loader
//!
//! The playfield is a flat rectangle that wraps at both edges. The same
//! coordinates also describe a point on a torus: the world width maps to the
//! long way around the donut and the world height to the short way. Everything
//! that needs a 3D position routes through [`sim::Coordinates`], so the flat
//! simulation and the curved projection can never drift apart.

pub mod schema;
pub mod sim;

pub use schema::{LevelSchema, SchemaError};
pub use sim::{Level, LevelState, Snake};

/// Game configuration constants
pub mod consts {
    /// Radius of one snake segment in world units
    pub const SEGMENT_RADIUS: f64 = 10.0;
    /// Arc-length spacing between consecutive segments along the trail
    pub const SEGMENT_SPACING: f64 = SEGMENT_RADIUS * 2.0 + 2.0;

    /// Radius of a food pellet
    pub const FOOD_RADIUS: f64 = 5.0;

    /// How far the head turns per frame of held input (5 degrees)
    pub const TURN_STEP: f64 = std::f64::consts::TAU * 5.0 / 360.0;

    /// Frame interval of the driving loop
    pub const TICK_INTERVAL_MS: u64 = 20;
    /// Frames to keep running after a win/loss before the driver bails out
    pub const END_GAME_TICKS: u32 = 100;
}

/// Unit vector for a heading angle, in screen convention (y grows downward)
#[inline]
pub fn heading_vector(angle: f64) -> glam::DVec2 {
    glam::DVec2::new(angle.cos(), -angle.sin())
}
