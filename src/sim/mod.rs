//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-driven only (one `Level::update` per animation tick)
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! Renderers read the level strictly between updates; nothing in here blocks,
//! spawns, or shares mutable state across threads.

pub mod circle;
pub mod coord;
pub mod level;
pub mod obstacle;
pub mod snake;
pub mod waypoint;

pub use circle::Circle;
pub use coord::{Coordinates, Torus};
pub use level::{Food, Level, LevelState};
pub use obstacle::Obstacle;
pub use snake::{Segment, Snake};
pub use waypoint::{WaypointId, WaypointTrail};
