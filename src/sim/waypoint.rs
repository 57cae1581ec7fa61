//! Waypoint trail left behind by the snake's head
//!
//! Every time the head turns it records a waypoint: the new heading plus a
//! running total of how far the head has travelled since. Body segments replay
//! the head's exact historical path by walking the same trail at a fixed
//! arc-length lag.
//!
//! The trail is an arena indexed by creation order. Segments hold a
//! [`WaypointId`] instead of a reference, which keeps ownership trivial and
//! lets the prefix nobody references anymore be trimmed away.

use serde::{Deserialize, Serialize};

/// Index of a waypoint in creation order. Monotonically increasing for the
/// lifetime of a trail, surviving prefix trims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WaypointId(usize);

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Waypoint {
    /// Heading while this waypoint was current. Fixed at creation.
    angle: f64,
    /// Total arc length the head travelled while on this waypoint
    distance: f64,
}

/// Arena of waypoints in time order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaypointTrail {
    /// Creation-order index of `waypoints[0]`
    base: usize,
    waypoints: Vec<Waypoint>,
}

impl WaypointTrail {
    /// Start a trail with a single waypoint at the initial heading
    pub fn new(initial_angle: f64) -> Self {
        Self {
            base: 0,
            waypoints: vec![Waypoint {
                angle: initial_angle,
                distance: 0.0,
            }],
        }
    }

    /// Id of the most recently created waypoint (the head's current one)
    pub fn newest(&self) -> WaypointId {
        WaypointId(self.base + self.waypoints.len() - 1)
    }

    /// Record a turn: append a waypoint at the new heading
    pub fn push(&mut self, angle: f64) -> WaypointId {
        self.waypoints.push(Waypoint {
            angle,
            distance: 0.0,
        });
        self.newest()
    }

    /// The waypoint created right after `id`
    #[inline]
    pub fn next(&self, id: WaypointId) -> WaypointId {
        WaypointId(id.0 + 1)
    }

    pub fn angle(&self, id: WaypointId) -> f64 {
        self.waypoints[self.index(id)].angle
    }

    pub fn distance(&self, id: WaypointId) -> f64 {
        self.waypoints[self.index(id)].distance
    }

    /// Accumulate arc length flowed through a waypoint by the head
    pub fn add_distance(&mut self, id: WaypointId, d: f64) {
        let idx = self.index(id);
        self.waypoints[idx].distance += d;
    }

    /// Number of waypoints currently retained
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Drop every waypoint strictly older than `id`. Callers pass the oldest
    /// id any segment still references; ids stay valid across trims.
    pub fn trim_before(&mut self, id: WaypointId) {
        let n = id.0.saturating_sub(self.base).min(self.waypoints.len());
        if n > 0 {
            self.waypoints.drain(..n);
            self.base += n;
        }
    }

    #[inline]
    fn index(&self, id: WaypointId) -> usize {
        debug_assert!(id.0 >= self.base, "waypoint id was trimmed away");
        id.0 - self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trail_has_one_waypoint() {
        let trail = WaypointTrail::new(0.5);
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.angle(trail.newest()), 0.5);
        assert_eq!(trail.distance(trail.newest()), 0.0);
    }

    #[test]
    fn test_push_grows_by_exactly_one() {
        let mut trail = WaypointTrail::new(0.0);
        let first = trail.newest();
        let second = trail.push(1.0);
        assert_eq!(trail.len(), 2);
        assert_eq!(trail.next(first), second);
        assert_eq!(trail.newest(), second);
    }

    #[test]
    fn test_distance_accumulates_per_waypoint() {
        let mut trail = WaypointTrail::new(0.0);
        let first = trail.newest();
        trail.add_distance(first, 2.0);
        trail.add_distance(first, 3.0);
        let second = trail.push(1.0);
        trail.add_distance(second, 7.0);
        assert_eq!(trail.distance(first), 5.0);
        assert_eq!(trail.distance(second), 7.0);
    }

    #[test]
    fn test_trim_keeps_ids_valid() {
        let mut trail = WaypointTrail::new(0.0);
        trail.push(1.0);
        let third = trail.push(2.0);
        trail.add_distance(third, 4.0);

        trail.trim_before(third);
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.angle(third), 2.0);
        assert_eq!(trail.distance(third), 4.0);
        assert_eq!(trail.newest(), third);
    }

    #[test]
    fn test_trim_before_oldest_is_noop() {
        let mut trail = WaypointTrail::new(0.0);
        let first = trail.newest();
        trail.push(1.0);
        trail.trim_before(first);
        assert_eq!(trail.len(), 2);
    }
}
