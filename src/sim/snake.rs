//! The snake: a chain of circular segments replaying the head's path
//!
//! The head is segment 0. It moves along its current heading and logs arc
//! length into the newest waypoint; turning appends a waypoint. Every body
//! segment tracks the waypoint it last departed and how far it has travelled
//! since, consuming the trail waypoint by waypoint. That guarantees each
//! segment retraces the head's historical path at a constant arc-length lag,
//! no matter how sharply the head turns.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::circle::Circle;
use super::coord::{Coordinates, Torus};
use super::waypoint::{WaypointId, WaypointTrail};
use crate::consts::{SEGMENT_RADIUS, SEGMENT_SPACING};
use crate::heading_vector;

/// One circular unit of the snake's body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    coordinates: Coordinates,
    /// The waypoint this segment last departed from. For the head this is
    /// always the newest waypoint in the trail.
    waypoint: WaypointId,
    /// Arc length travelled since departing `waypoint`. Unused for the head,
    /// whose progress lives in the waypoint's own accumulated distance. May
    /// go negative on a freshly grown segment; self-corrects as it moves.
    distance_from_waypoint: f64,
}

impl Segment {
    #[inline]
    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        SEGMENT_RADIUS
    }

    /// Collision shape of this segment
    pub fn circle(&self) -> Circle {
        Circle::new(self.coordinates, SEGMENT_RADIUS)
    }
}

/// The whole snake: waypoint trail plus ordered segments, head first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    trail: WaypointTrail,
    segments: Vec<Segment>,
    speed: f64,
}

impl Snake {
    /// Build a snake with its head at `(x, y)` and `length - 1` body segments
    /// trailing behind along the reversed heading.
    pub fn new(torus: Torus, x: f64, y: f64, angle: f64, speed: f64, length: u32) -> Self {
        let trail = WaypointTrail::new(angle);
        let head = Segment {
            coordinates: Coordinates::new(torus, x, y),
            waypoint: trail.newest(),
            distance_from_waypoint: 0.0,
        };
        let mut snake = Self {
            trail,
            segments: vec![head],
            speed,
        };
        for _ in 1..length {
            snake.grow();
        }
        snake
    }

    #[inline]
    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate the segments head-first. Finite and restartable; renderers
    /// call this freshly every frame.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter()
    }

    /// Current heading of the head
    pub fn heading(&self) -> f64 {
        self.trail.angle(self.segments[0].waypoint)
    }

    pub fn trail(&self) -> &WaypointTrail {
        &self.trail
    }

    /// Turn the head by `angle_delta`, recording a new waypoint at the new
    /// heading. Callers gate on nonzero deltas; every call appends exactly
    /// one waypoint.
    pub fn rotate(&mut self, angle_delta: f64) {
        let new_angle = self.heading() + angle_delta;
        self.segments[0].waypoint = self.trail.push(new_angle);
    }

    /// Move every segment one frame forward: head first, then body segments
    /// in chain order. Body segments read waypoint history, not prior-frame
    /// positions, so the order introduces no lag.
    pub fn advance(&mut self) {
        self.advance_head();
        for i in 1..self.segments.len() {
            self.advance_body(i, self.speed);
        }
        // The tail references the oldest waypoint any segment still needs
        if let Some(tail) = self.segments.last() {
            let oldest = tail.waypoint;
            self.trail.trim_before(oldest);
        }
    }

    /// Append a body segment one spacing behind the current tail, along the
    /// tail's heading reversed. The new segment inherits the tail's waypoint
    /// and starts one spacing short of the tail's progress on it.
    pub fn grow(&mut self) {
        let tail_index = self.segments.len() - 1;
        let tail = &self.segments[tail_index];
        let behind = heading_vector(self.trail.angle(tail.waypoint) + PI);
        let coordinates = Coordinates::new(
            tail.coordinates.torus(),
            tail.coordinates.x() + behind.x * SEGMENT_SPACING,
            tail.coordinates.y() + behind.y * SEGMENT_SPACING,
        );
        let segment = Segment {
            coordinates,
            waypoint: tail.waypoint,
            distance_from_waypoint: self.distance_from_waypoint(tail_index) - SEGMENT_SPACING,
        };
        self.segments.push(segment);
    }

    fn advance_head(&mut self) {
        let speed = self.speed;
        let head = &mut self.segments[0];
        let dir = heading_vector(self.trail.angle(head.waypoint));
        head.coordinates.set_x(head.coordinates.x() + dir.x * speed);
        head.coordinates.set_y(head.coordinates.y() + dir.y * speed);
        self.trail.add_distance(head.waypoint, speed);
    }

    /// Consume `distance` along the waypoint trail. While the current
    /// waypoint has arc length left, advance along its heading; otherwise
    /// consume what remains, hop to the next waypoint, and continue with the
    /// leftover. A zero distance changes nothing.
    fn advance_body(&mut self, index: usize, mut distance: f64) {
        while distance > 0.0 {
            let segment = &mut self.segments[index];
            let angle = self.trail.angle(segment.waypoint);
            let total = self.trail.distance(segment.waypoint);

            let used = if segment.distance_from_waypoint + distance < total {
                segment.distance_from_waypoint += distance;
                distance
            } else {
                let remaining = total - segment.distance_from_waypoint;
                segment.waypoint = self.trail.next(segment.waypoint);
                segment.distance_from_waypoint = 0.0;
                remaining
            };

            let dir = heading_vector(angle);
            let segment = &mut self.segments[index];
            segment
                .coordinates
                .set_x(segment.coordinates.x() + dir.x * used);
            segment
                .coordinates
                .set_y(segment.coordinates.y() + dir.y * used);

            distance -= used;
        }
    }

    /// Arc length segment `index` has travelled past its current waypoint
    fn distance_from_waypoint(&self, index: usize) -> f64 {
        if index == 0 {
            self.trail.distance(self.segments[0].waypoint)
        } else {
            self.segments[index].distance_from_waypoint
        }
    }
}
