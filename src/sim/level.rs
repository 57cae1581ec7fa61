//! Level state machine
//!
//! A level owns one snake, the current food pellet, and the obstacle set
//! built from its schema. `update` advances exactly one frame; `Won` and
//! `Lost` are terminal, after which updates stop mutating gameplay state
//! (the presentation layer decides how long to keep calling).

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::circle::Circle;
use super::coord::Coordinates;
use super::obstacle::Obstacle;
use super::snake::Snake;
use crate::consts::FOOD_RADIUS;
use crate::schema::LevelSchema;

/// The possible states of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelState {
    Normal,
    Won,
    Lost,
}

impl LevelState {
    #[inline]
    pub fn is_game_over(&self) -> bool {
        !matches!(self, LevelState::Normal)
    }
}

/// A circular food pellet
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Food {
    coordinates: Coordinates,
}

impl Food {
    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn radius(&self) -> f64 {
        FOOD_RADIUS
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.coordinates, FOOD_RADIUS)
    }
}

/// Live, mutating state of one playthrough of a schema
#[derive(Debug, Clone)]
pub struct Level {
    schema: LevelSchema,
    obstacles: Vec<Obstacle>,
    snake: Snake,
    food: Food,
    food_left: u32,
    state: LevelState,
    rng: Pcg32,
}

impl Level {
    /// Start a level from a schema. The seed drives food placement only, so
    /// equal seeds replay identical food sequences.
    pub fn new(schema: LevelSchema, seed: u64) -> Self {
        let torus = schema.torus();
        let start = &schema.snake_start;
        let snake = Snake::new(torus, start.x, start.y, start.angle, start.speed, start.length);
        let obstacles = schema
            .obstacles
            .iter()
            .map(|o| Obstacle::new(Coordinates::new(torus, o.x, o.y), o.width, o.height))
            .collect();

        let mut level = Self {
            food_left: schema.food_count,
            schema,
            obstacles,
            snake,
            food: Food {
                coordinates: Coordinates::new(torus, 0.0, 0.0),
            },
            state: LevelState::Normal,
            rng: Pcg32::seed_from_u64(seed),
        };
        level.place_food();
        level
    }

    pub fn schema(&self) -> &LevelSchema {
        &self.schema
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn food_left(&self) -> u32 {
        self.food_left
    }

    pub fn state(&self) -> LevelState {
        self.state
    }

    /// Advance the level one frame.
    ///
    /// Fixed order: rotate the head (nonzero turn only), move every segment,
    /// then check food, self-collision, and obstacles. Terminal states latch;
    /// a finished level ignores further updates.
    pub fn update(&mut self, turn_angle: f64) {
        if self.state.is_game_over() {
            return;
        }

        if turn_angle != 0.0 {
            self.snake.rotate(turn_angle);
        }
        self.snake.advance();

        let head = self.snake.head().circle();
        if head.overlaps(&self.food.circle()) {
            self.food_left = self.food_left.saturating_sub(1);
            self.snake.grow();
            if self.food_left > 0 {
                self.place_food();
            } else {
                log::info!("level '{}' won", self.schema.name);
                self.state = LevelState::Won;
                return;
            }
        }

        if self.snake.segments().skip(1).any(|s| head.overlaps(&s.circle())) {
            log::info!("level '{}' lost: snake ran into itself", self.schema.name);
            self.state = LevelState::Lost;
            return;
        }

        if self.obstacles.iter().any(|o| o.overlaps_circle(&head)) {
            log::info!("level '{}' lost: snake hit an obstacle", self.schema.name);
            self.state = LevelState::Lost;
        }
    }

    /// Drop the food at a random position clear of every obstacle. Retries
    /// unbounded; terminates because obstacle coverage is sparse relative to
    /// the world (documented schema precondition).
    fn place_food(&mut self) {
        let torus = self.schema.torus();
        loop {
            let coordinates = Coordinates::new(
                torus,
                self.rng.random_range(0.0..torus.width),
                self.rng.random_range(0.0..torus.height),
            );
            let food = Food { coordinates };
            if !self
                .obstacles
                .iter()
                .any(|o| o.overlaps_circle(&food.circle()))
            {
                log::debug!("food placed at ({:.1}, {:.1})", coordinates.x(), coordinates.y());
                self.food = food;
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ObstacleSpec, SnakeStart};
    use std::f64::consts::FRAC_PI_2;

    fn schema(food_count: u32, obstacles: Vec<ObstacleSpec>) -> LevelSchema {
        LevelSchema {
            name: "test".into(),
            width: 400.0,
            height: 200.0,
            food_count,
            snake_start: SnakeStart {
                x: 100.0,
                y: 100.0,
                angle: 0.0,
                speed: 2.0,
                length: 3,
            },
            obstacles,
        }
    }

    fn food_at(level: &Level, x: f64, y: f64) -> Food {
        Food {
            coordinates: Coordinates::new(level.schema().torus(), x, y),
        }
    }

    #[test]
    fn test_update_moves_head() {
        let mut level = Level::new(schema(1, vec![]), 7);
        level.update(0.0);
        let head = level.snake().head().coordinates();
        assert!((head.x() - 102.0).abs() < 1e-9);
        assert!((head.y() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_eating_last_food_wins() {
        let mut level = Level::new(schema(1, vec![]), 7);
        assert_eq!(level.food_left(), 1);
        level.food = food_at(&level, 102.0, 100.0);
        level.update(0.0);
        assert_eq!(level.food_left(), 0);
        assert_eq!(level.state(), LevelState::Won);
        assert_eq!(level.snake().len(), 4);
    }

    #[test]
    fn test_eating_with_food_remaining_relocates() {
        let mut level = Level::new(schema(3, vec![]), 7);
        level.food = food_at(&level, 102.0, 100.0);
        level.update(0.0);
        assert_eq!(level.food_left(), 2);
        assert_eq!(level.state(), LevelState::Normal);
        assert_eq!(level.snake().len(), 4);
        // Food moved somewhere that is not the head
        assert!(!level.snake().head().circle().overlaps(&level.food.circle()));
    }

    #[test]
    fn test_tight_loop_loses_on_self_collision() {
        let mut level = Level::new(schema(1, vec![]), 7);
        level.food = food_at(&level, 300.0, 50.0);
        // Two sharp left turns curl the head back into the first body segment
        level.update(FRAC_PI_2);
        assert_eq!(level.state(), LevelState::Normal);
        level.update(FRAC_PI_2);
        assert_eq!(level.state(), LevelState::Lost);
    }

    #[test]
    fn test_obstacle_ahead_loses() {
        let wall = ObstacleSpec {
            x: 110.0,
            y: 80.0,
            width: 20.0,
            height: 40.0,
        };
        let mut level = Level::new(schema(1, vec![wall]), 7);
        level.food = food_at(&level, 300.0, 50.0);
        level.update(0.0);
        assert_eq!(level.state(), LevelState::Lost);
    }

    #[test]
    fn test_terminal_state_freezes_gameplay() {
        let mut level = Level::new(schema(1, vec![]), 7);
        level.food = food_at(&level, 102.0, 100.0);
        level.update(0.0);
        assert_eq!(level.state(), LevelState::Won);

        let head_before = level.snake().head().coordinates();
        let len_before = level.snake().len();
        for _ in 0..10 {
            level.update(0.3);
        }
        assert_eq!(level.state(), LevelState::Won);
        assert_eq!(level.snake().len(), len_before);
        assert_eq!(level.snake().head().coordinates(), head_before);
    }

    #[test]
    fn test_food_never_lands_on_obstacle() {
        // Obstacle covering most of the left half forces plenty of retries
        let big = ObstacleSpec {
            x: 0.0,
            y: 0.0,
            width: 190.0,
            height: 200.0,
        };
        let mut level = Level::new(schema(5, vec![big.clone()]), 42);
        for _ in 0..50 {
            level.place_food();
            let food = level.food().circle();
            assert!(!level.obstacles()[0].overlaps_circle(&food));
        }
    }

    #[test]
    fn test_equal_seeds_replay_equal_food() {
        let a = Level::new(schema(1, vec![]), 123);
        let b = Level::new(schema(1, vec![]), 123);
        assert_eq!(
            a.food().coordinates().x(),
            b.food().coordinates().x()
        );
        assert_eq!(
            a.food().coordinates().y(),
            b.food().coordinates().y()
        );
    }
}
