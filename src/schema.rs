//! Static level descriptions and the JSON level-file loader
//!
//! A schema is the immutable, shareable description of a playfield; a
//! [`crate::sim::Level`] is a live playthrough of one. Schemas come from a
//! JSON file holding an array of levels. Loading reports a missing file as
//! its own error kind, and validation collects every field-level problem in
//! one pass so callers can surface them all at once.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::sim::Torus;

/// Starting pose of the snake
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnakeStart {
    pub x: f64,
    pub y: f64,
    /// Initial heading in radians
    pub angle: f64,
    /// World units moved per frame
    pub speed: f64,
    /// Total segments including the head
    pub length: u32,
}

/// One obstacle rectangle, anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Immutable description of a playfield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSchema {
    pub name: String,
    pub width: f64,
    pub height: f64,
    /// Pellets to eat before the level is won
    pub food_count: u32,
    pub snake_start: SnakeStart,
    #[serde(default)]
    pub obstacles: Vec<ObstacleSpec>,
}

impl LevelSchema {
    /// The torus this playfield maps onto
    pub fn torus(&self) -> Torus {
        Torus::new(self.width, self.height)
    }

    pub fn inner_radius(&self) -> f64 {
        self.torus().inner_radius()
    }

    pub fn outer_radius(&self) -> f64 {
        self.torus().outer_radius()
    }

    /// Check every field, collecting all problems instead of failing on the
    /// first one.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        if !(self.width > 0.0) {
            problems.push(format!("width must be positive, got {}", self.width));
        }
        if !(self.height > 0.0) {
            problems.push(format!("height must be positive, got {}", self.height));
        }
        if self.snake_start.length < 1 {
            problems.push(format!(
                "snake starting length must be at least 1, got {}",
                self.snake_start.length
            ));
        }
        if !(self.snake_start.speed >= 0.0) {
            problems.push(format!(
                "snake starting speed must not be negative, got {}",
                self.snake_start.speed
            ));
        }
        for (i, o) in self.obstacles.iter().enumerate() {
            if !(o.width > 0.0) {
                problems.push(format!("obstacle {i}: width must be positive, got {}", o.width));
            }
            if !(o.height > 0.0) {
                problems.push(format!(
                    "obstacle {i}: height must be positive, got {}",
                    o.height
                ));
            }
            if self.width > 0.0 && o.width >= self.width {
                problems.push(format!(
                    "obstacle {i}: width {} must be smaller than the level width {}",
                    o.width, self.width
                ));
            }
            if self.height > 0.0 && o.height >= self.height {
                problems.push(format!(
                    "obstacle {i}: height {} must be smaller than the level height {}",
                    o.height, self.height
                ));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

/// Errors from the level-file boundary. A file that cannot be found is a
/// distinct kind from a file that exists but holds bad data.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("level file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("level file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("level '{name}' is invalid: {}", .problems.join("; "))]
    Invalid { name: String, problems: Vec<String> },
}

/// Load and validate every schema in a JSON level file
pub fn load_schemas(path: &Path) -> Result<Vec<LevelSchema>, SchemaError> {
    let text = fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            SchemaError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            SchemaError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let schemas: Vec<LevelSchema> =
        serde_json::from_str(&text).map_err(|source| SchemaError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    for schema in &schemas {
        if let Err(problems) = schema.validate() {
            return Err(SchemaError::Invalid {
                name: schema.name.clone(),
                problems,
            });
        }
    }

    log::info!("loaded {} level schema(s) from {}", schemas.len(), path.display());
    Ok(schemas)
}
