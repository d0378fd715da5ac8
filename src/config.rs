use std::{env, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub const DEFAULT_CELL_SIZE: f32 = 100.0;
pub const DEFAULT_WIDTH: f32 = 1280.0; // World units; 12 columns at the default cell size.
pub const DEFAULT_HEIGHT: f32 = 720.0; // 7 rows at the default cell size.
pub const DEFAULT_MIN_EXERCISE_CELLS: usize = 3;
pub const DEFAULT_MAX_EXERCISE_CELLS: usize = 6;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MazeConfig {
    pub cell_size: f32,
    pub width: f32,
    pub height: f32,
    pub seed: Option<u64>, // None draws the seed from OS entropy.
    pub min_exercise_cells: usize,
    pub max_exercise_cells: usize,
}

impl MazeConfig {
    pub fn new(cell_size: f32, width: f32, height: f32) -> Self {
        Self {
            cell_size,
            width,
            height,
            seed: None,
            min_exercise_cells: DEFAULT_MIN_EXERCISE_CELLS,
            max_exercise_cells: DEFAULT_MAX_EXERCISE_CELLS,
        }
    }

    // Grid dimensions derive from the world dimensions; a partial trailing
    // cell is dropped.
    pub fn rows(&self) -> usize {
        (self.height / self.cell_size) as usize
    }

    pub fn cols(&self) -> usize {
        (self.width / self.cell_size) as usize
    }

    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            cell_size: env_or("MAZE_CELL_SIZE", DEFAULT_CELL_SIZE),
            width: env_or("MAZE_WIDTH", DEFAULT_WIDTH),
            height: env_or("MAZE_HEIGHT", DEFAULT_HEIGHT),
            seed: env::var("MAZE_SEED").ok().map(|value| {
                value
                    .parse()
                    .expect("MAZE_SEED must be an unsigned integer")
            }),
            min_exercise_cells: env_or("MAZE_MIN_EXERCISES", DEFAULT_MIN_EXERCISE_CELLS),
            max_exercise_cells: env_or("MAZE_MAX_EXERCISES", DEFAULT_MAX_EXERCISE_CELLS),
        }
    }
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE, DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: fmt::Debug,
{
    env::var(key)
        .map(|value| value.parse().expect("maze environment overrides must be numeric"))
        .unwrap_or(default)
}
