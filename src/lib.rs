pub mod config;
pub mod exercise;
pub mod maze;
pub mod stack;

pub use config::MazeConfig;
pub use exercise::Exercise;
pub use maze::cell::{Cell, Coords, Side, Walls};
pub use maze::{CellBounds, HintError, Maze};
pub use stack::BoundedStack;
