use std::fmt;

use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::exercise::Exercise;

// Row and column are the single source of truth for a cell's identity; world
// position is derived from them, never stored.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Coords {
    pub row: usize,
    pub col: usize,
}

impl Coords {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Walls {
    pub fn closed() -> Self {
        Self {
            top: true,
            right: true,
            bottom: true,
            left: true,
        }
    }

    pub fn has(&self, side: Side) -> bool {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    pub(crate) fn open(&mut self, side: Side) {
        match side {
            Side::Top => self.top = false,
            Side::Right => self.right = false,
            Side::Bottom => self.bottom = false,
            Side::Left => self.left = false,
        }
    }
}

#[derive(Debug)]
pub struct Cell {
    coords: Coords,
    walls: Walls, // Every cell starts fully enclosed; only Grid::carve opens a wall, in pairs.
    visited: bool,
    on_hint_path: bool,
    is_start: bool,
    is_exit: bool,
    has_exercise: bool,
    exercise: Option<Box<dyn Exercise>>,
}

impl Cell {
    pub(crate) fn new(coords: Coords) -> Self {
        Self {
            coords,
            walls: Walls::closed(),
            visited: false,
            on_hint_path: false,
            is_start: false,
            is_exit: false,
            has_exercise: false,
            exercise: None,
        }
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn walls(&self) -> Walls {
        self.walls
    }

    pub fn has_wall(&self, side: Side) -> bool {
        self.walls.has(side)
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn is_on_hint_path(&self) -> bool {
        self.on_hint_path
    }

    pub fn is_start(&self) -> bool {
        self.is_start
    }

    pub fn is_exit(&self) -> bool {
        self.is_exit
    }

    pub fn has_exercise(&self) -> bool {
        self.has_exercise
    }

    pub fn exercise(&self) -> Option<&dyn Exercise> {
        self.exercise.as_deref()
    }

    pub(crate) fn open_wall(&mut self, side: Side) {
        self.walls.open(side);
    }

    pub(crate) fn mark_visited(&mut self) {
        debug_assert!(!self.visited, "a cell is carved exactly once");
        self.visited = true;
    }

    pub(crate) fn mark_on_hint_path(&mut self) {
        self.on_hint_path = true;
    }

    pub(crate) fn clear_hint_flag(&mut self) {
        self.on_hint_path = false;
    }

    pub(crate) fn mark_start(&mut self) {
        self.is_start = true;
    }

    pub(crate) fn mark_exit(&mut self) {
        self.is_exit = true;
    }

    pub(crate) fn mark_exercise(&mut self) {
        debug_assert!(
            !self.is_start && !self.is_exit,
            "start and exit cells never carry an exercise"
        );
        self.has_exercise = true;
    }

    pub(crate) fn attach_exercise(&mut self, exercise: Box<dyn Exercise>) {
        debug_assert!(
            self.has_exercise,
            "payloads only attach to cells selected for an exercise"
        );
        self.exercise = Some(exercise);
    }
}
