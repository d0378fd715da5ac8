pub mod cell;
pub mod grid;
pub mod maker;
pub mod solver;

use std::fmt;

use glam::{Vec2, vec2};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::config::MazeConfig;
use crate::exercise::Exercise;

use cell::{Cell, Coords, Side};
use grid::Grid;
use maker::Maker;
pub use solver::HintError;

// World-space bounding rectangle of one cell, for the collision layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl CellBounds {
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }
}

pub struct Maze {
    grid: Grid,
    cell_size: f32,
    start: Coords,
    exit: Coords,
    exercise_cells: Vec<Coords>,
}

impl Maze {
    pub fn new(config: &MazeConfig) -> Self {
        let rows = config.rows();
        let cols = config.cols();
        assert!(
            rows >= 1 && cols >= 1,
            "maze needs at least one cell; check cell size against width and height"
        );
        assert!(
            config.min_exercise_cells <= config.max_exercise_cells,
            "exercise cell range is inverted"
        );

        let start = Coords::new(0, 0);
        let (mut grid, mut rng) = Maker::new(rows, cols, config.seed).carve(start);

        grid.cell_mut(start).mark_start();

        // The exit lands somewhere in the lower-right region of the grid, far
        // from the start.
        let exit = Coords::new(
            rng.random_range(rows * 2 / 3..rows),
            rng.random_range(cols * 2 / 3..cols),
        );
        grid.cell_mut(exit).mark_exit();

        let exercise_cells = pick_exercise_cells(&mut grid, config, start, exit, &mut rng);

        Self {
            grid,
            cell_size: config.cell_size,
            start,
            exit,
            exercise_cells,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Coords {
        self.start
    }

    pub fn exit(&self) -> Coords {
        self.exit
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    // The ordered route from (but excluding) the player's cell to the exit.
    // Cells on the returned path are flagged so the caller can render a
    // trail; flags from the previous request are cleared first.
    pub fn hint_path(&mut self, from: Coords) -> Result<Vec<Coords>, HintError> {
        solver::find_exit_path(&mut self.grid, from, self.exit)
    }

    pub fn exercise_cells(&self) -> &[Coords] {
        &self.exercise_cells
    }

    // The exercise subsystem fills the cells the engine selected; the payload
    // stays opaque to the maze.
    pub fn assign_exercises(&mut self, mut provider: impl FnMut(Coords) -> Box<dyn Exercise>) {
        for &coords in &self.exercise_cells {
            let exercise = provider(coords);
            self.grid.cell_mut(coords).attach_exercise(exercise);
        }
    }

    pub fn all_exercises_complete(&self) -> bool {
        self.exercise_cells.iter().all(|&coords| {
            self.grid
                .cell(coords)
                .exercise()
                .is_some_and(|exercise| exercise.is_complete())
        })
    }

    // Wall presence per side is the source of truth the physics layer must
    // consult before blocking movement.
    pub fn has_wall(&self, at: Coords, side: Side) -> bool {
        self.grid.cell(at).has_wall(side)
    }

    pub fn cell_bounds(&self, at: Coords) -> CellBounds {
        let min = vec2(
            at.col as f32 * self.cell_size,
            at.row as f32 * self.cell_size,
        );

        CellBounds {
            min,
            max: min + Vec2::splat(self.cell_size),
        }
    }

    pub fn position_from_coords(&self, at: Coords) -> Vec2 {
        vec2(
            (at.col as f32 + 0.5) * self.cell_size,
            (at.row as f32 + 0.5) * self.cell_size,
        )
    }

    pub fn coords_from_position(&self, position: Vec2) -> Option<Coords> {
        let col = (position.x / self.cell_size).floor() as isize;
        let row = (position.y / self.cell_size).floor() as isize;

        if row < 0 || col < 0 {
            return None;
        }

        let row = row as usize;
        let col = col as usize;

        if row >= self.grid.rows() || col >= self.grid.cols() {
            return None;
        }

        Some(Coords::new(row, col))
    }

    pub fn log(&self) -> String {
        let rows = self.grid.rows();
        let cols = self.grid.cols();
        let mut out = String::new();

        for row in 0..rows {
            for col in 0..cols {
                out.push('+');
                out.push_str(if self.has_wall(Coords::new(row, col), Side::Top) {
                    "--"
                } else {
                    "  "
                });
            }
            out.push_str("+\n");

            for col in 0..cols {
                let at = Coords::new(row, col);
                out.push(if self.has_wall(at, Side::Left) { '|' } else { ' ' });
                out.push(glyph(self.grid.cell(at)));
                out.push(' ');
            }
            out.push(
                if self.has_wall(Coords::new(row, cols - 1), Side::Right) {
                    '|'
                } else {
                    ' '
                },
            );
            out.push('\n');
        }

        for col in 0..cols {
            out.push('+');
            out.push_str(if self.has_wall(Coords::new(rows - 1, col), Side::Bottom) {
                "--"
            } else {
                "  "
            });
        }
        out.push('+');

        out
    }
}

fn glyph(cell: &Cell) -> char {
    if cell.is_exit() {
        'E'
    } else if cell.is_start() {
        'S'
    } else if cell.has_exercise() {
        '?'
    } else if cell.is_on_hint_path() {
        '.'
    } else {
        ' '
    }
}

fn pick_exercise_cells(
    grid: &mut Grid,
    config: &MazeConfig,
    start: Coords,
    exit: Coords,
    rng: &mut StdRng,
) -> Vec<Coords> {
    let mut candidates = Vec::new();
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let coords = Coords::new(row, col);
            if coords != start && coords != exit {
                candidates.push(coords);
            }
        }
    }

    let wanted = rng.random_range(config.min_exercise_cells..=config.max_exercise_cells);
    candidates.shuffle(rng);
    candidates.truncate(wanted);

    for &coords in &candidates {
        grid.cell_mut(coords).mark_exercise();
    }

    candidates
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.log())
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    fn test_config(seed: u64) -> MazeConfig {
        let mut config = MazeConfig::default();
        config.seed = Some(seed);
        config
    }

    struct StubExercise {
        done: Rc<AtomicBool>,
    }

    impl Exercise for StubExercise {
        fn is_complete(&self) -> bool {
            self.done.load(Ordering::Relaxed)
        }
    }

    #[test]
    fn construction_places_start_exit_and_exercises() {
        for seed in 0..64 {
            let config = test_config(seed);
            let maze = Maze::new(&config);
            let rows = config.rows();
            let cols = config.cols();

            assert_eq!(maze.start(), Coords::new(0, 0));
            assert!(maze.grid().cell(maze.start()).is_start());

            let exit = maze.exit();
            assert!(maze.grid().cell(exit).is_exit());
            assert!(exit.row >= rows * 2 / 3 && exit.row < rows);
            assert!(exit.col >= cols * 2 / 3 && exit.col < cols);

            let count = maze.exercise_cells().len();
            assert!(count >= config.min_exercise_cells && count <= config.max_exercise_cells);
            for &coords in maze.exercise_cells() {
                assert_ne!(coords, maze.start());
                assert_ne!(coords, exit);
                assert!(maze.grid().cell(coords).has_exercise());
            }
        }
    }

    #[test]
    fn generated_mazes_are_perfect() {
        for seed in 0..64 {
            let maze = Maze::new(&test_config(seed));

            assert!(maze.grid().walls_are_symmetric());
            assert!(maze.grid().is_perfect_maze());
        }
    }

    #[test]
    fn same_seed_reproduces_placement() {
        let first = Maze::new(&test_config(42));
        let second = Maze::new(&test_config(42));

        assert_eq!(first.exit(), second.exit());
        assert_eq!(first.exercise_cells(), second.exercise_cells());
    }

    #[test]
    fn world_coordinates_round_trip() {
        let maze = Maze::new(&test_config(7));
        let at = Coords::new(3, 5);

        let center = maze.position_from_coords(at);
        assert_eq!(maze.coords_from_position(center), Some(at));

        let bounds = maze.cell_bounds(at);
        assert!(bounds.contains(center));
        assert_eq!(bounds.max - bounds.min, Vec2::splat(maze.cell_size()));
    }

    #[test]
    fn positions_outside_the_grid_map_to_none() {
        let maze = Maze::new(&test_config(7));

        assert_eq!(maze.coords_from_position(vec2(-10.0, 50.0)), None);
        assert_eq!(maze.coords_from_position(vec2(50.0, 1e6)), None);
    }

    #[test]
    fn hint_path_ends_at_the_exit() {
        let mut maze = Maze::new(&test_config(11));

        let path = maze.hint_path(Coords::new(0, 0)).unwrap();

        assert_eq!(path.last(), Some(&maze.exit()));
    }

    #[test]
    fn exercises_report_completion() {
        let mut maze = Maze::new(&test_config(5));
        assert!(!maze.exercise_cells().is_empty());

        let mut handles = Vec::new();
        maze.assign_exercises(|_| {
            let done = Rc::new(AtomicBool::new(false));
            handles.push(Rc::clone(&done));
            Box::new(StubExercise { done })
        });

        assert!(!maze.all_exercises_complete());

        for handle in &handles {
            handle.store(true, Ordering::Relaxed);
        }

        assert!(maze.all_exercises_complete());
    }

    #[test]
    fn unattached_exercises_count_as_incomplete() {
        let maze = Maze::new(&test_config(5));

        assert!(!maze.exercise_cells().is_empty());
        assert!(!maze.all_exercises_complete());
    }

    #[test]
    fn a_single_cell_maze_is_its_own_exit() {
        let mut config = MazeConfig::new(100.0, 100.0, 100.0);
        config.seed = Some(1);

        let mut maze = Maze::new(&config);

        assert_eq!(maze.exit(), maze.start());
        assert!(maze.exercise_cells().is_empty());
        assert!(maze.hint_path(maze.start()).unwrap().is_empty());
    }

    #[test]
    fn log_draws_every_row_and_marks_the_endpoints() {
        let config = test_config(9);
        let maze = Maze::new(&config);

        let rendered = maze.log();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), config.rows() * 2 + 1);
        assert!(rendered.contains('S'));
        assert!(rendered.contains('E'));
    }
}
