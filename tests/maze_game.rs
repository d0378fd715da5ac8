use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use mindmaze::{Coords, Exercise, Maze, MazeConfig, Side};

struct Quiz {
    solved: Rc<AtomicBool>,
}

impl Exercise for Quiz {
    fn is_complete(&self) -> bool {
        self.solved.load(Ordering::Relaxed)
    }
}

fn seeded_config(seed: u64) -> MazeConfig {
    let mut config = MazeConfig::default();
    config.seed = Some(seed);
    config
}

#[test]
fn a_full_round_from_generation_to_cleared_exercises() {
    let mut maze = Maze::new(&seeded_config(42));

    assert!(maze.grid().walls_are_symmetric());
    assert!(maze.grid().is_perfect_maze());

    // Walk the hint from the start, checking every step against the walls.
    let start = maze.start();
    let path = maze.hint_path(start).unwrap();
    assert_eq!(path.last(), Some(&maze.exit()));

    let mut previous = start;
    for &step in &path {
        assert!(maze.grid().open_between(previous, step));
        previous = step;
    }

    // The exercise subsystem fills the cells the engine picked, the player
    // clears them all.
    let mut handles = Vec::new();
    maze.assign_exercises(|_| {
        let solved = Rc::new(AtomicBool::new(false));
        handles.push(Rc::clone(&solved));
        Box::new(Quiz { solved })
    });

    assert!(!maze.all_exercises_complete());
    for handle in &handles {
        handle.store(true, Ordering::Relaxed);
    }
    assert!(maze.all_exercises_complete());
}

#[test]
fn hints_keep_working_as_the_player_advances() {
    let mut maze = Maze::new(&seeded_config(7));

    let mut from = maze.start();
    while from != maze.exit() {
        let path = maze.hint_path(from).unwrap();
        assert!(!path.is_empty());
        assert_eq!(path.last(), Some(&maze.exit()));

        // Step to the next hinted cell, as a player following the trail.
        from = path[0];
    }

    assert!(maze.hint_path(from).unwrap().is_empty());
}

#[test]
fn collision_queries_agree_with_the_wall_flags() {
    let maze = Maze::new(&seeded_config(3));
    let grid = maze.grid();

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let at = Coords::new(row, col);

            // Shared walls read the same from both sides.
            for side in [Side::Top, Side::Right, Side::Bottom, Side::Left] {
                if let Some(neighbor) = grid.neighbor_towards(at, side) {
                    assert_eq!(
                        maze.has_wall(at, side),
                        maze.has_wall(neighbor, side.opposite())
                    );
                }
            }

            // The cell's bounding region contains its own center and maps
            // back to the same coordinates.
            let center = maze.position_from_coords(at);
            assert!(maze.cell_bounds(at).contains(center));
            assert_eq!(maze.coords_from_position(center), Some(at));
        }
    }
}
