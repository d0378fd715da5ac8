use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::stack::BoundedStack;

use super::cell::Coords;
use super::grid::Grid;

// Carves a perfect maze with the randomized iterative backtracker. The walk
// is depth-first, which is what gives long winding corridors rather than
// short branchy ones; the explicit worklist keeps the depth bounded by the
// cell count instead of the call stack.
pub struct Maker {
    grid: Grid,
    rng: StdRng,
    stack: BoundedStack<Coords>,
}

impl Maker {
    pub fn new(rows: usize, cols: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            grid: Grid::new(rows, cols),
            rng,
            stack: BoundedStack::new(rows * cols),
        }
    }

    pub fn carve(mut self, start: Coords) -> (Grid, StdRng) {
        self.grid.cell_mut(start).mark_visited();
        self.stack
            .push(start)
            .expect("carve stack holds at most one entry per cell");

        while let Some(&current) = self.stack.peek() {
            let next = self
                .grid
                .adjacent_shuffled(current, &mut self.rng)
                .into_iter()
                .find(|&neighbor| !self.grid.cell(neighbor).is_visited());

            match next {
                Some(next) => {
                    self.grid.carve(current, next);
                    self.grid.cell_mut(next).mark_visited();
                    self.stack
                        .push(next)
                        .expect("carve stack holds at most one entry per cell");
                }
                None => {
                    // Dead end: backtrack to the most recent cell that still
                    // has unvisited neighbors.
                    self.stack.pop();
                }
            }
        }

        debug_assert!(
            self.grid.walls_are_symmetric(),
            "carving desynchronized a wall pair"
        );
        debug_assert!(
            self.grid.is_perfect_maze(),
            "carving did not produce a spanning tree"
        );

        (self.grid, self.rng)
    }
}
