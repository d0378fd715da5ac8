use disjoint::DisjointSetVec;
use rand::Rng;
use rand::seq::SliceRandom;
use strum::IntoEnumIterator;

use super::cell::{Cell, Coords, Side};

pub struct Grid {
    cells: Vec<Vec<Cell>>,
    rows: usize,
    cols: usize,
}

impl Grid {
    pub(crate) fn new(rows: usize, cols: usize) -> Self {
        let cells = (0..rows)
            .map(|row| {
                (0..cols)
                    .map(|col| Cell::new(Coords::new(row, col)))
                    .collect()
            })
            .collect();

        Self { cells, rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell(&self, at: Coords) -> &Cell {
        debug_assert!(self.in_bounds(at), "cell coordinates are out of bounds");
        &self.cells[at.row][at.col]
    }

    pub(crate) fn cell_mut(&mut self, at: Coords) -> &mut Cell {
        debug_assert!(self.in_bounds(at), "cell coordinates are out of bounds");
        &mut self.cells[at.row][at.col]
    }

    fn in_bounds(&self, at: Coords) -> bool {
        at.row < self.rows && at.col < self.cols
    }

    // In-bounds neighbors in the fixed order left, right, up, down. The hint
    // search relies on this order being deterministic.
    pub fn adjacent(&self, of: Coords) -> Vec<Coords> {
        let mut neighbors = Vec::with_capacity(4);

        if of.col > 0 {
            neighbors.push(Coords::new(of.row, of.col - 1));
        }
        if of.col + 1 < self.cols {
            neighbors.push(Coords::new(of.row, of.col + 1));
        }
        if of.row > 0 {
            neighbors.push(Coords::new(of.row - 1, of.col));
        }
        if of.row + 1 < self.rows {
            neighbors.push(Coords::new(of.row + 1, of.col));
        }

        neighbors
    }

    // Same set as `adjacent` in a uniformly random permutation; this is the
    // randomness that makes each carving run produce a different maze.
    pub(crate) fn adjacent_shuffled(&self, of: Coords, rng: &mut impl Rng) -> Vec<Coords> {
        let mut neighbors = self.adjacent(of);
        neighbors.shuffle(rng);
        neighbors
    }

    pub fn neighbor_towards(&self, of: Coords, side: Side) -> Option<Coords> {
        let neighbor = match side {
            Side::Top => Coords::new(of.row.checked_sub(1)?, of.col),
            Side::Right => Coords::new(of.row, of.col + 1),
            Side::Bottom => Coords::new(of.row + 1, of.col),
            Side::Left => Coords::new(of.row, of.col.checked_sub(1)?),
        };

        self.in_bounds(neighbor).then_some(neighbor)
    }

    pub(crate) fn side_between(from: Coords, to: Coords) -> Option<Side> {
        if from.row == to.row {
            if to.col + 1 == from.col {
                return Some(Side::Left);
            }
            if from.col + 1 == to.col {
                return Some(Side::Right);
            }
        } else if from.col == to.col {
            if to.row + 1 == from.row {
                return Some(Side::Top);
            }
            if from.row + 1 == to.row {
                return Some(Side::Bottom);
            }
        }

        None
    }

    // Removes the wall pair between two grid-adjacent cells. Both flags flip
    // in this one call, which is what keeps walls symmetric at all times.
    pub(crate) fn carve(&mut self, from: Coords, to: Coords) {
        let side = Self::side_between(from, to).expect("carve requires grid-adjacent cells");
        self.cells[from.row][from.col].open_wall(side);
        self.cells[to.row][to.col].open_wall(side.opposite());
    }

    // True only if the shared wall is absent on both sides.
    pub fn open_between(&self, from: Coords, to: Coords) -> bool {
        match Self::side_between(from, to) {
            Some(side) => {
                !self.cell(from).has_wall(side) && !self.cell(to).has_wall(side.opposite())
            }
            None => false,
        }
    }

    pub fn open_edge_count(&self) -> usize {
        let mut count = 0;

        // Each pair is counted once, from its left/top member.
        for row in 0..self.rows {
            for col in 0..self.cols {
                let here = Coords::new(row, col);
                if col + 1 < self.cols && self.open_between(here, Coords::new(row, col + 1)) {
                    count += 1;
                }
                if row + 1 < self.rows && self.open_between(here, Coords::new(row + 1, col)) {
                    count += 1;
                }
            }
        }

        count
    }

    pub fn walls_are_symmetric(&self) -> bool {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let here = Coords::new(row, col);
                for side in Side::iter() {
                    if let Some(neighbor) = self.neighbor_towards(here, side) {
                        if self.cell(here).has_wall(side)
                            != self.cell(neighbor).has_wall(side.opposite())
                        {
                            return false;
                        }
                    }
                }
            }
        }

        true
    }

    // A perfect maze's open-edge graph is a spanning tree: rows*cols - 1 open
    // edges, all cells in one connected component.
    pub fn is_perfect_maze(&self) -> bool {
        let total = self.rows * self.cols;
        if self.open_edge_count() != total - 1 {
            return false;
        }

        let mut components = DisjointSetVec::from(vec![(); total]);
        let index = |at: Coords| at.row * self.cols + at.col;

        for row in 0..self.rows {
            for col in 0..self.cols {
                let here = Coords::new(row, col);
                if col + 1 < self.cols && self.open_between(here, Coords::new(row, col + 1)) {
                    components.join(index(here), index(Coords::new(row, col + 1)));
                }
                if row + 1 < self.rows && self.open_between(here, Coords::new(row + 1, col)) {
                    components.join(index(here), index(Coords::new(row + 1, col)));
                }
            }
        }

        let root = components.root_of(0);
        for i in 1..total {
            if components.root_of(i) != root {
                return false;
            }
        }

        true
    }

    pub(crate) fn clear_hint_flags(&mut self) {
        for row in &mut self.cells {
            for cell in row {
                cell.clear_hint_flag();
            }
        }
    }
}
