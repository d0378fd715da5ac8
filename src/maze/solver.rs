use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::stack::BoundedStack;

use super::cell::Coords;
use super::grid::Grid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HintError {
    NoPath { from: Coords },
}

impl fmt::Display for HintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HintError::NoPath { from } => {
                write!(f, "no open path from {} to the exit", from)
            }
        }
    }
}

impl std::error::Error for HintError {}

// Depth-first search over the open-edge graph, from the player's cell to the
// exit. Hint flags from earlier requests are cleared first, so a previous
// hint can never starve a later one. The reconstructed route follows
// discovery order; it is some simple path, not necessarily the shortest.
pub(crate) fn find_exit_path(
    grid: &mut Grid,
    from: Coords,
    exit: Coords,
) -> Result<Vec<Coords>, HintError> {
    grid.clear_hint_flags();

    if from == exit {
        return Ok(Vec::new());
    }

    let mut stack = BoundedStack::new(grid.rows() * grid.cols());
    let mut visited: HashSet<Coords> = HashSet::new();
    let mut came_from: HashMap<Coords, Coords> = HashMap::new();

    stack
        .push(from)
        .expect("search stack holds at most one entry per cell");

    let mut reached_exit = false;
    while let Some(current) = stack.pop() {
        if current == exit {
            reached_exit = true;
            break;
        }

        visited.insert(current);

        // Unshuffled order keeps repeated requests reproducible. A move is
        // valid only when the shared wall is open on both sides.
        for neighbor in grid.adjacent(current) {
            if !grid.open_between(current, neighbor) {
                continue;
            }
            if grid.cell(neighbor).is_on_hint_path() {
                continue;
            }
            if visited.contains(&neighbor) || came_from.contains_key(&neighbor) {
                continue;
            }

            // First writer wins: later routes into an already-discovered
            // cell are ignored.
            came_from.insert(neighbor, current);
            stack
                .push(neighbor)
                .expect("search stack holds at most one entry per cell");
        }
    }

    if !reached_exit {
        return Err(HintError::NoPath { from });
    }

    // Walk back from the exit through the parent map, then invert into
    // forward order: the player's own cell excluded, the exit included.
    let mut path = Vec::new();
    let mut current = exit;
    while current != from {
        path.push(current);
        match came_from.get(&current) {
            Some(&previous) => current = previous,
            None => return Err(HintError::NoPath { from }),
        }
    }
    path.reverse();

    for &coords in &path {
        grid.cell_mut(coords).mark_on_hint_path();
    }

    Ok(path)
}
