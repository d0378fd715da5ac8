use std::fmt;

// The engine never looks inside an exercise; content, scoring, and rendering
// belong to the exercise subsystem. The one capability the maze consumes is
// whether the player has finished it.
pub trait Exercise {
    fn is_complete(&self) -> bool;
}

impl fmt::Debug for dyn Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exercise")
            .field("complete", &self.is_complete())
            .finish()
    }
}
