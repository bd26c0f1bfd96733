//! Local model of the maze: the growable [`Grid`] and the [`Explorer`] that
//! fills it in one move at a time.

pub mod explorer;
pub mod grid;

pub use explorer::{ExitDistance, ExploreError, Explorer};
pub use grid::{Boundaries, Cell, Coord, Direction, Grid, GridError, GridResult};
