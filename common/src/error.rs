use thiserror::Error;

use crate::cell::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("maze dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("start cell {0} is outside the maze")]
    StartOutOfBounds(Coord),
    #[error("end cell {0} is outside the maze")]
    EndOutOfBounds(Coord),
    #[error("cell {0} is outside the maze")]
    OutOfBounds(Coord),
    #[error("cells {from} and {to} are not orthogonally adjacent")]
    NotAdjacent { from: Coord, to: Coord },
}
