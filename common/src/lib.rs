pub mod cell;
pub mod error;
pub mod maze;
pub mod solver;
pub mod stack;

pub use cell::{Cell, Coord, Direction};
pub use error::MazeError;
pub use maze::{Maze, MazeConfig, draw::Overlay};
pub use solver::{CancelHandle, SolveOutcome, Solver, Step, StepKind, Steps};
pub use stack::Stack;
