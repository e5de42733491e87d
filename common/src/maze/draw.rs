use std::collections::HashSet;
use std::fmt;

use super::Maze;
use crate::cell::{Cell, Coord};

/// Extra state to paint over the walls: the solution, what the solver has
/// seen so far and where it currently is.
#[derive(Clone, Debug, Default)]
pub struct Overlay {
    path: HashSet<Coord>,
    visited: HashSet<Coord>,
    frontier: Option<(Coord, bool)>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: &[Cell]) -> Self {
        self.path = path.iter().map(Cell::coord).collect();
        self
    }

    pub fn with_visited(mut self, visited: HashSet<Coord>) -> Self {
        self.visited = visited;
        self
    }

    pub fn with_frontier(mut self, coord: Coord, backtracking: bool) -> Self {
        self.frontier = Some((coord, backtracking));
        self
    }

    fn mark(&self, cell: &Cell) -> char {
        let coord = cell.coord();
        if cell.is_first() {
            return 'S';
        }
        if cell.is_last() {
            return 'E';
        }
        if self.path.contains(&coord) {
            return '*';
        }
        match self.frontier {
            Some((frontier, true)) if frontier == coord => '<',
            Some((frontier, false)) if frontier == coord => '@',
            _ if self.visited.contains(&coord) => '.',
            _ => ' ',
        }
    }
}

impl Maze {
    /// Text drawing with `+---+` corners and `|` walls, one three-character
    /// slot per cell.
    pub fn draw(&self, overlay: &Overlay) -> String {
        let mut out = String::new();

        for cell in &self.grid[0] {
            out.push_str(if cell.top() { "+---" } else { "+   " });
        }
        out.push_str("+\n");

        for row in &self.grid {
            for cell in row {
                out.push(if cell.left() { '|' } else { ' ' });
                out.push(' ');
                out.push(overlay.mark(cell));
                out.push(' ');
            }
            let rightmost = row.last().is_some_and(Cell::right);
            out.push(if rightmost { '|' } else { ' ' });
            out.push('\n');

            for cell in row {
                out.push_str(if cell.bottom() { "+---" } else { "+   " });
            }
            out.push_str("+\n");
        }

        out
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.draw(&Overlay::default()))
    }
}
