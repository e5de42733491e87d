pub mod draw;
pub mod maker;

use log::debug;
use strum::IntoEnumIterator;

use crate::cell::{Cell, Coord, Direction};
use crate::error::MazeError;

/// Construction input for a [`Maze`]. Start and end default to the top-left
/// and bottom-right corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeConfig {
    pub width: usize,
    pub height: usize,
    pub start: Option<Coord>,
    pub end: Option<Coord>,
}

impl MazeConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            start: None,
            end: None,
        }
    }

    pub fn with_start(mut self, start: Coord) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: Coord) -> Self {
        self.end = Some(end);
        self
    }

    fn start_or_default(&self) -> Coord {
        self.start.unwrap_or_default()
    }

    fn end_or_default(&self) -> Coord {
        self.end.unwrap_or(Coord::new(
            self.width.saturating_sub(1),
            self.height.saturating_sub(1),
        ))
    }
}

/// A rectangular grid of cells, indexed `[y][x]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    grid: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
    start: Coord,
    end: Coord,
}

impl Maze {
    /// Builds an uncarved grid: every wall present, nothing visited.
    pub fn new(config: MazeConfig) -> Result<Self, MazeError> {
        let MazeConfig { width, height, .. } = config;
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }

        let start = config.start_or_default();
        let end = config.end_or_default();
        if start.x >= width || start.y >= height {
            return Err(MazeError::StartOutOfBounds(start));
        }
        if end.x >= width || end.y >= height {
            return Err(MazeError::EndOutOfBounds(end));
        }

        let mut grid: Vec<Vec<Cell>> = (0..height)
            .map(|y| (0..width).map(|x| Cell::new(x, y)).collect())
            .collect();
        grid[start.y][start.x].mark_first();
        grid[end.y][end.x].mark_last();

        debug!("initialised {width}x{height} grid, start {start}, end {end}");

        Ok(Self {
            grid,
            width,
            height,
            start,
            end,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn end(&self) -> Coord {
        self.end
    }

    pub fn start_cell(&self) -> &Cell {
        &self.grid[self.start.y][self.start.x]
    }

    pub fn end_cell(&self) -> &Cell {
        &self.grid[self.end.y][self.end.x]
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Signed lookup so callers can probe past the edges; anything outside
    /// the grid is `None`.
    pub fn get_cell(&self, x: isize, y: isize) -> Option<&Cell> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.cell(Coord::new(x, y))
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.grid.get(coord.y)?.get(coord.x)
    }

    fn cell_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        self.grid.get_mut(coord.y)?.get_mut(coord.x)
    }

    /// Row-major iteration over every cell.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid.iter().flatten()
    }

    /// In-bounds neighbors of `at` that satisfy `predicate`, in the order
    /// up, right, down, left. With `respect_walls`, a side is only followed
    /// once its wall has been cleared.
    pub fn neighbors<P>(&self, at: Coord, predicate: P, respect_walls: bool) -> Vec<&Cell>
    where
        P: Fn(&Cell) -> bool,
    {
        let Some(cell) = self.cell(at) else {
            return Vec::new();
        };

        Direction::iter()
            .filter(|&side| !respect_walls || !cell.has_wall(side))
            .filter_map(|side| at.step(side))
            .filter_map(|coord| self.cell(coord))
            .filter(|neighbor| predicate(*neighbor))
            .collect()
    }

    /// Neighbors generation has not reached yet, walls ignored.
    pub fn unvisited_neighbors(&self, at: Coord) -> Vec<&Cell> {
        self.neighbors(at, |neighbor| !neighbor.is_visited(), false)
    }

    /// Clears the wall pair shared by two adjacent cells. The side is picked
    /// from the coordinate delta `to - from`.
    pub fn remove_wall_between(&mut self, from: Coord, to: Coord) -> Result<Direction, MazeError> {
        if !self.contains(from) {
            return Err(MazeError::OutOfBounds(from));
        }
        if !self.contains(to) {
            return Err(MazeError::OutOfBounds(to));
        }
        let side = from
            .direction_to(to)
            .ok_or(MazeError::NotAdjacent { from, to })?;

        self.grid[from.y][from.x].clear_wall(side);
        self.grid[to.y][to.x].clear_wall(side.opposite());

        Ok(side)
    }

    /// Whether a carved passage joins two cells.
    pub fn is_open_between(&self, from: Coord, to: Coord) -> bool {
        let (Some(cell), Some(side)) = (self.cell(from), from.direction_to(to)) else {
            return false;
        };
        self.contains(to) && !cell.has_wall(side)
    }

    /// Number of cleared wall pairs. A perfect maze has `width * height - 1`.
    pub fn passage_count(&self) -> usize {
        self.cells()
            .map(|cell| usize::from(!cell.right()) + usize::from(!cell.bottom()))
            .sum()
    }

    pub(crate) fn visit(&mut self, coord: Coord) {
        if let Some(cell) = self.cell_mut(coord) {
            cell.mark_visited();
        }
    }
}
