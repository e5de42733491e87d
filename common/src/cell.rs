use std::fmt;

use strum::{EnumIter, IntoEnumIterator};

/// Grid position: `x` is the column, `y` the row, both 0-indexed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Coord { x, y }
    }

    /// The coordinate one step away in `direction`, or `None` if that would
    /// go below zero. The upper bound is the grid's business.
    pub fn step(self, direction: Direction) -> Option<Coord> {
        let (dx, dy) = direction.delta();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Coord { x, y })
    }

    /// Direction from `self` to `other`, if they are orthogonally adjacent.
    pub fn direction_to(self, other: Coord) -> Option<Direction> {
        let dx = other.x as isize - self.x as isize;
        let dy = other.y as isize - self.y as isize;
        Direction::from_delta(dx, dy)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four sides of a cell. Declaration order is the canonical neighbor
/// order (up, right, down, left) and the solver's tie-break.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    pub fn from_delta(dx: isize, dy: isize) -> Option<Direction> {
        Direction::iter().find(|direction| direction.delta() == (dx, dy))
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }
}

/// A single square of the maze.
///
/// Walls can only be cleared through [`crate::Maze::remove_wall_between`],
/// which clears both sides of a shared wall at once. The `visited` flag
/// belongs to generation alone; the solver keeps its own bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    walls: [bool; 4], // Indexed by `Direction::index`: top, right, bottom, left.
    visited: bool,
    is_first: bool,
    is_last: bool,
}

impl Cell {
    pub(crate) fn new(x: usize, y: usize) -> Cell {
        Cell {
            x,
            y,
            walls: [true; 4],
            visited: false,
            is_first: false,
            is_last: false,
        }
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    pub fn has_wall(&self, side: Direction) -> bool {
        self.walls[side.index()]
    }

    pub fn top(&self) -> bool {
        self.has_wall(Direction::Up)
    }

    pub fn right(&self) -> bool {
        self.has_wall(Direction::Right)
    }

    pub fn bottom(&self) -> bool {
        self.has_wall(Direction::Down)
    }

    pub fn left(&self) -> bool {
        self.has_wall(Direction::Left)
    }

    /// Whether generation has reached this cell.
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn is_first(&self) -> bool {
        self.is_first
    }

    pub fn is_last(&self) -> bool {
        self.is_last
    }

    pub fn is_same(&self, other: &Cell) -> bool {
        self.x == other.x && self.y == other.y
    }

    pub(crate) fn clear_wall(&mut self, side: Direction) {
        self.walls[side.index()] = false;
    }

    pub(crate) fn mark_visited(&mut self) {
        self.visited = true;
    }

    pub(crate) fn mark_first(&mut self) {
        self.is_first = true;
    }

    pub(crate) fn mark_last(&mut self) {
        self.is_last = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_iterate_in_canonical_order() {
        let order: Vec<Direction> = Direction::iter().collect();
        assert_eq!(
            order,
            vec![
                Direction::Up,
                Direction::Right,
                Direction::Down,
                Direction::Left
            ]
        );
    }

    #[test]
    fn from_delta_inverts_delta() {
        for direction in Direction::iter() {
            let (dx, dy) = direction.delta();
            assert_eq!(Direction::from_delta(dx, dy), Some(direction));
        }
        assert_eq!(Direction::from_delta(0, 0), None);
        assert_eq!(Direction::from_delta(1, 1), None);
        assert_eq!(Direction::from_delta(-2, 0), None);
    }

    #[test]
    fn opposite_is_an_involution() {
        for direction in Direction::iter() {
            assert_ne!(direction.opposite(), direction);
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn step_refuses_to_go_below_zero() {
        let origin = Coord::new(0, 0);
        assert_eq!(origin.step(Direction::Up), None);
        assert_eq!(origin.step(Direction::Left), None);
        assert_eq!(origin.step(Direction::Right), Some(Coord::new(1, 0)));
        assert_eq!(origin.step(Direction::Down), Some(Coord::new(0, 1)));
    }

    #[test]
    fn direction_to_only_accepts_single_orthogonal_steps() {
        let centre = Coord::new(3, 3);
        assert_eq!(centre.direction_to(Coord::new(3, 2)), Some(Direction::Up));
        assert_eq!(centre.direction_to(Coord::new(2, 3)), Some(Direction::Left));
        assert_eq!(centre.direction_to(Coord::new(4, 4)), None);
        assert_eq!(centre.direction_to(centre), None);
    }

    #[test]
    fn new_cell_has_every_wall_and_no_flags() {
        let cell = Cell::new(2, 5);
        assert!(cell.top() && cell.right() && cell.bottom() && cell.left());
        assert!(!cell.is_visited());
        assert!(!cell.is_first());
        assert!(!cell.is_last());
        assert_eq!(cell.coord(), Coord::new(2, 5));
    }
}
