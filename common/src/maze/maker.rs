use log::{debug, trace};
use rand::{Rng, seq::IndexedRandom};

use super::{Maze, MazeConfig};
use crate::cell::{Cell, Coord};
use crate::error::MazeError;
use crate::stack::Stack;

impl Maze {
    /// Builds a grid and carves a perfect maze into it.
    pub fn generate<R>(config: MazeConfig, rng: &mut R) -> Result<Self, MazeError>
    where
        R: Rng + ?Sized,
    {
        let mut maze = Maze::new(config)?;
        maze.carve(rng)?;
        Ok(maze)
    }

    /// Randomized depth-first carving from the start cell. Each step either
    /// knocks through to a random unvisited neighbor or backtracks, so every
    /// cell is visited once and the passages form a spanning tree.
    ///
    /// Carving a grid that has already been carved changes nothing: the start
    /// cell is visited and has no unvisited neighbors left.
    pub fn carve<R>(&mut self, rng: &mut R) -> Result<(), MazeError>
    where
        R: Rng + ?Sized,
    {
        let start = self.start;
        if self.start_cell().is_visited() {
            debug!("grid already carved, nothing to do");
            return Ok(());
        }

        let mut stack = Stack::new();
        self.visit(start);
        stack.push(start);

        let mut visits = 1;
        let mut backtracks = 0;

        while let Some(&current) = stack.peek() {
            let candidates: Vec<Coord> = self
                .unvisited_neighbors(current)
                .into_iter()
                .map(Cell::coord)
                .collect();

            match candidates.choose(rng) {
                Some(&next) => {
                    self.visit(next);
                    let side = self.remove_wall_between(current, next)?;
                    trace!("carved {side:?} from {current} to {next}");
                    stack.push(next);
                    visits += 1;
                }
                None => {
                    stack.pop();
                    backtracks += 1;
                }
            }
        }

        debug!(
            "carved {}x{} maze: {visits} visits, {backtracks} backtracks, {} passages",
            self.width,
            self.height,
            self.passage_count()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use rand::{SeedableRng, rngs::StdRng};
    use strum::IntoEnumIterator;

    use super::*;
    use crate::cell::Direction;

    fn generate(width: usize, height: usize, seed: u64) -> Maze {
        let mut rng = StdRng::seed_from_u64(seed);
        Maze::generate(MazeConfig::new(width, height), &mut rng).expect("valid dimensions")
    }

    fn reachable_from_start(maze: &Maze) -> HashSet<Coord> {
        let mut seen = HashSet::from([maze.start()]);
        let mut queue = VecDeque::from([maze.start()]);

        while let Some(coord) = queue.pop_front() {
            for neighbor in maze.neighbors(coord, |_| true, true) {
                if seen.insert(neighbor.coord()) {
                    queue.push_back(neighbor.coord());
                }
            }
        }

        seen
    }

    #[test]
    fn every_cell_is_visited_and_reachable() {
        for seed in 0..32 {
            let maze = generate(9, 6, seed);
            assert!(maze.cells().all(Cell::is_visited), "seed {seed}");
            assert_eq!(reachable_from_start(&maze).len(), 9 * 6, "seed {seed}");
        }
    }

    #[test]
    fn passages_form_a_spanning_tree() {
        for seed in 0..32 {
            let maze = generate(7, 7, seed);
            assert_eq!(
                maze.passage_count(),
                7 * 7 - 1,
                "seed {seed} should carve exactly n - 1 passages:\n{maze}"
            );
        }
    }

    #[test]
    fn two_by_two_always_has_three_passages() {
        for seed in 0..64 {
            assert_eq!(generate(2, 2, seed).passage_count(), 3, "seed {seed}");
        }
    }

    #[test]
    fn walls_stay_symmetric() {
        let maze = generate(8, 5, 7);
        for cell in maze.cells() {
            for side in Direction::iter() {
                let Some(neighbor) = cell.coord().step(side).and_then(|c| maze.cell(c)) else {
                    continue;
                };
                assert_eq!(
                    cell.has_wall(side),
                    neighbor.has_wall(side.opposite()),
                    "wall between {} and {} is one-sided",
                    cell.coord(),
                    neighbor.coord()
                );
            }
        }
    }

    #[test]
    fn outer_border_is_never_carved() {
        let maze = generate(6, 4, 3);
        for cell in maze.cells() {
            if cell.y == 0 {
                assert!(cell.top());
            }
            if cell.y == maze.height() - 1 {
                assert!(cell.bottom());
            }
            if cell.x == 0 {
                assert!(cell.left());
            }
            if cell.x == maze.width() - 1 {
                assert!(cell.right());
            }
        }
    }

    #[test]
    fn same_seed_gives_same_maze() {
        assert_eq!(generate(12, 9, 42), generate(12, 9, 42));
    }

    #[test]
    fn carving_twice_is_a_no_op() {
        let mut maze = generate(5, 5, 11);
        let before = maze.clone();
        let mut rng = StdRng::seed_from_u64(99);
        maze.carve(&mut rng).expect("carving should succeed");
        assert_eq!(maze, before);
    }

    #[test]
    fn single_cell_maze_has_no_passages() {
        let maze = generate(1, 1, 0);
        assert_eq!(maze.passage_count(), 0);
        assert!(maze.start_cell().is_visited());
    }

    #[test]
    fn carving_starts_from_a_configured_start() {
        let config = MazeConfig::new(5, 5).with_start(Coord::new(2, 2));
        let mut rng = StdRng::seed_from_u64(5);
        let maze = Maze::generate(config, &mut rng).expect("valid config");
        assert_eq!(maze.passage_count(), 24);
        assert_eq!(reachable_from_start(&maze).len(), 25);
    }
}
