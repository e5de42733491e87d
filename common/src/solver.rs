use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use log::{debug, trace};

use crate::cell::{Cell, Coord};
use crate::maze::Maze;
use crate::stack::Stack;

/// Shared flag for stopping an animated solve between two steps. Clones
/// point at the same flag, so one can be handed to a signal handler or a
/// step callback.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepKind {
    Advance,
    Backtrack,
}

/// One observable transition of the search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    /// The cell just reached: the new frontier when advancing, the cell
    /// control returns to when backtracking.
    pub cell: Cell,
    /// Snapshot of the solver's visited set at this moment.
    pub visited: HashSet<Coord>,
    pub kind: StepKind,
}

impl Step {
    pub fn is_backtracking(&self) -> bool {
        self.kind == StepKind::Backtrack
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    Solved(Vec<Cell>),
    NoPath,
    Cancelled,
}

impl SolveOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved(_))
    }

    pub fn path(&self) -> Option<&[Cell]> {
        match self {
            SolveOutcome::Solved(path) => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for SolveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveOutcome::Solved(path) => {
                write!(f, "Solution found! Path length: {} cells", path.len())
            }
            SolveOutcome::NoPath => write!(f, "No solution found!"),
            SolveOutcome::Cancelled => write!(f, "Solve cancelled."),
        }
    }
}

enum Transition {
    Advance(Coord),
    Backtrack(Option<Coord>),
}

/// Depth-first solver over a carved maze.
///
/// The solver only reads the maze. Its visited set, spine and parent links
/// live here and are wiped at the start of every solve, so the cells' own
/// generation flags are never touched.
pub struct Solver<'a> {
    maze: &'a Maze,
    stack: Stack<Coord>,
    visited: HashSet<Coord>,
    parents: HashMap<Coord, Coord>,
    path: Vec<Cell>,
    solved: bool,
    cancel: CancelHandle,
}

impl<'a> Solver<'a> {
    pub fn new(maze: &'a Maze) -> Self {
        Self {
            maze,
            stack: Stack::new(),
            visited: HashSet::new(),
            parents: HashMap::new(),
            path: Vec::new(),
            solved: false,
            cancel: CancelHandle::new(),
        }
    }

    pub fn maze(&self) -> &'a Maze {
        self.maze
    }

    /// Handle that stops [`Solver::solve_animated`] before its next step.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Copy of the last solution, empty unless the last solve succeeded.
    pub fn solution_path(&self) -> Vec<Cell> {
        self.path.clone()
    }

    pub fn is_visited(&self, coord: Coord) -> bool {
        self.visited.contains(&coord)
    }

    /// Copy of the current depth-first spine, start first.
    pub fn spine(&self) -> Vec<Coord> {
        self.stack.to_vec()
    }

    pub fn reset(&mut self) {
        self.stack.clear();
        self.visited.clear();
        self.parents.clear();
        self.path.clear();
        self.solved = false;
        self.cancel.clear();
    }

    /// Runs the search to completion with no pauses.
    pub fn solve(&mut self) -> SolveOutcome {
        self.begin();
        let mut transitions = 0;
        while self.transition().is_some() {
            transitions += 1;
        }
        debug!("solve finished after {transitions} transitions");
        self.outcome()
    }

    /// Lazy view of the search, one [`Step`] per advance or backtrack.
    /// Creating it resets the solver; once it is exhausted the solver holds
    /// the result.
    pub fn steps(&mut self) -> Steps<'_, 'a> {
        self.begin();
        Steps { solver: self }
    }

    /// Paced search: `on_step` sees every transition, then the thread sleeps
    /// for `delay`. Cancellation is checked before each step.
    pub fn solve_animated<F>(&mut self, delay: Duration, mut on_step: F) -> SolveOutcome
    where
        F: FnMut(Step),
    {
        self.begin();
        let cancel = self.cancel.clone();

        while !cancel.is_cancelled() {
            let Some(step) = self.next_step() else {
                break;
            };
            on_step(step);
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }

        if cancel.is_cancelled() && !self.solved {
            debug!("animated solve cancelled with {} cells visited", self.visited.len());
            return SolveOutcome::Cancelled;
        }
        self.outcome()
    }

    fn begin(&mut self) {
        self.reset();
        let start = self.maze.start();
        self.visited.insert(start);
        self.stack.push(start);
    }

    fn outcome(&self) -> SolveOutcome {
        if self.solved {
            SolveOutcome::Solved(self.solution_path())
        } else {
            SolveOutcome::NoPath
        }
    }

    /// Performs one iteration of the search loop. `None` means the loop is
    /// over: either the end was reached or the spine emptied.
    fn transition(&mut self) -> Option<Transition> {
        let &current = self.stack.peek()?;

        if current == self.maze.end() {
            self.finish();
            return None;
        }

        let visited = &self.visited;
        let next = self
            .maze
            .neighbors(current, |cell| !visited.contains(&cell.coord()), true)
            .first()
            .map(|cell| cell.coord());

        match next {
            Some(next) => {
                self.visited.insert(next);
                self.parents.insert(next, current);
                self.stack.push(next);
                trace!("advance {current} -> {next}");
                Some(Transition::Advance(next))
            }
            None => {
                self.stack.pop();
                let back_to = self.stack.peek().copied();
                trace!("backtrack from {current}");
                Some(Transition::Backtrack(back_to))
            }
        }
    }

    fn next_step(&mut self) -> Option<Step> {
        loop {
            let (coord, kind) = match self.transition()? {
                Transition::Advance(coord) => (coord, StepKind::Advance),
                Transition::Backtrack(Some(coord)) => (coord, StepKind::Backtrack),
                // Spine emptied: nothing to show, the next call ends the search.
                Transition::Backtrack(None) => continue,
            };
            let cell = *self.maze.cell(coord)?;
            return Some(Step {
                cell,
                visited: self.visited.clone(),
                kind,
            });
        }
    }

    fn finish(&mut self) {
        self.solved = true;
        self.path = self.reconstruct_path();
        debug!(
            "reached {} with {} cells visited, path length {}",
            self.maze.end(),
            self.visited.len(),
            self.path.len()
        );
    }

    /// Walks parent links back from the end. Every cell past the start was
    /// given exactly one parent when first reached, so this terminates at
    /// the start.
    fn reconstruct_path(&self) -> Vec<Cell> {
        let mut coords = vec![self.maze.end()];
        let mut current = self.maze.end();
        while let Some(&parent) = self.parents.get(&current) {
            coords.push(parent);
            current = parent;
        }
        coords.reverse();

        coords
            .into_iter()
            .filter_map(|coord| self.maze.cell(coord).copied())
            .collect()
    }
}

/// Iterator returned by [`Solver::steps`].
pub struct Steps<'s, 'a> {
    solver: &'s mut Solver<'a>,
}

impl Steps<'_, '_> {
    pub fn is_solved(&self) -> bool {
        self.solver.solved
    }
}

impl Iterator for Steps<'_, '_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        self.solver.next_step()
    }
}
