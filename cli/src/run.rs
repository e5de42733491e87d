use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor::{self, MoveTo},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use log::info;
use rand::{SeedableRng, rngs::StdRng};

use common::{Maze, Overlay, SolveOutcome, Solver, Step};

use crate::config::Args;

pub fn run(args: &Args) -> Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let maze = Maze::generate(args.maze_config(), &mut rng).context("failed to build maze")?;
    info!(
        "generated {}x{} maze with seed {seed}",
        maze.width(),
        maze.height()
    );

    print_banner(&maze, seed);
    println!("{maze}");

    let mut solver = Solver::new(&maze);
    let outcome = if args.animate {
        animate(&mut solver, args)?
    } else {
        solver.solve()
    };

    print_outcome(&maze, &outcome);
    Ok(())
}

fn print_banner(maze: &Maze, seed: u64) {
    println!("  Size:  {}x{}", maze.width(), maze.height());
    println!("  Seed:  {seed}");
    println!("  Start: {}", maze.start());
    println!("  End:   {}", maze.end());
}

fn print_outcome(maze: &Maze, outcome: &SolveOutcome) {
    if let Some(path) = outcome.path() {
        println!("{}", maze.draw(&Overlay::new().with_path(path)));
    }
    println!("{outcome}");
}

fn animate(solver: &mut Solver<'_>, args: &Args) -> Result<SolveOutcome> {
    let handle = solver.cancel_handle();
    let interrupt = handle.clone();
    ctrlc::set_handler(move || interrupt.cancel()).context("failed to set Ctrl-C handler")?;

    let maze = solver.maze();
    let mut stdout = io::stdout();
    let mut frame_error = None;

    queue!(stdout, cursor::Hide)?;
    let outcome = solver.solve_animated(args.delay(), |step| {
        if frame_error.is_some() {
            return;
        }
        if let Err(e) = draw_frame(&mut stdout, maze, step) {
            frame_error = Some(e);
            handle.cancel();
        }
    });
    queue!(stdout, cursor::Show)?;
    stdout.flush()?;

    if let Some(e) = frame_error {
        return Err(e).context("failed to draw animation frame");
    }
    Ok(outcome)
}

fn draw_frame(out: &mut impl Write, maze: &Maze, step: Step) -> io::Result<()> {
    let backtracking = step.is_backtracking();
    let overlay = Overlay::new()
        .with_visited(step.visited)
        .with_frontier(step.cell.coord(), backtracking);

    queue!(
        out,
        MoveTo(0, 0),
        Clear(ClearType::All),
        Print(maze.draw(&overlay)),
        Print(format!("Visiting {}\n", step.cell.coord())),
    )?;
    out.flush()
}
