use std::time::Duration;

use clap::Parser;
use common::{Coord, MazeConfig};

/// Generate a perfect maze and solve it with depth-first search.
#[derive(Debug, Parser)]
#[command(name = "maze", version, about)]
pub struct Args {
    /// Number of columns.
    #[arg(long, env = "MAZE_WIDTH", default_value_t = 20)]
    pub width: usize,

    /// Number of rows.
    #[arg(long, env = "MAZE_HEIGHT", default_value_t = 20)]
    pub height: usize,

    /// Seed for a reproducible maze. Random when omitted.
    #[arg(long, env = "MAZE_SEED")]
    pub seed: Option<u64>,

    /// Start cell as `x,y`. Defaults to the top-left corner.
    #[arg(long, env = "MAZE_START", value_parser = parse_coord)]
    pub start: Option<Coord>,

    /// End cell as `x,y`. Defaults to the bottom-right corner.
    #[arg(long, env = "MAZE_END", value_parser = parse_coord)]
    pub end: Option<Coord>,

    /// Redraw the maze after every solver step.
    #[arg(long)]
    pub animate: bool,

    /// Pause between animation frames, in milliseconds.
    #[arg(long, env = "MAZE_DELAY_MS", default_value_t = 50)]
    pub delay_ms: u64,
}

impl Args {
    pub fn maze_config(&self) -> MazeConfig {
        MazeConfig {
            width: self.width,
            height: self.height,
            start: self.start,
            end: self.end,
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Reads `.env` if there is one, then the command line.
pub fn load() -> Args {
    dotenvy::dotenv().ok();
    Args::parse()
}

pub fn parse_coord(input: &str) -> Result<Coord, String> {
    let (x, y) = input
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{input}`"))?;
    let x = x
        .trim()
        .parse()
        .map_err(|_| format!("invalid column `{}`", x.trim()))?;
    let y = y
        .trim()
        .parse()
        .map_err(|_| format!("invalid row `{}`", y.trim()))?;
    Ok(Coord::new(x, y))
}
