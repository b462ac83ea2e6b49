use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use minesweeper_engine::grid::Pos;
use minesweeper_engine::{Game, GameSetupBuilder};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "minesweeper", about = "Console minesweeper played by row,col coordinates")]
struct Args {
  /// Side length of the square grid
  #[arg(long, default_value_t = 10)]
  size: u32,

  /// Number of mines to place
  #[arg(long, default_value_t = 10)]
  mines: u32,

  /// Seed the mine layout for a reproducible game
  #[arg(long)]
  seed: Option<u64>,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();
  let args = Args::parse();

  let mut builder = GameSetupBuilder::new(args.size, args.mines);
  if let Some(seed) = args.seed {
    builder = builder.seed(seed);
  }
  let game = Game::from(builder.build()?);
  info!(size = args.size, mines = args.mines, "new game");

  let stdin = io::stdin();
  play(game, &mut stdin.lock())
}

fn play(mut game: Game, input: &mut impl BufRead) -> Result<()> {
  loop {
    println!("\n{}", game.render(false));
    let pos = match prompt_for_position(input, game.size())? {
      Some(pos) => pos,
      None => return Ok(()),
    };

    if game.is_revealed(pos) {
      println!("Already dug there. Try again.");
      continue;
    }

    if !game.dig(pos) {
      println!("\n{}", game.render(true));
      println!("Boom! That was a mine. Game over.");
      return Ok(());
    }

    if game.is_won() {
      println!("\n{}", game.render(false));
      println!("All safe cells cleared. You win!");
      return Ok(());
    }
  }
}

fn prompt_for_position(input: &mut impl BufRead, size: u32) -> Result<Option<Pos>> {
  loop {
    print!("Where would you like to dig? Input as row,col: ");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
      println!();
      return Ok(None);
    }

    match parse_coordinates(&line) {
      Some((row, col)) if row < size && col < size => {
        return Ok(Some(Pos::new(row as i32, col as i32)));
      }
      Some(_) => println!("Invalid location. Try again."),
      None => println!("Invalid input. Try again."),
    }
  }
}

fn parse_coordinates(line: &str) -> Option<(u32, u32)> {
  let (row, col) = line.split_once(',')?;
  Some((row.trim().parse().ok()?, col.trim().parse().ok()?))
}
