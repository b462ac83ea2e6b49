use core::fmt;
use std::error::Error;

use rand::prelude::SliceRandom;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::debug;

use crate::grid::{Grid, GridExplorer, Pos};

pub mod grid;
mod render;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Field {
  Mine,
  Empty(u32),
}

impl Field {
  pub fn is_mine(self) -> bool {
    matches!(self, Field::Mine)
  }

  pub fn is_blank(self) -> bool {
    matches!(self, Field::Empty(0))
  }

  fn notify_mine(field: &mut Field) {
    if let Field::Empty(mines) = field {
      *mines += 1;
    }
  }
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Field::Mine => write!(f, "X"),
      Field::Empty(0) => write!(f, " "),
      Field::Empty(mines) => write!(f, "{}", mines),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
  EmptyGrid,
  TooManyMines { mines: u32, capacity: u32 },
}

impl fmt::Display for SetupError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SetupError::EmptyGrid => write!(f, "grid size must be at least 1"),
      SetupError::TooManyMines { mines, capacity } => {
        write!(f, "cannot place {} mines on a grid with {} cells", mines, capacity)
      }
    }
  }
}

impl Error for SetupError {}

pub type GameGrid = Grid<Field>;
pub type ViewGrid = Grid<bool>;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GameSetup {
  grid: GameGrid,
  mines: u32,
}

impl GameSetup {
  pub fn new(mine_layout: &Grid<bool>) -> Self {
    let mut grid = GameGrid::new(mine_layout.size(), Field::Empty(0));
    let mut mines = 0;
    for (pos, &is_mine) in mine_layout.enumerate() {
      if is_mine {
        mines += 1;
        grid[pos] = Field::Mine;
        for neighbour_pos in pos.neighbours() {
          if let Some(neighbour) = grid.get_mut(neighbour_pos) {
            Field::notify_mine(neighbour);
          }
        }
      }
    }

    GameSetup { grid, mines }
  }

  pub fn size(&self) -> u32 {
    self.grid.size()
  }

  pub fn mines(&self) -> u32 {
    self.mines
  }
}

impl fmt::Debug for GameSetup {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for row in 0..self.size() {
      for col in 0..self.size() {
        write!(f, "{}", self.grid[Pos::new(row as i32, col as i32)])?;
      }
      writeln!(f)?;
    }

    Ok(())
  }
}

pub struct GameSetupBuilder {
  size: u32,
  mines: u32,
  rng: Box<dyn RngCore>,
}

impl GameSetupBuilder {
  pub fn new(size: u32, mines: u32) -> Self {
    Self {
      size,
      mines,
      rng: Box::new(rand::thread_rng()),
    }
  }

  pub fn seed(self, seed: u64) -> Self {
    self.rng(StdRng::seed_from_u64(seed))
  }

  pub fn rng(mut self, rng: impl RngCore + 'static) -> Self {
    self.rng = Box::new(rng);
    self
  }

  pub fn build(mut self) -> Result<GameSetup, SetupError> {
    if self.size == 0 {
      return Err(SetupError::EmptyGrid);
    }
    let capacity = self.size * self.size;
    if self.mines >= capacity {
      return Err(SetupError::TooManyMines { mines: self.mines, capacity });
    }

    // Drawing from a shuffled position list terminates even when almost
    // every cell is a mine.
    let mut layout = Grid::new(self.size, false);
    let positions: Vec<Pos> = layout.positions().collect();
    for &pos in positions.choose_multiple(&mut self.rng, self.mines as usize) {
      layout[pos] = true;
    }

    debug!(size = self.size, mines = self.mines, "generated mine layout");
    Ok(GameSetup::new(&layout))
  }
}

pub struct Game {
  setup: GameSetup,
  view: ViewGrid,
  revealed: u32,
  exploded: bool,
}

impl Game {
  pub fn new(size: u32, mines: u32) -> Result<Self, SetupError> {
    GameSetupBuilder::new(size, mines).build().map(Game::from)
  }

  pub fn setup(&self) -> &GameSetup {
    &self.setup
  }

  pub fn grid(&self) -> &GameGrid {
    &self.setup.grid
  }

  pub fn size(&self) -> u32 {
    self.grid().size()
  }

  pub fn mines(&self) -> u32 {
    self.setup.mines
  }

  pub fn is_revealed(&self, pos: Pos) -> bool {
    self.view[pos]
  }

  pub fn revealed_count(&self) -> u32 {
    self.revealed
  }

  pub fn is_won(&self) -> bool {
    !self.exploded && self.revealed == self.size() * self.size() - self.mines()
  }

  pub fn is_lost(&self) -> bool {
    self.exploded
  }

  /// Uncovers `pos`. Returns `false` if it held a mine, `true` otherwise,
  /// expanding across connected blank cells. `pos` must be in range;
  /// redundant digs of an uncovered cell are harmless.
  pub fn dig(&mut self, pos: Pos) -> bool {
    if self.grid()[pos].is_mine() {
      self.reveal(pos);
      self.exploded = true;
      debug!(row = pos.row, col = pos.col, "dug a mine");
      return false;
    }

    let before = self.revealed;
    let mut explorer = GridExplorer::from(self.grid());
    explorer.enqueue(pos);

    while let Some(pos) = explorer.pop() {
      self.reveal(pos);
      if self.grid()[pos].is_blank() {
        explorer.enqueue_all(pos.neighbours());
      }
    }

    debug!(
      row = pos.row,
      col = pos.col,
      uncovered = self.revealed - before,
      "dug a safe cell"
    );
    true
  }

  fn reveal(&mut self, pos: Pos) {
    if !self.view[pos] {
      self.view[pos] = true;
      self.revealed += 1;
    }
  }
}

impl From<GameSetup> for Game {
  fn from(setup: GameSetup) -> Self {
    Self {
      view: ViewGrid::new(setup.size(), false),
      setup,
      revealed: 0,
      exploded: false,
    }
  }
}

impl fmt::Display for Game {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.render(false))
  }
}
