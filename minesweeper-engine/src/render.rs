use crate::grid::Pos;
use crate::Game;

static HIDDEN: &str = "░";

impl Game {
  /// Renders the player view as an aligned text grid with indexed rows and
  /// columns. With `reveal_all` every cell is shown face up, mines
  /// included, for the post-loss display. Never touches the revealed view.
  pub fn render(&self, reveal_all: bool) -> String {
    let size = self.size() as usize;

    let glyphs: Vec<Vec<String>> = (0..size)
      .map(|row| {
        (0..size)
          .map(|col| {
            let pos = Pos::new(row as i32, col as i32);
            if reveal_all || self.is_revealed(pos) {
              self.grid()[pos].to_string()
            } else {
              HIDDEN.to_string()
            }
          })
          .collect()
      })
      .collect();

    // Column widths cover the widest cell in the column and the header
    // index above it, so multi-digit indices keep the grid aligned.
    let col_widths: Vec<usize> = (0..size)
      .map(|col| {
        glyphs
          .iter()
          .map(|row| row[col].chars().count())
          .chain([col.to_string().len()])
          .max()
          .unwrap_or(1)
      })
      .collect();
    let label_width = (size - 1).to_string().len();

    let header = format!(
      "{}{}",
      " ".repeat(label_width + 2),
      (0..size)
        .map(|col| format!("{:<width$}", col, width = col_widths[col]))
        .collect::<Vec<_>>()
        .join("  ")
    );

    let rows: Vec<String> = glyphs
      .iter()
      .enumerate()
      .map(|(row, cells)| {
        let padded: Vec<String> = cells
          .iter()
          .zip(&col_widths)
          .map(|(glyph, &width)| format!("{:<width$}", glyph))
          .collect();
        format!("{:>label_width$} |{} |", row, padded.join(" |"))
      })
      .collect();

    let rule = "-".repeat(rows[0].chars().count());

    let mut lines = Vec::with_capacity(size + 3);
    lines.push(header);
    lines.push(rule.clone());
    lines.extend(rows);
    lines.push(rule);
    lines.join("\n")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grid::Grid;
  use crate::GameSetup;

  fn game_2x2_with_corner_mine() -> Game {
    let mut layout = Grid::new(2, false);
    layout[Pos::new(0, 0)] = true;
    Game::from(GameSetup::new(&layout))
  }

  #[test]
  fn fresh_grid_renders_every_cell_hidden() {
    let game = game_2x2_with_corner_mine();
    assert_eq!(game.render(false).matches(HIDDEN).count(), 4);
  }

  #[test]
  fn revealing_one_cell_changes_exactly_that_glyph() {
    let mut game = game_2x2_with_corner_mine();
    assert!(game.dig(Pos::new(1, 1)));

    let rendered = game.render(false);
    assert_eq!(rendered.matches(HIDDEN).count(), 3);
    assert_eq!(
      rendered,
      "   0  1\n\
       ---------\n\
       0 |░ |░ |\n\
       1 |░ |1 |\n\
       ---------"
    );
  }

  #[test]
  fn reveal_all_shows_the_mines() {
    let game = game_2x2_with_corner_mine();
    assert_eq!(
      game.render(true),
      "   0  1\n\
       ---------\n\
       0 |X |1 |\n\
       1 |1 |1 |\n\
       ---------"
    );
  }

  #[test]
  fn revealed_blanks_print_as_spaces() {
    let mut game = Game::new(3, 0).unwrap();
    game.dig(Pos::new(0, 0));
    let rendered = game.render(false);
    assert_eq!(rendered.matches(HIDDEN).count(), 0);
    assert!(rendered.contains("0 |  |  |  |"));
  }

  #[test]
  fn two_digit_indices_stay_aligned() {
    let game = Game::new(12, 0).unwrap();
    let rendered = game.render(false);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 12 + 3);
    assert!(lines[0].contains("10"));
    assert!(lines[0].contains("11"));

    let body_width = lines[2].chars().count();
    for line in &lines[2..] {
      assert_eq!(line.chars().count(), body_width);
    }
    assert!(lines[2].starts_with(" 0 |"));
    assert!(lines[13].starts_with("11 |"));
  }

  #[test]
  fn rendering_does_not_mutate_the_view() {
    let game = game_2x2_with_corner_mine();
    let _ = game.render(true);
    assert_eq!(game.revealed_count(), 0);
    assert_eq!(game.render(false).matches(HIDDEN).count(), 4);
  }
}
