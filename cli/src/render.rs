use std::fmt::Write;

use sweeper_core::{CellView, Game, MINE};

fn symbol(cell: CellView) -> char {
    match cell {
        CellView {
            revealed: false, ..
        } => '#',
        CellView { value: MINE, .. } => '*',
        CellView { value: 0, .. } => '.',
        CellView { value, .. } => char::from_digit(value.unsigned_abs().into(), 10).unwrap_or('?'),
    }
}

/// Plain-text board: one line per row plus a summary line.
pub fn render(game: &Game) -> String {
    let mut out = String::new();
    for row in game.grid_snapshot().rows() {
        let line: Vec<String> = row.iter().map(|&cell| symbol(cell).to_string()).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }

    let board = game.board();
    // writing into a String cannot fail
    let _ = writeln!(
        out,
        "{}x{}, {} mines, {} moves, seed {}",
        board.width(),
        board.height(),
        board.mines(),
        game.moves().len(),
        board.seed()
    );
    out
}
