use antichess_core::{Board, Color, Square};
use std::fmt::Write;

/// Text diagram of `board`, rank 8 at the top. White pieces are upper-case.
pub fn render(board: &Board) -> String {
    let mut out = String::new();
    for rank in (0..8).rev() {
        let _ = write!(out, "{} ", rank + 1);
        for file in 0..8 {
            let c = Square::new(file, rank)
                .and_then(|sq| board.get_piece(sq))
                .map_or('.', |piece| {
                    let c = piece.kind.to_char();
                    if piece.color == Color::White {
                        c.to_ascii_uppercase()
                    } else {
                        c
                    }
                });
            out.push(' ');
            out.push(c);
        }
        out.push('\n');
    }
    out.push_str("   a b c d e f g h\n");
    out
}
