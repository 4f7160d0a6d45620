//! Box-drawing board rendering for logs.

use tictactoe_core::Board;

const TOP_LEFT: char = '╔';
const TOP_RIGHT: char = '╗';
const BOTTOM_LEFT: char = '╚';
const BOTTOM_RIGHT: char = '╝';
const VERTICAL: char = '║';
const HORIZONTAL: char = '═';
const VERTICAL_LEFT: char = '╠';
const VERTICAL_RIGHT: char = '╣';
const HORIZONTAL_TOP: char = '╦';
const HORIZONTAL_BOTTOM: char = '╩';
const CENTRAL: char = '╬';

fn rule(left: char, joint: char, right: char, size: usize) -> String {
    let mut line = String::new();
    line.push(left);
    for i in 0..size {
        if i > 0 {
            line.push(joint);
        }
        line.push(HORIZONTAL);
    }
    line.push(right);
    line
}

/// Renders `board` inside a double-line frame, one cell per column.
///
/// ```text
/// ╔═╦═╦═╗
/// ║X║-║-║
/// ╠═╬═╬═╣
/// ...
/// ╚═╩═╩═╝
/// ```
pub fn pretty_board(board: &Board) -> String {
    let size = board.size();
    let separator = rule(VERTICAL_LEFT, CENTRAL, VERTICAL_RIGHT, size);

    let mut out = rule(TOP_LEFT, HORIZONTAL_TOP, TOP_RIGHT, size);
    out.push('\n');
    for (i, row) in board.rows().enumerate() {
        if i > 0 {
            out.push_str(&separator);
            out.push('\n');
        }
        out.push(VERTICAL);
        for cell in row {
            out.push(cell.symbol());
            out.push(VERTICAL);
        }
        out.push('\n');
    }
    out.push_str(&rule(BOTTOM_LEFT, HORIZONTAL_BOTTOM, BOTTOM_RIGHT, size));
    out.push('\n');
    out
}
