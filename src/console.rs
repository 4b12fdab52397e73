//! Console presentation: command parsing and board rendering
//!
//! Pure string-in, string-out helpers so the main loop stays a plain
//! dispatch. Square notation is handed to the rule engine's own parser,
//! which keeps malformed-input errors distinct from illegal-move errors.

use chess_core::{Board, Color, GameResult, Square, Status};

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Move { source: Square, target: Square },
    Moves { source: Square },
    Status,
    End,
}

const USAGE: &str = "commands: start | move <source> <target> | moves <square> | status | end";

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Err(USAGE.to_string());
    };
    match keyword {
        "start" => Ok(Command::Start),
        "move" => {
            let (Some(source), Some(target)) = (words.next(), words.next()) else {
                return Err("usage: move <source> <target>, e.g. move e2 e4".to_string());
            };
            Ok(Command::Move {
                source: parse_square(source)?,
                target: parse_square(target)?,
            })
        }
        "moves" => {
            let Some(source) = words.next() else {
                return Err("usage: moves <square>, e.g. moves b1".to_string());
            };
            Ok(Command::Moves {
                source: parse_square(source)?,
            })
        }
        "status" => Ok(Command::Status),
        "end" => Ok(Command::End),
        _ => Err(format!("unknown command {keyword:?}; {USAGE}")),
    }
}

fn parse_square(text: &str) -> Result<Square, String> {
    text.parse::<Square>().map_err(|err| err.to_string())
}

/// The board as eight ranks top-down, white pieces uppercase.
pub fn render_board(board: &Board) -> String {
    let mut rows = [['.'; 8]; 8];
    for (square, piece) in board.squares() {
        if let Some(piece) = piece {
            rows[square.rank() as usize][square.file() as usize] = piece.symbol();
        }
    }

    let mut out = String::new();
    for rank in (0..8usize).rev() {
        out.push((b'1' + rank as u8) as char);
        for file in 0..8 {
            out.push(' ');
            out.push(rows[rank][file]);
        }
        out.push('\n');
    }
    out.push_str("  a b c d e f g h");
    out
}

/// Both material scores and who currently leads.
pub fn render_scores(board: &Board) -> String {
    let status = Status::new(board);
    let verdict = match status.result() {
        GameResult::WhiteWins => "white leads",
        GameResult::BlackWins => "black leads",
        GameResult::Draw => "even",
    };
    format!(
        "white {} : black {} ({verdict})",
        status.score(Color::White),
        status.score(Color::Black)
    )
}
