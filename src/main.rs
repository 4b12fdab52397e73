//! Console chess client
//!
//! A line-based two-player loop over the rule engine: read a command,
//! apply it, print the result, re-prompt. Rejected input never ends the
//! loop; the error message is shown and the same player tries again.

mod console;

use std::io::{self, BufRead, Write};

use chess_core::ChessGame;
use console::Command;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("webchess console");
    println!("commands: start | move <source> <target> | moves <square> | status | end");

    let mut game = ChessGame::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;

        let command = match console::parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            Command::Start => {
                if game.is_in_game() {
                    println!("the game is already under way");
                    continue;
                }
                game.start();
                println!("{}", console::render_board(game.board()));
                if let Some(color) = game.turn().color() {
                    println!("{color} to move");
                }
            }
            Command::Move { source, target } => match game.move_piece(source, target) {
                Ok(outcome) => {
                    tracing::debug!(%source, %target, "move accepted");
                    println!("{}", console::render_board(game.board()));
                    if let Some(captured) = outcome.captured {
                        println!("captured {captured}");
                    }
                    if outcome.finished {
                        println!("the king has fallen, the game is over");
                        println!("{}", console::render_scores(game.board()));
                        break;
                    }
                    if let Some(color) = game.turn().color() {
                        println!("{color} to move");
                    }
                }
                Err(err) => println!("{err}"),
            },
            Command::Moves { source } => match game.board().available_targets(source) {
                Ok(targets) => {
                    let targets: Vec<String> =
                        targets.iter().map(ToString::to_string).collect();
                    println!("{source} can reach: {}", targets.join(" "));
                }
                Err(err) => println!("{err}"),
            },
            Command::Status => println!("{}", console::render_scores(game.board())),
            Command::End => {
                println!("{}", console::render_scores(game.board()));
                break;
            }
        }
    }

    Ok(())
}
