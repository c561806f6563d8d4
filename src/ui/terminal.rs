//! Terminal shell
//!
//! A line-oriented front end over [`InputHandle`]. It only renders what the
//! library exposes and forwards gestures; no game logic lives here.
//!
//! Gestures run on their own task so the shell keeps reading stdin while an
//! attempt waits on the promotion prompt. Lines typed while a prompt is open
//! answer the prompt; anything else typed during an attempt gets `Busy`.
//!
//! # Commands
//!
//! | Input                  | Effect                              |
//! |------------------------|-------------------------------------|
//! | `7-5`                  | click the square at row 7, column 5 |
//! | `drag 7-5 5-5`         | drag a piece                        |
//! | `view white\|black`     | choose the side facing you          |
//! | `new`                  | start a new game on the authority   |
//! | `reset`                | reset the board locally             |
//! | `hints`                | destinations for the armed piece    |
//! | `sync`                 | refresh the authority's position    |
//! | `history`              | print the move list                 |
//! | `quit`                 | leave                               |

use crate::game::notation::{file_char, rank_char, square_notation};
use crate::game::resources::{MoveHistory, PendingPromotion, PromotionChannel, PromotionPrompt};
use crate::game::systems::{AttemptOutcome, ClickOutcome, InputHandle, MoveController};
use crate::game::types::{PieceColor, PromotionPiece, Square};
use crate::game::view_mode::BoardView;
use crate::networking::client::RemoteAuthority;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Click(String),
    Drag(String, String),
    View(PieceColor),
    NewGame,
    Reset,
    Hints,
    Sync,
    History,
    Help,
    Quit,
}

/// Lines the shell cannot make sense of
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "commands: <row>-<col> | drag <r-c> <r-c> | view white|black | new | reset | hints | sync | history | quit";

/// Parse one line of input
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(CommandError::Empty);
    };
    let rest: Vec<&str> = words.collect();

    match (head.to_ascii_lowercase().as_str(), rest.as_slice()) {
        ("drag", [from, to]) => Ok(Command::Drag(from.to_string(), to.to_string())),
        ("drag", _) => Err(CommandError::Usage("drag <r-c> <r-c>")),
        ("view", [color]) => color
            .parse::<PieceColor>()
            .map(Command::View)
            .map_err(|_| CommandError::Usage("view white|black")),
        ("view", _) => Err(CommandError::Usage("view white|black")),
        ("new", []) => Ok(Command::NewGame),
        ("reset", []) => Ok(Command::Reset),
        ("hints", []) => Ok(Command::Hints),
        ("sync", []) => Ok(Command::Sync),
        ("history", []) => Ok(Command::History),
        ("help" | "?", []) => Ok(Command::Help),
        ("quit" | "exit", []) => Ok(Command::Quit),
        (_, []) if head.contains('-') => Ok(Command::Click(head.to_string())),
        _ => Err(CommandError::Unknown(line.trim().to_string())),
    }
}

/// Answer to a promotion prompt: `q`, `r`, `b`, `n`, anything else cancels
pub fn parse_promotion_answer(line: &str) -> Option<PromotionPiece> {
    let mut chars = line.trim().chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    PromotionPiece::from_wire_char(first.to_ascii_lowercase())
}

pub fn promotion_prompt_text(pending: &PendingPromotion) -> String {
    let options: Vec<String> = pending
        .options()
        .iter()
        .map(|piece| piece.asset_code())
        .collect();
    format!(
        "Promote {} pawn on {} to [q]ueen, [r]ook, [b]ishop or k[n]ight ({}); empty line cancels:",
        pending.color,
        square_notation(pending.to),
        options.join(" ")
    )
}

/// Text board in screen order with rank and file labels
///
/// White pieces are upper-case, Black lower-case. Squares listed in `hints`
/// show `*` when empty.
pub fn render_board(view: &BoardView, hints: &[Square]) -> String {
    let rows = view.display_rows();
    let files: String = rows
        .first()
        .map(|row| {
            row.iter()
                .map(|sq| format!(" {}", file_char(*sq)))
                .collect()
        })
        .unwrap_or_default();

    let mut out = format!("  {}\n", files);
    for row in &rows {
        let Some(first) = row.first() else {
            continue;
        };
        let rank = rank_char(*first);
        out.push(rank);
        out.push(' ');
        for square in row {
            let glyph = match view.piece_at(*square) {
                Some(rendered) => {
                    let letter = rendered.piece.kind.asset_letter();
                    match rendered.piece.color {
                        PieceColor::White => letter,
                        PieceColor::Black => letter.to_ascii_lowercase(),
                    }
                }
                None if hints.contains(square) => '*',
                None => '.',
            };
            out.push(' ');
            out.push(glyph);
        }
        out.push_str(&format!("  {}\n", rank));
    }
    out.push_str(&format!("  {}\n", files));
    out
}

pub fn render_history(history: &MoveHistory) -> String {
    if history.is_empty() {
        "(no moves yet)".to_string()
    } else {
        history.to_text()
    }
}

pub fn describe_outcome(outcome: &ClickOutcome) -> String {
    match outcome {
        ClickOutcome::Ignored => "nothing to select there".to_string(),
        ClickOutcome::Armed(square) => format!("selected {}", square),
        ClickOutcome::Deselected => "selection cleared".to_string(),
        ClickOutcome::Busy => "busy, move in progress".to_string(),
        ClickOutcome::Attempted(attempt) => match attempt {
            AttemptOutcome::Applied { entry, .. } => {
                format!("{} {}", entry.move_number, entry.notation)
            }
            AttemptOutcome::Rejected { message } => format!(
                "move rejected: {}",
                message.as_deref().unwrap_or("illegal move")
            ),
            AttemptOutcome::TransportFailed { error } => format!("move not sent: {}", error),
            AttemptOutcome::PromotionCancelled => "promotion cancelled".to_string(),
            AttemptOutcome::Malformed => "selection cleared".to_string(),
        },
    }
}

fn print_board<A, P>(controller: &MoveController<A, P>)
where
    A: RemoteAuthority,
    P: crate::game::resources::PromotionGate,
{
    let session = controller.session();
    println!(
        "{}{} to move",
        render_board(session.orientation.view(), &controller.move_hints()),
        session.side_to_move
    );
}

/// Run the shell until `quit` or end of input
pub async fn run<A>(
    handle: InputHandle<A, PromotionChannel>,
    mut prompts: mpsc::Receiver<PromotionPrompt>,
) -> std::io::Result<()>
where
    A: RemoteAuthority + 'static,
{
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let (outcome_tx, mut outcomes) = mpsc::unbounded_channel::<ClickOutcome>();
    let mut open_prompt: Option<PromotionPrompt> = None;

    print_board(&*handle.lock().await);
    println!("{}", HELP);

    loop {
        tokio::select! {
            Some(prompt) = prompts.recv(), if open_prompt.is_none() => {
                println!("{}", promotion_prompt_text(&prompt.pending));
                open_prompt = Some(prompt);
            }
            Some(outcome) = outcomes.recv() => {
                println!("{}", describe_outcome(&outcome));
                if let Some(controller) = handle.try_lock() {
                    print_board(&*controller);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("[SHELL] End of input");
                    break;
                };

                if let Some(prompt) = open_prompt.take() {
                    match parse_promotion_answer(&line) {
                        Some(piece) => prompt.choose(piece),
                        None => prompt.cancel(),
                    }
                    continue;
                }

                let command = match parse_command(&line) {
                    Ok(command) => command,
                    Err(CommandError::Empty) => continue,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };

                match command {
                    Command::Click(id) => {
                        let handle = handle.clone();
                        let tx = outcome_tx.clone();
                        tokio::spawn(async move {
                            let _ = tx.send(handle.click(&id).await);
                        });
                    }
                    Command::Drag(from, to) => {
                        let handle = handle.clone();
                        let tx = outcome_tx.clone();
                        tokio::spawn(async move {
                            let _ = tx.send(handle.drop_piece(&from, &to).await);
                        });
                    }
                    Command::Help => println!("{}", HELP),
                    Command::Quit => break,
                    other => {
                        let Some(mut controller) = handle.try_lock() else {
                            println!("{}", describe_outcome(&ClickOutcome::Busy));
                            continue;
                        };
                        match other {
                            Command::View(color) => {
                                controller.set_view_color(color);
                                print_board(&*controller);
                            }
                            Command::NewGame => match controller.new_game().await {
                                Ok(()) => print_board(&*controller),
                                Err(e) => {
                                    warn!("[SHELL] New game failed: {}", e);
                                    println!("could not start a new game: {}", e);
                                }
                            },
                            Command::Reset => {
                                controller.reset_board();
                                print_board(&*controller);
                            }
                            Command::Hints => {
                                let hints: Vec<String> = controller
                                    .move_hints()
                                    .into_iter()
                                    .map(square_notation)
                                    .collect();
                                if hints.is_empty() {
                                    println!("no hints");
                                } else {
                                    println!("{}", hints.join(" "));
                                }
                            }
                            Command::Sync => {
                                if let Err(e) = controller.sync_with_authority().await {
                                    println!("could not reach the authority: {}", e);
                                }
                            }
                            Command::History => {
                                println!("{}", render_history(&controller.session().history));
                            }
                            _ => {}
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rules::BoardState;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("7-5"), Ok(Command::Click("7-5".to_string())));
        assert_eq!(
            parse_command("drag 7-5 5-5"),
            Ok(Command::Drag("7-5".to_string(), "5-5".to_string()))
        );
        assert_eq!(
            parse_command("view Black"),
            Ok(Command::View(PieceColor::Black))
        );
        assert_eq!(parse_command("  new "), Ok(Command::NewGame));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert_eq!(parse_command(""), Err(CommandError::Empty));
        assert!(matches!(parse_command("drag 7-5"), Err(CommandError::Usage(_))));
        assert!(matches!(parse_command("view red"), Err(CommandError::Usage(_))));
        assert!(matches!(parse_command("castle"), Err(CommandError::Unknown(_))));
    }

    #[test]
    fn test_parse_promotion_answer() {
        assert_eq!(parse_promotion_answer("q"), Some(PromotionPiece::Queen));
        assert_eq!(parse_promotion_answer(" N\n"), Some(PromotionPiece::Knight));
        assert_eq!(parse_promotion_answer(""), None);
        assert_eq!(parse_promotion_answer("queen"), None);
        assert_eq!(parse_promotion_answer("k"), None);
    }

    #[test]
    fn test_render_board_white_and_black() {
        let board = BoardState::starting_position();
        let white = render_board(&BoardView::render(PieceColor::White, &board), &[]);
        let lines: Vec<&str> = white.lines().collect();
        assert_eq!(lines[0], "   a b c d e f g h");
        assert_eq!(lines[1], "8  r n b q k b n r  8");
        assert_eq!(lines[8], "1  R N B Q K B N R  1");

        let black = render_board(&BoardView::render(PieceColor::Black, &board), &[]);
        let lines: Vec<&str> = black.lines().collect();
        assert_eq!(lines[0], "   h g f e d c b a");
        assert_eq!(lines[1], "1  R N B K Q B N R  1");
    }

    #[test]
    fn test_render_board_marks_hints() {
        let board = BoardState::starting_position();
        let e4 = Square::new(5, 5).unwrap();
        let text = render_board(&BoardView::render(PieceColor::White, &board), &[e4]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[5], "4  . . . . * . . .  4");
    }

    #[test]
    fn test_prompt_text_lists_options() {
        let pending = PendingPromotion {
            color: PieceColor::Black,
            from: Square::new(7, 1).unwrap(),
            to: Square::new(8, 1).unwrap(),
        };
        let text = promotion_prompt_text(&pending);
        assert!(text.contains("a1"));
        assert!(text.contains("bQ bR bB bN"));
    }
}
