//! Line-oriented console for driving one session.
//!
//! The console reads one command per line and answers in the style of a
//! text engine protocol: an optional numeric id, then `=` for success or
//! `?` for failure, the response text, and a blank line.
//!
//! Payloads arriving from the relay are fed in with `recv`, and every message
//! the session wants to send is reported as a `send <frame>` line holding the
//! relay frame to forward.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `list_commands`, `known_command <cmd>`, `quit`
//! - `show` - Board diagram from the current side's view
//! - `state` - Absolute board as JSON
//! - `side` / `flip` - Show or toggle the viewing side
//! - `select <x> <y>` - Click a square (view coordinates)
//! - `hand <type> [opponent]` - Pick a piece from a hand
//! - `targets` - Highlighted squares for the current selection
//! - `promote` / `decline` / `cancel` - Answer a promotion prompt
//! - `reset confirm` - Reset the board for everyone; a bare `reset` only asks
//! - `open` - Announce arrival after connecting
//! - `recv <payload>` - Handle a payload delivered by the relay
//!
//! ## Example
//!
//! ```
//! use shogi_net::console::Console;
//! use shogi_net::session::SessionConfig;
//!
//! let mut console = Console::new(SessionConfig::default());
//! let input = b"select 6 6\nselect 6 5\nquit\n";
//! let mut output = Vec::new();
//! console.run(&input[..], &mut output).unwrap();
//! assert!(String::from_utf8(output).unwrap().contains("send "));
//! ```

use std::io::{self, BufRead, Write};

use log::debug;

use crate::board::{Point, diagram};
use crate::constants::MAX_COORD;
use crate::piece::{PieceType, Side};
use crate::promotion::Choice;
use crate::protocol::{Message, frame};
use crate::session::{Selection, Session, SessionConfig};

/// The list of known console commands.
const KNOWN_COMMANDS: &[&str] = &[
    "cancel",
    "decline",
    "flip",
    "hand",
    "known_command",
    "list_commands",
    "name",
    "open",
    "promote",
    "quit",
    "recv",
    "reset",
    "select",
    "show",
    "side",
    "state",
    "targets",
    "version",
];

/// Console state: the session driven by the command loop.
pub struct Console {
    /// The client all board commands act on.
    session: Session,
}

impl Default for Console {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Console {
    /// Create a console around a fresh session.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            session: Session::new(config),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];
            debug!("console command '{command_line}'");

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command id from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, "shogi-net".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, if known { "true" } else { "false" }.to_string())
            }

            "quit" => (true, String::new()),

            "show" => (true, self.render()),

            "state" => match serde_json::to_string(self.session.board()) {
                Ok(json) => (true, json),
                Err(e) => (false, e.to_string()),
            },

            "side" => (true, self.session.current_side().to_string()),

            "flip" => (true, self.session.toggle_side().to_string()),

            "select" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let Some(p) = parse_point(args[0], args[1]) else {
                    return (false, "invalid point".to_string());
                };
                let outgoing = self.session.click_square(p);
                let status = self.status();
                self.reply(status, &outgoing)
            }

            "hand" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let Some(kind) = PieceType::parse(args[0]) else {
                    return (false, format!("unknown piece type: {}", args[0]));
                };
                let side = match args.get(1) {
                    Some(&"opponent") => self.session.current_side().opposite(),
                    Some(other) => match Side::parse(other) {
                        Some(side) => side,
                        None => return (false, format!("unknown side: {other}")),
                    },
                    None => self.session.current_side(),
                };
                if self.session.click_hand(side, kind) {
                    (true, self.status())
                } else {
                    (false, format!("cannot pick {kind} from {side} hand"))
                }
            }

            "targets" => {
                let points: Vec<String> = self
                    .session
                    .selectable_points()
                    .iter()
                    .map(|p| format!("{},{}", p.x(), p.y()))
                    .collect();
                (true, points.join(" "))
            }

            "promote" | "decline" | "cancel" => {
                if !self.session.is_awaiting_promotion() {
                    return (false, "no promotion pending".to_string());
                }
                let choice = match command {
                    "promote" => Choice::Promote,
                    "decline" => Choice::Decline,
                    _ => Choice::Cancel,
                };
                let outgoing = self.session.choose_promotion(choice);
                let status = self.status();
                self.reply(status, &outgoing)
            }

            "reset" => {
                if args.first() != Some(&"confirm") {
                    return (false, "this resets the board for every player; use 'reset confirm'".to_string());
                }
                let outgoing = self.session.reset();
                self.reply("reset".to_string(), &outgoing)
            }

            "open" => {
                let outgoing = [self.session.on_open()];
                self.reply("announced".to_string(), &outgoing)
            }

            "recv" => {
                if args.is_empty() {
                    return (false, "missing payload".to_string());
                }
                match self.session.receive(&args.join(" ")) {
                    Ok(replies) => self.reply("ok".to_string(), &replies),
                    Err(e) => (false, e.to_string()),
                }
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// Build a response from a status line plus one `send` line per outgoing message.
    fn reply(&self, status: String, outgoing: &[Message]) -> (bool, String) {
        let mut lines = vec![status];
        for message in outgoing {
            match frame(message) {
                Ok(raw) => lines.push(format!("send {raw}")),
                Err(e) => return (false, e.to_string()),
            }
        }
        (true, lines.join("\n"))
    }

    fn status(&self) -> String {
        if let Some(pending) = self.session.pending_promotion() {
            return format!("promote {} to {}? (promote/decline/cancel)", pending.piece.kind, pending.to);
        }
        match self.session.selection() {
            Selection::None => "idle".to_string(),
            Selection::Square(p) => format!(
                "selected {p}, {} target(s)",
                self.session.selectable_points().len()
            ),
            Selection::Hand { side, kind } => format!("selected {side} {kind} from hand"),
        }
    }

    fn render(&self) -> String {
        let side = self.session.current_side();
        let hands = &self.session.board().hands;
        let hand_line = |s: Side| {
            let pieces: Vec<String> = hands
                .grouped(s)
                .into_iter()
                .map(|(kind, n)| format!("{}x{n}", kind.letter()))
                .collect();
            format!("{s} hand: {}", pieces.join(" "))
        };

        let mut out = String::new();
        out.push_str(&hand_line(side.opposite()));
        out.push('\n');
        out.push_str(&diagram(&self.session.view()));
        out.push_str(&hand_line(side));
        out.push_str(&format!("\nviewing as {side}"));
        out
    }
}

fn parse_point(x: &str, y: &str) -> Option<Point> {
    let x = x.parse::<u8>().ok()?;
    let y = y.parse::<u8>().ok()?;
    (x <= MAX_COORD && y <= MAX_COORD).then(|| Point::new(x, y))
}
