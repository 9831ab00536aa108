//! Interactive session: read commands line by line and redraw the page.
//!
//! | Input | Effect |
//! |-------|--------|
//! | any text | becomes the search term |
//! | empty line | clears the search term |
//! | `:open N` | opens the detail of visible card N |
//! | `:close` | closes the detail |
//! | `:help` | lists the commands |
//! | `:quit`, `:q`, EOF | ends the session |

use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, instrument};

use crate::outputs::terminal::{render_page, RenderOptions};
use crate::view::NewsView;

pub const HELP_TEXT: &str =
    "Type to search titles | empty line: clear | :open N | :close | :help | :quit";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Open(usize),
    Close,
    Help,
    Quit,
    Unknown(String),
}

/// Parse one input line. Lines starting with `:` are commands, anything else
/// is a search term taken verbatim.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(cmd) = line.strip_prefix(':') else {
        return Command::Search(line.to_string());
    };

    let mut parts = cmd.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("q" | "quit"), None) => Command::Quit,
        (Some("close"), None) => Command::Close,
        (Some("help" | "h"), None) => Command::Help,
        (Some("open" | "o"), Some(n)) => match n.parse() {
            Ok(n) => Command::Open(n),
            Err(_) => Command::Unknown(line.to_string()),
        },
        _ => Command::Unknown(line.to_string()),
    }
}

/// Apply a command to the view. Returns a status message for the user, if
/// any, or `None` for [`Command::Quit`] handling by the caller.
pub fn apply(view: &mut NewsView, command: Command) -> Option<String> {
    match command {
        Command::Search(term) => {
            view.set_term(term);
            None
        }
        Command::Open(n) => {
            if n > 0 && view.select(n - 1) {
                None
            } else {
                Some(format!("No card {} on screen", n))
            }
        }
        Command::Close => {
            view.close_detail();
            None
        }
        Command::Help => Some(HELP_TEXT.to_string()),
        Command::Unknown(line) => Some(format!("Unknown command {:?}. {}", line, HELP_TEXT)),
        Command::Quit => None,
    }
}

/// Drive an already-loaded view from `input` until quit or EOF, writing the
/// page to `out` after every line.
#[instrument(level = "info", skip_all)]
pub async fn run<R, W>(
    view: &mut NewsView,
    opts: &RenderOptions,
    input: R,
    out: &mut W,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut commands = 0usize;

    while let Some(line) = lines.next_line().await? {
        let command = parse_command(&line);
        debug!(?command, "Received command");
        if command == Command::Quit {
            break;
        }
        commands += 1;
        let message = apply(view, command);
        writeln!(out, "{}", render_page(view, opts))?;
        if let Some(message) = message {
            writeln!(out, "\n{}", message)?;
        }
        out.flush()?;
    }

    info!(commands, "Session ended");
    Ok(())
}
