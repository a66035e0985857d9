//! Interactive browsing: one command per line on stdin, the view re-rendered
//! on stdout whenever navigation happens or a fetch lands.

use common::FilterKey;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::warn;

use crate::app::JobBoard;
use crate::history::Location;
use crate::view;

pub const HELP: &str = "\
Commands:
  search <text>           set the search text (no text clears it)
  department <value>      set a filter; same for location and function
  set <key> <value>       set any filter key
  unset <key>             remove a filter
  clear                   remove every filter
  open <n>                show the n-th job of the list
  job <id>                show a job by id
  list                    back to the list, filters kept
  back | forward          move through history
  go <path-or-url>        navigate to a location
  options                 show the choices for each filter
  url                     print the current location
  help                    show this text
  quit                    leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetFilter { key: String, value: Option<String> },
    Clear,
    Open(usize),
    Job(String),
    List,
    Back,
    Forward,
    Go(String),
    Options,
    Url,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a list position")]
    BadIndex(String),
}

impl Command {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        let command = match word {
            "search" | "department" | "location" | "function" => Command::SetFilter {
                key: word.to_string(),
                value: arg,
            },
            "set" => {
                let (key, value) = match rest.split_once(char::is_whitespace) {
                    Some((key, value)) => (key, value.trim()),
                    None => (rest, ""),
                };
                if key.is_empty() {
                    return Err(CommandError::MissingArgument("set"));
                }
                Command::SetFilter {
                    key: key.to_string(),
                    value: (!value.is_empty()).then(|| value.to_string()),
                }
            }
            "unset" => Command::SetFilter {
                key: arg.ok_or(CommandError::MissingArgument("unset"))?,
                value: None,
            },
            "clear" => Command::Clear,
            "open" => {
                let arg = arg.ok_or(CommandError::MissingArgument("open"))?;
                match arg.parse::<usize>() {
                    Ok(n) if n >= 1 => Command::Open(n),
                    _ => return Err(CommandError::BadIndex(arg)),
                }
            }
            "job" => Command::Job(arg.ok_or(CommandError::MissingArgument("job"))?),
            "list" => Command::List,
            "back" => Command::Back,
            "forward" => Command::Forward,
            "go" => Command::Go(arg.ok_or(CommandError::MissingArgument("go"))?),
            "options" => Command::Options,
            "url" => Command::Url,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

/// What the loop should do after a command.
enum Step {
    Render,
    Print(String),
    Quit,
}

fn execute(board: &mut JobBoard, command: Command) -> Step {
    match command {
        Command::SetFilter { key, value } => {
            if let (Ok(known), Some(value)) = (key.parse::<FilterKey>(), value.as_deref()) {
                if !known.accepts(value) {
                    warn!(key = %known, value, "Value is not one of the listed options");
                }
            }
            board.set_filter(&key, value.as_deref());
            Step::Render
        }
        Command::Clear => {
            board.clear_all();
            Step::Render
        }
        Command::Open(n) => {
            if board.select_nth(n) {
                Step::Render
            } else {
                Step::Print(format!("No job at position {}", n))
            }
        }
        Command::Job(id) => {
            board.select(&id);
            Step::Render
        }
        Command::List => {
            board.back_to_list();
            Step::Render
        }
        Command::Back => {
            if board.back() {
                Step::Render
            } else {
                Step::Print("Already at the first page".to_string())
            }
        }
        Command::Forward => {
            if board.forward() {
                Step::Render
            } else {
                Step::Print("Already at the latest page".to_string())
            }
        }
        Command::Go(target) => {
            board.navigate(Location::parse(&target));
            Step::Render
        }
        Command::Options => Step::Print(view::render_options()),
        Command::Url => Step::Print(board.location().to_string()),
        Command::Help => Step::Print(HELP.to_string()),
        Command::Quit => Step::Quit,
    }
}

async fn show<W: AsyncWrite + Unpin>(out: &mut W, board: &JobBoard) -> std::io::Result<()> {
    let page = format!("\n== {} ==\n{}", board.location(), board.render());
    out.write_all(page.as_bytes()).await?;
    out.flush().await
}

async fn print<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> std::io::Result<()> {
    out.write_all(text.as_bytes()).await?;
    if !text.ends_with('\n') {
        out.write_all(b"\n").await?;
    }
    out.flush().await
}

/// Runs the interactive loop until `quit` or end of input.
pub async fn run<R, W>(board: &mut JobBoard, input: R, out: &mut W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    show(out, board).await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Ok(None) => {}
                    Ok(Some(command)) => match execute(board, command) {
                        Step::Render => show(out, board).await?,
                        Step::Print(text) => print(out, &text).await?,
                        Step::Quit => break,
                    },
                    Err(e) => print(out, &e.to_string()).await?,
                }
            }
            Some(outcome) = board.next_outcome() => {
                if board.apply(outcome) {
                    show(out, board).await?;
                }
            }
        }
    }
    Ok(())
}
