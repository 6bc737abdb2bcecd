//! Line-oriented front end for a [`SearchSession`].
//!
//! Commands mirror the buttons of a sheet task pane:
//!
//! ```text
//! search [-n COUNT] <criteria...>   run a search (the trigger is ignored while loading)
//! commit                            append held results to the sheet
//! clear                             drop held results
//! dismiss                           hide the current error
//! status                            show state, status and results
//! help | quit
//! ```

use anyhow::Result;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::DEFAULT_COUNT;
use crate::grid::GridIo;
use crate::model::types::SessionState;
use crate::session::{SearchSession, SessionSnapshot};

const HELP: &str = "\
commands:
  search [-n COUNT] <criteria...>   find companies (COUNT 1-50, default 10)
  commit                            add the results to the sheet
  clear                             discard the results
  dismiss                           hide the error
  status                            show the session
  quit                              leave";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Search { criteria: String, count: u32 },
    Commit,
    Clear,
    Dismiss,
    Status,
    Help,
    Quit,
    Empty,
}

/// Parse one line of input. Quoting follows POSIX shell rules.
pub fn parse_line(line: &str) -> Result<ReplCommand, String> {
    let words = shell_words::split(line).map_err(|e| format!("could not parse input: {e}"))?;
    let Some((head, rest)) = words.split_first() else {
        return Ok(ReplCommand::Empty);
    };

    match head.to_lowercase().as_str() {
        "search" | "s" => parse_search(rest),
        "commit" | "add" => Ok(ReplCommand::Commit),
        "clear" => Ok(ReplCommand::Clear),
        "dismiss" => Ok(ReplCommand::Dismiss),
        "status" => Ok(ReplCommand::Status),
        "help" | "?" => Ok(ReplCommand::Help),
        "quit" | "exit" | "q" => Ok(ReplCommand::Quit),
        other => Err(format!("unknown command `{other}` (try `help`)")),
    }
}

fn parse_search(args: &[String]) -> Result<ReplCommand, String> {
    let mut count = DEFAULT_COUNT;
    let mut words = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "-n" || arg == "--count" {
            let value = iter
                .next()
                .ok_or_else(|| format!("{arg} needs a number"))?;
            // Out-of-range numbers are left to the session's validation.
            count = value
                .parse()
                .map_err(|_| "Please enter a valid number of companies (1-50)".to_string())?;
        } else {
            words.push(arg.as_str());
        }
    }
    Ok(ReplCommand::Search {
        criteria: words.join(" "),
        count,
    })
}

/// Apply one command to the session. Returns `false` when the user quits.
pub async fn execute<G: GridIo>(
    session: &mut SearchSession<G>,
    command: ReplCommand,
) -> bool {
    match command {
        ReplCommand::Search { criteria, count } => {
            if session.state() == SessionState::Loading {
                println!("{}", "a search is already running".yellow());
                return true;
            }
            let credential = session.config().credential().map(str::to_string);
            // Errors are reflected in the session; render it either way.
            let _ = session.search(&criteria, count, credential.as_deref()).await;
            render(&session.snapshot());
        }
        ReplCommand::Commit => {
            let _ = session.commit().await;
            render(&session.snapshot());
        }
        ReplCommand::Clear => {
            session.clear();
            render(&session.snapshot());
        }
        ReplCommand::Dismiss => {
            session.dismiss_error();
            render(&session.snapshot());
        }
        ReplCommand::Status => render(&session.snapshot()),
        ReplCommand::Help => println!("{HELP}"),
        ReplCommand::Quit => return false,
        ReplCommand::Empty => {}
    }
    true
}

/// Read commands from stdin until EOF or `quit`.
pub async fn run_repl<G: GridIo>(mut session: SearchSession<G>) -> Result<()> {
    println!("{}", "company search: type `help` for commands".bold());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_line(&line) {
            Ok(cmd) => cmd,
            Err(msg) => {
                println!("{}", msg.red());
                continue;
            }
        };
        if !execute(&mut session, command).await {
            break;
        }
    }
    Ok(())
}

fn render(snapshot: &SessionSnapshot) {
    if let Some(error) = &snapshot.error {
        println!("{}", error.red().bold());
    } else if let Some(status) = &snapshot.status {
        println!("{}", status.cyan());
    }
    if snapshot.state == SessionState::ResultsReady {
        for name in &snapshot.results {
            println!("  {}", name.green());
        }
        println!("{}", "commit to add them, clear to discard".dimmed());
    }
}
