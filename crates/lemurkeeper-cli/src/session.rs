//! Interactive browse session.
//!
//! Reads one command per line and re-renders the filtered list after every
//! change to the filters or the collection.

use std::io::{self, BufRead, Write};

use lemurkeeper_core::{AppState, CATEGORY_ALL, Sex};
use lemurkeeper_sync::{LemurClient, RetryPolicy};
use tracing::error;

use crate::display;

const HELP: &str = "\
commands:
  search <text>     filter by name (case-insensitive); `search` alone clears it
  category <value>  filter by sex: All, M, F, I
  show              print the current list
  refresh           fetch the collection again
  help              print this message
  quit              leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Search(String),
    Category(String),
    Show,
    Refresh,
    Help,
    Quit,
}

impl SessionCommand {
    /// Parse one input line. Search text after the first space is kept
    /// verbatim, including surrounding whitespace.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        match word {
            "search" | "s" => Ok(SessionCommand::Search(rest.to_string())),
            "category" | "c" => {
                let value = rest.trim();
                if value.is_empty() {
                    Ok(SessionCommand::Category(CATEGORY_ALL.to_string()))
                } else {
                    Ok(SessionCommand::Category(value.to_string()))
                }
            }
            "show" | "ls" => Ok(SessionCommand::Show),
            "refresh" | "r" => Ok(SessionCommand::Refresh),
            "help" | "?" => Ok(SessionCommand::Help),
            "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
            other => Err(format!("unknown command `{other}` (try `help`)")),
        }
    }
}

/// Whether `category` is one of the values the selector offers.
pub fn is_offered_category(category: &str) -> bool {
    category == CATEGORY_ALL || Sex::from_code(category).is_some()
}

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Refresh,
    Quit,
}

/// Apply a command that needs no network access.
pub fn apply<W: Write>(state: &mut AppState, command: SessionCommand, out: &mut W) -> io::Result<Flow> {
    match command {
        SessionCommand::Search(query) => {
            state.set_query(query);
            render(state, out)?;
        }
        SessionCommand::Category(category) => {
            if !is_offered_category(&category) {
                writeln!(out, "note: `{category}` is not one of All, M, F, I; nothing will match")?;
            }
            state.set_category(category);
            render(state, out)?;
        }
        SessionCommand::Show => render(state, out)?,
        SessionCommand::Help => writeln!(out, "{HELP}")?,
        SessionCommand::Refresh => return Ok(Flow::Refresh),
        SessionCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Print the active filters and the filtered cards.
pub fn render<W: Write>(state: &mut AppState, out: &mut W) -> io::Result<()> {
    display::print_filters(out, state.criteria())?;
    let total = state.store().len();
    let visible = state.visible();
    display::print_cards(out, &visible, total)
}

/// Fetch the collection and install it. A failed fetch leaves the previous
/// collection in place and is reported to the user.
pub async fn refresh<W: Write>(
    state: &mut AppState,
    client: &LemurClient,
    policy: RetryPolicy,
    out: &mut W,
) -> io::Result<()> {
    match client.fetch_with_retry(policy).await {
        Ok(fetched) => {
            let malformed = state.replace_lemurs(fetched.lemurs);
            writeln!(
                out,
                "fetched {} lemurs at {}",
                state.store().len(),
                fetched.fetched_at.format("%H:%M:%S")
            )?;
            if malformed > 0 {
                writeln!(out, "{malformed} record(s) are missing a name or sex")?;
            }
            Ok(())
        }
        Err(err) => {
            error!(url = %client.lemurs_url(), error = %err, "fetch failed");
            writeln!(out, "could not fetch lemurs from {}: {err}", client.lemurs_url())?;
            writeln!(out, "type `refresh` to try again")?;
            Ok(())
        }
    }
}

/// Run the session until `quit` or end of input.
pub async fn run<R: BufRead, W: Write>(
    state: &mut AppState,
    client: &LemurClient,
    policy: RetryPolicy,
    input: R,
    mut out: W,
) -> anyhow::Result<()> {
    writeln!(out, "Zookeeper App: Lemur Manager")?;
    refresh(state, client, policy, &mut out).await?;
    render(state, &mut out)?;
    writeln!(out, "type `help` for commands")?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match SessionCommand::parse(&line) {
            Ok(command) => command,
            Err(msg) => {
                writeln!(out, "{msg}")?;
                continue;
            }
        };
        match apply(state, command, &mut out)? {
            Flow::Continue => {}
            Flow::Refresh => {
                refresh(state, client, policy, &mut out).await?;
                render(state, &mut out)?;
            }
            Flow::Quit => break,
        }
        out.flush()?;
    }
    Ok(())
}
