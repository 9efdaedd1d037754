//! Line-oriented fallback used when stdin or stdout is not a terminal.
//!
//! Each input line is an expression to evaluate, or one of:
//! `:history`, `:search <query>`, `:clear-history`, `:quit`.

use crate::controller::{ClearHistoryOutcome, Controller, EvaluationOutcome, ERROR_SENTINEL};
use crate::view::history_listing;
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
enum LineCommand<'a> {
    Evaluate(&'a str),
    History,
    Search(&'a str),
    ClearHistory,
    Quit,
    Unknown(&'a str),
}

fn parse_line(line: &str) -> Option<LineCommand<'_>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let Some(command) = line.strip_prefix(':') else {
        return Some(LineCommand::Evaluate(line));
    };
    let (name, rest) = command
        .split_once(char::is_whitespace)
        .map(|(name, rest)| (name, rest.trim()))
        .unwrap_or((command, ""));
    Some(match name {
        "history" => LineCommand::History,
        "search" => LineCommand::Search(rest),
        "clear-history" => LineCommand::ClearHistory,
        "quit" | "q" => LineCommand::Quit,
        _ => LineCommand::Unknown(name),
    })
}

/// Process `input` until EOF or `:quit`.
///
/// `assume_yes` answers the clear-history confirmation; without it the clear
/// is declined since there is no terminal to ask.
pub async fn run<R: BufRead, W: Write>(
    controller: &mut Controller,
    input: R,
    out: &mut W,
    assume_yes: bool,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let Some(command) = parse_line(&line) else {
            continue;
        };
        match command {
            LineCommand::Quit => break,
            LineCommand::Evaluate(expression) => {
                // Each line is a fresh expression; also resets a sticky error marker.
                if let Err(err) = controller
                    .clear()
                    .and_then(|()| controller.append(expression))
                {
                    writeln!(out, "error: {err}")?;
                    out.flush()?;
                    continue;
                }
                match controller.evaluate().await {
                    Ok(EvaluationOutcome::Evaluated { result }) => writeln!(out, "{result}")?,
                    Ok(_) => writeln!(out, "{ERROR_SENTINEL}")?,
                    Err(err) => writeln!(out, "error: {err}")?,
                }
            }
            LineCommand::History => {
                if !controller.refresh_history().await {
                    writeln!(out, "error: could not load history")?;
                    continue;
                }
                write_listing(controller, out)?;
            }
            LineCommand::Search(query) => {
                let loaded = if query.is_empty() {
                    controller.refresh_history().await
                } else {
                    controller.search_history(query).await
                };
                if !loaded {
                    writeln!(out, "error: could not search history")?;
                    continue;
                }
                write_listing(controller, out)?;
            }
            LineCommand::ClearHistory => {
                let answer = |_: &str| assume_yes;
                let message = match controller.clear_history(&answer).await {
                    ClearHistoryOutcome::Declined => "not cleared (pass --yes to confirm)",
                    ClearHistoryOutcome::Cleared => "history cleared",
                    ClearHistoryOutcome::Failed => "error: clearing history failed",
                };
                writeln!(out, "{message}")?;
            }
            LineCommand::Unknown(name) => writeln!(out, "unknown command: :{name}")?,
        }
        out.flush()?;
    }
    Ok(())
}

fn write_listing<W: Write>(controller: &Controller, out: &mut W) -> io::Result<()> {
    for row in history_listing(controller.state().history()) {
        writeln!(out, "{row}")?;
    }
    Ok(())
}
