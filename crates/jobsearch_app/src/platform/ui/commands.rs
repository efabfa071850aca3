use jobsearch_core::{RemoteFilter, TimeWindow};

use crate::cli::{parse_time_window, LIMIT_INPUT_MAX, LIMIT_INPUT_MIN};

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetApiKey(String),
    SetApiHost(String),
    Edit(FormEdit),
    Search,
    Next,
    Previous,
    Show,
    Help,
    Quit,
}

/// Change to the draft search form; applied on the next `search`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEdit {
    Title(String),
    Location(String),
    Description(String),
    Source(String),
    Remote(RemoteFilter),
    IncludeAi(bool),
    TimeWindow(TimeWindow),
    /// `None` clears the field.
    Limit(Option<i64>),
}

pub const HELP: &str = "\
Commands:
  key <value>          set X-RapidAPI-Key (empty clears it)
  host <value>         set X-RapidAPI-Host (selects the provider)
  title <text>         title filter
  location <text>      location filter, e.g. United States OR United Kingdom
  description <text>   description filter
  source <text>        sources, e.g. workday,greenhouse
  remote any|yes|no    remote filter
  ai on|off            include AI insights
  window 7d|24h|hourly|backfill
  limit [n]            results per page (10-500); no value clears it
  search               run the search with the current form
  next / prev          page through results
  show                 print the current results again
  help                 this text
  quit                 exit";

/// Parses a command line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "key" => Command::SetApiKey(rest.to_string()),
        "host" => Command::SetApiHost(rest.to_string()),
        "title" => Command::Edit(FormEdit::Title(rest.to_string())),
        "location" => Command::Edit(FormEdit::Location(rest.to_string())),
        "description" => Command::Edit(FormEdit::Description(rest.to_string())),
        "source" => Command::Edit(FormEdit::Source(rest.to_string())),
        "remote" => Command::Edit(FormEdit::Remote(parse_remote(rest)?)),
        "ai" => Command::Edit(FormEdit::IncludeAi(parse_switch(rest)?)),
        "window" => Command::Edit(FormEdit::TimeWindow(parse_time_window(rest)?)),
        "limit" => Command::Edit(FormEdit::Limit(parse_limit(rest)?)),
        "search" | "s" => Command::Search,
        "next" | "n" => Command::Next,
        "prev" | "previous" | "p" => Command::Previous,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(command))
}

fn parse_remote(raw: &str) -> Result<RemoteFilter, String> {
    match raw.to_ascii_lowercase().as_str() {
        "" | "any" | "all" => Ok(RemoteFilter::Any),
        "yes" | "true" | "remote" => Ok(RemoteFilter::RemoteOnly),
        "no" | "false" | "onsite" | "on-site" => Ok(RemoteFilter::OnSiteOnly),
        other => Err(format!("remote expects any, yes or no, got '{other}'")),
    }
}

fn parse_switch(raw: &str) -> Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" => Ok(true),
        "off" | "no" | "false" => Ok(false),
        other => Err(format!("expected on or off, got '{other}'")),
    }
}

fn parse_limit(raw: &str) -> Result<Option<i64>, String> {
    if raw.is_empty() {
        return Ok(None);
    }
    let limit: i64 = raw
        .parse()
        .map_err(|_| format!("limit expects a number, got '{raw}'"))?;
    if !(LIMIT_INPUT_MIN..=LIMIT_INPUT_MAX).contains(&limit) {
        return Err(format!(
            "limit must be between {LIMIT_INPUT_MIN} and {LIMIT_INPUT_MAX}"
        ));
    }
    Ok(Some(limit))
}
