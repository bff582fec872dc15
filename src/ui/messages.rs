// UI Messages
// Commands typed at the console prompt

use chrono::{NaiveDate, NaiveTime};

use crate::models::time_interval::parse_time;

pub const HELP_TEXT: &str = "\
Commands:
  next | >                      select the following day
  prev | <                      select the previous day
  day <N>                       select day N of the shown month
  goto <YYYY-MM-DD>             select any date
  create <start> <end> <name>   add an event on the selected day (times as HH:MM)
  show                          redraw the month and the selected day
  backups                       list backups of the events file
  help                          show this text
  quit                          save and exit";

/// Messages for the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Step forward one day
    Next,
    /// Step back one day
    Prev,
    /// Select a day of the current month
    SelectDay(u32),
    /// Jump to an arbitrary date
    GoTo(NaiveDate),
    /// Create an event on the selected day
    CreateEvent {
        name: String,
        start: NaiveTime,
        end: NaiveTime,
    },
    /// Redraw everything
    Show,
    /// List backups
    ListBackups,
    Help,
    /// Save and exit
    Quit,
}

impl Message {
    /// Parse one input line; `Ok(None)` for a blank line
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        let message = match command.to_lowercase().as_str() {
            "" => return Ok(None),
            "next" | ">" => Message::Next,
            "prev" | "<" => Message::Prev,
            "day" => {
                let day = rest
                    .parse::<u32>()
                    .map_err(|_| format!("'{}' is not a day number", rest))?;
                Message::SelectDay(day)
            }
            "goto" => {
                let date = NaiveDate::parse_from_str(rest, "%Y-%m-%d")
                    .map_err(|_| format!("'{}' is not a date (YYYY-MM-DD)", rest))?;
                Message::GoTo(date)
            }
            "create" => parse_create(rest)?,
            "show" => Message::Show,
            "backups" => Message::ListBackups,
            "help" | "?" => Message::Help,
            "quit" | "exit" => Message::Quit,
            other => return Err(format!("Unknown command '{}'. Type 'help'.", other)),
        };

        Ok(Some(message))
    }
}

fn parse_create(rest: &str) -> Result<Message, String> {
    let usage = || "Usage: create <start> <end> <name>".to_string();
    let (start, rest) = rest.split_once(char::is_whitespace).ok_or_else(usage)?;
    let (end, name) = rest
        .trim_start()
        .split_once(char::is_whitespace)
        .ok_or_else(usage)?;

    let start = parse_time(start).ok_or_else(|| format!("'{}' is not a time (HH:MM)", start))?;
    let end = parse_time(end).ok_or_else(|| format!("'{}' is not a time (HH:MM)", end))?;

    // Empty names are a form error here; the model enforces its own rules
    let name = name.trim();
    if name.is_empty() {
        return Err("Event name cannot be empty".to_string());
    }

    Ok(Message::CreateEvent {
        name: name.to_string(),
        start,
        end,
    })
}
