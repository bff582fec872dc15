use std::io::{BufRead, Write};

use chrono::NaiveDate;

use super::EventStore;
use crate::error::{CalendarError, CalendarResult};
use crate::models::event::Event;
use crate::models::time_interval::{format_time, parse_time};

const DATE_FORMAT: &str = "%Y-%m-%d";

impl EventStore {
    /// Read the two-lines-per-event text format.
    ///
    /// Blank lines are ignored. Any malformed record fails the whole load;
    /// partial results are never returned.
    pub fn load<R: BufRead>(reader: R) -> CalendarResult<Self> {
        let mut lines = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            lines.push((idx + 1, line));
        }

        let mut store = Self::new();
        let mut records = lines.into_iter();
        while let Some((name_line, name)) = records.next() {
            let Some((info_line, info)) = records.next() else {
                return Err(corrupt(name_line, "event name without a date/time line"));
            };
            store.insert(parse_record(&name, name_line, &info, info_line)?);
        }

        log::debug!("Parsed {} event(s)", store.len());
        Ok(store)
    }

    /// Write every event, dates ascending and insertion order within a date.
    pub fn save<W: Write>(&self, mut writer: W) -> CalendarResult<()> {
        for event in self.iter() {
            writeln!(writer, "{}", event.name())?;
            writeln!(
                writer,
                "{} {} {}",
                event.date().format(DATE_FORMAT),
                format_time(event.start()),
                format_time(event.end())
            )?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn parse_record(
    name: &str,
    name_line: usize,
    info: &str,
    info_line: usize,
) -> CalendarResult<Event> {
    let fields: Vec<&str> = info.split_whitespace().collect();
    let [date, start, end] = fields[..] else {
        return Err(corrupt(
            info_line,
            format!("expected '<date> <start> <end>', found {} field(s)", fields.len()),
        ));
    };

    let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|e| corrupt(info_line, format!("invalid date '{}': {}", date, e)))?;
    let start =
        parse_time(start).ok_or_else(|| corrupt(info_line, format!("invalid start time '{}'", start)))?;
    let end =
        parse_time(end).ok_or_else(|| corrupt(info_line, format!("invalid end time '{}'", end)))?;

    Event::new(name, date, start, end).map_err(|e| {
        let line = match e {
            CalendarError::InvalidEvent(_) => name_line,
            _ => info_line,
        };
        corrupt(line, e.to_string())
    })
}

fn corrupt(line: usize, reason: impl Into<String>) -> CalendarError {
    CalendarError::CorruptStore {
        line,
        reason: reason.into(),
    }
}
