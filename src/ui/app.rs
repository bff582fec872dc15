// Console application
// Drives the calendar model from typed commands and redraws on change

use std::cell::Cell;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use chrono::Local;

use super::messages::{Message, HELP_TEXT};
use super::views::{render_day, render_month};
use crate::models::settings::BackupSettings;
use crate::models::time_interval::TimeInterval;
use crate::services::backup::BackupService;
use crate::services::calendar::Calendar;
use crate::services::event::persistence::{backup_dir_for, save_events};
use crate::services::notification::CalendarChange;

/// How much of the screen the last change invalidated
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Redraw {
    Nothing,
    Day,
    Month,
}

pub struct ConsoleApp {
    calendar: Calendar,
    events_path: PathBuf,
    backup: BackupSettings,
    redraw: Rc<Cell<Redraw>>,
}

impl ConsoleApp {
    pub fn new(mut calendar: Calendar, events_path: PathBuf, backup: BackupSettings) -> Self {
        let redraw = Rc::new(Cell::new(Redraw::Nothing));
        let pending = Rc::clone(&redraw);
        calendar.attach(move |change| {
            let needed = match change {
                CalendarChange::MonthChanged { .. } => Redraw::Month,
                CalendarChange::DayChanged { .. } | CalendarChange::EventCreated { .. } => {
                    Redraw::Day
                }
            };
            pending.set(pending.get().max(needed));
        });

        Self {
            calendar,
            events_path,
            backup,
            redraw,
        }
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Read commands until `quit` or end of input, then save the events file.
    ///
    /// The events file is saved even when the session stops on an error.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        let session = self.run_session(input, &mut output);
        if let Err(e) = &session {
            log::error!("Session ended early: {:#}", e);
        }

        self.save()?;
        session?;
        writeln!(output, "Saved {} event(s).", self.calendar.store().len())?;
        Ok(())
    }

    fn run_session<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> Result<()> {
        self.draw(output, Redraw::Month)?;
        write_prompt(output)?;

        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            match Message::parse(&line) {
                Ok(Some(Message::Quit)) => break,
                Ok(Some(message)) => self.handle(message, output)?,
                Ok(None) => {}
                Err(e) => writeln!(output, "{}", e)?,
            }

            let pending = self.redraw.replace(Redraw::Nothing);
            self.draw(output, pending)?;
            write_prompt(output)?;
        }
        Ok(())
    }

    fn handle<W: Write>(&mut self, message: Message, output: &mut W) -> Result<()> {
        let outcome = match message {
            Message::Next => self.calendar.next().map(|_| ()),
            Message::Prev => self.calendar.prev().map(|_| ()),
            Message::SelectDay(day) => self.calendar.set_current_day(day).map(|_| ()),
            Message::GoTo(date) => {
                self.calendar.set_current_date(date);
                Ok(())
            }
            Message::CreateEvent { name, start, end } => {
                return self.create_event(name, start, end, output);
            }
            Message::Show => {
                self.redraw.set(Redraw::Month);
                Ok(())
            }
            Message::ListBackups => return self.list_backups(output),
            Message::Help => {
                writeln!(output, "{}", HELP_TEXT)?;
                Ok(())
            }
            Message::Quit => Ok(()),
        };

        if let Err(e) = outcome {
            writeln!(output, "{}", e)?;
        }
        Ok(())
    }

    fn create_event<W: Write>(
        &mut self,
        name: String,
        start: chrono::NaiveTime,
        end: chrono::NaiveTime,
        output: &mut W,
    ) -> Result<()> {
        let interval = match TimeInterval::new(start, end) {
            Ok(interval) => interval,
            Err(e) => {
                writeln!(output, "{}", e)?;
                return Ok(());
            }
        };

        if self.calendar.check_conflict(&interval) {
            writeln!(
                output,
                "'{}' ({}) conflicts with an existing event on {}",
                name,
                interval,
                self.calendar.current_date()
            )?;
            return Ok(());
        }

        match self.calendar.create_event(name, start, end) {
            Ok(event) => writeln!(output, "Created '{}' ({})", event.name(), event.interval())?,
            Err(e) => writeln!(output, "{}", e)?,
        }
        Ok(())
    }

    fn list_backups<W: Write>(&self, output: &mut W) -> Result<()> {
        let backups = BackupService::list_backups(&backup_dir_for(&self.events_path))?;
        if backups.is_empty() {
            writeln!(output, "No backups yet.")?;
        }
        for backup in backups {
            writeln!(
                output,
                "{}  {}  {}",
                backup.created_at.format("%Y-%m-%d %H:%M:%S"),
                BackupService::format_size(backup.size_bytes),
                backup.filename
            )?;
        }
        Ok(())
    }

    fn draw<W: Write>(&mut self, output: &mut W, redraw: Redraw) -> Result<()> {
        let date = self.calendar.current_date();
        if redraw == Redraw::Month {
            let today = Local::now().date_naive();
            write!(output, "\n{}", render_month(date, today, self.calendar.store()))?;
            self.calendar.set_month_changed(false);
        }
        if redraw >= Redraw::Day {
            write!(output, "\n{}", render_day(&self.calendar, date))?;
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        save_events(&self.events_path, self.calendar.store(), &self.backup)
            .with_context(|| format!("Failed to save events to {}", self.events_path.display()))
    }
}

fn write_prompt<W: Write>(output: &mut W) -> Result<()> {
    write!(output, "> ")?;
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::cursor::DateCursor;
    use crate::services::event::EventStore;
    use chrono::NaiveDate;
    use std::fs;

    fn app_in(dir: &std::path::Path, date: NaiveDate) -> ConsoleApp {
        let calendar = Calendar::with_cursor(EventStore::new(), DateCursor::new(date));
        let backup = BackupSettings {
            enabled: false,
            keep: 1,
        };
        ConsoleApp::new(calendar, dir.join("events.txt"), backup)
    }

    fn run(app: &mut ConsoleApp, script: &str) -> String {
        let mut out = Vec::new();
        app.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_create_and_quit_saves() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

        let out = run(&mut app, "create 09:00 10:00 Team Meeting\nquit\n");

        assert!(out.contains("Created 'Team Meeting' (09:00 - 10:00)"));
        assert!(out.contains("Team Meeting: 09:00 - 10:00"));
        assert_eq!(
            fs::read_to_string(dir.path().join("events.txt")).unwrap(),
            "Team Meeting\n2024-03-15 09:00 10:00\n"
        );
    }

    #[test]
    fn test_conflicting_event_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

        let out = run(
            &mut app,
            "create 09:00 10:00 A\ncreate 09:30 09:45 B\ncreate 10:00 11:00 C\n",
        );

        assert!(out.contains("'B' (09:30 - 09:45) conflicts"));
        assert!(out.contains("Created 'C'"));
        assert_eq!(app.calendar().store().len(), 2);
    }

    #[test]
    fn test_navigation_redraws_month_on_crossing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path(), NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());

        let out = run(&mut app, "next\nnext\n");

        assert_eq!(out.matches("March 2024").count(), 1);
        assert_eq!(out.matches("April 2024").count(), 1);
        assert!(out.contains("Tuesday, April 2 2024"));
        assert!(!app.calendar().has_month_changed());
    }

    #[test]
    fn test_invalid_input_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path(), NaiveDate::from_ymd_opt(2024, 4, 10).unwrap());

        let out = run(&mut app, "day 31\ncreate 11:00 10:00 Backwards\nbogus\n");

        assert!(out.contains("Day 31 does not exist in 2024-04"));
        assert!(out.contains("must be after start time"));
        assert!(out.contains("Unknown command 'bogus'"));
        assert_eq!(app.calendar().current_date(), NaiveDate::from_ymd_opt(2024, 4, 10).unwrap());
    }

    #[test]
    fn test_read_error_still_saves_events() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

        let script: &[u8] = b"create 09:00 10:00 Team Meeting\n\xff\xfe\n";
        let result = app.run(script, Vec::new());

        assert!(result.is_err());
        assert_eq!(
            fs::read_to_string(dir.path().join("events.txt")).unwrap(),
            "Team Meeting\n2024-03-15 09:00 10:00\n"
        );
    }
}
