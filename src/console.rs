//! Line-oriented operator console.
//!
//! The console owns the roster. Each input line is parsed into a
//! [`Command`], run to completion against the roster, and answered on the
//! output sink before the next line is read.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use micdesk_core::{Config, MicrophoneRecord, Roster, ValidationError};
use thiserror::Error;
use tracing::{debug, info};

use crate::command::Command;

/// Why a command was not carried out.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Usage(String),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// What the run loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Presentation options for a [`Console`].
#[derive(Debug, Clone)]
pub struct ConsoleOptions {
    pub show_roster_after_change: bool,
    /// Printed before each line is read. `None` for scripted input.
    pub prompt: Option<String>,
}

impl ConsoleOptions {
    pub fn from_config(config: &Config, interactive: bool) -> Self {
        Self {
            show_roster_after_change: config.show_roster_after_change,
            prompt: interactive.then(|| config.prompt.clone()),
        }
    }
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            show_roster_after_change: true,
            prompt: None,
        }
    }
}

pub struct Console<W: Write> {
    roster: Roster,
    options: ConsoleOptions,
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(roster: Roster, options: ConsoleOptions, out: W) -> Self {
        Self {
            roster,
            options,
            out,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Consumes the console, handing back the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Reads and handles lines until end of input or `quit`.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        let mut lines = input.lines();
        loop {
            if let Some(prompt) = &self.options.prompt {
                write!(self.out, "{}", prompt)?;
                self.out.flush()?;
            }

            let Some(line) = lines.next() else {
                break;
            };
            let line = line.context("Failed to read command input")?;

            if self.handle_line(&line)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Handles one input line. Rejected commands are reported on the output
    /// and never end the session; only a failing output sink is an error.
    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let command = match Command::parse_line(line) {
            Ok(command) => command,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                write!(self.out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
            Err(e) => {
                self.report(line, &CommandError::Usage(summary(&e.render().to_string())))?;
                return Ok(Flow::Continue);
            }
        };
        debug!(?command, "parsed command");

        let mutation = command.is_mutation();
        match self.execute(command) {
            Ok(Flow::Quit) => return Ok(Flow::Quit),
            Ok(Flow::Continue) => {
                if mutation && self.options.show_roster_after_change {
                    self.print_roster()?;
                }
            }
            Err(CommandError::Output(e)) => {
                return Err(e).context("Failed to write console output");
            }
            Err(e) => self.report(line, &e)?,
        }
        Ok(Flow::Continue)
    }

    fn execute(&mut self, command: Command) -> std::result::Result<Flow, CommandError> {
        match command {
            Command::Create { number, kind } => {
                self.roster.create(&number, &kind.join(" "))?;
            }
            Command::Live { target, owner } => {
                self.roster.assign(&target, &owner.join(" "))?;
            }
            Command::Return { target } => {
                self.roster.release(&target)?;
            }
            Command::List => self.print_roster()?,
            Command::Show { target } => {
                let record = self.roster.get(&target)?.clone();
                self.print_details(&record)?;
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Writes the numbered roster listing.
    pub fn print_roster(&mut self) -> std::io::Result<()> {
        if self.roster.is_empty() {
            return writeln!(self.out, "No microphones registered");
        }
        for (position, line) in self.roster.render().iter().enumerate() {
            writeln!(self.out, "{:>3}. {}", position + 1, line)?;
        }
        Ok(())
    }

    fn print_details(&mut self, record: &MicrophoneRecord) -> std::io::Result<()> {
        writeln!(self.out, "number: {}", record.number())?;
        writeln!(self.out, "type:   {}", record.kind())?;
        writeln!(self.out, "status: {}", record.status().label())?;
        writeln!(self.out, "owner:  {}", record.owner().unwrap_or("-"))
    }

    /// The operator already sees the error on the output, so the log entry
    /// stays at `info`. The notification layer picks it up by its `reason`.
    fn report(&mut self, command: &str, error: &CommandError) -> std::io::Result<()> {
        info!(command, reason = %error, "rejected command");
        writeln!(self.out, "error: {}", error)
    }
}

/// Clap renders the problem, a blank line, then usage. Only the problem is
/// shown at the prompt, folded onto one line.
fn summary(rendered: &str) -> String {
    rendered
        .lines()
        .take_while(|line| !line.trim().is_empty())
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
        .trim_start_matches("error: ")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console() -> Console<Vec<u8>> {
        Console::new(Roster::new(), ConsoleOptions::default(), Vec::new())
    }

    fn take_output(console: &mut Console<Vec<u8>>) -> String {
        String::from_utf8(std::mem::take(&mut console.out)).unwrap()
    }

    #[test]
    fn test_create_prints_roster() {
        let mut console = console();
        assert_eq!(console.handle_line("create 1 wireless").unwrap(), Flow::Continue);
        assert_eq!(take_output(&mut console), "  1. 1 (wireless) is available\n");
    }

    #[test]
    fn test_multi_word_owner() {
        let mut console = console();
        console.handle_line("create 1 wireless").unwrap();
        console.handle_line("live 1 Alice  Smith").unwrap();
        assert_eq!(console.roster().records()[0].owner(), Some("Alice Smith"));
    }

    #[test]
    fn test_validation_error_is_reported() {
        let mut console = console();
        console.handle_line("create one wireless").unwrap();
        assert_eq!(
            take_output(&mut console),
            "error: Invalid microphone number: \"one\"\n"
        );
        assert!(console.roster().is_empty());

        console.handle_line("create 1").unwrap();
        assert_eq!(
            take_output(&mut console),
            "error: Microphone type cannot be empty\n"
        );
    }

    #[test]
    fn test_rejection_is_logged_with_reason() {
        use std::sync::{Arc, Mutex};

        use tracing_subscriber::layer::SubscriberExt;

        use crate::notify::{Notice, NotificationLayer};

        let notices = Arc::new(Mutex::new(Vec::new()));
        let sink = notices.clone();
        let subscriber = tracing_subscriber::registry().with(NotificationLayer::with_sink(
            move |notice| sink.lock().unwrap().push(notice),
        ));

        let mut console = console();
        tracing::subscriber::with_default(subscriber, || {
            console.handle_line("create 1 wireless").unwrap();
            console.handle_line("live 2 Alice").unwrap();
        });

        let notices = notices.lock().unwrap();
        assert_eq!(
            *notices,
            vec![Notice {
                summary: "command rejected".to_string(),
                body: "live 2 Alice: Invalid microphone position: \"2\" (roster has 1)".to_string(),
            }]
        );
    }

    #[test]
    fn test_usage_error_is_reported() {
        let mut console = console();
        assert_eq!(console.handle_line("frobnicate").unwrap(), Flow::Continue);
        let output = take_output(&mut console);
        assert!(output.starts_with("error: "), "got {output:?}");
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_missing_argument_names_it() {
        let mut console = console();
        console.handle_line("return").unwrap();
        let output = take_output(&mut console);
        assert!(output.contains("<TARGET>"), "got {output:?}");
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_help_is_shown() {
        let mut console = console();
        console.handle_line("help").unwrap();
        let output = take_output(&mut console);
        assert!(output.contains("create"), "got {output:?}");
        assert!(output.contains("return"), "got {output:?}");
        assert!(!output.contains("clap"), "got {output:?}");
        assert!(!output.contains("Multicall"), "got {output:?}");
    }

    #[test]
    fn test_show_details() {
        let mut console = console();
        console.handle_line("create 5 lavalier").unwrap();
        console.handle_line("live 1 Bob").unwrap();
        take_output(&mut console);

        console.handle_line("show 1").unwrap();
        assert_eq!(
            take_output(&mut console),
            "number: 5\ntype:   lavalier\nstatus: live\nowner:  Bob\n"
        );
    }

    #[test]
    fn test_quiet_mutations() {
        let options = ConsoleOptions {
            show_roster_after_change: false,
            prompt: None,
        };
        let mut console = Console::new(Roster::new(), options, Vec::new());
        console.handle_line("create 1 wireless").unwrap();
        assert_eq!(take_output(&mut console), "");

        console.handle_line("list").unwrap();
        assert_eq!(take_output(&mut console), "  1. 1 (wireless) is available\n");
    }

    #[test]
    fn test_empty_listing_and_comments() {
        let mut console = console();
        console.handle_line("   ").unwrap();
        console.handle_line("# front of house").unwrap();
        assert_eq!(take_output(&mut console), "");

        console.handle_line("ls").unwrap();
        assert_eq!(take_output(&mut console), "No microphones registered\n");
    }

    #[test]
    fn test_run_stops_at_quit() {
        let mut console = console();
        let input = "create 1 wireless\nquit\ncreate 2 lavalier\n";
        console.run(input.as_bytes()).unwrap();
        assert_eq!(console.roster().len(), 1);
    }

    #[test]
    fn test_run_prints_prompt() {
        let options = ConsoleOptions {
            show_roster_after_change: false,
            prompt: Some("mic> ".to_string()),
        };
        let mut console = Console::new(Roster::new(), options, Vec::new());
        console.run("list\n".as_bytes()).unwrap();
        assert_eq!(
            String::from_utf8(console.into_output()).unwrap(),
            "mic> No microphones registered\nmic> "
        );
    }
}
