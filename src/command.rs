//! Operator commands, one per input line.

use clap::{Parser, Subcommand};

// Multicall: the first word of a line is the subcommand name.
#[derive(Debug, Parser)]
#[command(multicall = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

/// A single console command.
///
/// Numeric arguments are kept as raw text so the roster is the one place
/// that validates them. Free-text arguments take the rest of the line.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Register a microphone
    #[command(visible_alias = "add")]
    Create {
        /// Number printed on the microphone
        #[arg(allow_hyphen_values = true)]
        number: String,
        /// Type of microphone, e.g. wireless or lavalier
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        kind: Vec<String>,
    },

    /// Hand a microphone to someone
    #[command(visible_alias = "assign")]
    Live {
        /// Which microphone
        #[arg(allow_hyphen_values = true)]
        target: String,
        /// Who has it now
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        owner: Vec<String>,
    },

    /// Mark a microphone as returned
    #[command(visible_aliases = ["release", "returned"])]
    Return {
        /// Which microphone
        #[arg(allow_hyphen_values = true)]
        target: String,
    },

    /// Show every microphone
    #[command(visible_alias = "ls")]
    List,

    /// Show the details of one microphone
    #[command(visible_alias = "select")]
    Show {
        /// Which microphone
        #[arg(allow_hyphen_values = true)]
        target: String,
    },

    /// Leave the console
    #[command(visible_alias = "exit")]
    Quit,
}

impl Command {
    /// Parses one input line.
    ///
    /// `help` and malformed lines come back as a [`clap::Error`] whose
    /// rendering is meant to be shown to the operator as-is.
    pub fn parse_line(line: &str) -> Result<Self, clap::Error> {
        Line::try_parse_from(line.split_whitespace()).map(|line| line.command)
    }

    /// Whether running this command can change the roster.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Command::Create { .. } | Command::Live { .. } | Command::Return { .. }
        )
    }
}
