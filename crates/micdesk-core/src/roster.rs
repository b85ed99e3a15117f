//! The ordered, in-memory collection of microphones.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, ValidationError};
use crate::MicrophoneRecord;

/// How an operator-entered target is resolved to a microphone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lookup {
    /// 1-based position in creation order
    #[default]
    Position,
    /// First microphone in creation order whose number matches
    Number,
}

/// Behaviour switches for a [`Roster`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RosterOptions {
    pub lookup: Lookup,
    /// Reject creating a microphone whose number is already registered.
    pub unique_numbers: bool,
}

/// Microphones in the order they were registered.
///
/// Records are never removed. Only [`Roster::assign`] and
/// [`Roster::release`] mutate an existing record, and they only touch its
/// owner. Every failing call leaves the roster untouched.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    records: Vec<MicrophoneRecord>,
    options: RosterOptions,
}

impl Roster {
    /// Creates an empty roster with positional lookup.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RosterOptions) -> Self {
        Self {
            records: Vec::new(),
            options,
        }
    }

    /// Registers a new, unassigned microphone at the end of the roster.
    pub fn create(&mut self, number: &str, kind: &str) -> Result<&MicrophoneRecord> {
        let number = parse_number(number)?;
        let kind = kind.trim();
        if kind.is_empty() {
            return Err(ValidationError::EmptyKind);
        }
        if self.options.unique_numbers && self.records.iter().any(|r| r.number() == number) {
            return Err(ValidationError::DuplicateNumber(number));
        }

        self.records.push(MicrophoneRecord::new(number, kind.to_owned()));
        info!(number, kind, position = self.records.len(), "microphone created");
        Ok(&self.records[self.records.len() - 1])
    }

    /// Hands the targeted microphone to `owner`, replacing any current owner.
    pub fn assign(&mut self, target: &str, owner: &str) -> Result<&MicrophoneRecord> {
        let index = self.resolve(target)?;
        let owner = owner.trim();
        if owner.is_empty() {
            return Err(ValidationError::EmptyOwner);
        }

        let record = &mut self.records[index];
        if let Some(previous) = record.owner() {
            debug!(number = record.number(), previous, "reassigning live microphone");
        }
        record.set_owner(owner.to_owned());

        let record = &self.records[index];
        info!(number = record.number(), owner, live = self.live_count(), "microphone live");
        Ok(record)
    }

    /// Marks the targeted microphone as returned. Releasing an available
    /// microphone is a no-op.
    pub fn release(&mut self, target: &str) -> Result<&MicrophoneRecord> {
        let index = self.resolve(target)?;

        self.records[index].clear_owner();

        let record = &self.records[index];
        info!(number = record.number(), live = self.live_count(), "microphone returned");
        Ok(record)
    }

    /// Looks up the targeted microphone without changing it.
    pub fn get(&self, target: &str) -> Result<&MicrophoneRecord> {
        let index = self.resolve(target)?;
        Ok(&self.records[index])
    }

    /// One display line per microphone, in roster order.
    pub fn render(&self) -> Vec<String> {
        self.records.iter().map(MicrophoneRecord::describe).collect()
    }

    pub fn records(&self) -> &[MicrophoneRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of microphones currently handed out.
    pub fn live_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_live()).count()
    }

    /// Maps an operator-entered target to an index into `records`.
    fn resolve(&self, target: &str) -> Result<usize> {
        match self.options.lookup {
            Lookup::Position => {
                let len = self.records.len();
                match target.trim().parse::<usize>() {
                    Ok(position) if (1..=len).contains(&position) => Ok(position - 1),
                    _ => Err(ValidationError::InvalidPosition {
                        input: target.to_owned(),
                        len,
                    }),
                }
            }
            Lookup::Number => {
                let number = parse_number(target)?;
                self.records
                    .iter()
                    .position(|r| r.number() == number)
                    .ok_or(ValidationError::UnknownNumber(number))
            }
        }
    }
}

/// Parses a microphone number. Zero and negative values are rejected.
fn parse_number(input: &str) -> Result<u32> {
    match input.trim().parse::<u32>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(ValidationError::InvalidNumber(input.to_owned())),
    }
}
