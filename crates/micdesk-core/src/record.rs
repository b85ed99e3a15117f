//! A single tracked microphone.

use std::fmt;

use crate::MicStatus;

/// One physical microphone: its identifying number, its type label and the
/// person currently holding it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MicrophoneRecord {
    number: u32,
    kind: String,
    owner: Option<String>,
}

impl MicrophoneRecord {
    /// Builds an unassigned record. Callers are expected to have validated
    /// the inputs; [`crate::Roster::create`] is the checked entry point.
    pub(crate) fn new(number: u32, kind: String) -> Self {
        Self {
            number,
            kind,
            owner: None,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The current owner, `None` when the microphone is available.
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn status(&self) -> MicStatus {
        match self.owner {
            Some(_) => MicStatus::Live,
            None => MicStatus::Available,
        }
    }

    pub fn is_live(&self) -> bool {
        self.status() == MicStatus::Live
    }

    /// Renders the one-line listing entry for this microphone.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    pub(crate) fn set_owner(&mut self, owner: String) {
        self.owner = Some(owner);
    }

    pub(crate) fn clear_owner(&mut self) {
        self.owner = None;
    }
}

impl fmt::Display for MicrophoneRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.owner {
            Some(owner) => write!(f, "{} ({}) live with {}", self.number, self.kind, owner),
            None => write!(f, "{} ({}) is available", self.number, self.kind),
        }
    }
}
