//! Microphone assignment state types.

/// Whether a microphone is currently handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicStatus {
    /// On the shelf, no owner
    Available,
    /// Handed out to an owner
    Live,
}

impl MicStatus {
    /// Short label used in listings.
    pub fn label(&self) -> &'static str {
        match self {
            MicStatus::Available => "available",
            MicStatus::Live => "live",
        }
    }
}
