//! Error types for roomcal.

use thiserror::Error;

/// Errors that can occur while fetching, filtering or formatting a schedule.
#[derive(Error, Debug)]
pub enum RoomCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed downloading schedule: {0}")]
    Fetch(String),

    #[error("Failed downloading schedule, status code: {0}")]
    UpstreamStatus(u16),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("XML generation error: {0}")]
    XmlEncode(String),
}

impl RoomCalError {
    /// True for failures that happened while talking to the upstream feed.
    pub fn is_fetch(&self) -> bool {
        matches!(self, RoomCalError::Fetch(_) | RoomCalError::UpstreamStatus(_))
    }
}

/// Result type alias for roomcal operations.
pub type RoomCalResult<T> = Result<T, RoomCalError>;
