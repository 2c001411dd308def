//! Error types for the TV guide catalog

/// Result type alias for TV guide operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating or querying the catalog
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Channel carries no programs at all
    #[error("Channel \"{0}\" has an empty program list")]
    EmptySchedule(String),

    /// First program does not start at midnight
    #[error("Channel \"{0}\": first program starts at {1}, expected 00:00:00")]
    ScheduleNotAnchored(String, String),

    /// Last program does not close the day at midnight
    #[error("Channel \"{0}\": last program ends at {1}, expected 00:00:00")]
    ScheduleNotClosed(String, String),

    /// Adjacent programs do not line up
    #[error("Channel \"{0}\": program ending at {1} is followed by one starting at {2}")]
    ScheduleNotContiguous(String, String, String),

    /// Program list is not sorted by start time
    #[error("Channel \"{0}\": program starting at {1} precedes one starting at {2}")]
    ScheduleNotOrdered(String, String, String),

    /// Malformed "HH:MM:SS" value
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    /// No program covers the queried time of day (violated invariant)
    #[error("Schedule gap: no program covers {0}")]
    ScheduleGap(String),

    /// Unknown channel identifier
    #[error("Unknown channel: {0}")]
    ChannelNotFound(String),

    /// Group with no member channels
    #[error("Group has no channels: {0}")]
    GroupNotFound(String),
}

impl Error {
    /// True for the lookup failures that map to an HTTP 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ChannelNotFound(_) | Self::GroupNotFound(_))
    }
}
