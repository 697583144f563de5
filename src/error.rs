use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeterError {
    /// A counter or task was configured with a format nobody registered
    #[error("Unknown stats format: {0}")]
    UnknownFormat(String),

    /// A device-backed counter was given something that is not a usable device
    #[error("Invalid device: {0}")]
    InvalidDevice(String),

    /// Output was attempted on a sink that has already been closed
    #[error("Output sink closed: {0}")]
    SinkClosed(String),

    /// The background stats thread panicked before returning
    #[error("Stats task panicked")]
    TaskPanicked,

    /// Error when a mutex/rwlock is poisoned
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),

    /// I/O errors from sink writes and config files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML configuration
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Options that could not be written back as TOML
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// A convenient Result type alias using `MeterError`.
pub type Result<T> = std::result::Result<T, MeterError>;

impl MeterError {
    /// Creates a new lock poisoned error with a descriptive message.
    pub fn lock_poisoned(resource: &str) -> Self {
        Self::LockPoisoned(format!("Failed to acquire lock on {}", resource))
    }

    /// Creates a new closed-sink error naming the sink.
    pub fn sink_closed(sink: &str) -> Self {
        Self::SinkClosed(format!("{} is no longer writable", sink))
    }

    /// Returns true for errors that abort construction rather than a running task.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::UnknownFormat(_) | Self::InvalidDevice(_))
    }
}
