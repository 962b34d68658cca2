//! Error type for hardware link round trips.

/// Errors raised by a hardware link implementation.
///
/// Any of these means the round trip to the I/O controller failed; the
/// drive and course cores propagate them unhandled, and the mission
/// layer is expected to stop the motors and abort.
///
/// # Example
///
/// ```
/// use drive_hal::LinkError;
///
/// let error = LinkError::request_failed("line sensor port");
/// assert!(error.to_string().contains("line sensor port"));
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LinkError {
    /// The link to the I/O controller could not be established.
    #[error("failed to connect to the robot link: {0}")]
    ConnectFailed(String),

    /// A sensor or register read did not complete.
    #[error("link request failed: {0}")]
    RequestFailed(String),

    /// A motor or actuator command did not complete.
    #[error("link command failed: {0}")]
    CommandFailed(String),
}

impl LinkError {
    /// Creates a connect failure with the given detail.
    #[must_use]
    pub fn connect_failed(detail: impl Into<String>) -> Self {
        Self::ConnectFailed(detail.into())
    }

    /// Creates a request failure with the given detail.
    #[must_use]
    pub fn request_failed(detail: impl Into<String>) -> Self {
        Self::RequestFailed(detail.into())
    }

    /// Creates a command failure with the given detail.
    #[must_use]
    pub fn command_failed(detail: impl Into<String>) -> Self {
        Self::CommandFailed(detail.into())
    }

    /// Returns `true` if the link never came up at all.
    #[must_use]
    pub const fn is_connect_failed(&self) -> bool {
        matches!(self, Self::ConnectFailed(_))
    }
}
