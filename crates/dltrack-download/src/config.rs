//! Public configuration for the transfer tracker and its HTTP transport.

use std::time::Duration;

/// Configuration for the transfer subsystem.
///
/// Use the builder pattern methods to customize the configuration.
///
/// # Example
///
/// ```
/// use dltrack_download::TransferConfig;
/// use std::time::Duration;
///
/// let config = TransferConfig::new()
///     .with_connect_timeout(Duration::from_secs(10))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct TransferConfig {
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Timeout for establishing a connection
    pub(crate) connect_timeout: Duration,
    /// Overall request timeout (none by default: large files may take hours)
    pub(crate) request_timeout: Option<Duration>,
    /// Minimum interval between progress events
    pub(crate) progress_interval: Duration,
    /// Treat a missing or malformed content-length as a failure
    pub(crate) require_content_length: bool,
    /// Create missing parent directories of the destination
    pub(crate) create_parent_dirs: bool,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("dltrack/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout: Duration::from_secs(30),
            request_timeout: None,
            progress_interval: Duration::from_millis(100),
            require_content_length: true,
            create_parent_dirs: false,
        }
    }
}

impl TransferConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the connect timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set an overall request timeout. `None` disables it.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the minimum interval between progress events.
    ///
    /// Defaults to 100ms.
    #[must_use]
    pub const fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Choose whether a missing or invalid content-length fails the download.
    ///
    /// Defaults to `true`.
    #[must_use]
    pub const fn with_require_content_length(mut self, require: bool) -> Self {
        self.require_content_length = require;
        self
    }

    /// Choose whether missing parent directories are created.
    ///
    /// Defaults to `false`.
    #[must_use]
    pub const fn with_create_parent_dirs(mut self, create: bool) -> Self {
        self.create_parent_dirs = create;
        self
    }

    /// Whether a missing or invalid content-length fails the download.
    pub const fn require_content_length(&self) -> bool {
        self.require_content_length
    }
}
