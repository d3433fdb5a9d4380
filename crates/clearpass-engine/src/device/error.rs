use std::fmt;

/// Fatal startup failure. None of these are retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// The host cannot provide a graphics surface at all.
    Unsupported(String),
    /// No adapter satisfies the request.
    NoAdapter(String),
    /// The adapter refused to create a device.
    DeviceRequest(String),
    /// The surface has no usable format, or its current texture is unavailable.
    Surface(String),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::Unsupported(msg) => write!(f, "graphics not supported on this host: {msg}"),
            SetupError::NoAdapter(msg) => write!(f, "no suitable GPU adapter found: {msg}"),
            SetupError::DeviceRequest(msg) => write!(f, "failed to create GPU device: {msg}"),
            SetupError::Surface(msg) => write!(f, "surface error: {msg}"),
        }
    }
}

impl std::error::Error for SetupError {}
