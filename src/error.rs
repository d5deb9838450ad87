use thiserror::Error;

/// Result type alias for encoder operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// An offset or length does not fit the element width of the chosen class.
    #[error("{field} value {value} does not fit in a {bits}-bit element")]
    CapacityExceeded {
        field: &'static str,
        value: usize,
        bits: u32,
    },

    #[error("unknown window class {0}: expected 8, 16 or 32")]
    UnknownClass(u32),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
