use std::io;

/// Errors raised by the application loop and its drivers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("terminal I/O failed")]
    Io(#[from] io::Error),

    #[error("message channel disconnected")]
    Disconnected,
}

pub type Result<T> = std::result::Result<T, Error>;
