//! Author: [Seclususs](https://github.com/seclususs)

use std::{fmt, io};

#[derive(Debug)]
pub enum UtilError {
    IoError(io::Error),
    CommandFailed { command: String, status: i32 },
    NotFound(String),
    InvalidTarget(i32),
    InvalidInput(String),
    ParseError(String),
}

impl fmt::Display for UtilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtilError::IoError(e) => write!(f, "I/O Error: {e}"),
            UtilError::CommandFailed { command, status } => {
                write!(f, "Command Failed: '{command}' exited with status {status}")
            }
            UtilError::NotFound(s) => write!(f, "Not Found: {s}"),
            UtilError::InvalidTarget(id) => write!(f, "Invalid Target: id {id}"),
            UtilError::InvalidInput(s) => write!(f, "Invalid Input: {s}"),
            UtilError::ParseError(s) => write!(f, "Parse Error: {s}"),
        }
    }
}

impl std::error::Error for UtilError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UtilError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for UtilError {
    fn from(err: io::Error) -> Self {
        UtilError::IoError(err)
    }
}

impl From<rustix::io::Errno> for UtilError {
    fn from(err: rustix::io::Errno) -> Self {
        UtilError::IoError(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failing_command() {
        let err = UtilError::CommandFailed {
            command: "pm path foo".into(),
            status: 1,
        };
        assert_eq!(
            err.to_string(),
            "Command Failed: 'pm path foo' exited with status 1"
        );
    }

    #[test]
    fn errno_converts_to_io_error() {
        let err: UtilError = rustix::io::Errno::SRCH.into();
        match err {
            UtilError::IoError(e) => assert_eq!(e.raw_os_error(), Some(libc::ESRCH)),
            other => panic!("unexpected variant: {other}"),
        }
    }
}
