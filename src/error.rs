use std::{io, path::PathBuf};

use nix::sys::signal::Signal;
use thiserror::Error;

const EXIT_FAILURE: i32 = 1;
const EXIT_IOERR: i32 = 74;
const EXIT_CONFIG: i32 = 78;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot locate the configuration directory: HOME is not set")]
    NoHome,

    #[error("failed to create configuration directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    WriteConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: expected `key value`, found {content:?}", path.display())]
    MalformedLine {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("{}:{line}: `{key}` must be a non-negative whole number, found {value:?}", path.display())]
    InvalidValue {
        path: PathBuf,
        line: usize,
        key: String,
        value: String,
    },

    #[error("{}: `{key}` is {value}, expected 0..={max}", path.display())]
    OutOfRange {
        path: PathBuf,
        key: &'static str,
        value: u16,
        max: u16,
    },

    #[error("{}: {source}", path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("interrupted by {0}")]
    Interrupted(Signal),
}

impl Error {
    /// Process exit status reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::NoHome
            | Error::CreateDir { .. }
            | Error::ReadConfig { .. }
            | Error::WriteConfig { .. } => EXIT_IOERR,
            Error::MalformedLine { .. }
            | Error::InvalidValue { .. }
            | Error::OutOfRange { .. }
            | Error::Schema { .. } => EXIT_CONFIG,
            Error::Terminal(_) => EXIT_FAILURE,
            Error::Interrupted(signal) => 128 + *signal as i32,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_have_distinct_codes() {
        let io = Error::ReadConfig {
            path: PathBuf::from("timer.conf"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let parse = Error::MalformedLine {
            path: PathBuf::from("timer.conf"),
            line: 3,
            content: "bogus".to_string(),
        };
        assert_eq!(io.exit_code(), 74);
        assert_eq!(parse.exit_code(), 78);
        assert_ne!(io.exit_code(), 0);
    }

    #[test]
    fn signals_map_to_shell_convention() {
        assert_eq!(Error::Interrupted(Signal::SIGINT).exit_code(), 130);
        assert_eq!(Error::Interrupted(Signal::SIGTERM).exit_code(), 143);
    }

    #[test]
    fn messages_name_the_file_and_line() {
        let err = Error::InvalidValue {
            path: PathBuf::from("/tmp/timer.conf"),
            line: 7,
            key: "bar_foreground_g".to_string(),
            value: "green".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "/tmp/timer.conf:7: `bar_foreground_g` must be a non-negative whole number, found \"green\""
        );
    }
}
