//! The errors that end a run

use std::io;
use std::path::PathBuf;

/// The exit code for a run that failed after its arguments were accepted
pub const EXIT_FAILURE: u8 = 1;
/// The exit code for bad arguments, or a request for help
pub const EXIT_USAGE: u8 = 2;

/// A fatal error. Nothing is written to the output once one of these occurs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The archive couldn't be opened, or one of its entries couldn't be read
    #[error("couldn't read archive {}: {source}", .path.display())]
    ArchiveUnreadable {
        /// The archive given on the command line
        path: PathBuf,
        /// What went wrong
        source: java_archives::Error,
    },
    /// An entry of the archive isn't a valid class file
    #[error("malformed class {entry}: {source}")]
    MalformedClass {
        /// The location of the entry, as a url
        entry: String,
        /// Why the class couldn't be parsed
        source: java_class_parser::error::Error,
    },
    /// The descriptors couldn't be written
    #[error("couldn't write output: {0}")]
    Output(#[from] io::Error),
}

impl Error {
    /// The process exit code this error maps to
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::ArchiveUnreadable { .. } | Error::MalformedClass { .. } | Error::Output(_) => {
                EXIT_FAILURE
            }
        }
    }
}
