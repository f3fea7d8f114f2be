//! Contains the error type that can be emitted

use nom::Needed;
use std::backtrace::Backtrace;
use std::fmt::{Debug, Display, Formatter};
use std::io;

/// The error type
pub struct Error {
    kind: ErrorKind,
    backtrace: Backtrace,
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#}", self)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            write!(f, "{} at\n{}", self.kind, self.backtrace)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl Error {
    /// Create a new error from an an error kind
    pub fn new<E: Into<ErrorKind>>(kind: E) -> Self {
        Self {
            kind: kind.into(),
            backtrace: Backtrace::capture(),
        }
    }
    /// Gets the error kind
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Gets the offset into the class file where parsing failed, if it's known.
    pub fn offset(&self) -> Option<usize> {
        match self.kind {
            ErrorKind::UnknownConstantPoolInfoTag { offset, .. }
            | ErrorKind::Truncated { offset }
            | ErrorKind::Malformed { offset, .. } => Some(offset),
            _ => None,
        }
    }
}

impl<E: Into<ErrorKind>> From<E> for Error {
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

/// The error kind
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The file doesn't start with `0xCAFEBABE`
    #[error("{0:#010x} is not the class file magic number")]
    BadMagic(u32),
    /// The class file version is outside of what can be parsed
    #[error("class file version {major}.{minor} is not supported")]
    UnsupportedVersion {
        /// the major version
        major: u16,
        /// the minor version
        minor: u16,
    },
    /// An unknown tag was found in the constant pool
    #[error("{tag} is not a known constant pool tag (at offset {offset})")]
    UnknownConstantPoolInfoTag {
        /// the tag byte
        tag: u8,
        /// where the tag is in the class file
        offset: usize,
    },
    /// The class file ends before the structure it describes does
    #[error("class file is truncated at offset {offset}")]
    Truncated {
        /// where the data ran out
        offset: usize,
    },
    /// Some other structural problem
    #[error("malformed class file at offset {offset} ({code:?})")]
    Malformed {
        /// the nom parser that failed
        code: nom::error::ErrorKind,
        /// where the parser failed
        offset: usize,
    },
    /// Bytes were left over after the class file structure ended
    #[error("{0} unexpected bytes after the end of the class file")]
    TrailingBytes(usize),
    /// A constant pool index pointed at nothing, or at the wrong kind of constant
    #[error("constant pool index {index} is not a {expected} constant")]
    BadConstantPoolReference {
        /// the index that was followed
        index: u16,
        /// the kind of constant that should have been there
        expected: &'static str,
    },
    /// A `CONSTANT_Utf8_info` entry isn't valid modified utf-8
    #[error("constant pool index {index} is not valid modified utf-8")]
    InvalidUtf8 {
        /// the index of the string
        index: u16,
    },
    /// A type or method descriptor couldn't be parsed
    #[error("{0:?} is not a valid descriptor")]
    InvalidDescriptor(String),
    /// An attribute's contents don't match its declared layout
    #[error("the {0} attribute is malformed")]
    InvalidAttribute(String),
    /// An io error occurred
    #[error(transparent)]
    IoError(#[from] io::Error),
    /// While parsing, some bytes were missing
    #[error("Missing {0:?} bytes")]
    MissingBytes(Needed),
}
