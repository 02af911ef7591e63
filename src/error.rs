//! Contains the Error and Result type used by the reader, the writer and the
//! tree constructors.
use std::fmt::Display;

use crate::Tag;

/// Various errors that can occur while building, writing or reading NBT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The underlying sink or source failed for a reason other than running
    /// out of input.
    Io(std::io::ErrorKind),

    /// Input ended part way through a value, or before a compound was closed.
    UnexpectedEof,

    /// A discriminant byte that is not a known tag.
    InvalidTag(u8),

    /// An End tag where a value was required, such as at the root or as the
    /// element tag of a non-empty list.
    UnexpectedEnd,

    /// An array or list declared a negative length.
    NegativeLength(i32),

    /// An array or list is longer than the wire format or the configured
    /// limit allows.
    SeqTooLong,

    /// Expected modified UTF-8 but was not valid. Contained bytes are the
    /// invalid data.
    Nonunicode(Vec<u8>),

    /// A string or name that encodes to more than 65535 bytes.
    StringTooLong(usize),

    /// A list was given an element that does not match its element tag.
    TagMismatch { expected: Tag, found: Tag },

    /// Containers were nested deeper than the configured limit.
    TooDeep(usize),

    /// The writer was already closed.
    Closed,

    /// An earlier write failed part way through a value, so the stream no
    /// longer holds valid NBT.
    Poisoned,
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::unexpected_eof(),
            kind => Self {
                msg: format!("io error: {}", e),
                kind: ErrorKind::Io(kind),
            },
        }
    }
}

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// True if the input being read was not valid NBT, as opposed to the
    /// source failing or a limit being hit.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::UnexpectedEof
                | ErrorKind::InvalidTag(_)
                | ErrorKind::UnexpectedEnd
                | ErrorKind::NegativeLength(_)
                | ErrorKind::SeqTooLong
                | ErrorKind::Nonunicode(_)
        )
    }

    pub(crate) fn invalid_tag(tag: u8) -> Error {
        Error {
            msg: format!("invalid nbt tag value: {}", tag),
            kind: ErrorKind::InvalidTag(tag),
        }
    }

    pub(crate) fn unexpected_eof() -> Error {
        Error {
            msg: "eof: unexpectedly ran out of input".to_owned(),
            kind: ErrorKind::UnexpectedEof,
        }
    }

    pub(crate) fn unexpected_end(context: &str) -> Error {
        Error {
            msg: format!("invalid nbt: end tag {}", context),
            kind: ErrorKind::UnexpectedEnd,
        }
    }

    pub(crate) fn negative_length(len: i32) -> Error {
        Error {
            msg: format!("invalid nbt: negative length {}", len),
            kind: ErrorKind::NegativeLength(len),
        }
    }

    pub(crate) fn seq_too_long(len: usize, max: usize) -> Error {
        Error {
            msg: format!("size ({}) greater than max sequence length ({})", len, max),
            kind: ErrorKind::SeqTooLong,
        }
    }

    pub(crate) fn nonunicode_string(data: &[u8]) -> Error {
        Error {
            msg: format!(
                "invalid nbt string: nonunicode: {}",
                String::from_utf8_lossy(data)
            ),
            kind: ErrorKind::Nonunicode(data.to_vec()),
        }
    }

    pub(crate) fn string_too_long(len: usize) -> Error {
        Error {
            msg: format!("string of {} bytes does not fit a u16 length", len),
            kind: ErrorKind::StringTooLong(len),
        }
    }

    pub(crate) fn tag_mismatch(expected: Tag, found: Tag) -> Error {
        Error {
            msg: format!("list of {:?} cannot hold a {:?}", expected, found),
            kind: ErrorKind::TagMismatch { expected, found },
        }
    }

    pub(crate) fn too_deep(max: usize) -> Error {
        Error {
            msg: format!("nbt nested deeper than {} containers", max),
            kind: ErrorKind::TooDeep(max),
        }
    }

    pub(crate) fn poisoned() -> Error {
        Error {
            msg: "writer unusable after an earlier failed write".to_owned(),
            kind: ErrorKind::Poisoned,
        }
    }

    pub(crate) fn closed() -> Error {
        Error {
            msg: "writer already closed".to_owned(),
            kind: ErrorKind::Closed,
        }
    }
}
