use std::io;
use thiserror::Error;

/// A violation of an absolute format invariant. Always fatal to the current
/// decode; never coerced into a best-effort value.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unexpected end of stream")]
    OutOfData,

    #[error("seek to {target:#x} lands past the end of the stream ({end:#x})")]
    SeekOutOfBounds { target: u64, end: u64 },

    #[error("page at offset {offset:#x} declares a non-positive length ({length})")]
    BadPageLength { offset: u64, length: i32 },

    #[error("unsupported {kind} page version {version} (newest known is {max})")]
    UnsupportedVersion {
        kind: &'static str,
        version: i16,
        max: i16,
    },

    #[error("string field exceeds its {cap} byte limit")]
    StringTooLong { cap: usize },

    #[error("bad archive signature")]
    BadMagic,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl FormatError {
    /// Maps I/O errors coming out of a read, folding short reads into
    /// [`FormatError::OutOfData`].
    pub(crate) fn from_read(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            FormatError::OutOfData
        } else {
            FormatError::Io(e)
        }
    }
}
