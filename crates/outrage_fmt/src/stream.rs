//! Positional, bounds-checked reading of raw game data.
//!
//! Everything in the Outrage formats is little endian. The cursor captures
//! the stream's end offset once at construction and refuses to seek past it,
//! so a corrupt length field faults instead of silently truncating the rest
//! of the parse.

use crate::FormatError;
use byteorder::{ReadBytesExt, LE};
use outrage_utils::zero_terminated;
use std::io::{Read, Seek, SeekFrom};

/// Little-endian cursor over any `Read + Seek` source with a fixed end bound.
///
/// Reads past the end of the data and seeks beyond the end bound are faults,
/// not clamps. There are no retry semantics; a failed read leaves the cursor
/// unusable for further decoding by contract (the whole decode is aborted).
pub struct StreamCursor<R: Read + Seek> {
    inner: R,
    end: u64,
}

impl<R: Read + Seek> StreamCursor<R> {
    /// Wraps a stream, capturing its current length as the end bound. The
    /// cursor's position stays wherever the stream's position was.
    pub fn new(mut inner: R) -> Result<Self, FormatError> {
        let position = inner.stream_position()?;
        let end = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(position))?;
        Ok(Self { inner, end })
    }

    /// Current absolute offset.
    pub fn position(&mut self) -> Result<u64, FormatError> {
        Ok(self.inner.stream_position()?)
    }

    /// Offset one past the last readable byte.
    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn end_of_stream(&mut self) -> Result<bool, FormatError> {
        Ok(self.position()? >= self.end)
    }

    /// Absolute seek. Seeking past the end bound is a fault.
    pub fn seek(&mut self, offset: u64) -> Result<(), FormatError> {
        if offset > self.end {
            return Err(FormatError::SeekOutOfBounds {
                target: offset,
                end: self.end,
            });
        }
        self.inner.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    /// Skips `count` bytes without reading them. Bounds-checked like `seek`.
    pub fn skip(&mut self, count: u64) -> Result<(), FormatError> {
        let position = self.position()?;
        self.seek(position + count)
    }

    pub fn read_u8(&mut self) -> Result<u8, FormatError> {
        self.inner.read_u8().map_err(FormatError::from_read)
    }

    pub fn read_i16(&mut self) -> Result<i16, FormatError> {
        self.inner.read_i16::<LE>().map_err(FormatError::from_read)
    }

    pub fn read_u16(&mut self) -> Result<u16, FormatError> {
        self.inner.read_u16::<LE>().map_err(FormatError::from_read)
    }

    pub fn read_i32(&mut self) -> Result<i32, FormatError> {
        self.inner.read_i32::<LE>().map_err(FormatError::from_read)
    }

    pub fn read_u32(&mut self) -> Result<u32, FormatError> {
        self.inner.read_u32::<LE>().map_err(FormatError::from_read)
    }

    pub fn read_f32(&mut self) -> Result<f32, FormatError> {
        self.inner.read_f32::<LE>().map_err(FormatError::from_read)
    }

    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), FormatError> {
        self.inner.read_exact(buf).map_err(FormatError::from_read)
    }

    /// Reads a fixed-capacity NUL-padded string field: exactly `len` bytes
    /// are consumed, the result is truncated at the first NUL, and the
    /// remainder of the field is discarded.
    pub fn read_string_field(&mut self, len: usize) -> Result<String, FormatError> {
        let mut raw = vec![0u8; len];
        self.read_exact(&mut raw)?;
        Ok(String::from_utf8_lossy(zero_terminated(&raw)).into_owned())
    }

    /// Reads a NUL-terminated string of up to `cap` bytes (terminator
    /// excluded). Running past the cap without finding a terminator is a
    /// fault, same as the packed C string readers elsewhere in the tooling.
    pub fn read_cstring(&mut self, cap: usize) -> Result<String, FormatError> {
        let mut raw = Vec::new();
        loop {
            match self.read_u8()? {
                0 => break,
                _ if raw.len() == cap => return Err(FormatError::StringTooLong { cap }),
                b => raw.push(b),
            }
        }
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}
