//! HOG2 archive containers.
//!
//! A HOG2 file is a directory of named entries followed by their payloads,
//! concatenated in directory order. Entry names are case-insensitive, as in
//! the original game's file system layer.
//!
//! Only the directory is parsed up front; payloads are fetched on demand
//! with [`Hog2::read_entry`] against the same stream.

use crate::{stream::StreamCursor, FormatError};
use ahash::AHashMap;
use std::io::{Read, Seek};

pub const HOG2_MAGIC: &[u8; 4] = b"HOG2";
pub const HOG_FILENAME_LEN: usize = 36;

/// Reserved space after the header fields, before the entry directory.
const HEADER_RESERVED: u64 = 56;

/// Directory slot of one archived file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hog2Entry {
    pub name: String,
    pub flags: u32,
    pub len: u32,
    pub timestamp: u32,
    /// Absolute offset of the payload, derived while walking the directory.
    pub offset: u64,
}

/// Parsed directory of a HOG2 archive.
#[derive(Debug, Clone, Default)]
pub struct Hog2 {
    entries: Vec<Hog2Entry>,
    index: AHashMap<String, usize>,
}

impl Hog2 {
    /// Parses the archive header and entry directory. The payloads are left
    /// untouched; entry length fields pointing past the end of the stream
    /// are only detected when the entry is actually read.
    pub fn read<R: Read + Seek>(r: &mut StreamCursor<R>) -> Result<Self, FormatError> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if &magic != HOG2_MAGIC {
            return Err(FormatError::BadMagic);
        }

        let count = r.read_u32()?;
        let data_offset = r.read_u32()?;
        r.skip(HEADER_RESERVED)?;

        // The count comes from untrusted data; a truncated directory faults
        // during the reads below, so only cap the pre-allocation.
        let mut entries = Vec::with_capacity(count.min(4096) as usize);
        let mut offset = data_offset as u64;
        for _ in 0..count {
            let name = r.read_string_field(HOG_FILENAME_LEN)?;
            let flags = r.read_u32()?;
            let len = r.read_u32()?;
            let timestamp = r.read_u32()?;
            entries.push(Hog2Entry {
                name,
                flags,
                len,
                timestamp,
                offset,
            });
            offset += len as u64;
        }

        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.to_ascii_lowercase(), i))
            .collect();

        Ok(Self { entries, index })
    }

    pub fn entries(&self) -> &[Hog2Entry] {
        &self.entries
    }

    /// Case-insensitive directory lookup.
    pub fn entry(&self, name: &str) -> Option<&Hog2Entry> {
        self.index
            .get(&name.to_ascii_lowercase())
            .map(|&i| &self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// Reads one entry's payload out of the archive stream. Returns `None`
    /// for names not in the directory; a payload extending past the end of
    /// the stream is a format fault.
    pub fn read_entry<R: Read + Seek>(
        &self,
        r: &mut StreamCursor<R>,
        name: &str,
    ) -> Result<Option<Vec<u8>>, FormatError> {
        let Some(entry) = self.entry(name) else {
            return Ok(None);
        };

        // Check before allocating; the length field is untrusted.
        if entry.offset + entry.len as u64 > r.end() {
            return Err(FormatError::OutOfData);
        }

        r.seek(entry.offset)?;
        let mut data = vec![0u8; entry.len as usize];
        r.read_exact(&mut data)?;
        Ok(Some(data))
    }
}
