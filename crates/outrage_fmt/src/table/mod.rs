//! Compiled game table files ("Table.gam").
//!
//! A table file is a flat sequence of *pages*. Each page starts with a one
//! byte type tag, followed by a signed 32-bit length, followed by the page
//! body. The length is measured from right after the tag, so the next page
//! always begins at `page_start + length` no matter what the body decoder
//! did - the framing is authoritative over the record's self-reported
//! structure, and a version-skew bug in one record can never desynchronize
//! the rest of the stream.
//!
//! Pages with tags this layer doesn't handle are skipped silently; the game
//! defines more page kinds (doors, generic objects) than the editor needs.

use crate::{stream::StreamCursor, FormatError};
use log::trace;
use std::io::{Read, Seek};

mod sound;
pub use sound::*;
mod texture;
pub use texture::*;
mod write;
pub use write::*;

pub const PAGETYPE_TEXTURE: u8 = 1;
pub const PAGETYPE_DOOR: u8 = 5;
pub const PAGETYPE_SOUND: u8 = 7;
pub const PAGETYPE_GENERIC: u8 = 10;

/// Walks a page sequence until end of stream, handing each page's tag and a
/// cursor positioned at its body to `page`.
///
/// After the callback returns the cursor is unconditionally reseeked to the
/// start of the next page as declared by the length field. The callback may
/// under- or over-read its page freely; it must not assume its final
/// position means anything.
///
/// A callback error, a non-positive page length, or a length pointing past
/// the end of the stream aborts the walk.
pub fn read_pages<R, F>(r: &mut StreamCursor<R>, mut page: F) -> Result<(), FormatError>
where
    R: Read + Seek,
    F: FnMut(u8, &mut StreamCursor<R>) -> Result<(), FormatError>,
{
    while !r.end_of_stream()? {
        let tag = r.read_u8()?;
        let page_start = r.position()?;
        let length = r.read_i32()?;
        if length <= 0 {
            return Err(FormatError::BadPageLength {
                offset: page_start,
                length,
            });
        }

        page(tag, r)?;

        // Seek to the next page, regardless of how much the callback consumed.
        r.seek(page_start + length as u64)?;
    }
    Ok(())
}

/// Decoded contents of a game table: texture and sound pages in file order.
///
/// Records are referenced elsewhere by their index in these vectors, which
/// equals their order of discovery in the file. Nothing is deduplicated and
/// cross references (a texture's sound name, say) are not resolved here.
#[derive(Debug, Clone, Default)]
pub struct GameTable {
    pub textures: Vec<TextureInfo>,
    pub sounds: Vec<SoundInfo>,
}

impl GameTable {
    /// Reads a whole table from a page sequence starting at the cursor's
    /// current position.
    ///
    /// All-or-nothing: a fault in any record discards the in-progress table
    /// and propagates. The framing would make skipping a single bad page
    /// safe, but the format has always been treated as load-it-all-or-reset.
    pub fn read<R: Read + Seek>(r: &mut StreamCursor<R>) -> Result<Self, FormatError> {
        let mut table = GameTable::default();
        read_pages(r, |tag, r| {
            match tag {
                PAGETYPE_TEXTURE => table.textures.push(TextureInfo::read(r)?),
                PAGETYPE_SOUND => table.sounds.push(SoundInfo::read(r)?),
                other => trace!("skipping page with tag {other}"),
            }
            Ok(())
        })?;
        Ok(table)
    }

    /// Convenience wrapper that builds the bounds-tracking cursor itself.
    pub fn read_from<R: Read + Seek>(r: R) -> Result<Self, FormatError> {
        Self::read(&mut StreamCursor::new(r)?)
    }
}
