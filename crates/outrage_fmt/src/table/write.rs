//! Table page encoding.
//!
//! Mostly here for the editor's export paths and for building test corpora:
//! pages are written with a placeholder length field which gets backpatched
//! once the body is complete, so encoders never have to precompute sizes.

use super::{GameTable, SoundInfo, TextureInfo, MAX_STRING_LEN, PAGENAME_LEN};
use super::{PAGETYPE_SOUND, PAGETYPE_TEXTURE, SOUND_VERSION, TEXTURE_VERSION};
use crate::FormatError;
use byteorder::{WriteBytesExt, LE};
use std::io::{Seek, SeekFrom, Write};

/// Writes one length-framed page.
///
/// `new` emits the tag and reserves the length field; the body is then
/// written through the [`Write`] impl; `finish` backpatches the length so
/// that `page_start + length` lands exactly on the next page's tag.
pub struct PageWriter<'w, W: Write + Seek> {
    w: &'w mut W,
    page_start: u64,
    finished: bool,
}

impl<'w, W: Write + Seek> PageWriter<'w, W> {
    pub fn new(w: &'w mut W, tag: u8) -> Result<Self, FormatError> {
        w.write_u8(tag)?;
        let page_start = w.stream_position()?;
        w.write_i32::<LE>(0)?; // backpatched by finish
        Ok(Self {
            w,
            page_start,
            finished: false,
        })
    }

    /// Marks the page's final length in the stream. Idempotent.
    pub fn finish(&mut self) -> Result<(), FormatError> {
        if self.finished {
            return Ok(());
        }

        let page_end = self.w.stream_position()?;
        let length = page_end - self.page_start;
        if length > i32::MAX as u64 {
            return Err(FormatError::BadPageLength {
                offset: self.page_start,
                length: length as i32,
            });
        }

        self.w.seek(SeekFrom::Start(self.page_start))?;
        self.w.write_i32::<LE>(length as i32)?;
        self.w.seek(SeekFrom::Start(page_end))?;

        self.finished = true;
        Ok(())
    }
}

impl<'w, W: Write + Seek> Write for PageWriter<'w, W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.w.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.w.flush()
    }
}

impl<'w, W: Write + Seek> Drop for PageWriter<'w, W> {
    fn drop(&mut self) {
        if !self.finished {
            // Encoding into an in-memory or file stream; the only plausible
            // failure here is an I/O error the caller already hit.
            let _ = self.finish();
        }
    }
}

fn write_cstring<W: Write>(w: &mut W, s: &str, cap: usize) -> Result<(), FormatError> {
    if s.len() > cap {
        return Err(FormatError::StringTooLong { cap });
    }
    w.write_all(s.as_bytes())?;
    w.write_u8(0)?;
    Ok(())
}

impl TextureInfo {
    /// Encodes this record as one texture page at the newest version.
    ///
    /// Procedural payloads are not retained by [`TextureInfo::read`], so a
    /// record with the procedural flag set gets an empty parameter block
    /// (zeroed constants, zero elements) that decodes cleanly.
    pub fn write<W: Write + Seek>(&self, w: &mut W) -> Result<(), FormatError> {
        let mut page = PageWriter::new(w, PAGETYPE_TEXTURE)?;
        page.write_i16::<LE>(TEXTURE_VERSION)?;
        write_cstring(&mut page, &self.name, MAX_STRING_LEN)?;
        write_cstring(&mut page, &self.file_name, MAX_STRING_LEN)?;
        write_cstring(&mut page, "", MAX_STRING_LEN)?; // legacy string

        for c in <[f32; 4]>::from(self.color) {
            page.write_f32::<LE>(c)?;
        }
        page.write_f32::<LE>(self.speed)?;
        page.write_f32::<LE>(self.slide.x)?;
        page.write_f32::<LE>(self.slide.y)?;
        page.write_f32::<LE>(self.reflectivity)?;

        page.write_u8(self.corona)?;
        page.write_i32::<LE>(self.damage)?;
        page.write_i32::<LE>(self.flags.bits() as i32)?;

        if self.procedural() {
            for _ in 0..255 {
                page.write_i16::<LE>(0)?; // palette
            }
            page.write_all(&[0, 0, 0])?; // heat, light, thickness
            page.write_f32::<LE>(0.0)?; // eval time
            page.write_f32::<LE>(0.0)?; // osc time
            page.write_u8(0)?; // osc value
            page.write_i16::<LE>(0)?; // element count
        }

        write_cstring(&mut page, self.sound.as_deref().unwrap_or(""), MAX_STRING_LEN)?;
        page.write_f32::<LE>(1.0)?; // sound volume

        page.finish()
    }
}

impl SoundInfo {
    /// Encodes this record as one sound page.
    pub fn write<W: Write + Seek>(&self, w: &mut W) -> Result<(), FormatError> {
        let mut page = PageWriter::new(w, PAGETYPE_SOUND)?;
        page.write_i16::<LE>(SOUND_VERSION)?;
        write_cstring(&mut page, &self.name, PAGENAME_LEN)?;
        write_cstring(&mut page, &self.file_name, PAGENAME_LEN)?;
        page.write_i32::<LE>(self.flags as i32)?;
        page.write_i32::<LE>(self.loop_start)?;
        page.write_i32::<LE>(self.loop_end)?;
        page.write_f32::<LE>(self.outer_cone_volume)?;
        page.write_i32::<LE>(self.inner_cone_angle)?;
        page.write_i32::<LE>(self.outer_cone_angle)?;
        page.write_f32::<LE>(self.max_distance)?;
        page.write_f32::<LE>(self.min_distance)?;
        page.write_f32::<LE>(self.import_volume)?;
        page.finish()
    }
}

impl GameTable {
    /// Writes every record as a page sequence, textures first. The original
    /// interleaving is not preserved (it never carried meaning; records are
    /// identified by per-kind order, which this keeps intact).
    pub fn write<W: Write + Seek>(&self, w: &mut W) -> Result<(), FormatError> {
        for tex in &self.textures {
            tex.write(w)?;
        }
        for snd in &self.sounds {
            snd.write(w)?;
        }
        Ok(())
    }
}
