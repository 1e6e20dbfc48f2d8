use crate::{stream::StreamCursor, FormatError};
use glam::Vec2;
use outrage_utils::color::Rgba;
use std::io::{Read, Seek};

/// Hard cap for the variable-length strings in texture pages.
pub const MAX_STRING_LEN: usize = 256;

/// Newest texture page revision this decoder understands. Older revisions
/// stay readable (the field ladder in [`TextureInfo::read`] handles them);
/// anything newer is a hard fault.
pub const TEXTURE_VERSION: i16 = 7;

bitflags::bitflags! {
    /// Surface flag word of a texture page.
    pub struct TextureFlags: u32 {
        const VOLATILE          = 1;
        const WATER             = 1 << 1;
        const METAL             = 1 << 2;
        const MARBLE            = 1 << 3;
        const PLASTIC           = 1 << 4;
        const FORCEFIELD        = 1 << 5;
        const ANIMATED          = 1 << 6;
        const DESTROYABLE       = 1 << 7;
        const EFFECT            = 1 << 8;
        const HUD_COCKPIT       = 1 << 9;
        const MINE              = 1 << 10;
        const TERRAIN           = 1 << 11;
        const OBJECT            = 1 << 12;
        const TEXTURE_64        = 1 << 13;
        const TMAP2             = 1 << 14;
        const TEXTURE_32        = 1 << 15;
        const FLY_THRU          = 1 << 16;
        const PASS_THRU         = 1 << 17;
        const PING_PONG         = 1 << 18;
        const LIGHT             = 1 << 19;
        const BREAKABLE         = 1 << 20;
        const SATURATE          = 1 << 21;
        const ALPHA             = 1 << 22;
        const DONTUSE           = 1 << 23;
        const PROCEDURAL        = 1 << 24;
        const WATER_PROCEDURAL  = 1 << 25;
        const FORCE_LIGHTMAP    = 1 << 26;
        const SATURATE_LIGHTMAP = 1 << 27;
        const TEXTURE_256       = 1 << 28;
        const LAVA              = 1 << 29;
        const RUBBLE            = 1 << 30;
        const SMOOTH_SPECULAR   = 1 << 31;
    }
}

impl Default for TextureFlags {
    fn default() -> Self {
        TextureFlags::empty()
    }
}

/// One decoded texture page.
///
/// Procedural parameter blocks are consumed byte-accurately but not
/// retained; their contents belong to the renderer's procedural evaluator,
/// not to the table layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextureInfo {
    pub name: String,
    pub file_name: String,
    pub color: Rgba,
    pub speed: f32,
    pub slide: Vec2,
    pub reflectivity: f32,
    pub corona: u8,
    pub damage: i32,
    pub flags: TextureFlags,
    /// Associated sound, stored by name from table version 7 onwards.
    /// Versions 5 and 6 stored a 16-bit sound handle instead, which is
    /// meaningless outside the original game and discarded.
    pub sound: Option<String>,
}

impl TextureInfo {
    pub fn procedural(&self) -> bool {
        self.flags.contains(TextureFlags::PROCEDURAL)
    }

    pub fn animated(&self) -> bool {
        self.flags.contains(TextureFlags::ANIMATED)
    }

    /// Decodes one texture page body. The cursor sits right after the page
    /// length field; final cursor position is unspecified (page framing
    /// reseeks afterwards).
    pub fn read<R: Read + Seek>(r: &mut StreamCursor<R>) -> Result<Self, FormatError> {
        let version = r.read_i16()?;
        if version > TEXTURE_VERSION {
            return Err(FormatError::UnsupportedVersion {
                kind: "texture",
                version,
                max: TEXTURE_VERSION,
            });
        }

        let mut tex = TextureInfo {
            name: r.read_cstring(MAX_STRING_LEN)?,
            file_name: r.read_cstring(MAX_STRING_LEN)?,
            ..Default::default()
        };
        r.read_cstring(MAX_STRING_LEN)?; // legacy string, no longer used

        tex.color = Rgba::new(r.read_f32()?, r.read_f32()?, r.read_f32()?, r.read_f32()?);
        tex.speed = r.read_f32()?;
        tex.slide = Vec2::new(r.read_f32()?, r.read_f32()?);
        tex.reflectivity = r.read_f32()?;

        tex.corona = r.read_u8()?;
        tex.damage = r.read_i32()?;
        tex.flags = TextureFlags::from_bits_truncate(r.read_i32()? as u32);

        if tex.procedural() {
            r.skip(255 * 2)?; // palette indices
            r.read_u8()?; // heat
            r.read_u8()?; // light
            r.read_u8()?; // thickness
            r.read_f32()?; // eval time
            if version >= 6 {
                r.read_f32()?; // osc time
                r.read_u8()?; // osc value
            }
            let elements = r.read_i16()?;
            for _ in 0..elements {
                // type, frequency, speed, size, x1, y1, x2, y2
                r.skip(8)?;
            }
        }

        if version >= 5 {
            if version < 7 {
                r.read_i16()?; // sound handle, meaningless here
            } else {
                let sound = r.read_cstring(MAX_STRING_LEN)?;
                if !sound.is_empty() {
                    tex.sound = Some(sound);
                }
            }
            r.read_f32()?; // sound volume
        }

        Ok(tex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{WriteBytesExt, LE};
    use std::io::Cursor;

    /// Common prefix of every texture page body: version through flag word.
    fn body_prefix(version: i16, flags: TextureFlags) -> Vec<u8> {
        let mut b = Vec::new();
        b.write_i16::<LE>(version).unwrap();
        b.extend_from_slice(b"tex\0");
        b.extend_from_slice(b"tex.ogf\0");
        b.extend_from_slice(b"legacy\0");
        for c in [0.9f32, 0.8, 0.7, 1.0] {
            b.write_f32::<LE>(c).unwrap();
        }
        b.write_f32::<LE>(4.0).unwrap(); // speed
        b.write_f32::<LE>(-1.0).unwrap(); // slide u
        b.write_f32::<LE>(1.5).unwrap(); // slide v
        b.write_f32::<LE>(0.3).unwrap(); // reflectivity
        b.push(0); // corona
        b.write_i32::<LE>(-5).unwrap(); // damage
        b.write_i32::<LE>(flags.bits() as i32).unwrap();
        b
    }

    fn decode(body: &[u8]) -> Result<TextureInfo, FormatError> {
        TextureInfo::read(&mut StreamCursor::new(Cursor::new(body)).unwrap())
    }

    #[test]
    fn version_above_max_faults() {
        let mut body = Vec::new();
        body.write_i16::<LE>(8).unwrap();
        assert!(matches!(
            decode(&body),
            Err(FormatError::UnsupportedVersion {
                kind: "texture",
                version: 8,
                max: 7,
            })
        ));
    }

    #[test]
    fn version_7_decodes_sound_as_string() {
        let mut body = body_prefix(7, TextureFlags::METAL | TextureFlags::LIGHT);
        body.extend_from_slice(b"Hum\0");
        body.write_f32::<LE>(1.0).unwrap();

        let tex = decode(&body).unwrap();
        assert_eq!(tex.name, "tex");
        assert_eq!(tex.file_name, "tex.ogf");
        assert_eq!(tex.sound.as_deref(), Some("Hum"));
        assert_eq!(tex.flags, TextureFlags::METAL | TextureFlags::LIGHT);
        assert_eq!(tex.damage, -5);
    }

    #[test]
    fn versions_5_and_6_discard_the_sound_handle() {
        for version in [5i16, 6] {
            let mut body = body_prefix(version, TextureFlags::empty());
            body.write_i16::<LE>(17).unwrap(); // sound handle
            body.write_f32::<LE>(1.0).unwrap();

            let tex = decode(&body).unwrap();
            assert_eq!(tex.sound, None, "version {version}");
        }
    }

    #[test]
    fn versions_below_5_have_no_sound_slot() {
        // The body ends right at the flag word; decoding must not read a
        // single byte past it.
        let body = body_prefix(4, TextureFlags::empty());
        let tex = decode(&body).unwrap();
        assert_eq!(tex.sound, None);
        assert_eq!(tex.speed, 4.0);
        assert_eq!(tex.slide, Vec2::new(-1.0, 1.5));
    }

    #[test]
    fn procedural_block_is_skipped_byte_accurately() {
        let mut body = body_prefix(7, TextureFlags::PROCEDURAL);
        for i in 0..255i16 {
            body.write_i16::<LE>(i).unwrap(); // palette
        }
        body.extend_from_slice(&[200, 100, 3]); // heat, light, thickness
        body.write_f32::<LE>(0.25).unwrap(); // eval time
        body.write_f32::<LE>(0.5).unwrap(); // osc time
        body.push(9); // osc value
        body.write_i16::<LE>(2).unwrap(); // element count
        body.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        body.extend_from_slice(&[8, 7, 6, 5, 4, 3, 2, 1]);
        body.extend_from_slice(b"Whoosh\0");
        body.write_f32::<LE>(0.4).unwrap();

        let tex = decode(&body).unwrap();
        assert!(tex.procedural());
        // The sound name only lines up if every procedural byte was consumed.
        assert_eq!(tex.sound.as_deref(), Some("Whoosh"));
    }

    #[test]
    fn version_5_procedural_block_has_no_oscillation_fields() {
        let mut body = body_prefix(5, TextureFlags::PROCEDURAL);
        for _ in 0..255 {
            body.write_i16::<LE>(0).unwrap();
        }
        body.extend_from_slice(&[0, 0, 0]);
        body.write_f32::<LE>(0.0).unwrap();
        body.write_i16::<LE>(0).unwrap(); // element count, no osc fields before it
        body.write_i16::<LE>(3).unwrap(); // sound handle
        body.write_f32::<LE>(0.0).unwrap();

        assert!(decode(&body).is_ok());
    }

    #[test]
    fn truncated_body_is_out_of_data() {
        let mut body = body_prefix(7, TextureFlags::empty());
        body.truncate(body.len() - 2);
        assert!(matches!(decode(&body), Err(FormatError::OutOfData)));
    }
}
