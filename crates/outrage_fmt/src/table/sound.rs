use crate::{stream::StreamCursor, FormatError};
use std::io::{Read, Seek};

/// Sound and door pages store their names in short fields.
pub const PAGENAME_LEN: usize = 35;

/// The only sound page revision ever shipped. Unlike the page *container*,
/// which skips unknown tags, record versions are not forward compatible.
pub const SOUND_VERSION: i16 = 1;

/// One decoded sound page.
///
/// The flag word is kept raw; its bits are interpreted by the audio
/// collaborator, not by the table layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoundInfo {
    pub name: String,
    pub file_name: String,
    pub flags: u32,
    pub loop_start: i32,
    pub loop_end: i32,
    pub outer_cone_volume: f32,
    pub inner_cone_angle: i32,
    pub outer_cone_angle: i32,
    pub max_distance: f32,
    pub min_distance: f32,
    pub import_volume: f32,
}

impl SoundInfo {
    /// Decodes one sound page body. Fixed layout, no conditional fields;
    /// this is the minimal template the other record kinds elaborate on.
    pub fn read<R: Read + Seek>(r: &mut StreamCursor<R>) -> Result<Self, FormatError> {
        let version = r.read_i16()?;
        if version > SOUND_VERSION {
            return Err(FormatError::UnsupportedVersion {
                kind: "sound",
                version,
                max: SOUND_VERSION,
            });
        }

        Ok(SoundInfo {
            name: r.read_cstring(PAGENAME_LEN)?,
            file_name: r.read_cstring(PAGENAME_LEN)?,
            flags: r.read_i32()? as u32,
            loop_start: r.read_i32()?,
            loop_end: r.read_i32()?,
            outer_cone_volume: r.read_f32()?,
            inner_cone_angle: r.read_i32()?,
            outer_cone_angle: r.read_i32()?,
            max_distance: r.read_f32()?,
            min_distance: r.read_f32()?,
            import_volume: r.read_f32()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{WriteBytesExt, LE};
    use std::io::Cursor;

    fn decode(body: &[u8]) -> Result<SoundInfo, FormatError> {
        SoundInfo::read(&mut StreamCursor::new(Cursor::new(body)).unwrap())
    }

    #[test]
    fn version_above_max_faults() {
        let mut body = Vec::new();
        body.write_i16::<LE>(2).unwrap();
        assert!(matches!(
            decode(&body),
            Err(FormatError::UnsupportedVersion {
                kind: "sound",
                version: 2,
                max: 1,
            })
        ));
    }

    #[test]
    fn full_record_decodes() {
        let mut body = Vec::new();
        body.write_i16::<LE>(1).unwrap();
        body.extend_from_slice(b"Explosion\0");
        body.extend_from_slice(b"boom.wav\0");
        body.write_i32::<LE>(5).unwrap();
        body.write_i32::<LE>(0).unwrap();
        body.write_i32::<LE>(44100).unwrap();
        body.write_f32::<LE>(0.5).unwrap();
        body.write_i32::<LE>(45).unwrap();
        body.write_i32::<LE>(90).unwrap();
        body.write_f32::<LE>(300.0).unwrap();
        body.write_f32::<LE>(5.0).unwrap();
        body.write_f32::<LE>(0.9).unwrap();

        let snd = decode(&body).unwrap();
        assert_eq!(
            snd,
            SoundInfo {
                name: "Explosion".into(),
                file_name: "boom.wav".into(),
                flags: 5,
                loop_start: 0,
                loop_end: 44100,
                outer_cone_volume: 0.5,
                inner_cone_angle: 45,
                outer_cone_angle: 90,
                max_distance: 300.0,
                min_distance: 5.0,
                import_volume: 0.9,
            }
        );
    }

    #[test]
    fn name_over_field_cap_faults() {
        let mut body = Vec::new();
        body.write_i16::<LE>(1).unwrap();
        body.extend_from_slice(&[b'x'; PAGENAME_LEN + 1]);
        body.push(0);
        assert!(matches!(
            decode(&body),
            Err(FormatError::StringTooLong { cap: PAGENAME_LEN })
        ));
    }
}
