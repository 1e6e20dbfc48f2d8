//! Caller-owned resource state for the editor.
//!
//! The editor keeps exactly one [`ResourceContext`] and hands references to
//! it to whoever needs game data (material loader, audio loader, property
//! panels). The context has an explicit mount/reset lifecycle; there is no
//! ambient global resource state anywhere in these crates.
//!
//! Loads are all-or-nothing: if anything in the archive or its game table
//! fails to decode, the context resets itself wholesale before the error
//! propagates, so collaborators never observe a half-populated table.

use anyhow::{anyhow, Context};
use log::{error, info};
use outrage_fmt::{
    hog2::Hog2,
    stream::StreamCursor,
    table::{GameTable, SoundInfo, TextureInfo},
};
use outrage_utils::{ok, AnyResult};
use std::{
    fs::{self, File},
    io::{self, BufReader, Cursor, Read, Seek, SeekFrom},
    path::{Component, Path, PathBuf},
};

/// Name of the compiled game table entry inside the main archive.
pub const TABLE_FILENAME: &str = "Table.gam";

trait DataSource: Read + Seek {}
impl<T: Read + Seek> DataSource for T {}

/// Type-erased archive backing stream, so the context can hold file-backed
/// and in-memory sources behind one concrete type.
struct ArchiveStream(Box<dyn DataSource>);

impl Read for ArchiveStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl Seek for ArchiveStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.0.seek(pos)
    }
}

struct MountedArchive {
    label: String,
    directory: Hog2,
    stream: StreamCursor<ArchiveStream>,
}

/// Decoded game resources of one mounted archive.
///
/// Textures and sounds are addressed by their decode-order index, which is
/// how the rest of the editor refers to them. Single-threaded by design;
/// callers that share a context across threads wrap it in their own lock.
#[derive(Default)]
pub struct ResourceContext {
    archive: Option<MountedArchive>,
    table: GameTable,
    data_dir: Option<PathBuf>,
}

impl ResourceContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory searched for loose files before the mounted archive.
    /// Lookup stays confined to this directory; without one, only archive
    /// entries are served. Survives `reset` (it is configuration, not
    /// mounted state).
    pub fn set_data_dir(&mut self, dir: impl Into<PathBuf>) {
        self.data_dir = Some(dir.into());
    }

    /// Mounts the game's main archive from disk and decodes its game table.
    pub fn mount_hog(&mut self, path: impl AsRef<Path>) -> AnyResult {
        let path = path.as_ref();
        let label = path.display().to_string();
        match File::open(path).with_context(|| format!("opening {label}")) {
            Ok(file) => self.mount_hog_from(BufReader::new(file), &label),
            Err(e) => self.fail_mount(&label, e),
        }
    }

    /// Mounts an archive from any seekable source. `label` only shows up in
    /// diagnostics.
    pub fn mount_hog_from(
        &mut self,
        source: impl Read + Seek + 'static,
        label: &str,
    ) -> AnyResult {
        match self.try_mount(ArchiveStream(Box::new(source)), label) {
            Ok(()) => {
                info!(
                    "mounted {label}: {} entries, {} textures, {} sounds",
                    self.archive.as_ref().map_or(0, |a| a.directory.entries().len()),
                    self.table.textures.len(),
                    self.table.sounds.len(),
                );
                ok()
            }
            Err(e) => self.fail_mount(label, e),
        }
    }

    /// Shared failure path of every mount entry point: any fault, including
    /// a missing archive file, leaves the context empty rather than keeping
    /// the previous resource set live.
    fn fail_mount(&mut self, label: &str, e: anyhow::Error) -> AnyResult {
        self.reset();
        error!("failed to mount {label}: {e:#}");
        Err(e)
    }

    fn try_mount(&mut self, source: ArchiveStream, label: &str) -> AnyResult {
        let mut stream = StreamCursor::new(source)?;
        let directory =
            Hog2::read(&mut stream).with_context(|| format!("reading archive directory of {label}"))?;

        let table = match directory.read_entry(&mut stream, TABLE_FILENAME)? {
            Some(data) => GameTable::read_from(Cursor::new(data))
                .with_context(|| format!("decoding {TABLE_FILENAME} from {label}"))?,
            None => {
                // Not every archive carries a table; mounting one without
                // just gives an empty resource set plus raw file access.
                info!("{label} has no {TABLE_FILENAME} entry");
                GameTable::default()
            }
        };

        self.archive = Some(MountedArchive {
            label: label.to_string(),
            directory,
            stream,
        });
        self.table = table;
        ok()
    }

    /// Drops all mounted state, returning the context to its initial empty
    /// configuration.
    pub fn reset(&mut self) {
        if self.archive.is_some() {
            info!("resource context reset");
        }
        self.archive = None;
        self.table = GameTable::default();
    }

    pub fn is_mounted(&self) -> bool {
        self.archive.is_some()
    }

    pub fn archive_label(&self) -> Option<&str> {
        self.archive.as_ref().map(|a| a.label.as_str())
    }

    pub fn table(&self) -> &GameTable {
        &self.table
    }

    pub fn textures(&self) -> &[TextureInfo] {
        &self.table.textures
    }

    pub fn sounds(&self) -> &[SoundInfo] {
        &self.table.sounds
    }

    /// Texture by decode-order index.
    pub fn texture(&self, index: usize) -> Option<&TextureInfo> {
        self.table.textures.get(index)
    }

    /// Sound by decode-order index.
    pub fn sound(&self, index: usize) -> Option<&SoundInfo> {
        self.table.sounds.get(index)
    }

    /// Case-insensitive texture search, the way table cross references
    /// (e.g. a texture's sound name) are meant to be resolved.
    pub fn find_texture(&self, name: &str) -> Option<usize> {
        self.table
            .textures
            .iter()
            .position(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn find_sound(&self, name: &str) -> Option<usize> {
        self.table
            .sounds
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Fetches a raw file, loose files in the data directory taking
    /// precedence over archive entries (the original engine's lookup order).
    ///
    /// Entry names are plain file names; anything carrying path components
    /// never touches the file system and falls through to the archive.
    pub fn read_file(&mut self, name: &str) -> AnyResult<Vec<u8>> {
        if let Some(path) = self.loose_file_path(name) {
            if let Ok(data) = fs::read(path) {
                return Ok(data);
            }
        }

        let archive = self
            .archive
            .as_mut()
            .ok_or_else(|| anyhow!("no archive mounted"))?;
        archive
            .directory
            .read_entry(&mut archive.stream, name)?
            .ok_or_else(|| anyhow!("file not found: {name}"))
    }

    fn loose_file_path(&self, name: &str) -> Option<PathBuf> {
        let dir = self.data_dir.as_ref()?;
        let mut components = Path::new(name).components();
        // A single normal component, so `..`, absolute paths and nested
        // paths can't escape the data directory.
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Some(dir.join(name)),
            _ => None,
        }
    }
}
