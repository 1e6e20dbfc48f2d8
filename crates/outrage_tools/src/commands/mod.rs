pub mod extract;
pub mod list;
pub mod table;

use anyhow::Context;
use outrage_fmt::{hog2::Hog2, stream::StreamCursor};
use outrage_utils::AnyResult;
use std::{
    fs::File,
    io::BufReader,
    path::Path,
};

/// Opens an archive and parses its directory.
fn open_archive(path: &Path) -> AnyResult<(Hog2, StreamCursor<BufReader<File>>)> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut stream = StreamCursor::new(BufReader::new(file))?;
    let hog = Hog2::read(&mut stream)
        .with_context(|| format!("reading archive directory of {}", path.display()))?;
    Ok((hog, stream))
}
