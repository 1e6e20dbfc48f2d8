use anyhow::Context;
use clap::Args;
use outrage_fmt::table::GameTable;
use outrage_res::{ResourceContext, TABLE_FILENAME};
use outrage_utils::{ok, AnyResult};
use std::{fs::File, io::BufReader, path::PathBuf};

#[derive(Args)]
pub struct TableCommand {
    /// Path to a table file, or to an archive when `--hog` is given.
    pub path: PathBuf,
    /// Treat the input as a HOG2 archive and decode its table entry.
    #[arg(long)]
    pub hog: bool,
    /// Also list every record instead of just the totals.
    #[arg(long, short)]
    pub verbose: bool,
}

impl crate::Command for TableCommand {
    fn run(self) -> AnyResult {
        let table = if self.hog {
            let mut ctx = ResourceContext::new();
            ctx.mount_hog(&self.path)?;
            ctx.table().clone()
        } else {
            let file = File::open(&self.path)
                .with_context(|| format!("opening {}", self.path.display()))?;
            GameTable::read_from(BufReader::new(file))
                .with_context(|| format!("decoding {}", self.path.display()))?
        };

        println!(
            "{}: {} textures, {} sounds",
            if self.hog { TABLE_FILENAME } else { "table" },
            table.textures.len(),
            table.sounds.len()
        );

        if self.verbose {
            for (i, tex) in table.textures.iter().enumerate() {
                print!("texture {i:5}  {}  ({})", tex.name, tex.file_name);
                if let Some(sound) = &tex.sound {
                    print!("  sound: {sound}");
                }
                println!();
            }
            for (i, snd) in table.sounds.iter().enumerate() {
                println!("sound   {i:5}  {}  ({})", snd.name, snd.file_name);
            }
        }
        ok()
    }
}
