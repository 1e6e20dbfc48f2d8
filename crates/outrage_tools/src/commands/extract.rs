use anyhow::{bail, Context};
use clap::Args;
use log::info;
use outrage_utils::{ok, AnyResult};
use std::{fs, path::PathBuf};

#[derive(Args)]
pub struct ExtractCommand {
    /// Path to the HOG2 archive.
    pub archive: PathBuf,
    /// Name of the entry to extract (case-insensitive).
    pub name: String,
    /// Output path; defaults to the entry's name in the working directory.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl crate::Command for ExtractCommand {
    fn run(self) -> AnyResult {
        let (hog, mut stream) = super::open_archive(&self.archive)?;

        let Some(data) = hog.read_entry(&mut stream, &self.name)? else {
            bail!("no entry named `{}` in {}", self.name, self.archive.display());
        };

        let output = self.output.unwrap_or_else(|| PathBuf::from(&self.name));
        fs::write(&output, &data).with_context(|| format!("writing {}", output.display()))?;
        info!("wrote {} bytes to {}", data.len(), output.display());
        ok()
    }
}
