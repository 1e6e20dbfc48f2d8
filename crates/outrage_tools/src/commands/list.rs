use clap::Args;
use outrage_utils::{ok, AnyResult};
use std::path::PathBuf;

#[derive(Args)]
pub struct ListCommand {
    /// Path to the HOG2 archive.
    pub archive: PathBuf,
}

impl crate::Command for ListCommand {
    fn run(self) -> AnyResult {
        let (hog, _) = super::open_archive(&self.archive)?;

        println!("{:>10}  {:>10}  name", "size", "flags");
        for entry in hog.entries() {
            println!("{:>10}  {:>10x}  {}", entry.len, entry.flags, entry.name);
        }
        println!("{} entries", hog.entries().len());
        ok()
    }
}
