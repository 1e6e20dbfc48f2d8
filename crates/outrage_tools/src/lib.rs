//! Command line tooling for Outrage game data files.
//!
//! Currently a small inspection utility: listing and extracting HOG2
//! archive entries, and dumping decoded game tables.

use clap::{Parser, Subcommand};
use commands::{extract::ExtractCommand, list::ListCommand, table::TableCommand};
use outrage_utils::{ok, AnyResult};

pub mod commands;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand)]
pub enum CliCommand {
    /// Lists the entries of a HOG2 archive
    List(ListCommand),
    /// Extracts an entry from a HOG2 archive
    Extract(ExtractCommand),
    /// Decodes a game table and prints its contents
    Table(TableCommand),
}

pub trait Command {
    fn run(self) -> AnyResult;
}

/// Runs the tool as if it was invoked from the command line. Split out of
/// `main` so library consumers can drive the same commands.
pub fn run(cli: Cli) -> AnyResult {
    match cli.command {
        CliCommand::List(c) => c.run()?,
        CliCommand::Extract(c) => c.run()?,
        CliCommand::Table(c) => c.run()?,
    }
    ok()
}
