// dpr/src/cli.rs
//! Defines the command-line argument structure using clap.
use clap::{ArgAction, Parser, Subcommand};
use dpr_common::error::Result;
use dpr_common::Config;

pub mod list;
pub mod resolve;

use crate::cli::list::List;
use crate::cli::resolve::Resolve;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, name = "dpr", bin_name = "dpr")]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve applications into content, use and provision modules
    Resolve(Resolve),
    /// List the modules of a repository file
    List(List),
}

impl Command {
    pub fn run(&self, config: &Config) -> Result<()> {
        match self {
            Self::Resolve(command) => command.run(config),
            Self::List(command) => command.run(config),
        }
    }
}
