//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "amber",
    about = "Solidify Amber VM object graphs into C constant source",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Solidify a graph document into C constant definitions
    Dump {
        /// Graph document (JSON), or `-` for stdin
        graph: PathBuf,
        /// Write output to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Use the weak string constructors
        #[arg(long)]
        weak: bool,
        /// Symbol prefix for top-level closures
        #[arg(long, value_name = "NAME")]
        prefix: Option<String>,
    },
    /// Disassemble instruction words
    Dis {
        /// Instruction words, `0x…` hex or decimal
        #[arg(required = true)]
        words: Vec<String>,
    },
}
