//! `dupstrip` command-line front end.

use clap::Parser;

pub mod commands;

pub use commands::Commands;

#[derive(Debug, Parser)]
#[command(name = "dupstrip")]
#[command(about = "Remove duplicated word fragments from product names")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests;
