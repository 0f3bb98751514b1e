//! CLI argument definitions using clap

use clap::{ArgAction, Parser, Subcommand};

/// Demonstrations of strategy-bound taxable entities and visitor folds over trees
#[derive(Parser, Debug)]
#[command(name = "polyfold")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the taxable entity scenario
    Entities,

    /// Run the tree visitor scenario
    Tree,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
