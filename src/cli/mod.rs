//! CLI Module
//!
//! Command-line front end for the HLP engine.

pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// HLP - compose comparator chains that map 0-15 onto 0-15
#[derive(Parser, Debug)]
#[command(name = "hlp")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON editor configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the chain text comes from
#[derive(Args, Debug, Clone)]
pub struct TextSource {
    /// Chain text, e.g. "5,*3; A,B; "
    #[arg(required_unless_present = "file")]
    pub text: Option<String>,

    /// Read the chain text from a file instead
    #[arg(short, long, conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the transfer table of a chain
    #[command(name = "eval")]
    Eval {
        #[command(flatten)]
        source: TextSource,
    },

    /// Print the canonical text of a chain
    #[command(name = "normalize")]
    Normalize {
        #[command(flatten)]
        source: TextSource,
    },

    /// Print a chain as JSON
    #[command(name = "json")]
    Json {
        #[command(flatten)]
        source: TextSource,
    },

    /// Validate several chain texts
    #[command(name = "check")]
    Check {
        /// Candidate chain texts
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// Edit a chain interactively, one command per line on stdin
    #[command(name = "edit")]
    Edit {
        /// Initial chain text
        text: Option<String>,
    },
}
