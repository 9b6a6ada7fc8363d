//! CLI argument parsing for promptvault

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::filter::ALL_CATEGORIES;

#[derive(Parser, Debug)]
#[command(name = "pv")]
#[command(author, version, about = "Prompt template catalog and personal collection", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Subcommand to execute (default: repl)
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start an interactive session
    Repl,

    /// List catalog templates
    Catalog {
        /// Search text matched against title, category, and description
        #[arg(short, long, default_value = "")]
        query: String,

        /// Category to show ("all" for every category)
        #[arg(short = 'k', long, default_value = ALL_CATEGORIES)]
        category: String,
    },

    /// List catalog categories
    Categories,

    /// Print a catalog template's full text
    Show {
        /// Template ID
        #[arg(required = true)]
        id: String,
    },

    /// Write a default config file
    InitConfig {
        /// Where to write it (default: ~/.config/promptvault/config.yml)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
