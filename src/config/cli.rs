use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "nfr-funding")]
#[command(about = "Look up and search verified NFR fundings")]
pub struct CliConfig {
    /// TOML configuration file; the environment is used when omitted
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Resolve a single funding by its NFR project id
    Lookup { identifier: String },

    /// Search fundings by exact lead name or free-text term
    Search {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        term: Option<String>,

        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        offset: String,

        #[arg(long, default_value = "10", allow_hyphen_values = true)]
        size: String,
    },
}
