use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use palaver_core::OriginKind;

/// Result filter by owning entity kind.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OriginFilter {
    Actor,
    Variable,
    Conversation,
    Dialogue,
}

impl OriginFilter {
    pub fn kind(self) -> OriginKind {
        match self {
            OriginFilter::Actor => OriginKind::Actor,
            OriginFilter::Variable => OriginKind::Variable,
            OriginFilter::Conversation => OriginKind::Conversation,
            OriginFilter::Dialogue => OriginKind::DialogueEntry,
        }
    }
}

#[derive(Parser)]
#[command(name = "palaver", bin_name = "palaver")]
#[command(about = "Word-indexed search over dialogue dataset dumps")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Interactively search a dump's pooled text
    #[command(after_help = r#"EXAMPLES:
  palaver search dump.json
  palaver search dump.json --origin dialogue"#)]
    Search {
        /// Path to the dataset dump (JSON)
        dump: PathBuf,

        /// Only print hits owned by this kind of entity
        #[arg(long, value_name = "KIND")]
        origin: Option<OriginFilter>,
    },

    /// Print pool and index statistics for a dump
    Stats {
        /// Path to the dataset dump (JSON)
        dump: PathBuf,
    },
}
