//! binconf command-line tool
//!
//! Reads the vtable list of a decompiler configuration document (or a bare
//! JSON array of vtables) and normalizes, summarizes, or queries it.

mod commands;
mod logging;

use binconf_config::{DuplicatePolicy, VTABLES_KEY};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "binconf")]
#[command(about = "Inspect and normalize vtable configuration data", long_about = None)]
#[command(version)]
struct Cli {
    /// Log filter directives (overrides BINCONF_LOG)
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that reads a document
#[derive(Args)]
struct Input {
    /// Configuration document or vtable list (JSON)
    file: PathBuf,
    /// Document field holding the vtable list
    #[arg(long, default_value = VTABLES_KEY)]
    key: String,
    /// What to do with a second vtable or slot at the same address
    #[arg(long, default_value_t = DuplicatePolicy::Keep)]
    on_duplicate: DuplicatePolicy,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite vtables in canonical order with default fields omitted
    Normalize {
        #[command(flatten)]
        input: Input,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a summary of the vtables
    Stats {
        #[command(flatten)]
        input: Input,
    },

    /// Print the vtable at an address, or the vtable owning a slot there
    Lookup {
        #[command(flatten)]
        input: Input,
        /// Address (hex with 0x prefix, or decimal)
        address: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log.as_deref());

    match cli.command {
        Commands::Normalize { input, output } => {
            commands::normalize::execute(&input.into(), output.as_deref())
        }
        Commands::Stats { input } => commands::stats::execute(&input.into()),
        Commands::Lookup { input, address } => commands::lookup::execute(&input.into(), &address),
    }
}

impl From<Input> for commands::Source {
    fn from(input: Input) -> Self {
        commands::Source {
            path: input.file,
            key: input.key,
            policy: input.on_duplicate,
        }
    }
}
