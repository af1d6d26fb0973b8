use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::debug;
use presto_protocol::registry::CapabilityRegistry;
use presto_protocol_hive::HiveProtocolConfig;

use crate::commands::{self, CapabilityArg};
use crate::logging::init_logs;

#[derive(Parser)]
#[command(version, name = "presto-protocol", about = "Inspect Presto connector protocol messages")]
struct Cli {
    /// The discriminator of Hive variants, overriding PRESTO_HIVE__CONNECTOR_ID
    #[arg(long, global = true)]
    connector_id: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a capability value and print it
    Decode {
        #[arg(long, short, value_enum)]
        capability: CapabilityArg,
        /// The JSON file to read, or standard input if omitted
        file: Option<PathBuf>,
    },
    /// Decode and re-encode a capability value, and print the canonical JSON
    RoundTrip {
        #[arg(long, short, value_enum)]
        capability: CapabilityArg,
        /// The JSON file to read, or standard input if omitted
        file: Option<PathBuf>,
        /// Print the JSON on a single line
        #[arg(long)]
        compact: bool,
    },
    /// List the registered discriminators
    Variants {
        #[arg(long, short, value_enum)]
        capability: Option<CapabilityArg>,
    },
}

pub fn main(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_from(args);
    init_logs();

    let mut config = HiveProtocolConfig::load()?;
    if let Some(connector_id) = cli.connector_id {
        config = HiveProtocolConfig::extract(
            HiveProtocolConfig::figment().merge(("connector_id", connector_id)),
        )?;
    }
    debug!("using Hive connector id {}", config.connector_id);
    let registry = CapabilityRegistry::global();
    presto_protocol_hive::register(registry, &config)?;

    let output = match cli.command {
        Command::Decode { capability, file } => {
            let node = commands::read_input(file.as_deref())?;
            commands::decode(registry, capability, &node)?
        }
        Command::RoundTrip {
            capability,
            file,
            compact,
        } => {
            let node = commands::read_input(file.as_deref())?;
            commands::round_trip(registry, capability, &node, compact)?
        }
        Command::Variants { capability } => commands::variants(registry, capability),
    };
    println!("{output}");
    Ok(())
}
