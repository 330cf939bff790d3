use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use hexreach_lib::{DistanceOptions, DEFAULT_MAX_DISTANCE};

mod commands;
mod output;

use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Hex map reachability utilities")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute distances from one hex to every hex in range.
    Distances(DistancesArgs),
    /// Check that a map snapshot loads and report its size.
    Validate {
        /// Path to the JSON map snapshot.
        #[arg(long)]
        map: PathBuf,
    },
}

#[derive(Args, Debug)]
struct DistancesArgs {
    /// Path to the JSON map snapshot.
    #[arg(long)]
    map: PathBuf,
    /// Label of the source hex.
    #[arg(long = "from")]
    from: String,
    /// Search radius in layers.
    #[arg(long = "max", default_value_t = DEFAULT_MAX_DISTANCE)]
    max_distance: u32,
    /// Ignore authored custom links.
    #[arg(long)]
    no_custom_links: bool,
    /// Ignore Spatial Tear and Gravity Wave anomalies.
    #[arg(long)]
    no_border_anomalies: bool,
    /// Treat supernovae as ordinary terrain.
    #[arg(long)]
    no_supernova: bool,
    /// Treat gravity rifts as ordinary terrain.
    #[arg(long)]
    no_rift: bool,
    /// Allow leaving nebulae.
    #[arg(long)]
    no_nebula: bool,
    /// Treat asteroid fields as ordinary terrain.
    #[arg(long)]
    no_asteroid: bool,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl DistancesArgs {
    fn options(&self) -> DistanceOptions {
        DistanceOptions {
            use_custom_links: !self.no_custom_links,
            use_border_anomalies: !self.no_border_anomalies,
            use_supernova: !self.no_supernova,
            use_rift: !self.no_rift,
            use_nebula: !self.no_nebula,
            use_asteroid: !self.no_asteroid,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Distances(args) => commands::distances::run(
            &args.map,
            &args.from,
            args.max_distance,
            &args.options(),
            args.format,
        ),
        Command::Validate { map } => commands::validate::run(&map),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
