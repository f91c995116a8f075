//! dirods: store, retrieve and manage datasets in iRODS.
//!
//! A dataset is a directory in the dtool layout: data files, a manifest
//! listing them by content hash, admin metadata and a README. dirods copies
//! datasets into and out of an iRODS collection named after the dataset's
//! uuid by driving the icommands client (`imkdir`, `iput`, `iget`, `imeta`,
//! `ils`).
//!
//! # Modules
//!
//! - [`dataset`]: Local dataset layout (admin metadata, manifest)
//! - [`irods`]: icommands invocation, remote paths and output parsing
//! - [`transfer`]: The put and get operations
//! - [`meta`]: Collection metadata and listing
//! - [`config`]: The zone datasets are stored under
//! - [`error`]: Error types for dirods operations

pub mod config;
pub mod dataset;
pub mod error;
pub mod irods;
pub mod meta;
pub mod transfer;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub use config::{Config, Zone};
pub use dataset::DataSet;
pub use error::DirodsError;

use irods::{CommandRunner, ProcessRunner};

/// The dirods CLI application.
#[derive(Parser)]
#[command(name = "dirods")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// iRODS zone that dataset collections live under.
    #[arg(long, global = true, env = "DIRODS_ZONE", default_value = config::DEFAULT_ZONE)]
    zone: Zone,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Store a local dataset in iRODS.
    Put(DatasetArgs),
    /// Fetch a dataset from iRODS by uuid.
    Get(GetArgs),
    /// Attach a dataset's admin metadata to its collection.
    Storemeta(DatasetArgs),
    /// List stored datasets with their names.
    List,
}

/// Arguments for subcommands that read a local dataset.
#[derive(clap::Args)]
struct DatasetArgs {
    /// Root directory of the dataset.
    dataset_path: PathBuf,
}

/// Arguments for the get subcommand.
#[derive(clap::Args)]
struct GetArgs {
    /// Uuid of the stored dataset.
    uuid: String,

    /// Directory to create the dataset in.
    #[arg(long, default_value = ".")]
    dest: PathBuf,
}

/// Run the dirods CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), DirodsError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::new(cli.zone);
    let mut runner = ProcessRunner::new();

    match cli.command {
        Some(Commands::Put(args)) => run_put(&config, &mut runner, args),
        Some(Commands::Get(args)) => run_get(&config, &mut runner, args),
        Some(Commands::Storemeta(args)) => run_storemeta(&config, &mut runner, args),
        Some(Commands::List) => run_list(&config, &mut runner),
        None => {
            println!("dirods {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Store, retrieve and manage datasets in iRODS.");
            println!();
            println!("Run 'dirods --help' for usage information.");
            Ok(())
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the `-v` level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dirods={level}")));

    // A subscriber may already be installed when embedded.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn run_put(
    config: &Config,
    runner: &mut dyn CommandRunner,
    args: DatasetArgs,
) -> Result<(), DirodsError> {
    let dataset = DataSet::from_path(&args.dataset_path)?;
    let report = transfer::put_dataset(runner, &config.zone, &dataset)?;
    print!("{report}");
    report.into_result().map(|_| ())
}

fn run_get(
    config: &Config,
    runner: &mut dyn CommandRunner,
    args: GetArgs,
) -> Result<(), DirodsError> {
    let report = transfer::get_dataset(runner, &config.zone, &args.uuid, &args.dest)?;
    print!("{report}");
    report.into_result().map(|_| ())
}

fn run_storemeta(
    config: &Config,
    runner: &mut dyn CommandRunner,
    args: DatasetArgs,
) -> Result<(), DirodsError> {
    let dataset = DataSet::from_path(&args.dataset_path)?;
    let report = meta::store_metadata(runner, &config.zone, &dataset)?;
    print!("{report}");
    report.into_result().map(|_| ())
}

fn run_list(config: &Config, runner: &mut dyn CommandRunner) -> Result<(), DirodsError> {
    for entry in meta::list_datasets(runner, &config.zone)? {
        println!("{entry}");
    }
    Ok(())
}
