//! multisort: sort multiples of `x y limit` tasks into an output file.
//!
//! Usage: multisort <INPUT> <OUTPUT> [OPTIONS]

use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use multisort::commands::MultiplesCommand;
use multisort::config::RunConfig;

#[derive(Parser)]
#[command(name = "multisort")]
#[command(version)]
#[command(about = "Stream x/y/limit tasks into an output file sorted by multiple count", long_about = None)]
struct Cli {
    /// Input file, one `x y limit` task per line
    input: PathBuf,

    /// Output file (must not exist yet)
    output: PathBuf,

    /// Don't echo result lines to stdout
    #[arg(short, long)]
    quiet: bool,

    /// Sync the output file to disk after every record
    #[arg(long)]
    sync: bool,

    /// Print run statistics to stderr
    #[arg(long)]
    stats: bool,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    // Every failure exits with status 0; only the diagnostic tells it apart.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            process::exit(0);
        }
    };

    init_logging(cli.verbose);

    let config = RunConfig::new()
        .with_echo(!cli.quiet)
        .with_sync(cli.sync)
        .with_stats(cli.stats);
    let cmd = MultiplesCommand::new(config);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match cmd.run(&cli.input, &cli.output, &mut handle) {
        Ok(stats) => {
            if cmd.config.stats {
                eprintln!("{}", stats);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(0);
        }
    }
}
