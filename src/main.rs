use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use prompter::batch::{self, BatchConfig};
use prompter::shell::Shell;
use prompter::{normalize, source};

#[derive(Parser, Debug)]
#[command(name = "prompter")]
#[command(about = "Terminal reader for act/scene structured play scripts")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read plays interactively from a directory of normalized texts
    Read {
        /// Directory of normalized play files
        #[arg(default_value = "texts/folger-txt-mod")]
        plays_dir: PathBuf,
    },
    /// Normalize one raw text file
    Normalize {
        /// Raw source text
        input: PathBuf,
        /// Destination; prints to stdout when omitted
        output: Option<PathBuf>,
    },
    /// Normalize every text file in a directory
    Batch {
        /// Directory of raw source texts
        src_dir: PathBuf,
        /// Directory for normalized output
        dest_dir: PathBuf,
        /// Abort on first error
        #[arg(long)]
        fail_fast: bool,
        /// Suppress the console progress bar
        #[arg(long)]
        no_progress: bool,
        /// Stats output file path
        #[arg(long, default_value = "normalize_stats.json")]
        stats_out: PathBuf,
    },
}

fn main() -> Result<()> {
    // logs go to stderr so they never interleave with the reader screen
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Read { plays_dir } => {
            info!(plays_dir = %plays_dir.display(), "starting interactive reader");
            Shell::new(plays_dir)?.run()
        }
        Command::Normalize { input, output } => run_normalize(&input, output.as_deref()),
        Command::Batch {
            src_dir,
            dest_dir,
            fail_fast,
            no_progress,
            stats_out,
        } => {
            let config = BatchConfig {
                fail_fast,
                show_progress: !no_progress,
            };
            let stats = batch::run(&src_dir, &dest_dir, &config)?;
            batch::write_stats(&stats, &stats_out)?;

            println!(
                "Processed {} file(s): {} succeeded, {} failed",
                stats.files_total, stats.files_succeeded, stats.files_failed
            );
            println!("Normalized files saved to: {}", dest_dir.display());
            println!("Run stats written to: {}", stats_out.display());
            Ok(())
        }
    }
}

fn run_normalize(input: &std::path::Path, output: Option<&std::path::Path>) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("input file not found: {}", input.display());
    }

    let text = normalize::normalize_path(input)?;
    match output {
        Some(path) => {
            source::write_text(path, &text)?;
            println!("Normalized text written to: {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}
