mod cmd;
mod fs;
mod repo;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Repository maintenance tasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the local quality gate (fetch/check/test/fmt/clippy/build).
    Preflight,
    /// Capture fixture sha256 and `cmn-launch --help`, `modes`, `schema` output.
    HelpBaseline {
        /// Output file path (defaults to docs/cli-baseline.txt)
        #[arg(value_name = "OUT")]
        out: Option<std::path::PathBuf>,
    },
}

fn main() {
    if let Err(err) = real_main() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Preflight => {
            cmd::preflight::run()?;
        }
        Command::HelpBaseline { out } => {
            cmd::help_baseline::run(out)?;
        }
    }
    Ok(())
}
