use std::path::PathBuf;

use clap::Parser;

mod platform;

use platform::LogDestination;

#[derive(Parser, Debug)]
#[command(name = "mail-triage")]
#[command(about = "Classify emails with a remote triage server from the terminal")]
pub struct Cli {
    /// Configuration file (RON). Missing files mean defaults.
    #[arg(short, long, default_value = "mail_triage.ron")]
    config: PathBuf,

    /// Server root URL, overriding the configuration file
    #[arg(short, long)]
    server: Option<String>,

    /// Where log output goes
    #[arg(long, value_enum)]
    log: Option<LogDestination>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> anyhow::Result<()> {
    platform::run_app(Cli::parse())
}
