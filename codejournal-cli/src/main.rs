use std::process;

use clap::Parser;
use codejournal_lib::Repository;
use colored::Colorize;
use sysexits::ExitCode;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod entry;

#[derive(Parser, Debug)]
#[command(name = "codejournal")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: entry::Command,

    /// Override the storage key the entries are kept under
    #[arg(short, long, global = true)]
    key: Option<String>,
}

fn main() -> process::ExitCode {
    human_panic::setup_panic!();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("setting default subscriber failed: {e}");
    }

    let cli = Cli::parse();

    let repo = match Repository::new() {
        Ok(repo) => repo,
        Err(e) => {
            error!("Failed to open the journal: {e}");
            eprintln!("{} {e}", "error:".red().bold());
            return ExitCode::IoErr.into();
        }
    };

    if let Some(key) = &cli.key {
        repo.cfg().write().set_storage_key(key.clone());
    }

    match entry::handle(&repo, &cli.command) {
        Ok(()) => ExitCode::Ok.into(),
        Err(failure) => {
            eprintln!("{} {failure}", "error:".red().bold());
            failure.exit_code().into()
        }
    }
}
