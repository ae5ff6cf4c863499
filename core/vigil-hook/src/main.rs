//! Claude Code lifecycle hook binary.
//!
//! Configured once for every hook event vigil cares about; the payload
//! on stdin says which event actually fired. A hook must never block
//! or break the session, so failures are logged and reported on stderr
//! while the process still exits zero.

mod handle;
mod logging;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vigil-hook", about = "Claude Code lifecycle hook", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read one hook payload from stdin and handle it.
    Handle,
}

fn main() {
    let _logging_guard = logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Handle => {
            if let Err(e) = handle::run() {
                tracing::error!(error = %e, "hook failed");
                eprintln!("[vigil-hook error]: {}", e);
            }
        }
    }
}
