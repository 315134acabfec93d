mod commands;
mod terminal;

use std::process::ExitCode;

use arpr_core::StopToken;
use commands::CommandLine;
use is_root::is_root;
use terminal::{logging, print};
use tracing::{error, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();
    let mode = match commands.mode() {
        Ok(mode) => mode,
        Err(e) => e.exit(),
    };

    logging::init_logging(commands.verbose);

    if !is_root() {
        error!("{}", arpr_core::Error::Privilege);
        return ExitCode::FAILURE;
    }

    let cfg = commands.config();
    let stop = StopToken::new();
    let interrupt = stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping...");
            interrupt.cancel();
        }
    });

    let outcome = tokio::task::spawn_blocking(move || commands::run(mode, &cfg, &stop)).await;
    match outcome {
        Ok(Ok(())) => {
            print::fat_separator();
            ExitCode::SUCCESS
        }
        Ok(Err(e)) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("Worker thread failed: {e}");
            ExitCode::FAILURE
        }
    }
}
