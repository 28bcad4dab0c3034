//! Script-debugger binary entry point.
//!
//! Replays a session transcript and prints the resulting trace as JSON lines.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::process::ExitCode;

use script_debugger::cli::{self, Args};
use script_debugger::config::Config;
use script_debugger::{logging, replay};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Run with --help for usage.");
            return ExitCode::from(2);
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }
    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Ignore failure: a subscriber may already be installed
    let _ = logging::init_with_filter(config.log_filter());
    info!("script-debugger v{}", env!("CARGO_PKG_VERSION"));

    match run(&args, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "replay failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args, config: &Config) -> script_debugger::Result<()> {
    let options = config.debugger_options();

    let trace = match args.transcript {
        Some(ref path) => {
            info!(path = %path.display(), "reading transcript");
            let file = File::open(path)?;
            replay::replay(BufReader::new(file), options).await?
        }
        None => {
            info!("reading transcript from stdin");
            let stdin = io::stdin();
            replay::replay(stdin.lock(), options).await?
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in &trace {
        serde_json::to_writer(&mut out, line)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    info!(lines = trace.len(), "replay complete");
    Ok(())
}
