//! pcmwav CLI
//!
//! Command-line front end for the pcmwav codec and transforms.

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pcmwav::cli::commands;
use pcmwav::cli::{Cli, Commands};
use pcmwav::WavError;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("pcmwav v{}", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("pcmwav v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {:#}", err);
        if let Some(wav_err) = err.downcast_ref::<WavError>() {
            eprintln!("Code: {}", wav_err.error_code());
            for suggestion in wav_err.recovery_suggestions() {
                eprintln!("  - {}", suggestion);
            }
        }
        std::process::exit(1);
    }
}

fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Info { input, json } => commands::show_info(&input, json),
        Commands::SpeedUp {
            input,
            output,
            factor,
        } => commands::speed_up(&input, &output, factor),
        Commands::SlowDown {
            input,
            output,
            factor,
        } => commands::slow_down(&input, &output, factor),
        Commands::Resample {
            input,
            output,
            rate,
            resampler,
        } => commands::resample(&input, &output, rate, &resampler),
        Commands::Mono { input, output } => commands::mono(&input, &output),
        Commands::Stereo { input, output } => commands::stereo(&input, &output),
        Commands::Concat {
            base,
            addition,
            output,
            resampler,
        } => commands::concat(&base, &addition, &output, &resampler),
    }
}
