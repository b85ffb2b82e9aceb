//! CLI Module
//!
//! Command-line interface for inspecting and transforming PCM WAV files.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pcmwav - PCM WAV inspection and transforms
#[derive(Parser, Debug)]
#[command(name = "pcmwav")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Resampler tuning shared by commands that may resample
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ResamplerArgs {
    /// Low-pass cutoff frequency in Hz
    #[arg(long)]
    pub cutoff: Option<f64>,

    /// Kernel width in input samples
    #[arg(long)]
    pub window: Option<usize>,

    /// JSON file with resampler settings (flags override it)
    #[arg(long = "resampler-config")]
    pub resampler_config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print header fields and a checksum
    #[command(name = "info")]
    Info {
        /// Input WAV file
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Raise tempo and pitch by a factor
    #[command(name = "speed-up")]
    SpeedUp {
        /// Input WAV file
        input: PathBuf,

        /// Output WAV file
        output: PathBuf,

        /// Rate multiplier
        #[arg(short, long)]
        factor: f64,
    },

    /// Lower tempo and pitch by a factor
    #[command(name = "slow-down")]
    SlowDown {
        /// Input WAV file
        input: PathBuf,

        /// Output WAV file
        output: PathBuf,

        /// Rate divisor
        #[arg(short, long)]
        factor: f64,
    },

    /// Change sample rate, keeping duration and pitch
    #[command(name = "resample")]
    Resample {
        /// Input WAV file
        input: PathBuf,

        /// Output WAV file
        output: PathBuf,

        /// Target sample rate in Hz
        #[arg(short, long)]
        rate: u32,

        #[command(flatten)]
        resampler: ResamplerArgs,
    },

    /// Fold stereo down to mono
    #[command(name = "mono")]
    Mono {
        /// Input WAV file
        input: PathBuf,

        /// Output WAV file
        output: PathBuf,
    },

    /// Duplicate mono into stereo
    #[command(name = "stereo")]
    Stereo {
        /// Input WAV file
        input: PathBuf,

        /// Output WAV file
        output: PathBuf,
    },

    /// Append one file to another
    #[command(name = "concat")]
    Concat {
        /// File that comes first
        base: PathBuf,

        /// File appended after the base
        addition: PathBuf,

        /// Output WAV file
        output: PathBuf,

        #[command(flatten)]
        resampler: ResamplerArgs,
    },
}
