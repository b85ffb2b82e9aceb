//! CLI Command Implementations
//!
//! Each command loads its input file(s), runs one transform and writes the
//! result.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::ResamplerArgs;
use crate::dsp::ResamplerConfig;
use crate::engine::Wav;

fn load(path: &Path) -> Result<Wav> {
    Wav::open(path).with_context(|| format!("failed to read {}", path.display()))
}

fn store(wav: &Wav, path: &Path) -> Result<()> {
    wav.save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!(
        "Wrote {}: {} ch, {} Hz, {}-bit, {} groups",
        path.display(),
        wav.channels(),
        wav.sample_rate(),
        wav.bits_per_sample(),
        wav.num_channel_groups()
    );
    Ok(())
}

/// Resolve resampler settings: defaults, then the config file, then flags
pub fn resampler_config(args: &ResamplerArgs) -> Result<ResamplerConfig> {
    let mut config = match &args.resampler_config {
        Some(path) => ResamplerConfig::from_json_file(path)
            .with_context(|| format!("failed to load resampler config {}", path.display()))?,
        None => ResamplerConfig::default(),
    };
    if let Some(cutoff) = args.cutoff {
        config = config.with_cutoff(cutoff);
    }
    if let Some(window) = args.window {
        config = config.with_window_width(window);
    }
    config.validate()?;
    Ok(config)
}

/// Print a file's header fields.
pub fn show_info(input: &Path, json: bool) -> Result<()> {
    info!("Inspecting: {}", input.display());

    let wav = load(input)?;
    let summary = wav.info()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("File: {}", input.display());
    println!("{:-<60}", "");
    println!("Format tag:      {}", summary.format_tag);
    println!("Channels:        {}", summary.channels);
    println!("Sample rate:     {} Hz", summary.sample_rate);
    println!("Byte rate:       {}", summary.byte_rate);
    println!("Block align:     {}", summary.block_align);
    println!("Bits per sample: {}", summary.bits_per_sample);
    println!("Data size:       {} bytes", summary.data_size);
    println!("Channel groups:  {}", summary.channel_groups);
    println!("Duration:        {:.3} s", summary.duration_secs);
    println!("SHA-256:         {}", summary.checksum);

    Ok(())
}

/// Raise tempo and pitch.
pub fn speed_up(input: &Path, output: &Path, factor: f64) -> Result<()> {
    info!("Speeding up {} by {}", input.display(), factor);

    let mut wav = load(input)?;
    wav.speed_up(factor)?;
    store(&wav, output)
}

/// Lower tempo and pitch.
pub fn slow_down(input: &Path, output: &Path, factor: f64) -> Result<()> {
    info!("Slowing down {} by {}", input.display(), factor);

    let mut wav = load(input)?;
    wav.slow_down(factor)?;
    store(&wav, output)
}

/// Change sample rate.
pub fn resample(input: &Path, output: &Path, rate: u32, args: &ResamplerArgs) -> Result<()> {
    let config = resampler_config(args)?;
    info!(
        "Resampling {} to {} Hz (cutoff {} Hz, window {})",
        input.display(),
        rate,
        config.cutoff_hz,
        config.window_width
    );

    let mut wav = load(input)?;
    wav.resample_with(rate, &config)?;
    store(&wav, output)
}

/// Fold stereo to mono.
pub fn mono(input: &Path, output: &Path) -> Result<()> {
    info!("Converting {} to mono", input.display());

    let mut wav = load(input)?;
    wav.convert_to_mono()?;
    store(&wav, output)
}

/// Duplicate mono to stereo.
pub fn stereo(input: &Path, output: &Path) -> Result<()> {
    info!("Converting {} to stereo", input.display());

    let mut wav = load(input)?;
    wav.convert_to_stereo()?;
    store(&wav, output)
}

/// Append `addition` after `base`.
pub fn concat(base: &Path, addition: &Path, output: &Path, args: &ResamplerArgs) -> Result<()> {
    info!("Appending {} to {}", addition.display(), base.display());

    let config = resampler_config(args)?;
    let mut joined = load(base)?;
    let addition = load(addition)?;
    joined.concat_with(&addition, &config)?;
    store(&joined, output)
}
