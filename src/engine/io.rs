//! WAV file I/O
//!
//! Thin wrappers that open or create a file and hand it to the codec.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::engine::buffer::Wav;
use crate::error::{Result, WavError};

impl Wav {
    /// Read and decode a WAV file
    ///
    /// # Errors
    /// * `FileNotFound` - if the file does not exist
    /// * any decode error from [`crate::engine::codec::decode`]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(WavError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)?;
        let wav = Wav::decode(BufReader::new(file))?;
        debug!(
            path = %path.display(),
            channels = wav.channels(),
            sample_rate = wav.sample_rate(),
            groups = wav.num_channel_groups(),
            "opened wav file"
        );
        Ok(wav)
    }

    /// Encode and write this buffer to a file, replacing any existing file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        // Encode first so an invalid buffer never truncates the target
        let bytes = self.encode()?;
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(&bytes)?;
        writer.flush()?;
        debug!(path = %path.display(), bytes = bytes.len(), "saved wav file");
        Ok(())
    }

    /// Summarize this buffer's header and content
    pub fn info(&self) -> Result<WavInfo> {
        WavInfo::from_wav(self)
    }
}

/// Header summary of a buffer, as reported by the `info` command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WavInfo {
    pub format_tag: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data_size: u32,
    pub channel_groups: usize,
    pub duration_secs: f64,
    /// SHA-256 of the encoded file image
    pub checksum: String,
}

impl WavInfo {
    pub fn from_wav(wav: &Wav) -> Result<Self> {
        let bytes = wav.encode()?;
        Ok(Self {
            format_tag: wav.format_tag(),
            channels: wav.channels(),
            sample_rate: wav.sample_rate(),
            byte_rate: wav.byte_rate(),
            block_align: wav.block_align(),
            bits_per_sample: wav.bits_per_sample(),
            data_size: wav.data_size(),
            channel_groups: wav.num_channel_groups(),
            duration_secs: wav.duration_secs(),
            checksum: calculate_checksum(&bytes),
        })
    }
}

/// SHA-256 of a byte slice as lowercase hex
pub fn calculate_checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
