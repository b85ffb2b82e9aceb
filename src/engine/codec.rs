//! Binary Codec
//!
//! Parses and serializes the RIFF/WAVE container. Only the "fmt " and
//! "data" chunks are interpreted; any other chunk is skipped by its declared
//! length. All header fields and samples are little-endian.
//!
//! Layout written by `encode`:
//!
//! ```text
//! 0   "RIFF"  4   36 + data_size   8  "WAVE"
//! 12  "fmt "  16  16               20 format tag (2)  22 channels (2)
//! 24  sample rate (4)  28 byte rate (4)  32 block align (2)  34 bits (2)
//! 36  "data"  40  data_size        44 samples...
//! ```

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use tracing::{debug, warn};

use crate::engine::buffer::{Wav, FORMAT_PCM};
use crate::engine::sample::{BitDepth, ChannelGroup, Sample};
use crate::error::{Result, WavError};

const RIFF_TAG: &[u8; 4] = b"RIFF";
const WAVE_TAG: &[u8; 4] = b"WAVE";
const FMT_TAG: &[u8; 4] = b"fmt ";
const DATA_TAG: &[u8; 4] = b"data";

/// Size of the PCM fmt chunk body
const FMT_CHUNK_SIZE: u32 = 16;

/// Bytes between the RIFF size field and the first sample, plus "WAVE"
const RIFF_HEADER_OVERHEAD: u32 = 36;

/// Upper bound on channel groups pre-allocated from an untrusted header
const MAX_PREALLOCATED_GROUPS: usize = 1 << 20;

/// Fields of a "fmt " chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FmtChunk {
    format_tag: u16,
    channels: u16,
    sample_rate: u32,
    byte_rate: u32,
    block_align: u16,
    bit_depth: BitDepth,
}

// ============================================================================
// Decode
// ============================================================================

/// Decode a WAV byte stream into a `Wav`
///
/// # Errors
/// * `BadMagic` - the stream doesn't start with "RIFF" ... "WAVE"
/// * `TruncatedStream` - the stream ends before a field or chunk it declares
/// * `UnsupportedBitDepth` - bits per sample is not 8, 16, 32 or 64
/// * `UnsupportedFormat` - format tag is not linear PCM
/// * `MissingChunk` - a "data" chunk precedes the "fmt " chunk
/// * `ChannelCountMismatch` - the fmt chunk declares zero channels
/// * `InvalidSampleRate` - the fmt chunk declares a zero sample rate
pub fn decode<R: Read>(mut input: R) -> Result<Wav> {
    let riff = read_tag(&mut input, "RIFF marker")?;
    expect_tag(&riff, RIFF_TAG, "RIFF", 0)?;

    let _riff_size = input
        .read_u32::<LittleEndian>()
        .map_err(read_error("RIFF size field"))?;

    let wave = read_tag(&mut input, "WAVE marker")?;
    expect_tag(&wave, WAVE_TAG, "WAVE", 8)?;

    let mut fmt: Option<FmtChunk> = None;

    loop {
        let tag = read_tag(&mut input, "chunk tag")?;
        let length = input
            .read_u32::<LittleEndian>()
            .map_err(read_error("chunk length"))?;

        match &tag {
            FMT_TAG => {
                let chunk = read_fmt_chunk(&mut input, length)?;
                debug!(
                    channels = chunk.channels,
                    sample_rate = chunk.sample_rate,
                    bits = chunk.bit_depth.bits(),
                    "read fmt chunk"
                );
                fmt = Some(chunk);
            }
            DATA_TAG => {
                let chunk = fmt.ok_or(WavError::MissingChunk { tag: "fmt " })?;
                let groups = read_data_chunk(&mut input, &chunk, length)?;
                debug!(groups = groups.len(), data_size = length, "read data chunk");
                return Wav::from_decoded(
                    chunk.format_tag,
                    chunk.channels,
                    chunk.sample_rate,
                    chunk.byte_rate,
                    chunk.block_align,
                    chunk.bit_depth,
                    groups,
                );
            }
            _ => {
                debug!(tag = %String::from_utf8_lossy(&tag), length, "skipping chunk");
                skip(&mut input, length as u64, "skipped chunk")?;
            }
        }
    }
}

/// Decode a WAV file held in memory
pub fn decode_bytes(bytes: &[u8]) -> Result<Wav> {
    decode(bytes)
}

fn read_fmt_chunk<R: Read>(input: &mut R, length: u32) -> Result<FmtChunk> {
    if length < FMT_CHUNK_SIZE {
        return Err(WavError::truncated(format!(
            "fmt chunk declares {} bytes, needs {}",
            length, FMT_CHUNK_SIZE
        )));
    }

    let format_tag = input
        .read_u16::<LittleEndian>()
        .map_err(read_error("fmt format tag"))?;
    let channels = input
        .read_u16::<LittleEndian>()
        .map_err(read_error("fmt channel count"))?;
    let sample_rate = input
        .read_u32::<LittleEndian>()
        .map_err(read_error("fmt sample rate"))?;
    let byte_rate = input
        .read_u32::<LittleEndian>()
        .map_err(read_error("fmt byte rate"))?;
    let block_align = input
        .read_u16::<LittleEndian>()
        .map_err(read_error("fmt block align"))?;
    let bits_per_sample = input
        .read_u16::<LittleEndian>()
        .map_err(read_error("fmt bits per sample"))?;

    // Extension bytes (cbSize and friends) carry nothing PCM needs
    skip(input, (length - FMT_CHUNK_SIZE) as u64, "fmt chunk extension")?;

    let bit_depth = BitDepth::try_from_bits(bits_per_sample)?;
    if format_tag != FORMAT_PCM {
        return Err(WavError::UnsupportedFormat { format_tag });
    }
    if channels == 0 {
        return Err(WavError::ChannelCountMismatch {
            expected: 1,
            found: 0,
        });
    }
    if sample_rate == 0 {
        return Err(WavError::InvalidSampleRate { rate: 0 });
    }

    Ok(FmtChunk {
        format_tag,
        channels,
        sample_rate,
        byte_rate,
        block_align,
        bit_depth,
    })
}

fn read_data_chunk<R: Read>(input: &mut R, fmt: &FmtChunk, length: u32) -> Result<Vec<ChannelGroup>> {
    let group_bytes = fmt.bit_depth.bytes() as usize * fmt.channels as usize;
    let group_count = length as usize / group_bytes;
    let trailing = length as usize % group_bytes;

    let mut groups = Vec::with_capacity(group_count.min(MAX_PREALLOCATED_GROUPS));
    for _ in 0..group_count {
        let mut samples = Vec::with_capacity(fmt.channels as usize);
        for _ in 0..fmt.channels {
            samples.push(read_sample(input, fmt.bit_depth)?);
        }
        groups.push(ChannelGroup::new(samples));
    }

    if trailing > 0 {
        warn!(trailing, "dropping bytes that do not fill a whole channel group");
        skip(input, trailing as u64, "partial channel group")?;
    }

    Ok(groups)
}

fn read_sample<R: Read>(input: &mut R, depth: BitDepth) -> Result<Sample> {
    let sample = match depth {
        BitDepth::Bits8 => input.read_u8().map(Sample::U8),
        BitDepth::Bits16 => input.read_i16::<LittleEndian>().map(Sample::I16),
        BitDepth::Bits32 => input.read_i32::<LittleEndian>().map(Sample::I32),
        BitDepth::Bits64 => input.read_i64::<LittleEndian>().map(Sample::I64),
    };
    sample.map_err(read_error("sample data"))
}

fn read_tag<R: Read>(input: &mut R, context: &'static str) -> Result<[u8; 4]> {
    let mut tag = [0u8; 4];
    input.read_exact(&mut tag).map_err(read_error(context))?;
    Ok(tag)
}

fn expect_tag(found: &[u8; 4], expected: &[u8; 4], name: &'static str, offset: usize) -> Result<()> {
    if found != expected {
        return Err(WavError::BadMagic {
            offset,
            expected: name,
            found: String::from_utf8_lossy(found).into_owned(),
        });
    }
    Ok(())
}

fn skip<R: Read>(input: &mut R, length: u64, context: &'static str) -> Result<()> {
    let skipped = io::copy(&mut input.by_ref().take(length), &mut io::sink())?;
    if skipped < length {
        return Err(WavError::truncated(format!(
            "{}: expected {} bytes, found {}",
            context, length, skipped
        )));
    }
    Ok(())
}

/// Map a short read to `TruncatedStream`, anything else to `Io`
fn read_error(context: &'static str) -> impl Fn(io::Error) -> WavError {
    move |err| match err.kind() {
        io::ErrorKind::UnexpectedEof => WavError::truncated(context),
        _ => WavError::Io(err),
    }
}

// ============================================================================
// Encode
// ============================================================================

/// Encode a `Wav` into a complete WAV file image
///
/// # Errors
/// * `SampleWidthMismatch` - a sample disagrees with the buffer's bit depth
/// * `ChannelCountMismatch` - a channel group has the wrong number of samples
/// * `Overflow` - the RIFF size field would not fit in 32 bits
pub fn encode(wav: &Wav) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(RIFF_HEADER_OVERHEAD as usize + 8 + wav.data_size() as usize);
    encode_to(wav, &mut bytes)?;
    Ok(bytes)
}

/// Encode a `Wav` into any writer
///
/// The buffer is validated before the first byte is written.
pub fn encode_to<W: Write>(wav: &Wav, mut out: W) -> Result<()> {
    wav.validate()?;

    let riff_size = RIFF_HEADER_OVERHEAD
        .checked_add(wav.data_size())
        .ok_or_else(|| WavError::overflow(format!("RIFF size for {} data bytes exceeds u32", wav.data_size())))?;

    out.write_all(RIFF_TAG)?;
    out.write_u32::<LittleEndian>(riff_size)?;
    out.write_all(WAVE_TAG)?;

    out.write_all(FMT_TAG)?;
    out.write_u32::<LittleEndian>(FMT_CHUNK_SIZE)?;
    out.write_u16::<LittleEndian>(wav.format_tag())?;
    out.write_u16::<LittleEndian>(wav.channels())?;
    out.write_u32::<LittleEndian>(wav.sample_rate())?;
    out.write_u32::<LittleEndian>(wav.byte_rate())?;
    out.write_u16::<LittleEndian>(wav.block_align())?;
    out.write_u16::<LittleEndian>(wav.bits_per_sample())?;

    out.write_all(DATA_TAG)?;
    out.write_u32::<LittleEndian>(wav.data_size())?;

    for group in wav.channel_groups() {
        for sample in group {
            write_sample(&mut out, *sample)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn write_sample<W: Write>(out: &mut W, sample: Sample) -> io::Result<()> {
    match sample {
        Sample::U8(v) => out.write_u8(v),
        Sample::I16(v) => out.write_i16::<LittleEndian>(v),
        Sample::I32(v) => out.write_i32::<LittleEndian>(v),
        Sample::I64(v) => out.write_i64::<LittleEndian>(v),
    }
}

impl Wav {
    /// Decode a WAV byte stream. See [`decode`].
    pub fn decode<R: Read>(input: R) -> Result<Self> {
        decode(input)
    }

    /// Decode a WAV file held in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        decode_bytes(bytes)
    }

    /// Encode into a complete WAV file image. See [`encode`].
    pub fn encode(&self) -> Result<Vec<u8>> {
        encode(self)
    }

    /// Encode into any writer
    pub fn write_to<W: Write>(&self, out: W) -> Result<()> {
        encode_to(self, out)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Hand-assemble a WAV image with arbitrary chunks after "WAVE"
    fn riff(chunks: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
        let mut body = Vec::new();
        for (tag, payload) in chunks {
            body.extend_from_slice(*tag);
            body.extend_from_slice(&(payload.len() as u32).to_le_bytes());
            body.extend_from_slice(payload);
        }
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(4 + body.len() as u32).to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(&body);
        bytes
    }

    fn fmt_payload(format_tag: u16, channels: u16, sample_rate: u32, bits: u16) -> Vec<u8> {
        let block_align = channels * bits / 8;
        let byte_rate = sample_rate * block_align as u32;
        let mut p = Vec::new();
        p.extend_from_slice(&format_tag.to_le_bytes());
        p.extend_from_slice(&channels.to_le_bytes());
        p.extend_from_slice(&sample_rate.to_le_bytes());
        p.extend_from_slice(&byte_rate.to_le_bytes());
        p.extend_from_slice(&block_align.to_le_bytes());
        p.extend_from_slice(&bits.to_le_bytes());
        p
    }

    fn i16_payload(values: &[i16]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    fn wav_of(channels: u16, depth: BitDepth, frames: &[&[i64]]) -> Wav {
        let groups = frames
            .iter()
            .map(|f| ChannelGroup::from_values(f, depth))
            .collect();
        Wav::from_channel_groups(channels, 44100, depth, groups).unwrap()
    }

    #[test]
    fn test_decode_minimal_mono() {
        let bytes = riff(&[
            (FMT_TAG, fmt_payload(1, 1, 44100, 16)),
            (DATA_TAG, i16_payload(&[100, -50, 25, 0])),
        ]);

        let wav = decode_bytes(&bytes).unwrap();
        assert_eq!(wav.channels(), 1);
        assert_eq!(wav.sample_rate(), 44100);
        assert_eq!(wav.bit_depth(), BitDepth::Bits16);
        assert_eq!(wav.data_size(), 8);
        assert_eq!(
            wav.channel_samples(0).unwrap(),
            vec![Sample::I16(100), Sample::I16(-50), Sample::I16(25), Sample::I16(0)]
        );
    }

    #[test]
    fn test_decode_interleaved_stereo() {
        let bytes = riff(&[
            (FMT_TAG, fmt_payload(1, 2, 48000, 16)),
            (DATA_TAG, i16_payload(&[1, -1, 2, -2, 3, -3])),
        ]);

        let wav = decode_bytes(&bytes).unwrap();
        assert_eq!(wav.num_channel_groups(), 3);
        assert_eq!(wav.channel_groups()[2].samples(), &[Sample::I16(3), Sample::I16(-3)]);
    }

    #[test]
    fn test_decode_bad_riff_magic() {
        let mut bytes = riff(&[(FMT_TAG, fmt_payload(1, 1, 44100, 16))]);
        bytes[..4].copy_from_slice(b"RIFX");

        match decode_bytes(&bytes) {
            Err(WavError::BadMagic { offset, expected, found }) => {
                assert_eq!(offset, 0);
                assert_eq!(expected, "RIFF");
                assert_eq!(found, "RIFX");
            }
            other => panic!("Expected BadMagic, got: {:?}", other),
        }
    }

    #[test]
    fn test_decode_bad_wave_magic() {
        let mut bytes = riff(&[(FMT_TAG, fmt_payload(1, 1, 44100, 16))]);
        bytes[8..12].copy_from_slice(b"AVI ");

        assert!(matches!(
            decode_bytes(&bytes),
            Err(WavError::BadMagic { offset: 8, .. })
        ));
    }

    #[test]
    fn test_decode_truncated_header() {
        assert!(matches!(
            decode_bytes(b"RIF"),
            Err(WavError::TruncatedStream { .. })
        ));
        assert!(matches!(
            decode_bytes(b"RIFF\x00\x00"),
            Err(WavError::TruncatedStream { .. })
        ));
    }

    #[test]
    fn test_decode_truncated_data() {
        let mut bytes = riff(&[
            (FMT_TAG, fmt_payload(1, 1, 44100, 16)),
            (DATA_TAG, i16_payload(&[1, 2, 3, 4])),
        ]);
        bytes.truncate(bytes.len() - 3);

        assert!(matches!(
            decode_bytes(&bytes),
            Err(WavError::TruncatedStream { .. })
        ));
    }

    #[test]
    fn test_decode_missing_data_chunk() {
        let bytes = riff(&[(FMT_TAG, fmt_payload(1, 1, 44100, 16))]);
        assert!(matches!(
            decode_bytes(&bytes),
            Err(WavError::TruncatedStream { .. })
        ));
    }

    #[test]
    fn test_decode_skips_unknown_chunks() {
        let bytes = riff(&[
            (b"JUNK", vec![0xAA; 10]),
            (FMT_TAG, fmt_payload(1, 1, 22050, 16)),
            (b"LIST", b"INFOISFT\x04\x00\x00\x00test".to_vec()),
            (DATA_TAG, i16_payload(&[7, 8])),
        ]);

        let wav = decode_bytes(&bytes).unwrap();
        assert_eq!(wav.sample_rate(), 22050);
        assert_eq!(wav.channel_samples(0).unwrap(), vec![Sample::I16(7), Sample::I16(8)]);
    }

    #[test]
    fn test_decode_skips_fmt_extension() {
        let mut fmt = fmt_payload(1, 1, 44100, 16);
        fmt.extend_from_slice(&0u16.to_le_bytes());
        let bytes = riff(&[(FMT_TAG, fmt), (DATA_TAG, i16_payload(&[-9]))]);

        let wav = decode_bytes(&bytes).unwrap();
        assert_eq!(wav.channel_samples(0).unwrap(), vec![Sample::I16(-9)]);
    }

    #[test]
    fn test_decode_short_fmt_chunk() {
        let bytes = riff(&[(FMT_TAG, vec![1, 0, 1, 0])]);
        assert!(matches!(
            decode_bytes(&bytes),
            Err(WavError::TruncatedStream { .. })
        ));
    }

    #[test]
    fn test_decode_unsupported_bit_depth() {
        let bytes = riff(&[
            (FMT_TAG, fmt_payload(1, 1, 44100, 24)),
            (DATA_TAG, vec![0; 6]),
        ]);
        assert!(matches!(
            decode_bytes(&bytes),
            Err(WavError::UnsupportedBitDepth { bits: 24 })
        ));
    }

    #[test]
    fn test_decode_rejects_float_format() {
        let bytes = riff(&[
            (FMT_TAG, fmt_payload(3, 1, 44100, 32)),
            (DATA_TAG, vec![0; 4]),
        ]);
        assert!(matches!(
            decode_bytes(&bytes),
            Err(WavError::UnsupportedFormat { format_tag: 3 })
        ));
    }

    #[test]
    fn test_decode_rejects_zero_channels() {
        let bytes = riff(&[(FMT_TAG, fmt_payload(1, 0, 44100, 16))]);
        assert!(matches!(
            decode_bytes(&bytes),
            Err(WavError::ChannelCountMismatch { found: 0, .. })
        ));
    }

    #[test]
    fn test_decode_rejects_zero_sample_rate() {
        let bytes = riff(&[
            (FMT_TAG, fmt_payload(1, 1, 0, 16)),
            (DATA_TAG, i16_payload(&[1, 2])),
        ]);
        match decode_bytes(&bytes) {
            Err(WavError::InvalidSampleRate { rate }) => assert_eq!(rate, 0),
            other => panic!("Expected InvalidSampleRate error, got: {:?}", other),
        }
    }

    #[test]
    fn test_decode_data_before_fmt() {
        let bytes = riff(&[
            (DATA_TAG, i16_payload(&[1])),
            (FMT_TAG, fmt_payload(1, 1, 44100, 16)),
        ]);
        assert!(matches!(
            decode_bytes(&bytes),
            Err(WavError::MissingChunk { tag: "fmt " })
        ));
    }

    #[test]
    fn test_decode_drops_partial_group() {
        let mut data = i16_payload(&[1, 2, 3]);
        data.push(0x7F);
        let bytes = riff(&[(FMT_TAG, fmt_payload(1, 2, 44100, 16)), (DATA_TAG, data)]);

        let wav = decode_bytes(&bytes).unwrap();
        assert_eq!(wav.num_channel_groups(), 1);
        assert_eq!(wav.data_size(), 4);
    }

    #[test]
    fn test_decode_empty_data_chunk() {
        let bytes = riff(&[(FMT_TAG, fmt_payload(1, 2, 44100, 16)), (DATA_TAG, Vec::new())]);
        let wav = decode_bytes(&bytes).unwrap();
        assert!(wav.is_empty());
        assert_eq!(wav.channels(), 2);
    }

    #[test]
    fn test_decode_8bit_is_unsigned() {
        let bytes = riff(&[
            (FMT_TAG, fmt_payload(1, 1, 8000, 8)),
            (DATA_TAG, vec![0, 128, 255]),
        ]);
        let wav = decode_bytes(&bytes).unwrap();
        assert_eq!(
            wav.channel_samples(0).unwrap(),
            vec![Sample::U8(0), Sample::U8(128), Sample::U8(255)]
        );
    }

    #[test]
    fn test_encode_header_layout() {
        let wav = wav_of(1, BitDepth::Bits16, &[&[100], &[-50], &[25], &[0]]);
        let bytes = encode(&wav).unwrap();

        assert_eq!(bytes.len(), 44 + 8);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes(bytes[4..8].try_into().unwrap()), 36 + 8);
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(u32::from_le_bytes(bytes[16..20].try_into().unwrap()), 16);
        assert_eq!(u16::from_le_bytes(bytes[20..22].try_into().unwrap()), 1);
        assert_eq!(u16::from_le_bytes(bytes[22..24].try_into().unwrap()), 1);
        assert_eq!(u32::from_le_bytes(bytes[24..28].try_into().unwrap()), 44100);
        assert_eq!(u32::from_le_bytes(bytes[28..32].try_into().unwrap()), 88200);
        assert_eq!(u16::from_le_bytes(bytes[32..34].try_into().unwrap()), 2);
        assert_eq!(u16::from_le_bytes(bytes[34..36].try_into().unwrap()), 16);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(u32::from_le_bytes(bytes[40..44].try_into().unwrap()), 8);
        assert_eq!(&bytes[44..], &i16_payload(&[100, -50, 25, 0])[..]);
    }

    #[test]
    fn test_encode_sample_widths() {
        let wav = wav_of(2, BitDepth::Bits64, &[&[-1, 2]]);
        let bytes = encode(&wav).unwrap();
        assert_eq!(&bytes[44..52], &(-1i64).to_le_bytes());
        assert_eq!(&bytes[52..60], &2i64.to_le_bytes());

        let wav = wav_of(1, BitDepth::Bits8, &[&[200]]);
        let bytes = encode(&wav).unwrap();
        assert_eq!(bytes[44], 200);
    }

    #[test]
    fn test_encode_rejects_width_mismatch() {
        let groups = vec![ChannelGroup::new(vec![Sample::I32(5)])];
        let wav = Wav::from_decoded(1, 1, 44100, 88200, 2, BitDepth::Bits16, groups).unwrap();

        let mut out = Vec::new();
        let result = encode_to(&wav, &mut out);
        assert!(matches!(
            result,
            Err(WavError::SampleWidthMismatch { expected: 16, found: 32 })
        ));
        assert!(out.is_empty(), "nothing may be written for an invalid buffer");
    }

    #[test]
    fn test_round_trip_all_depths() {
        let cases: [(BitDepth, &[i64]); 4] = [
            (BitDepth::Bits8, &[0, 127, 128, 255]),
            (BitDepth::Bits16, &[i16::MIN as i64, -1, 0, i16::MAX as i64]),
            (BitDepth::Bits32, &[i32::MIN as i64, -70_000, 70_000, i32::MAX as i64]),
            (BitDepth::Bits64, &[i64::MIN, -1, 1, i64::MAX]),
        ];

        for (depth, values) in cases {
            for channels in [1u16, 2] {
                let frames: Vec<Vec<i64>> = values
                    .iter()
                    .map(|&v| vec![v; channels as usize])
                    .collect();
                let frame_refs: Vec<&[i64]> = frames.iter().map(|f| f.as_slice()).collect();
                let original = wav_of(channels, depth, &frame_refs);

                let decoded = decode_bytes(&encode(&original).unwrap()).unwrap();
                assert_eq!(decoded, original, "round trip failed for {} x{}", depth, channels);
            }
        }
    }

    #[test]
    fn test_decode_then_encode_is_byte_exact() {
        // Header values that disagree with the derived ones survive untouched
        let mut fmt = fmt_payload(1, 1, 44100, 16);
        fmt[8..12].copy_from_slice(&12345u32.to_le_bytes());
        let bytes = riff(&[(FMT_TAG, fmt), (DATA_TAG, i16_payload(&[4, 5, 6]))]);

        let wav = decode_bytes(&bytes).unwrap();
        assert_eq!(wav.byte_rate(), 12345);
        assert_eq!(encode(&wav).unwrap(), bytes);
    }
}
