//! WAV file reading and writing.

use std::path::Path;

use anyhow::Context;
use hound::{SampleFormat, WavReader, WavWriter};

/// WAV file specification.
#[derive(Debug, Clone, Copy)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (e.g., 16, 24, 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Read a WAV file as a stereo pair of f32 buffers plus the spec.
///
/// Mono files are duplicated onto both channels; files with more than
/// two channels keep only the first two.
pub fn read_wav_stereo<P: AsRef<Path>>(path: P) -> anyhow::Result<(Vec<f32>, Vec<f32>, WavSpec)> {
    let path = path.as_ref();
    let reader =
        WavReader::open(path).with_context(|| format!("opening '{}'", path.display()))?;
    let spec = WavSpec::from(reader.spec());
    let channels = spec.channels as usize;

    let all_samples: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("decoding '{}'", path.display()))?,
        SampleFormat::Int => {
            // i64 so 32-bit PCM does not wrap the scale negative.
            let bits = spec.bits_per_sample;
            let max_val = (1i64 << (bits - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("decoding '{}'", path.display()))?
        }
    };

    let frames = all_samples.len() / channels.max(1);
    let mut left = Vec::with_capacity(frames);
    let mut right = Vec::with_capacity(frames);
    match channels {
        0 => {}
        1 => {
            left.extend_from_slice(&all_samples);
            right.extend_from_slice(&all_samples);
        }
        _ => {
            // chunks_exact drops a truncated final frame.
            for frame in all_samples.chunks_exact(channels) {
                left.push(frame[0]);
                right.push(frame[1]);
            }
        }
    }

    Ok((left, right, spec))
}

/// Write a stereo pair to a WAV file, interleaved.
pub fn write_wav_stereo<P: AsRef<Path>>(
    path: P,
    left: &[f32],
    right: &[f32],
    spec: WavSpec,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let hound_spec = hound::WavSpec::from(WavSpec {
        channels: 2,
        ..spec
    });
    let mut writer = WavWriter::create(path, hound_spec)
        .with_context(|| format!("creating '{}'", path.display()))?;

    if spec.bits_per_sample == 32 {
        for (&l, &r) in left.iter().zip(right.iter()) {
            writer.write_sample(l)?;
            writer.write_sample(r)?;
        }
    } else {
        let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
        for (&l, &r) in left.iter().zip(right.iter()) {
            writer.write_sample((l * max_val).clamp(-max_val, max_val - 1.0) as i32)?;
            writer.write_sample((r * max_val).clamp(-max_val, max_val - 1.0) as i32)?;
        }
    }

    writer
        .finalize()
        .with_context(|| format!("finalizing '{}'", path.display()))?;
    Ok(())
}
