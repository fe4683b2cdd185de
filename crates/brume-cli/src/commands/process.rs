//! File-based processing through the full engine.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use brume_controls::{ChannelLayout, ToggleRole};
use brume_engine::{
    BlockEngine, DiagSink, EngineConfig, FlushOutcome, SettingsFlusher, SharedState,
};
use brume_settings::{FileStore, PersistentSettings};

use crate::script::{ControlScript, ScriptIo};
use crate::wav::{read_wav_stereo, write_wav_stereo, WavSpec};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Panel automation script (TOML)
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Persistent settings file; read at start, updated by button presses
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Engage the overdrive stage at start, whatever the settings say
    #[arg(long)]
    overdrive: bool,

    /// What the toggle means
    #[arg(long, value_enum, default_value_t = RoleArg::BankGate)]
    role: RoleArg,

    /// Control layout: four channels, or eight summed in pairs
    #[arg(long, value_enum, default_value_t = LayoutArg::Four)]
    layout: LayoutArg,

    /// Dry/wet split position (channel 0)
    #[arg(long, value_name = "0..1")]
    mix: Option<f32>,

    /// Jitter mix position (channel 1)
    #[arg(long, value_name = "0..1")]
    jitter: Option<f32>,

    /// Reverb feedback position (channel 2)
    #[arg(long, value_name = "0..1")]
    feedback: Option<f32>,

    /// Reverb brightness position (channel 3)
    #[arg(long, value_name = "0..1")]
    brightness: Option<f32>,

    /// Extra seconds rendered after the input ends, for reverb tails
    #[arg(long, default_value = "0.0")]
    tail: f32,

    /// Processing block size in frames
    #[arg(long, default_value = "32")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum RoleArg {
    /// Toggle down enables the knob bank; up parks it
    BankGate,
    /// Toggle picks the overdrive position, pre or post reverb
    DrivePlacement,
}

impl From<RoleArg> for ToggleRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::BankGate => ToggleRole::BankGate,
            RoleArg::DrivePlacement => ToggleRole::DrivePlacement,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    /// One control line per channel
    Four,
    /// Channels 0-3 summed with 4-7, clamped, then quantized
    EightPaired,
}

impl From<LayoutArg> for ChannelLayout {
    fn from(layout: LayoutArg) -> Self {
        match layout {
            LayoutArg::Four => ChannelLayout::Four,
            LayoutArg::EightPaired => ChannelLayout::EightPaired,
        }
    }
}

/// Sink that forwards engine diagnostics to `tracing`.
///
/// Run with `RUST_LOG=brume::diag=debug` to watch the per-block lines.
struct TracingDiag;

impl DiagSink for TracingDiag {
    fn try_send(&mut self, line: &[u8]) -> bool {
        tracing::debug!(target: "brume::diag", "{}", String::from_utf8_lossy(line));
        true
    }
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if args.block_size == 0 {
        anyhow::bail!("block size must be at least 1");
    }
    if !matches!(args.bit_depth, 16 | 24 | 32) {
        anyhow::bail!("bit depth must be 16, 24, or 32");
    }
    if !args.tail.is_finite() || args.tail < 0.0 {
        anyhow::bail!("tail must be a non-negative number of seconds");
    }

    // Read input file
    println!("Reading {}...", args.input.display());
    let (mut left, mut right, spec) = read_wav_stereo(&args.input)?;
    let sample_rate = spec.sample_rate as f32;

    println!(
        "  {} frames, {} Hz, {:.2}s",
        left.len(),
        spec.sample_rate,
        left.len() as f32 / sample_rate
    );

    let input_rms = stereo_rms(&left, &right);
    let input_peak = stereo_peak(&left, &right);

    let tail_frames = (args.tail * sample_rate).round() as usize;
    left.resize(left.len() + tail_frames, 0.0);
    right.resize(right.len() + tail_frames, 0.0);

    // Panel automation
    let script = match &args.script {
        Some(path) => {
            let script = ControlScript::load(path)?;
            tracing::info!(
                path = %path.display(),
                moves = script.moves.len(),
                "control script loaded"
            );
            script
        }
        None => ControlScript::default(),
    };
    let mut io = ScriptIo::new(script);
    for (channel, flag) in [args.mix, args.jitter, args.feedback, args.brightness]
        .into_iter()
        .enumerate()
    {
        if let Some(value) = flag {
            if !(0.0..=1.0).contains(&value) {
                anyhow::bail!("channel {channel} position {value} is outside [0, 1]");
            }
            io.set_channel(channel, value);
        }
    }

    // Persistent settings
    let mut overdrive_enabled = false;
    let mut flusher = None;
    if let Some(path) = &args.settings {
        let mut store = FileStore::new(path);
        let record = PersistentSettings::load(&mut store, PersistentSettings::default());
        overdrive_enabled = record.overdrive_enabled;
        tracing::info!(
            path = %path.display(),
            overdrive = overdrive_enabled,
            "settings loaded"
        );
        flusher = Some(SettingsFlusher::new(store));
    }
    if args.overdrive {
        overdrive_enabled = true;
    }

    let shared = SharedState::new(overdrive_enabled);
    let config = EngineConfig {
        sample_rate,
        layout: args.layout.into(),
        toggle_role: args.role.into(),
        ..EngineConfig::default()
    };
    let mut engine = BlockEngine::new(config, &shared);
    let mut diag = TracingDiag;

    println!("Processing through the texture engine...");

    // Process with progress bar
    let total_frames = left.len();
    let pb = ProgressBar::new(total_frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .context("progress bar template")?
            .progress_chars("##-"),
    );

    let block_size = args.block_size;
    for (i, (l_chunk, r_chunk)) in left
        .chunks_mut(block_size)
        .zip(right.chunks_mut(block_size))
        .enumerate()
    {
        let start_frame = i * block_size;
        io.advance_to(start_frame as f64 / f64::from(spec.sample_rate));
        engine.process_block(&mut io, &mut diag, l_chunk, r_chunk);

        if let Some(flusher) = flusher.as_mut() {
            let now_ms = (start_frame as u64 * 1000) / u64::from(spec.sample_rate);
            if flusher.poll(now_ms, &shared) == FlushOutcome::Failed {
                tracing::warn!("settings write failed; will retry");
            }
        }
        pb.set_position(((i + 1) * block_size).min(total_frames) as u64);
    }
    pb.finish_with_message("done");

    // A press near the end must not be lost to the poll interval.
    if let Some(flusher) = flusher.as_mut()
        && flusher.flush_now(&shared) == FlushOutcome::Failed
    {
        tracing::warn!("final settings write failed; mode change not persisted");
    }

    tracing::info!(
        blocks = engine.block_index(),
        params_applied = engine.params_applied(),
        overdrive = shared.overdrive_enabled(),
        "render finished"
    );

    // Calculate stats
    let output_rms = stereo_rms(&left, &right);
    let output_peak = stereo_peak(&left, &right);

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(input_rms),
        linear_to_db(input_peak)
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(output_rms),
        linear_to_db(output_peak)
    );

    // Write output file
    let out_spec = WavSpec {
        channels: 2,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav_stereo(&args.output, &left, &right, out_spec)?;
    println!("Done!");

    Ok(())
}

fn stereo_rms(left: &[f32], right: &[f32]) -> f32 {
    let n = left.len() + right.len();
    if n == 0 {
        return 0.0;
    }
    let sum: f32 = left
        .iter()
        .chain(right.iter())
        .map(|s| s * s)
        .sum();
    (sum / n as f32).sqrt()
}

fn stereo_peak(left: &[f32], right: &[f32]) -> f32 {
    left.iter()
        .chain(right.iter())
        .map(|s| s.abs())
        .fold(0.0, f32::max)
}

fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -120.0
    } else {
        20.0 * linear.log10()
    }
}
