//! Scripted panel moves for offline processing.
//!
//! A session on the hardware is knobs, a button, and a toggle changing
//! over time. The script file captures that as a start state plus a list
//! of timed moves, so an offline render can reproduce a performance:
//!
//! ```toml
//! [start]
//! channels = [0.5, 0.0, 0.6, 0.5]
//! toggle_down = true
//!
//! [[moves]]
//! at = 2.0
//! channel = 1
//! value = 0.8
//!
//! [[moves]]
//! at = 4.0
//! button = true
//!
//! [[moves]]
//! at = 4.2
//! button = false
//! ```
//!
//! Moves set raw levels, not events: a press is `button = true` followed
//! by `button = false`, exactly what the debouncer would see from the
//! physical switch.

use anyhow::{bail, Context};
use brume_controls::ControlIo;
use serde::Deserialize;
use std::path::Path;

/// A parsed panel automation script.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControlScript {
    /// Panel state before the first sample.
    #[serde(default)]
    pub start: StartState,
    /// Timed changes, applied once their timestamp is reached.
    #[serde(default)]
    pub moves: Vec<Move>,
}

/// Panel state at time zero.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StartState {
    /// Control voltages per channel, up to 8. Missing channels sit at 0.
    #[serde(default)]
    pub channels: Vec<f32>,
    /// Toggle position; down by default (the live bank).
    #[serde(default = "default_toggle_down")]
    pub toggle_down: bool,
    /// Button level; released by default.
    #[serde(default)]
    pub button: bool,
}

fn default_toggle_down() -> bool {
    true
}

impl Default for StartState {
    fn default() -> Self {
        Self {
            channels: Vec::new(),
            toggle_down: true,
            button: false,
        }
    }
}

/// One timed panel change.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Move {
    /// Seconds from the start of the render.
    pub at: f32,
    /// Channel to move; requires `value`.
    #[serde(default)]
    pub channel: Option<usize>,
    /// New level for `channel`, in [0, 1].
    #[serde(default)]
    pub value: Option<f32>,
    /// New raw button level.
    #[serde(default)]
    pub button: Option<bool>,
    /// New toggle position.
    #[serde(default)]
    pub toggle_down: Option<bool>,
}

impl ControlScript {
    /// Parse and validate a script from TOML text.
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let script: ControlScript = toml::from_str(text).context("parsing control script")?;
        script.validate()?;
        Ok(script)
    }

    /// Load a script file.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading script '{}'", path.display()))?;
        Self::from_toml(&text)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.start.channels.len() > 8 {
            bail!(
                "start.channels has {} entries, the panel has at most 8",
                self.start.channels.len()
            );
        }
        for (i, &v) in self.start.channels.iter().enumerate() {
            if !(0.0..=1.0).contains(&v) {
                bail!("start.channels[{i}] = {v} is outside [0, 1]");
            }
        }
        for (i, mv) in self.moves.iter().enumerate() {
            let n = i + 1;
            if !mv.at.is_finite() || mv.at < 0.0 {
                bail!("move {n}: at = {} is not a valid time", mv.at);
            }
            match (mv.channel, mv.value) {
                (Some(channel), Some(value)) => {
                    if channel >= 8 {
                        bail!("move {n}: channel {channel} is outside 0..8");
                    }
                    if !(0.0..=1.0).contains(&value) {
                        bail!("move {n}: value {value} is outside [0, 1]");
                    }
                }
                (None, None) => {}
                _ => bail!("move {n}: channel and value must be given together"),
            }
            if mv.channel.is_none() && mv.button.is_none() && mv.toggle_down.is_none() {
                bail!("move {n}: sets nothing");
            }
        }
        Ok(())
    }
}

/// Control backend that plays a [`ControlScript`] into the engine.
///
/// The caller owns time: call [`advance_to`](Self::advance_to) with the
/// render position before each block and due moves take effect.
#[derive(Debug)]
pub struct ScriptIo {
    cv: [f32; 8],
    button: bool,
    toggle_down: bool,
    indicator: bool,
    moves: Vec<Move>,
    next: usize,
}

impl ScriptIo {
    /// Build the playback state for `script`.
    pub fn new(script: ControlScript) -> Self {
        let mut cv = [0.0f32; 8];
        for (slot, &value) in cv.iter_mut().zip(script.start.channels.iter()) {
            *slot = value;
        }
        let mut moves = script.moves;
        moves.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self {
            cv,
            button: script.start.button,
            toggle_down: script.start.toggle_down,
            indicator: false,
            moves,
            next: 0,
        }
    }

    /// Apply every move due at or before `now_secs`.
    pub fn advance_to(&mut self, now_secs: f64) {
        while let Some(mv) = self.moves.get(self.next).copied() {
            if f64::from(mv.at) > now_secs {
                break;
            }
            if let (Some(channel), Some(value)) = (mv.channel, mv.value) {
                self.cv[channel] = value;
            }
            if let Some(level) = mv.button {
                self.button = level;
            }
            if let Some(down) = mv.toggle_down {
                self.toggle_down = down;
            }
            self.next += 1;
        }
    }

    /// Override one channel's current level, e.g. from a command flag.
    pub fn set_channel(&mut self, channel: usize, value: f32) {
        if let Some(slot) = self.cv.get_mut(channel) {
            *slot = value.clamp(0.0, 1.0);
        }
    }

    /// Last level the engine drove the indicator to.
    pub fn indicator(&self) -> bool {
        self.indicator
    }
}

impl ControlIo for ScriptIo {
    fn read_cv(&mut self, channel: usize) -> f32 {
        self.cv.get(channel).copied().unwrap_or(0.0)
    }

    fn read_button_raw(&mut self) -> bool {
        self.button
    }

    fn read_toggle_raw(&mut self) -> bool {
        self.toggle_down
    }

    fn set_indicator(&mut self, high: bool) {
        self.indicator = high;
    }
}
