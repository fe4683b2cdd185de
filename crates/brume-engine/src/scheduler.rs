//! The per-block scheduler.

use core::fmt::Write;

use brume_controls::{
    map_channel, ChannelLayout, ControlFrame, ControlIo, ControlSampler, ModeEvents, ModeMachine,
    ParamUpdate, ToggleRole, CHANNELS, DEFAULT_DEBOUNCE_BLOCKS,
};
use brume_effects::{DrivePlacement, TextureChain};

use crate::diag::{DiagSink, LineBuf};
use crate::shared::SharedState;

/// Construction parameters for a [`BlockEngine`].
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    /// Sample rate the driver will call back at.
    pub sample_rate: f32,
    /// Physical control layout.
    pub layout: ChannelLayout,
    /// What the panel toggle means.
    pub toggle_role: ToggleRole,
    /// Blocks of agreement before a switch reading is believed.
    pub debounce_blocks: u8,
    /// Seed for the texture noise source.
    pub noise_seed: u32,
    /// Seed for the jitter modulator.
    pub jitter_seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            layout: ChannelLayout::Four,
            toggle_role: ToggleRole::BankGate,
            debounce_blocks: DEFAULT_DEBOUNCE_BLOCKS,
            noise_seed: 0x1B5F_342D,
            jitter_seed: 0x9C4E_8A17,
        }
    }
}

/// Everything that happens between two audio interrupts.
///
/// One instance lives in the audio context and is driven once per block.
/// Each call walks the same fixed order the hardware loop does:
///
/// 1. debounce both switches and resolve mode events,
/// 2. sample the control channels and map the changed ones (when the
///    toggle role leaves them live),
/// 3. render the block through the texture chain,
/// 4. emit the diagnostic line.
///
/// The engine does not own its I/O: the control backend and diagnostic
/// sink are passed per call, and the [`SharedState`] is borrowed so the
/// background flusher can see the same flags.
pub struct BlockEngine<'a> {
    chain: TextureChain,
    sampler: ControlSampler,
    mode: ModeMachine,
    shared: &'a SharedState,
    toggle_role: ToggleRole,
    debounce_blocks: u8,
    sample_rate: f32,
    block_index: u64,
    params_applied: u64,
    announced: bool,
}

impl<'a> BlockEngine<'a> {
    /// An engine over `shared`, adopting its current overdrive flag.
    pub fn new(config: EngineConfig, shared: &'a SharedState) -> Self {
        let mut chain =
            TextureChain::new(config.sample_rate, config.noise_seed, config.jitter_seed);
        chain.set_overdrive_enabled(shared.overdrive_enabled());
        Self {
            chain,
            sampler: ControlSampler::new(config.layout),
            mode: ModeMachine::new(config.debounce_blocks),
            shared,
            toggle_role: config.toggle_role,
            debounce_blocks: config.debounce_blocks.max(1),
            sample_rate: config.sample_rate,
            block_index: 0,
            params_applied: 0,
            announced: false,
        }
    }

    /// Run one audio block.
    ///
    /// `left` and `right` are processed in place and must be the same
    /// length; any length works, whatever the driver hands over.
    pub fn process_block<I: ControlIo, D: DiagSink>(
        &mut self,
        io: &mut I,
        diag: &mut D,
        left: &mut [f32],
        right: &mut [f32],
    ) {
        let events = self.mode.update(io.read_button_raw(), io.read_toggle_raw());

        if events.press_edge {
            let enabled = !self.shared.overdrive_enabled();
            self.shared.set_overdrive_enabled(enabled);
            self.shared.mark_dirty();
        }

        // The chain follows the shared flag rather than the local edge so
        // that values arriving from persistence behave like presses.
        let enabled = self.shared.overdrive_enabled();
        if enabled != self.chain.overdrive_enabled() {
            self.chain.set_overdrive_enabled(enabled);
        }
        io.set_indicator(enabled);

        let controls_live = match self.toggle_role {
            // Toggle up selects the reserved second bank, which currently
            // maps nothing; the panel stays read so those moves are
            // consumed, not replayed when the toggle comes back.
            ToggleRole::BankGate => events.toggle_down,
            ToggleRole::DrivePlacement => {
                let placement = if events.toggle_down {
                    DrivePlacement::Pre
                } else {
                    DrivePlacement::Post
                };
                if placement != self.chain.drive_placement() {
                    self.chain.set_drive_placement(placement);
                }
                true
            }
        };

        // The startup frame waits out the switch debounce window so it is
        // judged against the settled toggle level, not the debouncer's
        // power-on default.
        let frame = if self.block_index + 1 >= u64::from(self.debounce_blocks) {
            let frame = self.sampler.sample(io);
            if controls_live {
                for channel in 0..CHANNELS {
                    if frame.changed[channel] {
                        self.apply(map_channel(channel, frame.values[channel]));
                    }
                }
            }
            Some(frame)
        } else {
            None
        };

        self.chain.process_block(left, right);

        if !self.announced {
            self.emit_startup(diag);
            self.announced = true;
        }
        self.emit_block_line(diag, frame.as_ref(), events);
        self.block_index += 1;
    }

    /// Blocks processed so far.
    pub fn block_index(&self) -> u64 {
        self.block_index
    }

    /// Parameter recomputations performed so far. Stays flat across
    /// blocks whose controls sit still.
    pub fn params_applied(&self) -> u64 {
        self.params_applied
    }

    /// The toggle interpretation this engine was built with.
    pub fn toggle_role(&self) -> ToggleRole {
        self.toggle_role
    }

    /// The sample rate this engine was built for.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Read access to the texture chain, mostly for inspection.
    pub fn chain(&self) -> &TextureChain {
        &self.chain
    }

    fn apply(&mut self, update: Option<ParamUpdate>) {
        let Some(update) = update else { return };
        self.params_applied += 1;
        match update {
            ParamUpdate::MixSplit { dry, wet } => self.chain.set_mix_split(dry, wet),
            ParamUpdate::JitterMix(mix) => self.chain.set_jitter_mix(mix),
            ParamUpdate::ReverbFeedback {
                feedback,
                highpass_hz,
            } => {
                self.chain.set_reverb_feedback(feedback);
                self.chain.set_highpass_hz(highpass_hz);
            }
            ParamUpdate::ReverbLowpassHz(cutoff_hz) => self.chain.set_reverb_lowpass_hz(cutoff_hz),
        }
    }

    fn emit_startup<D: DiagSink>(&self, diag: &mut D) {
        let mut line = LineBuf::new();
        let _ = write!(
            line,
            "brume start sr={:.0} role={} od={}",
            self.sample_rate,
            role_name(self.toggle_role),
            on_off(self.chain.overdrive_enabled()),
        );
        diag.try_send(line.as_bytes());
    }

    fn emit_block_line<D: DiagSink>(
        &self,
        diag: &mut D,
        frame: Option<&ControlFrame>,
        events: ModeEvents,
    ) {
        let mut line = LineBuf::new();
        let _ = write!(line, "blk={}", self.block_index);
        match frame {
            Some(frame) => {
                let _ = write!(
                    line,
                    " cv=[{:.2} {:.2} {:.2} {:.2}]",
                    frame.values[0], frame.values[1], frame.values[2], frame.values[3],
                );
            }
            None => {
                let _ = write!(line, " cv=settling");
            }
        }
        let _ = write!(
            line,
            " od={} tgl={}",
            on_off(self.chain.overdrive_enabled()),
            if events.toggle_down { "down" } else { "up" },
        );
        diag.try_send(line.as_bytes());
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

fn role_name(role: ToggleRole) -> &'static str {
    match role {
        ToggleRole::BankGate => "bank-gate",
        ToggleRole::DrivePlacement => "drive-placement",
    }
}
