//! Overdrive waveshaper with internally smoothed drive.
//!
//! The drive amount is never set directly from a control value. It glides
//! through a one-pole smoother whose target is derived from the jitter-mix
//! macro when the stage is enabled, and pinned to unity when disabled. The
//! pin means every engagement starts from the transparent end of the curve
//! and fades in, so the enable switch never lands as a click.

use brume_core::{SmoothedParam, lerp, soft_clip};

/// Minimum drive: unity gain into the shaper, near-transparent.
const MIN_DRIVE: f32 = 1.0;

/// Maximum drive at full macro setting.
const MAX_DRIVE: f32 = 8.0;

/// Smoothing time constant for drive changes in milliseconds.
const DRIVE_SMOOTHING_MS: f32 = 50.0;

/// `tanh` waveshaper with a smoothed, macro-driven drive amount.
///
/// [`advance`](Self::advance) must be called exactly once per sample whether
/// or not the stage is in the signal path, so the smoother state is always
/// where a listener expects it when the stage engages.
#[derive(Debug, Clone)]
pub struct Overdrive {
    /// Smoothed drive in [`MIN_DRIVE`], [`MAX_DRIVE`]
    drive: SmoothedParam,
    /// Macro amount in [0, 1] that maps onto the drive range when enabled
    amount: f32,
    /// Whether the shaper is in the signal path
    enabled: bool,
}

impl Overdrive {
    /// Create a disabled overdrive at unity drive.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            drive: SmoothedParam::with_config(MIN_DRIVE, sample_rate, DRIVE_SMOOTHING_MS),
            amount: 0.0,
            enabled: false,
        }
    }

    /// Set the macro amount in [0, 1].
    ///
    /// Retargets the drive smoother only while enabled; while disabled the
    /// amount is remembered for the next engagement.
    pub fn set_amount(&mut self, amount: f32) {
        self.amount = amount.clamp(0.0, 1.0);
        if self.enabled {
            self.drive.set_target(self.mapped_drive());
        }
    }

    /// Enable or disable the stage.
    ///
    /// Enabling retargets the smoother at the mapped drive; disabling pins
    /// it back to unity.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        let target = if enabled { self.mapped_drive() } else { MIN_DRIVE };
        self.drive.set_target(target);
    }

    /// Whether the shaper is in the signal path.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Advance the drive smoother by one sample and return the drive value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.drive.advance()
    }

    /// Current smoothed drive without advancing.
    #[inline]
    pub fn drive(&self) -> f32 {
        self.drive.get()
    }

    /// Worst-case per-sample drive movement, for transition-smoothness checks.
    #[inline]
    pub fn max_drive_step(&self) -> f32 {
        self.drive.max_step()
    }

    /// Shape one sample at the given drive.
    #[inline]
    pub fn shape(input: f32, drive: f32) -> f32 {
        soft_clip(input * drive)
    }

    /// Advance the smoother and shape one sample.
    ///
    /// Stereo callers should [`advance`](Self::advance) once and call
    /// [`shape`](Self::shape) per channel instead, so both channels see the
    /// same drive.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let drive = self.advance();
        Self::shape(input, drive)
    }

    /// Update the sample rate of the smoother.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.drive.set_sample_rate(sample_rate);
    }

    /// Snap the drive to its target.
    pub fn reset(&mut self) {
        self.drive.snap_to_target();
    }

    fn mapped_drive(&self) -> f32 {
        lerp(MIN_DRIVE, MAX_DRIVE, self.amount)
    }
}
