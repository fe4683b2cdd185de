//! Control-to-parameter mapping table.
//!
//! Each logical channel owns exactly one parameter recomputation. The
//! mapper is a pure table from (channel, quantized value) to a typed
//! [`ParamUpdate`]; it is only consulted for channels the sampler reported
//! as changed, so steady knobs cost nothing downstream.
//!
//! Level-like parameters use linear curves; everything measured in Hz uses
//! a logarithmic curve so knob travel tracks pitch perception.

use brume_core::MapCurve;

/// Reverb feedback range mapped from channel 2.
///
/// The tank clamps applied feedback to 0.98 for comb stability, so the
/// top of the knob's travel saturates there; the last grid step past
/// 0.98 is deliberately flat rather than the range being narrowed.
pub const FEEDBACK_RANGE: (f32, f32) = (0.2, 1.0);

/// Highpass cutoff range in Hz, derived from channel 2 alongside feedback.
/// More feedback means a longer tail, which wants a tighter low end going
/// into the tank.
pub const HIGHPASS_RANGE_HZ: (f32, f32) = (40.0, 2000.0);

/// Reverb damping lowpass range in Hz mapped from channel 3.
pub const LOWPASS_RANGE_HZ: (f32, f32) = (1000.0, 19000.0);

/// One recomputed effect parameter, ready to apply to the chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamUpdate {
    /// Channel 0: complementary dry/wet split.
    MixSplit {
        /// Dry portion, `1 - x`.
        dry: f32,
        /// Wet portion, `x`.
        wet: f32,
    },
    /// Channel 1: jitter-mix macro in [0, 1].
    JitterMix(f32),
    /// Channel 2: tail feedback plus the highpass cutoff derived from it.
    ReverbFeedback {
        /// Comb feedback in [`FEEDBACK_RANGE`].
        feedback: f32,
        /// Pre-tank highpass cutoff in [`HIGHPASS_RANGE_HZ`].
        highpass_hz: f32,
    },
    /// Channel 3: damping lowpass cutoff in [`LOWPASS_RANGE_HZ`].
    ReverbLowpassHz(f32),
}

/// Map one changed channel onto its parameter.
///
/// Returns `None` for channel indices past the panel; the caller treats
/// those as inert.
pub fn map_channel(channel: usize, value: f32) -> Option<ParamUpdate> {
    match channel {
        0 => Some(ParamUpdate::MixSplit {
            dry: MapCurve::Linear.apply(value, 1.0, 0.0),
            wet: MapCurve::Linear.apply(value, 0.0, 1.0),
        }),
        1 => Some(ParamUpdate::JitterMix(MapCurve::Linear.apply(
            value, 0.0, 1.0,
        ))),
        2 => Some(ParamUpdate::ReverbFeedback {
            feedback: MapCurve::Linear.apply(value, FEEDBACK_RANGE.0, FEEDBACK_RANGE.1),
            highpass_hz: MapCurve::Logarithmic.apply(
                value,
                HIGHPASS_RANGE_HZ.0,
                HIGHPASS_RANGE_HZ.1,
            ),
        }),
        3 => Some(ParamUpdate::ReverbLowpassHz(MapCurve::Logarithmic.apply(
            value,
            LOWPASS_RANGE_HZ.0,
            LOWPASS_RANGE_HZ.1,
        ))),
        _ => None,
    }
}
