//! Panel control handling for the brume texture processor.
//!
//! Everything between raw hardware reads and typed effect parameters lives
//! here: quantized change-gated sampling, switch debouncing, the mode
//! machine, and the channel-to-parameter mapping table.
//!
//! # Pipeline
//!
//! Once per audio block the engine runs the stages in order:
//!
//! 1. [`ControlSampler::sample`] reads the CV channels through a
//!    [`ControlIo`] backend, quantizes them to the 1/50 grid and reports
//!    which channels actually moved.
//! 2. [`map_channel`] turns each changed channel into one typed
//!    [`ParamUpdate`]; unchanged channels never reach the mapper.
//! 3. [`ModeMachine::update`] debounces the button and toggle and emits
//!    edge/level events for the engine to act on.
//!
//! # Design notes
//!
//! The quantize-then-compare scheme makes a noisy CV line sit still:
//! jitter smaller than half a grid step collapses onto the stored value
//! and produces no parameter traffic at all. The first sample after reset
//! is forced through so the effect chain starts from the physical panel
//! state instead of compiled-in defaults.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod debounce;
pub mod io;
pub mod mapper;
pub mod mode;
pub mod sampler;

pub use debounce::{DebounceState, Debouncer, DEFAULT_DEBOUNCE_BLOCKS};
pub use io::ControlIo;
pub use mapper::{
    map_channel, ParamUpdate, FEEDBACK_RANGE, HIGHPASS_RANGE_HZ, LOWPASS_RANGE_HZ,
};
pub use mode::{ModeEvents, ModeMachine, ToggleRole};
pub use sampler::{
    quantize, ChannelLayout, ControlFrame, ControlSampler, CHANNELS, CONTROL_STEPS,
};
