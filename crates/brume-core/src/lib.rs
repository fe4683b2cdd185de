//! Brume Core - DSP primitives for the brume texture reverb
//!
//! Foundational building blocks for the module's fixed signal path, designed
//! for hard-real-time processing with zero allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Parameter Smoothing
//!
//! - [`SmoothedParam`] - Exponential (one-pole) smoothing for zipper-free
//!   parameter changes
//!
//! ## Filters
//!
//! - [`OnePole`] - 6 dB/oct lowpass, used for feedback damping and noise
//!   band-limiting
//! - [`HighpassFilter`] - 2-pole TPT highpass for low-end control ahead of
//!   the reverb tank
//! - [`DampedComb`] - Comb with one-pole damping in its feedback path
//! - [`DiffusionAllpass`] - Schroeder allpass for tail diffusion
//!
//! ## Generators
//!
//! - [`WhiteNoise`] - Seeded xorshift32 broadband noise
//! - [`BandNoise`] - White noise band-limited through a one-pole lowpass
//! - [`JitterLfo`] - Random-ramp modulator with a randomized segment rate
//!
//! ## Mapping
//!
//! - [`MapCurve`] - Linear and logarithmic control-to-parameter curves with
//!   exact endpoints
//!
//! ## Utilities
//!
//! - Math helpers: [`lerp`], [`soft_clip`], [`hard_clip`], [`flush_denormal`],
//!   dB conversions
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for the module firmware. Disable the
//! default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! brume-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations after construction
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Total functions**: Every input produces a defined, finite output

#![cfg_attr(not(feature = "std"), no_std)]

pub mod allpass;
pub mod comb;
pub mod curve;
pub mod delay_line;
pub mod jitter;
pub mod math;
pub mod noise;
pub mod one_pole;
pub mod param;
pub mod svf;

// Re-export main types at crate root
pub use allpass::DiffusionAllpass;
pub use comb::DampedComb;
pub use curve::MapCurve;
pub use delay_line::DelayLine;
pub use jitter::JitterLfo;
pub use math::{
    db_to_linear, flush_denormal, hard_clip, lerp, linear_to_db, soft_clip,
};
pub use noise::{BandNoise, WhiteNoise};
pub use one_pole::OnePole;
pub use param::SmoothedParam;
pub use svf::HighpassFilter;
