//! Brume Effects - Signal-path stages of the texture reverb
//!
//! This crate assembles the brume-core primitives into the module's audio
//! stages and its one fixed topology:
//!
//! - [`Limiter`] - Peak limiter with instant attack and exponential release
//! - [`Overdrive`] - `tanh` waveshaper with an internally smoothed drive
//! - [`StereoReverb`] - Freeverb-style tank with feedback and lowpass damping
//! - [`TextureChain`] - The complete per-block stereo path, input limit to
//!   output limit
//!
//! ## Example
//!
//! ```rust
//! use brume_effects::TextureChain;
//!
//! let mut chain = TextureChain::new(48000.0, 0xB0A7, 0xF0A3);
//! chain.set_mix_split(0.5, 0.5);
//! chain.set_jitter_mix(0.3);
//!
//! let mut left = [0.5f32; 32];
//! let mut right = [0.5f32; 32];
//! chain.process_block(&mut left, &mut right);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod chain;
pub mod limiter;
pub mod overdrive;
pub mod reverb;

// Re-export main types at crate root
pub use chain::{
    DrivePlacement, FINAL_LIMIT_THRESHOLD, NOISE_FACTOR, PRE_LIMIT_THRESHOLD, TextureChain,
};
pub use limiter::Limiter;
pub use overdrive::Overdrive;
pub use reverb::StereoReverb;
