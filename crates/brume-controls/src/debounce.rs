//! Switch debouncing.
//!
//! Mechanical switches bounce: a single throw produces a burst of open/close
//! chatter for a few milliseconds. At block rate that shows up as a few
//! blocks of disagreeing raw reads. [`Debouncer`] filters the raw level into
//! a stable logical state through a small three-state machine.

/// Default number of consecutive agreeing block-rate samples required to
/// accept a new level. At a 32-frame block and 48 kHz this is ~2.7 ms.
pub const DEFAULT_DEBOUNCE_BLOCKS: u8 = 4;

/// Observable debouncer state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebounceState {
    /// Logical level is released and the raw input agrees.
    StableReleased,
    /// Raw input disagrees with the logical level; counting towards a flip.
    Transitioning,
    /// Logical level is pressed and the raw input agrees.
    StablePressed,
}

/// Three-state debounce machine for one switch.
///
/// The logical level flips only after `threshold` consecutive raw samples
/// at the opposite level. Chatter that reverses mid-count restarts the
/// count, so an alternating input can never flip the state.
#[derive(Clone, Debug)]
pub struct Debouncer {
    /// Current logical level (true = pressed)
    stable: bool,
    /// Raw level currently being counted
    candidate: bool,
    /// Consecutive samples seen at `candidate`
    count: u8,
    /// Samples required to accept a flip
    threshold: u8,
}

impl Debouncer {
    /// Create a debouncer starting in the released state.
    ///
    /// A switch held at power-on reaches its true level after `threshold`
    /// blocks. A threshold of 0 is treated as 1.
    pub fn new(threshold: u8) -> Self {
        Self {
            stable: false,
            candidate: false,
            count: 0,
            threshold: threshold.max(1),
        }
    }

    /// Feed one raw sample and return the (possibly updated) logical level.
    pub fn update(&mut self, raw: bool) -> bool {
        if raw == self.stable {
            // Agreement cancels any pending transition.
            self.candidate = raw;
            self.count = 0;
        } else if raw == self.candidate {
            self.count += 1;
            if self.count >= self.threshold {
                self.stable = raw;
                self.count = 0;
            }
        } else {
            // New disagreement; start counting from this sample.
            self.candidate = raw;
            self.count = 1;
            if self.count >= self.threshold {
                self.stable = raw;
                self.count = 0;
            }
        }
        self.stable
    }

    /// Current logical level.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.stable
    }

    /// Current machine state.
    pub fn state(&self) -> DebounceState {
        if self.count > 0 {
            DebounceState::Transitioning
        } else if self.stable {
            DebounceState::StablePressed
        } else {
            DebounceState::StableReleased
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_BLOCKS)
    }
}
