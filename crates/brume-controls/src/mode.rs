//! Switch logic: press edges and toggle interpretation.
//!
//! [`ModeMachine`] wraps the two debounced switches and turns them into the
//! control plane's two signals: a once-per-press button edge and the
//! toggle's stable level. What those signals *mean* depends on the
//! [`ToggleRole`] the engine is built with.

use crate::debounce::{DEFAULT_DEBOUNCE_BLOCKS, Debouncer};

/// How the latching toggle is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToggleRole {
    /// Toggle-down makes the four control channels live; toggle-up keeps
    /// them read but unapplied, reserved for a future second bank. A knob
    /// moved while parked is absorbed: flipping back fires nothing until
    /// the knob moves again.
    #[default]
    BankGate,
    /// Toggle selects pre- or post-reverb overdrive placement; the control
    /// channels are always live.
    DrivePlacement,
}

/// One block's switch events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModeEvents {
    /// True exactly once per physical press: the block where the debounced
    /// button level went released-to-pressed.
    pub press_edge: bool,
    /// Debounced toggle level, true in the "down" position. Level-sensitive;
    /// no edge detection.
    pub toggle_down: bool,
}

/// Debounced button and toggle with press-edge tracking.
///
/// The machine only reports events. Acting on them (flipping the persisted
/// mode, driving the indicator, marking settings dirty) belongs to the
/// caller that owns that state.
#[derive(Clone, Debug)]
pub struct ModeMachine {
    button: Debouncer,
    toggle: Debouncer,
    button_was_pressed: bool,
}

impl ModeMachine {
    /// Create a machine with the given debounce threshold in blocks.
    pub fn new(debounce_blocks: u8) -> Self {
        Self {
            button: Debouncer::new(debounce_blocks),
            toggle: Debouncer::new(debounce_blocks),
            button_was_pressed: false,
        }
    }

    /// Feed this block's raw switch levels and get the block's events.
    pub fn update(&mut self, button_raw: bool, toggle_raw: bool) -> ModeEvents {
        let pressed = self.button.update(button_raw);
        let toggle_down = self.toggle.update(toggle_raw);

        let press_edge = pressed && !self.button_was_pressed;
        self.button_was_pressed = pressed;

        ModeEvents {
            press_edge,
            toggle_down,
        }
    }

    /// Debounced button level.
    pub fn button_pressed(&self) -> bool {
        self.button.is_pressed()
    }

    /// Debounced toggle level.
    pub fn toggle_down(&self) -> bool {
        self.toggle.is_pressed()
    }
}

impl Default for ModeMachine {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_BLOCKS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hold both raw levels for `blocks` and collect the events.
    fn hold(machine: &mut ModeMachine, button: bool, toggle: bool, blocks: usize) -> Vec<ModeEvents> {
        (0..blocks).map(|_| machine.update(button, toggle)).collect()
    }

    #[test]
    fn one_edge_per_press() {
        let mut machine = ModeMachine::new(4);

        // Press held for many blocks: exactly one edge.
        let events = hold(&mut machine, true, false, 50);
        let edges = events.iter().filter(|e| e.press_edge).count();
        assert_eq!(edges, 1, "A held press must produce exactly one edge");

        // Release, then press again: one more edge.
        hold(&mut machine, false, false, 10);
        let events = hold(&mut machine, true, false, 50);
        let edges = events.iter().filter(|e| e.press_edge).count();
        assert_eq!(edges, 1);
    }

    #[test]
    fn edge_waits_for_debounce() {
        let mut machine = ModeMachine::new(4);

        let events = hold(&mut machine, true, false, 3);
        assert!(
            events.iter().all(|e| !e.press_edge),
            "No edge before the debounce threshold"
        );

        let event = machine.update(true, false);
        assert!(event.press_edge, "Edge on the settling block");
    }

    #[test]
    fn bouncy_press_still_one_edge() {
        let mut machine = ModeMachine::new(3);

        // Contact bounce: a few alternating blocks, then solid contact.
        for raw in [true, false, true, false, true, true, true, true, true] {
            machine.update(raw, false);
        }
        // Already settled; further held blocks add no edges.
        let events = hold(&mut machine, true, false, 20);
        assert!(events.iter().all(|e| !e.press_edge));
        assert!(machine.button_pressed());
    }

    #[test]
    fn toggle_is_level_sensitive() {
        let mut machine = ModeMachine::new(2);

        hold(&mut machine, false, true, 5);
        assert!(machine.toggle_down());

        // Every subsequent block keeps reporting the level.
        let events = hold(&mut machine, false, true, 10);
        assert!(events.iter().all(|e| e.toggle_down));

        hold(&mut machine, false, false, 5);
        assert!(!machine.toggle_down());
    }

    #[test]
    fn switches_are_independent() {
        let mut machine = ModeMachine::new(2);

        hold(&mut machine, true, true, 5);
        assert!(machine.button_pressed());
        assert!(machine.toggle_down());

        hold(&mut machine, false, true, 5);
        assert!(!machine.button_pressed());
        assert!(machine.toggle_down(), "Toggle must not follow the button");
    }
}
