//! Hardware seam for the control plane.
//!
//! Everything the control plane needs from the physical module goes through
//! [`ControlIo`]: CV reads, raw switch levels, and the indicator line. The
//! firmware implements it over the vendor ADC/GPIO drivers; tests and the
//! host harness implement it over scripted values.

/// Access to the module's physical control surface.
///
/// All reads are raw: CV values come back un-quantized in [0, 1] and switch
/// levels un-debounced. Conditioning is the control plane's job, not the
/// driver's.
pub trait ControlIo {
    /// Read one raw CV channel, normalized to [0, 1].
    ///
    /// Channel indices follow the panel: 0..4 for the four-knob layout,
    /// 0..8 for the pair-summed layout. Out-of-range channels return 0.0.
    fn read_cv(&mut self, channel: usize) -> f32;

    /// Raw momentary-button level, true while electrically closed.
    fn read_button_raw(&mut self) -> bool;

    /// Raw toggle-switch level, true in the "down" position.
    fn read_toggle_raw(&mut self) -> bool;

    /// Drive the indicator line to its high or low fixed level.
    fn set_indicator(&mut self, high: bool);
}
