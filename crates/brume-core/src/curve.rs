//! Control-to-parameter mapping curves.
//!
//! A normalized control value in [0, 1] rarely drives a parameter directly;
//! it maps onto the parameter's working range through a curve. Frequencies
//! want a logarithmic taper so equal knob travel covers equal musical
//! intervals, while levels and mix amounts read naturally on a linear one.

use libm::powf;

/// Taper applied when mapping a normalized control onto a target range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MapCurve {
    /// Straight interpolation from `lo` to `hi`.
    #[default]
    Linear,
    /// Exponential interpolation: equal control steps multiply the output
    /// by a constant factor. Requires positive endpoints.
    Logarithmic,
}

impl MapCurve {
    /// Map `x` in [0, 1] onto `[lo, hi]` through this curve.
    ///
    /// `x` is clamped to [0, 1] first, so out-of-range control values pin
    /// to the endpoints. The endpoints themselves map exactly: `apply(0.0)`
    /// returns `lo` and `apply(1.0)` returns `hi` up to float rounding.
    ///
    /// For [`MapCurve::Logarithmic`] the endpoints are floored at a small
    /// positive value to keep the ratio finite.
    ///
    /// ```rust
    /// use brume_core::MapCurve;
    ///
    /// assert_eq!(MapCurve::Linear.apply(0.5, 0.0, 10.0), 5.0);
    ///
    /// // Log taper: halfway lands on the geometric mean
    /// let mid = MapCurve::Logarithmic.apply(0.5, 100.0, 10000.0);
    /// assert!((mid - 1000.0).abs() < 1.0);
    /// ```
    #[inline]
    pub fn apply(self, x: f32, lo: f32, hi: f32) -> f32 {
        let x = x.clamp(0.0, 1.0);
        match self {
            MapCurve::Linear => lo + x * (hi - lo),
            MapCurve::Logarithmic => {
                let lo = lo.max(1e-6);
                let hi = hi.max(1e-6);
                lo * powf(hi / lo, x)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_endpoints_exact() {
        assert_eq!(MapCurve::Linear.apply(0.0, 0.2, 1.0), 0.2);
        assert_eq!(MapCurve::Linear.apply(1.0, 0.2, 1.0), 1.0);
    }

    #[test]
    fn log_endpoints_exact() {
        let lo = MapCurve::Logarithmic.apply(0.0, 1000.0, 19000.0);
        let hi = MapCurve::Logarithmic.apply(1.0, 1000.0, 19000.0);
        assert!((lo - 1000.0).abs() < 1e-3 * 1000.0);
        assert!((hi - 19000.0).abs() < 1e-3 * 19000.0);
    }

    #[test]
    fn log_midpoint_is_geometric_mean() {
        let mid = MapCurve::Logarithmic.apply(0.5, 40.0, 4000.0);
        let expected = 400.0; // sqrt(40 * 4000)
        assert!(
            (mid - expected).abs() < 1.0,
            "Expected ~{expected}, got {mid}"
        );
    }

    #[test]
    fn out_of_range_control_pins_to_endpoints() {
        assert_eq!(MapCurve::Linear.apply(-0.5, 0.0, 1.0), 0.0);
        assert_eq!(MapCurve::Linear.apply(1.5, 0.0, 1.0), 1.0);
        let hi = MapCurve::Logarithmic.apply(2.0, 100.0, 200.0);
        assert!((hi - 200.0).abs() < 1e-2);
    }

    #[test]
    fn both_curves_monotonic() {
        for curve in [MapCurve::Linear, MapCurve::Logarithmic] {
            let mut prev = curve.apply(0.0, 20.0, 20000.0);
            for i in 1..=100 {
                let x = i as f32 / 100.0;
                let y = curve.apply(x, 20.0, 20000.0);
                assert!(y >= prev, "{curve:?} not monotonic at x={x}");
                prev = y;
            }
        }
    }

    #[test]
    fn descending_linear_range_maps_inverted() {
        // Used for the dry side of the mix split: more knob, less dry.
        let y = MapCurve::Linear.apply(0.25, 1.0, 0.0);
        assert!((y - 0.75).abs() < 1e-6);
    }
}
