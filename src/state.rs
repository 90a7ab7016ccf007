//! Slider value state and the normalized/domain value mapping.
//!
//! The normalized value (0.0–1.0) is the single source of truth for the
//! thumb position. The domain value is always derived from it:
//! `min_value + range * normalized`.

use floem::peniko::Color;
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::format::NumberFormat;

/// Primary axis of the slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Minimum on the left, maximum on the right.
    #[default]
    Horizontal,
    /// Minimum at the bottom, maximum at the top.
    Vertical,
}

/// Colors, labels, and visibility toggles consumed by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderStyle {
    pub bar_background_color: Color,
    pub bar_color: Color,
    pub thumb_color: Color,
    pub value_text_color: Color,
    pub name_text_color: Color,
    pub zero_color: Color,
    pub name: String,
    pub format: NumberFormat,
    pub value_visible: bool,
    pub name_visible: bool,
    /// Filled track when `true`, outlined track otherwise.
    pub bar_background_filled: bool,
    pub show_zero: bool,
    /// Grow the bar from the zero-crossing instead of the origin edge.
    pub start_from_zero: bool,
}

impl Default for SliderStyle {
    fn default() -> Self {
        Self {
            bar_background_color: constants::DEFAULT_BAR_BACKGROUND,
            bar_color: constants::DEFAULT_BAR,
            thumb_color: constants::DEFAULT_THUMB,
            value_text_color: constants::DEFAULT_VALUE_TEXT,
            name_text_color: constants::DEFAULT_NAME_TEXT,
            zero_color: constants::DEFAULT_ZERO,
            name: String::new(),
            format: NumberFormat::default(),
            value_visible: true,
            name_visible: true,
            bar_background_filled: true,
            show_zero: true,
            start_from_zero: false,
        }
    }
}

/// Everything the slider knows about its value, behavior, and surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderState {
    orientation: Orientation,
    min_value: f64,
    range: f64,
    normalized: f64,
    zero_in_range: bool,
    pub(crate) snap_to_zero: bool,
    pub(crate) return_to_zero: bool,
    pub(crate) style: SliderStyle,
    width: f64,
    height: f64,
}

impl Default for SliderState {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            min_value: 0.0,
            range: 1.0,
            normalized: 0.0,
            zero_in_range: false,
            snap_to_zero: false,
            return_to_zero: false,
            style: SliderStyle::default(),
            width: 0.0,
            height: 0.0,
        }
    }
}

fn zero_in_range(min_value: f64, range: f64) -> bool {
    min_value < 0.0 && min_value + range > 0.0
}

impl SliderState {
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    /// Upper bound of the domain, `min_value + range`.
    pub fn max_value(&self) -> f64 {
        self.min_value + self.range
    }

    pub fn range(&self) -> f64 {
        self.range
    }

    /// Thumb position in 0.0–1.0.
    pub fn normalized(&self) -> f64 {
        self.normalized
    }

    /// The value in the caller's units.
    pub fn value(&self) -> f64 {
        self.to_domain(self.normalized)
    }

    /// `true` iff `min_value < 0 < min_value + range`.
    pub fn zero_in_range(&self) -> bool {
        self.zero_in_range
    }

    /// Normalized position of domain value 0, when 0 lies strictly inside the domain.
    pub fn zero_position(&self) -> Option<f64> {
        self.zero_in_range.then(|| self.min_value.abs() / self.range)
    }

    pub fn style(&self) -> &SliderStyle {
        &self.style
    }

    pub fn snap_to_zero(&self) -> bool {
        self.snap_to_zero
    }

    pub fn return_to_zero(&self) -> bool {
        self.return_to_zero
    }

    /// Drawable surface size.
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn to_domain(&self, normalized: f64) -> f64 {
        self.min_value + self.range * normalized
    }

    /// Map a domain value into 0.0–1.0, clamping values outside the domain.
    pub fn to_normalized(&self, value: f64) -> f64 {
        if self.range == 0.0 {
            return 0.0;
        }
        ((value - self.min_value) / self.range).clamp(0.0, 1.0)
    }

    pub(crate) fn set_orientation(&mut self, orientation: Orientation) -> bool {
        if self.orientation == orientation {
            return false;
        }
        self.orientation = orientation;
        true
    }

    /// Returns whether the stored minimum changed.
    pub(crate) fn set_min_value(&mut self, min_value: f64) -> bool {
        if !min_value.is_finite() {
            log::warn!("ignoring non-finite minimum value {min_value}");
            return false;
        }
        if self.min_value == min_value {
            return false;
        }
        self.min_value = min_value;
        self.zero_in_range = zero_in_range(self.min_value, self.range);
        true
    }

    /// Negative ranges are coerced to 1. Returns whether the stored range changed.
    pub(crate) fn set_range(&mut self, range: f64) -> bool {
        if !range.is_finite() {
            log::warn!("ignoring non-finite range {range}");
            return false;
        }
        let range = if range < 0.0 {
            log::debug!("range {range} is negative, using 1");
            1.0
        } else {
            range
        };
        if self.range == range {
            return false;
        }
        self.range = range;
        self.zero_in_range = zero_in_range(self.min_value, self.range);
        true
    }

    /// Clamp into 0.0–1.0 and store. Returns whether the stored value changed.
    pub(crate) fn set_normalized(&mut self, normalized: f64) -> bool {
        if normalized.is_nan() {
            log::warn!("ignoring NaN slider value");
            return false;
        }
        let normalized = normalized.clamp(0.0, 1.0);
        if normalized == self.normalized {
            return false;
        }
        self.normalized = normalized;
        true
    }

    /// Clamp into the domain and store its normalized form.
    pub(crate) fn set_domain_value(&mut self, value: f64) -> bool {
        if value.is_nan() {
            log::warn!("ignoring NaN slider value");
            return false;
        }
        let clamped = value.max(self.min_value).min(self.max_value());
        self.set_normalized(self.to_normalized(clamped))
    }

    pub(crate) fn set_size(&mut self, width: f64, height: f64) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(min_value: f64, range: f64) -> SliderState {
        let mut s = SliderState::default();
        s.set_range(range);
        s.set_min_value(min_value);
        s
    }

    #[test]
    fn defaults() {
        let s = SliderState::default();
        assert_eq!(s.orientation(), Orientation::Horizontal);
        assert_eq!(s.min_value(), 0.0);
        assert_eq!(s.range(), 1.0);
        assert_eq!(s.normalized(), 0.0);
        assert!(!s.zero_in_range());
        assert!(!s.snap_to_zero());
        assert!(!s.return_to_zero());
        assert!(!s.style().start_from_zero);
        assert!(s.style().value_visible);
        assert!(s.style().name_visible);
        assert!(s.style().show_zero);
        assert!(s.style().bar_background_filled);
    }

    #[test]
    fn zero_in_range_cases() {
        assert!(state(-50.0, 100.0).zero_in_range());
        assert!(!state(0.0, 100.0).zero_in_range());
        assert!(!state(10.0, 5.0).zero_in_range());
        assert!(!state(-10.0, 10.0).zero_in_range());
    }

    #[test]
    fn zero_in_range_tracks_every_mutation() {
        let mut s = state(-50.0, 100.0);
        s.set_min_value(5.0);
        assert!(!s.zero_in_range());
        s.set_min_value(-5.0);
        assert!(s.zero_in_range());
        s.set_range(2.0);
        assert!(!s.zero_in_range());
    }

    #[test]
    fn negative_range_becomes_one() {
        let mut s = state(0.0, 100.0);
        assert!(s.set_range(-3.0));
        assert_eq!(s.range(), 1.0);
        assert!(!s.set_range(-7.0));
    }

    #[test]
    fn mapping() {
        let s = state(-50.0, 100.0);
        assert_eq!(s.to_domain(0.25), -25.0);
        assert_eq!(s.to_normalized(25.0), 0.75);
        assert_eq!(s.to_normalized(500.0), 1.0);
        assert_eq!(s.to_normalized(-500.0), 0.0);
        assert_eq!(s.zero_position(), Some(0.5));
    }

    #[test]
    fn zero_range_maps_to_origin() {
        let s = state(3.0, 0.0);
        assert_eq!(s.to_normalized(3.0), 0.0);
        assert_eq!(s.value(), 3.0);
    }

    #[test]
    fn domain_setter_clamps() {
        let mut s = state(-50.0, 100.0);
        s.set_domain_value(80.0);
        assert_eq!(s.normalized(), 1.0);
        s.set_domain_value(-80.0);
        assert_eq!(s.normalized(), 0.0);
    }

    #[test]
    fn normalized_setter_clamps_and_reports_change() {
        let mut s = SliderState::default();
        assert!(s.set_normalized(1.5));
        assert_eq!(s.normalized(), 1.0);
        assert!(!s.set_normalized(1.0));
        assert!(s.set_normalized(-0.5));
        assert_eq!(s.normalized(), 0.0);
    }

    #[test]
    fn nan_is_ignored() {
        let mut s = state(-50.0, 100.0);
        s.set_normalized(0.3);
        assert!(!s.set_normalized(f64::NAN));
        assert!(!s.set_domain_value(f64::NAN));
        assert!(!s.set_range(f64::NAN));
        assert!(!s.set_min_value(f64::NAN));
        assert_eq!(s.normalized(), 0.3);
        assert_eq!(s.range(), 100.0);
    }

    #[test]
    fn infinite_bounds_are_ignored() {
        let mut s = state(-50.0, 100.0);
        assert!(!s.set_range(f64::INFINITY));
        assert!(!s.set_min_value(f64::NEG_INFINITY));
        assert_eq!(s.range(), 100.0);
        assert_eq!(s.min_value(), -50.0);
        assert_eq!(s.to_domain(0.0), -50.0);
    }
}
