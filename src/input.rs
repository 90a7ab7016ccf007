//! Pointer and touch input mapping.
//!
//! A slider listens to exactly one input modality, chosen once when it is
//! created. Move events re-map the absolute pointer position onto the
//! primary axis; release events may snap the value onto zero.

use crate::constants;
use crate::state::{Orientation, SliderState};

/// Which kind of input device drives the slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputModality {
    Touch,
    Pointer,
}

impl InputModality {
    /// Touch on touch-first platforms, pointer everywhere else.
    pub fn detect() -> Self {
        let modality = if cfg!(any(target_os = "android", target_os = "ios")) {
            InputModality::Touch
        } else {
            InputModality::Pointer
        };
        log::debug!("slider input modality: {modality:?}");
        modality
    }
}

/// What happened, in surface-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputKind {
    /// Pointer dragged or touch point moved.
    Move { x: f64, y: f64 },
    /// Pointer button or touch point released.
    Release,
}

/// An input event tagged with the modality that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    pub modality: InputModality,
    pub kind: InputKind,
}

impl InputEvent {
    pub fn moved(modality: InputModality, x: f64, y: f64) -> Self {
        Self {
            modality,
            kind: InputKind::Move { x, y },
        }
    }

    pub fn released(modality: InputModality) -> Self {
        Self {
            modality,
            kind: InputKind::Release,
        }
    }
}

/// Drag tracking.
///
/// Any move counts as a drag, wherever the press started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Normalized position under `(x, y)`; `None` on an empty surface.
///
/// Horizontal sliders grow to the right, vertical sliders grow upwards.
pub fn position_to_normalized(
    orientation: Orientation,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Option<f64> {
    let n = match orientation {
        Orientation::Horizontal if width > 0.0 => x / width,
        Orientation::Vertical if height > 0.0 => 1.0 - y / height,
        _ => return None,
    };
    Some(n.clamp(0.0, 1.0))
}

/// Normalized value to apply on release, if the value should move.
pub(crate) fn snap_target(state: &SliderState) -> Option<f64> {
    if !state.snap_to_zero() {
        return None;
    }
    let zero = state.zero_position()?;
    let tolerance = state.range() * constants::SNAP_TOLERANCE;
    let value = state.value();
    (value > -tolerance && value < tolerance).then_some(zero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_mapping() {
        let h = Orientation::Horizontal;
        assert_eq!(position_to_normalized(h, 0.0, 7.0, 200.0, 40.0), Some(0.0));
        assert_eq!(position_to_normalized(h, 200.0, 7.0, 200.0, 40.0), Some(1.0));
        assert_eq!(position_to_normalized(h, 50.0, 7.0, 200.0, 40.0), Some(0.25));
        assert_eq!(position_to_normalized(h, -20.0, 7.0, 200.0, 40.0), Some(0.0));
        assert_eq!(position_to_normalized(h, 420.0, 7.0, 200.0, 40.0), Some(1.0));
    }

    #[test]
    fn vertical_mapping_is_inverted() {
        let v = Orientation::Vertical;
        assert_eq!(position_to_normalized(v, 3.0, 0.0, 40.0, 200.0), Some(1.0));
        assert_eq!(position_to_normalized(v, 3.0, 200.0, 40.0, 200.0), Some(0.0));
        assert_eq!(position_to_normalized(v, 3.0, 150.0, 40.0, 200.0), Some(0.25));
        assert_eq!(position_to_normalized(v, 3.0, -9.0, 40.0, 200.0), Some(1.0));
    }

    #[test]
    fn empty_surface_maps_nothing() {
        assert_eq!(
            position_to_normalized(Orientation::Horizontal, 10.0, 10.0, 0.0, 50.0),
            None
        );
        assert_eq!(
            position_to_normalized(Orientation::Vertical, 10.0, 10.0, 50.0, 0.0),
            None
        );
    }

    #[test]
    fn snap_requires_flag_and_zero_in_range() {
        let mut s = SliderState::default();
        s.set_range(100.0);
        s.set_min_value(-50.0);
        s.set_domain_value(0.5);
        assert_eq!(snap_target(&s), None);

        s.snap_to_zero = true;
        assert_eq!(snap_target(&s), Some(0.5));

        s.set_domain_value(2.0);
        assert_eq!(snap_target(&s), None);

        s.set_min_value(0.0);
        s.set_domain_value(0.5);
        assert_eq!(snap_target(&s), None);
    }
}
