//! The host-independent slider widget.
//!
//! [`TouchSlider`] owns the value state, the observers, and the last
//! rendered [`DisplayList`]. Every mutation that changes something redraws
//! once; value changes additionally notify observers, after the redraw.

use std::rc::Rc;

use floem::peniko::Color;

use crate::config::SliderConfig;
use crate::format::{FormatError, NumberFormat};
use crate::input::{self, DragState, InputEvent, InputKind, InputModality};
use crate::observer::{Observers, SliderEvent, SliderObserver};
use crate::render::{self, DisplayList};
use crate::state::{Orientation, SliderState, SliderStyle};

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

pub struct TouchSlider {
    state: SliderState,
    observers: Observers,
    modality: InputModality,
    drag: DragState,
    scene: DisplayList,
    redraws: u64,
}

impl Default for TouchSlider {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchSlider {
    /// A slider with default settings, listening to the platform's input modality.
    pub fn new() -> Self {
        Self::with_modality(InputModality::detect())
    }

    pub fn with_modality(modality: InputModality) -> Self {
        Self {
            state: SliderState::default(),
            observers: Observers::default(),
            modality,
            drag: DragState::Idle,
            scene: DisplayList::new(),
            redraws: 0,
        }
    }

    /// A slider configured from `config`.
    ///
    /// An unusable format string is logged and the default format is kept.
    pub fn with_config(config: &SliderConfig) -> Self {
        let mut slider = Self::new();
        if let Err(err) = slider.apply_config(config) {
            log::warn!("keeping default value format: {err}");
        }
        slider
    }

    /// Apply every attribute of `config`, leaving the value untouched.
    ///
    /// Redraws at most once. If the format string does not parse, the other
    /// attributes are still applied and the previous format is kept.
    pub fn apply_config(&mut self, config: &SliderConfig) -> Result<(), FormatError> {
        let format = NumberFormat::parse(&config.format);

        let state = &mut self.state;
        let mut changed = state.set_orientation(config.orientation);
        changed |= state.set_range(config.range);
        changed |= state.set_min_value(config.min_value);
        state.snap_to_zero = config.snap_to_zero;
        state.return_to_zero = config.return_to_zero;

        let style = &mut state.style;
        changed |= replace(&mut style.name, config.name.clone());
        changed |= replace(&mut style.bar_background_color, config.bar_background_color);
        changed |= replace(&mut style.bar_color, config.bar_color);
        changed |= replace(&mut style.thumb_color, config.thumb_color);
        changed |= replace(&mut style.value_text_color, config.value_text_color);
        changed |= replace(&mut style.name_text_color, config.name_text_color);
        changed |= replace(&mut style.zero_color, config.zero_color);
        changed |= replace(&mut style.value_visible, config.value_visible);
        changed |= replace(&mut style.name_visible, config.name_visible);
        changed |= replace(&mut style.bar_background_filled, config.bar_background_filled);
        changed |= replace(&mut style.show_zero, config.show_zero);
        changed |= replace(&mut style.start_from_zero, config.start_from_zero);
        if let Ok(format) = &format {
            changed |= replace(&mut style.format, format.clone());
        }

        if changed {
            self.redraw();
        }
        format.map(|_| ())
    }

    pub fn state(&self) -> &SliderState {
        &self.state
    }

    pub fn modality(&self) -> InputModality {
        self.modality
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// The most recently rendered frame.
    pub fn scene(&self) -> &DisplayList {
        &self.scene
    }

    /// How many times the slider has redrawn.
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    fn redraw(&mut self) {
        self.scene.clear();
        render::render(&self.state, &mut self.scene);
        self.redraws += 1;
    }

    fn restyle(&mut self, apply: impl FnOnce(&mut SliderStyle) -> bool) {
        if apply(&mut self.state.style) {
            self.redraw();
        }
    }

    fn notify(&self) {
        let event = SliderEvent {
            value: self.state.value(),
        };
        self.observers.notify(&event);
    }

    // Value

    /// The value in domain units.
    pub fn value(&self) -> f64 {
        self.state.value()
    }

    /// Set the value in domain units, clamped into the domain.
    pub fn set_value(&mut self, value: f64) {
        if self.state.set_domain_value(value) {
            self.redraw();
            self.notify();
        }
    }

    pub fn normalized(&self) -> f64 {
        self.state.normalized()
    }

    /// Set the thumb position in 0.0–1.0, clamped.
    pub fn set_normalized(&mut self, normalized: f64) {
        if self.state.set_normalized(normalized) {
            self.redraw();
            self.notify();
        }
    }

    pub fn min_value(&self) -> f64 {
        self.state.min_value()
    }

    pub fn set_min_value(&mut self, min_value: f64) {
        if self.state.set_min_value(min_value) {
            self.redraw();
        }
    }

    pub fn range(&self) -> f64 {
        self.state.range()
    }

    /// Negative ranges are stored as 1.
    pub fn set_range(&mut self, range: f64) {
        if self.state.set_range(range) {
            self.redraw();
        }
    }

    pub fn zero_in_range(&self) -> bool {
        self.state.zero_in_range()
    }

    pub fn orientation(&self) -> Orientation {
        self.state.orientation()
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.state.set_orientation(orientation) {
            self.redraw();
        }
    }

    // Style

    pub fn name(&self) -> &str {
        &self.state.style.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.restyle(|s| replace(&mut s.name, name));
    }

    pub fn format_string(&self) -> &str {
        self.state.style.format.template()
    }

    /// Replace the value format. On error the previous format is kept.
    pub fn set_format_string(&mut self, template: &str) -> Result<(), FormatError> {
        let format = NumberFormat::parse(template).inspect_err(|err| {
            log::warn!("rejecting value format: {err}");
        })?;
        self.restyle(|s| replace(&mut s.format, format));
        Ok(())
    }

    pub fn bar_background_color(&self) -> Color {
        self.state.style.bar_background_color
    }

    pub fn set_bar_background_color(&mut self, color: Color) {
        self.restyle(|s| replace(&mut s.bar_background_color, color));
    }

    pub fn bar_color(&self) -> Color {
        self.state.style.bar_color
    }

    pub fn set_bar_color(&mut self, color: Color) {
        self.restyle(|s| replace(&mut s.bar_color, color));
    }

    pub fn thumb_color(&self) -> Color {
        self.state.style.thumb_color
    }

    pub fn set_thumb_color(&mut self, color: Color) {
        self.restyle(|s| replace(&mut s.thumb_color, color));
    }

    pub fn value_text_color(&self) -> Color {
        self.state.style.value_text_color
    }

    pub fn set_value_text_color(&mut self, color: Color) {
        self.restyle(|s| replace(&mut s.value_text_color, color));
    }

    pub fn name_text_color(&self) -> Color {
        self.state.style.name_text_color
    }

    pub fn set_name_text_color(&mut self, color: Color) {
        self.restyle(|s| replace(&mut s.name_text_color, color));
    }

    pub fn zero_color(&self) -> Color {
        self.state.style.zero_color
    }

    pub fn set_zero_color(&mut self, color: Color) {
        self.restyle(|s| replace(&mut s.zero_color, color));
    }

    pub fn value_visible(&self) -> bool {
        self.state.style.value_visible
    }

    pub fn set_value_visible(&mut self, visible: bool) {
        self.restyle(|s| replace(&mut s.value_visible, visible));
    }

    pub fn name_visible(&self) -> bool {
        self.state.style.name_visible
    }

    pub fn set_name_visible(&mut self, visible: bool) {
        self.restyle(|s| replace(&mut s.name_visible, visible));
    }

    pub fn bar_background_filled(&self) -> bool {
        self.state.style.bar_background_filled
    }

    pub fn set_bar_background_filled(&mut self, filled: bool) {
        self.restyle(|s| replace(&mut s.bar_background_filled, filled));
    }

    pub fn show_zero(&self) -> bool {
        self.state.style.show_zero
    }

    pub fn set_show_zero(&mut self, show: bool) {
        self.restyle(|s| replace(&mut s.show_zero, show));
    }

    pub fn start_from_zero(&self) -> bool {
        self.state.style.start_from_zero
    }

    pub fn set_start_from_zero(&mut self, start: bool) {
        self.restyle(|s| replace(&mut s.start_from_zero, start));
    }

    // Behavior. Not visible, so no redraw.

    pub fn snap_to_zero(&self) -> bool {
        self.state.snap_to_zero
    }

    pub fn set_snap_to_zero(&mut self, snap: bool) {
        self.state.snap_to_zero = snap;
    }

    pub fn return_to_zero(&self) -> bool {
        self.state.return_to_zero
    }

    pub fn set_return_to_zero(&mut self, ret: bool) {
        self.state.return_to_zero = ret;
    }

    // Observers

    /// Returns `false` if `observer` was already registered.
    pub fn add_observer(&mut self, observer: Rc<dyn SliderObserver>) -> bool {
        self.observers.add(observer)
    }

    /// Returns `false` if `observer` was not registered.
    pub fn remove_observer(&mut self, observer: &Rc<dyn SliderObserver>) -> bool {
        self.observers.remove(observer)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // Host integration

    /// Set the drawable surface size, excluding insets.
    pub fn resize(&mut self, width: f64, height: f64) {
        if !self.state.set_size(width, height) {
            return;
        }
        if width > 0.0 && height > 0.0 {
            self.redraw();
        } else {
            self.scene.clear();
        }
    }

    /// Feed an input event. Events from another modality are ignored and
    /// `false` is returned.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        if event.modality != self.modality {
            return false;
        }
        match event.kind {
            InputKind::Move { x, y } => {
                self.drag = DragState::Dragging;
                let (width, height) = self.state.size();
                if let Some(n) =
                    input::position_to_normalized(self.state.orientation(), x, y, width, height)
                {
                    self.set_normalized(n);
                }
            }
            InputKind::Release => {
                self.drag = DragState::Idle;
                self.release();
            }
        }
        true
    }

    fn release(&mut self) {
        if let Some(zero) = input::snap_target(&self.state) {
            log::debug!("snapping {} to zero", self.state.value());
            self.set_normalized(zero);
        }
        if self.state.return_to_zero {
            log::debug!("returning {} to zero", self.state.value());
            self.set_value(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::render::DrawOp;

    fn recorder(slider: &mut TouchSlider) -> Rc<RefCell<Vec<f64>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        slider.add_observer(Rc::new(move |e: &SliderEvent| sink.borrow_mut().push(e.value)));
        seen
    }

    fn bipolar() -> TouchSlider {
        let mut slider = TouchSlider::with_modality(InputModality::Pointer);
        slider.set_range(100.0);
        slider.set_min_value(-50.0);
        slider.resize(200.0, 40.0);
        slider
    }

    #[test]
    fn same_value_neither_redraws_nor_notifies() {
        let mut slider = bipolar();
        slider.set_normalized(0.3);
        let seen = recorder(&mut slider);
        let redraws = slider.redraw_count();

        slider.set_normalized(0.3);
        assert_eq!(slider.redraw_count(), redraws);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn new_value_redraws_then_notifies_once() {
        let mut slider = bipolar();
        let seen = recorder(&mut slider);
        let redraws = slider.redraw_count();

        slider.set_normalized(0.75);
        assert_eq!(slider.redraw_count(), redraws + 1);
        assert_eq!(*seen.borrow(), vec![25.0]);
    }

    #[test]
    fn style_setters_redraw_only_on_change() {
        let mut slider = bipolar();
        let before = slider.redraw_count();
        slider.set_bar_color(Color::rgb8(50, 50, 150));
        assert_eq!(slider.redraw_count(), before + 1);
        slider.set_bar_color(Color::rgb8(50, 50, 150));
        slider.set_show_zero(true);
        assert_eq!(slider.redraw_count(), before + 1);
        slider.set_snap_to_zero(true);
        assert_eq!(slider.redraw_count(), before + 1);
    }

    #[test]
    fn range_and_min_do_not_notify() {
        let mut slider = bipolar();
        let seen = recorder(&mut slider);
        slider.set_range(10.0);
        slider.set_min_value(3.0);
        assert!(seen.borrow().is_empty());
        assert!(!slider.zero_in_range());
    }

    #[test]
    fn format_errors_keep_previous_format() {
        let mut slider = bipolar();
        slider.set_format_string("%.0f").unwrap();
        let redraws = slider.redraw_count();
        assert!(slider.set_format_string("%s").is_err());
        assert_eq!(slider.format_string(), "%.0f");
        assert_eq!(slider.redraw_count(), redraws);
    }

    #[test]
    fn huge_field_width_is_refused_and_labels_still_render() {
        let mut slider = bipolar();
        assert_eq!(
            slider.set_format_string("%99999999999999999999f"),
            Err(FormatError::OutOfRange("%99999999999999999999f".into()))
        );
        slider.set_value(25.0);
        let label = slider.scene().ops().iter().find_map(|op| match op {
            DrawOp::FillText { text, .. } => Some(text.clone()),
            _ => None,
        });
        assert_eq!(label.as_deref(), Some("25.0"));
    }

    #[test]
    fn drag_maps_pointer_position() {
        let mut slider = bipolar();
        let m = InputModality::Pointer;
        assert!(slider.handle_input(InputEvent::moved(m, 50.0, 0.0)));
        assert_eq!(slider.normalized(), 0.25);
        assert_eq!(slider.drag_state(), DragState::Dragging);
        slider.handle_input(InputEvent::moved(m, 900.0, 0.0));
        assert_eq!(slider.normalized(), 1.0);
        slider.handle_input(InputEvent::released(m));
        assert_eq!(slider.drag_state(), DragState::Idle);
    }

    #[test]
    fn other_modality_is_ignored() {
        let mut slider = bipolar();
        assert!(!slider.handle_input(InputEvent::moved(InputModality::Touch, 50.0, 0.0)));
        assert_eq!(slider.normalized(), 0.0);
    }

    #[test]
    fn release_snaps_near_zero() {
        let mut slider = bipolar();
        slider.set_snap_to_zero(true);
        slider.set_value(0.5);
        assert_ne!(slider.normalized(), 0.5);
        slider.handle_input(InputEvent::released(InputModality::Pointer));
        assert_eq!(slider.normalized(), 0.5);
        assert_eq!(slider.value(), 0.0);
    }

    #[test]
    fn release_outside_tolerance_keeps_value() {
        let mut slider = bipolar();
        slider.set_snap_to_zero(true);
        slider.set_value(4.0);
        let n = slider.normalized();
        slider.handle_input(InputEvent::released(InputModality::Pointer));
        assert_eq!(slider.normalized(), n);
    }

    #[test]
    fn return_to_zero_on_release() {
        let mut slider = bipolar();
        slider.set_return_to_zero(true);
        slider.set_value(30.0);
        slider.handle_input(InputEvent::released(InputModality::Pointer));
        assert_eq!(slider.value(), 0.0);

        slider.set_min_value(10.0);
        slider.set_value(60.0);
        slider.handle_input(InputEvent::released(InputModality::Pointer));
        assert_eq!(slider.value(), 10.0);
    }

    #[test]
    fn resize_redraws_only_positive_sizes() {
        let mut slider = TouchSlider::with_modality(InputModality::Pointer);
        assert!(slider.scene().is_empty());
        slider.resize(100.0, 0.0);
        assert_eq!(slider.redraw_count(), 0);
        slider.resize(100.0, 30.0);
        assert_eq!(slider.redraw_count(), 1);
        assert!(matches!(slider.scene().ops()[0], DrawOp::Clear(_)));
        slider.resize(100.0, 30.0);
        assert_eq!(slider.redraw_count(), 1);
    }

    #[test]
    fn apply_config_redraws_once_and_keeps_position() {
        let mut slider = bipolar();
        slider.set_value(20.0);
        let redraws = slider.redraw_count();
        let config = SliderConfig {
            name: "Treble".into(),
            min_value: -100.0,
            range: 200.0,
            start_from_zero: true,
            snap_to_zero: true,
            ..SliderConfig::default()
        };
        slider.apply_config(&config).unwrap();
        assert_eq!(slider.redraw_count(), redraws + 1);
        assert_eq!(slider.name(), "Treble");
        assert!(slider.zero_in_range());
        assert!(slider.snap_to_zero());
        assert_eq!(slider.normalized(), 0.7);
    }

    #[test]
    fn apply_config_with_bad_format_applies_the_rest() {
        let mut slider = bipolar();
        let config = SliderConfig {
            name: "Gain".into(),
            format: "%q".into(),
            ..SliderConfig::default()
        };
        assert!(slider.apply_config(&config).is_err());
        assert_eq!(slider.name(), "Gain");
        assert_eq!(slider.format_string(), "%.1f");
    }
}
