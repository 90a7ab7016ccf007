//! # floem-touch-slider
//!
//! A touch/mouse draggable slider widget for [Floem](https://github.com/lapce/floem).
//!
//! The slider draws a rounded track, a bar, and a thumb, with optional value
//! and name labels and a dashed zero marker. It can grow its bar from zero
//! for bipolar ranges and snap back onto zero when released close to it.
//!
//! The widget logic lives in [`TouchSlider`], which does not depend on a
//! window: it renders into any [`Surface`] and takes [`InputEvent`]s.
//! [`touch_slider`] wraps it in a Floem view.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::prelude::*;
//! use floem_touch_slider::{touch_slider, Orientation, SliderConfig};
//!
//! let bass = RwSignal::new(0.0);
//! let view = touch_slider(bass, || SliderConfig {
//!     name: "Bass".to_string(),
//!     orientation: Orientation::Vertical,
//!     min_value: -50.0,
//!     range: 100.0,
//!     ..SliderConfig::default()
//! });
//! // Use `view` in your Floem view tree.
//! ```

mod color;
mod config;
mod constants;
mod format;
mod input;
mod observer;
mod render;
mod slider;
mod state;
mod view;

pub use color::{parse_hex, to_hex};
pub use config::{ConfigError, SliderConfig};
pub use format::{FormatError, NumberFormat};
pub use input::{position_to_normalized, DragState, InputEvent, InputKind, InputModality};
pub use observer::{SliderEvent, SliderObserver};
pub use render::{render, DisplayList, DrawOp, Surface, TextAlign, TextStyle, TrackMetrics};
pub use slider::TouchSlider;
pub use state::{Orientation, SliderState, SliderStyle};
pub use view::{touch_slider, TouchSliderView};
