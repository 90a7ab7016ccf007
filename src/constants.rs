//! Sizing, proportion, and default styling constants for the slider.
//!
//! The proportions are relative to the track: "thickness" is the track's
//! cross-axis size, "length" its primary-axis size.

use floem::peniko::Color;

/// Track thickness as a fraction of the surface's cross dimension
pub const BAR_FRACTION: f64 = 0.75;

/// Corner radius as a fraction of track thickness
pub const CORNER_FRACTION: f64 = 0.1;
pub const CORNER_MIN: f64 = 3.0;
pub const CORNER_MAX: f64 = 10.0;

/// Thumb cross-axis size relative to track thickness
pub const THUMB_OVERHANG: f64 = 1.2;

/// Thumb primary-axis size as a fraction of track length
pub const THUMB_FRACTION: f64 = 0.03;

/// Outline width for an unfilled track, as a fraction of thickness
pub const OUTLINE_FRACTION: f64 = 0.013_333_33;
pub const OUTLINE_MIN: f64 = 1.0;
pub const OUTLINE_MAX: f64 = 5.0;

/// Label font size as a fraction of track thickness
pub const FONT_FRACTION: f64 = 0.4;

/// Label anchors as fractions of track length, measured from the near edge
pub const NEAR_TEXT_FRACTION: f64 = 0.05;
pub const FAR_TEXT_FRACTION: f64 = 0.95;

/// Minimum distance of a label anchor from the surface edge
pub const MIN_TEXT_GAP: f64 = 5.0;

/// Maximum label width as a fraction of the surface's primary dimension
pub const HORIZONTAL_TEXT_MAX: f64 = 0.5;
pub const VERTICAL_TEXT_MAX: f64 = 0.4;

/// Zero marker dash pattern (on, off)
pub const ZERO_DASHES: [f64; 2] = [2.0, 4.0];

/// Release within this fraction of the range around zero snaps to zero
pub const SNAP_TOLERANCE: f64 = 0.015;

/// Preferred widget size
pub const PREFERRED_SIZE: f32 = 250.0;

/// Minimum widget size
pub const MINIMUM_SIZE: f32 = 50.0;

/// Maximum widget size
pub const MAXIMUM_SIZE: f32 = 1024.0;

/// Two domain values closer than this are treated as equal when syncing
/// from an external signal.
pub const SYNC_EPSILON: f64 = 1e-9;

pub const DEFAULT_FORMAT: &str = "%.1f";

pub const DEFAULT_BAR_BACKGROUND: Color = Color::rgba8(0, 0, 255, 77);
pub const DEFAULT_BAR: Color = Color::rgb8(0, 0, 255);
pub const DEFAULT_THUMB: Color = Color::rgb8(0, 0, 255);
pub const DEFAULT_VALUE_TEXT: Color = Color::WHITE;
pub const DEFAULT_NAME_TEXT: Color = Color::WHITE;
pub const DEFAULT_ZERO: Color = Color::WHITE;
