//! Slider rendering.
//!
//! [`render`] paints a [`SliderState`] onto any [`Surface`]. It is a pure
//! function of the state: the same state always produces the same calls.
//! [`DisplayList`] is a [`Surface`] that records the calls so a host can
//! replay them later, and so tests can inspect them.

use floem::kurbo::{Line, Point, Rect, Vec2};
use floem::peniko::Color;

use crate::constants;
use crate::state::{Orientation, SliderState};

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Text starts at the anchor.
    Left,
    /// Text ends at the anchor.
    Right,
}

/// How a line of text is drawn. Text is vertically centered on its anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub color: Color,
    pub align: TextAlign,
    /// Text wider than this is scaled down to fit.
    pub max_width: f64,
}

/// A 2D drawing surface with a canvas-style transform stack.
///
/// Rotations are in degrees, clockwise on a y-down surface.
pub trait Surface {
    fn clear_rect(&mut self, rect: Rect);
    fn fill_round_rect(&mut self, rect: Rect, radius: f64, color: Color);
    fn stroke_round_rect(&mut self, rect: Rect, radius: f64, color: Color, width: f64);
    /// Stroke a line; an empty `dashes` slice draws it solid.
    fn stroke_line(&mut self, line: Line, color: Color, width: f64, dashes: &[f64]);
    fn fill_text(&mut self, text: &str, anchor: Point, style: TextStyle);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, degrees: f64);
}

/// One recorded [`Surface`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Rect),
    FillRoundRect {
        rect: Rect,
        radius: f64,
        color: Color,
    },
    StrokeRoundRect {
        rect: Rect,
        radius: f64,
        color: Color,
        width: f64,
    },
    StrokeLine {
        line: Line,
        color: Color,
        width: f64,
        dashes: Vec<f64>,
    },
    FillText {
        text: String,
        anchor: Point,
        style: TextStyle,
    },
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f64),
}

/// A [`Surface`] that records every call in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Replay the recorded calls onto another surface.
    pub fn replay(&self, surface: &mut impl Surface) {
        for op in &self.ops {
            match op {
                DrawOp::Clear(rect) => surface.clear_rect(*rect),
                DrawOp::FillRoundRect {
                    rect,
                    radius,
                    color,
                } => surface.fill_round_rect(*rect, *radius, *color),
                DrawOp::StrokeRoundRect {
                    rect,
                    radius,
                    color,
                    width,
                } => surface.stroke_round_rect(*rect, *radius, *color, *width),
                DrawOp::StrokeLine {
                    line,
                    color,
                    width,
                    dashes,
                } => surface.stroke_line(*line, *color, *width, dashes),
                DrawOp::FillText {
                    text,
                    anchor,
                    style,
                } => surface.fill_text(text, *anchor, *style),
                DrawOp::Save => surface.save(),
                DrawOp::Restore => surface.restore(),
                DrawOp::Translate(offset) => surface.translate(*offset),
                DrawOp::Rotate(degrees) => surface.rotate(*degrees),
            }
        }
    }
}

impl Surface for DisplayList {
    fn clear_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Clear(rect));
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: f64, color: Color) {
        self.ops.push(DrawOp::FillRoundRect {
            rect,
            radius,
            color,
        });
    }

    fn stroke_round_rect(&mut self, rect: Rect, radius: f64, color: Color, width: f64) {
        self.ops.push(DrawOp::StrokeRoundRect {
            rect,
            radius,
            color,
            width,
        });
    }

    fn stroke_line(&mut self, line: Line, color: Color, width: f64, dashes: &[f64]) {
        self.ops.push(DrawOp::StrokeLine {
            line,
            color,
            width,
            dashes: dashes.to_vec(),
        });
    }

    fn fill_text(&mut self, text: &str, anchor: Point, style: TextStyle) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            anchor,
            style,
        });
    }

    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.ops.push(DrawOp::Translate(offset));
    }

    fn rotate(&mut self, degrees: f64) {
        self.ops.push(DrawOp::Rotate(degrees));
    }
}

/// Track geometry derived from the surface's cross dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackMetrics {
    pub thickness: f64,
    /// Offset of the track from the surface edge on the cross axis.
    pub offset: f64,
    pub corner_radius: f64,
    pub thumb_thickness: f64,
    pub font_size: f64,
}

impl TrackMetrics {
    pub fn new(cross: f64) -> Self {
        let thickness = cross * constants::BAR_FRACTION;
        Self {
            thickness,
            offset: (cross - thickness) * 0.5,
            corner_radius: (thickness * constants::CORNER_FRACTION)
                .clamp(constants::CORNER_MIN, constants::CORNER_MAX),
            thumb_thickness: thickness * constants::THUMB_OVERHANG,
            font_size: thickness * constants::FONT_FRACTION,
        }
    }

    /// Outline width for an unfilled track.
    pub fn outline_width(&self) -> f64 {
        (self.thickness * constants::OUTLINE_FRACTION)
            .clamp(constants::OUTLINE_MIN, constants::OUTLINE_MAX)
    }

    /// The zero marker shares the outline width when the track is outlined.
    pub fn zero_line_width(&self, track_filled: bool) -> f64 {
        if track_filled {
            1.0
        } else {
            self.outline_width()
        }
    }
}

/// Where the foreground bar spans, in normalized units along the track.
#[derive(Debug, Clone, Copy, PartialEq)]
enum BarSpan {
    /// From `start` to `end` with a thumb at `thumb`.
    Filled { start: f64, end: f64, thumb: f64 },
    /// Zero-anchored slider sitting exactly on zero: thumb only.
    ThumbOnly { thumb: f64 },
}

fn bar_span(state: &SliderState) -> BarSpan {
    let n = state.normalized();
    match state.zero_position() {
        Some(zero) if state.style().start_from_zero => {
            let value = state.value();
            if value > 0.0 {
                BarSpan::Filled {
                    start: zero,
                    end: zero + (n - zero).abs(),
                    thumb: zero + (n - zero).abs(),
                }
            } else if value < 0.0 {
                BarSpan::Filled {
                    start: zero - (n - zero).abs(),
                    end: zero,
                    thumb: zero - (n - zero).abs(),
                }
            } else {
                BarSpan::ThumbOnly { thumb: zero }
            }
        }
        _ => BarSpan::Filled {
            start: 0.0,
            end: n,
            thumb: n,
        },
    }
}

/// Paint `state` onto `surface`.
///
/// Emits nothing when either surface dimension is not positive.
pub fn render(state: &SliderState, surface: &mut impl Surface) {
    let (width, height) = state.size();
    if !(width > 0.0 && height > 0.0) {
        return;
    }
    log::trace!("rendering slider at {width}x{height}");
    surface.clear_rect(Rect::new(0.0, 0.0, width, height));
    match state.orientation() {
        Orientation::Horizontal => render_horizontal(state, surface, width, height),
        Orientation::Vertical => render_vertical(state, surface, width, height),
    }
}

fn render_horizontal(state: &SliderState, surface: &mut impl Surface, w: f64, h: f64) {
    let style = state.style();
    let m = TrackMetrics::new(h);
    let bar_y = m.offset;
    let thumb_w = w * constants::THUMB_FRACTION;
    let thumb_y = bar_y - (m.thumb_thickness - m.thickness) * 0.5;

    if style.bar_background_filled {
        surface.fill_round_rect(
            Rect::new(0.0, bar_y, w, bar_y + m.thickness),
            m.corner_radius,
            style.bar_background_color,
        );
    } else {
        let lw = m.outline_width();
        surface.stroke_round_rect(
            Rect::from_origin_size((lw * 0.5, bar_y), (w - lw * 2.0, m.thickness)),
            m.corner_radius,
            style.bar_background_color,
            lw,
        );
    }

    let thumb_x = match bar_span(state) {
        BarSpan::Filled { start, end, thumb } => {
            surface.fill_round_rect(
                Rect::new(start * w, bar_y, end * w, bar_y + m.thickness),
                m.corner_radius,
                style.bar_color,
            );
            thumb * w
        }
        BarSpan::ThumbOnly { thumb } => thumb * w,
    };
    surface.fill_round_rect(
        Rect::new(
            thumb_x - thumb_w * 0.5,
            thumb_y,
            thumb_x + thumb_w * 0.5,
            thumb_y + m.thumb_thickness,
        ),
        m.corner_radius,
        style.thumb_color,
    );

    let center_y = bar_y + m.thickness * 0.5;
    if style.value_visible {
        let x = (w * constants::FAR_TEXT_FRACTION).max(constants::MIN_TEXT_GAP);
        surface.fill_text(
            &style.format.format(state.value()),
            Point::new(x, center_y),
            TextStyle {
                size: m.font_size,
                color: style.value_text_color,
                align: TextAlign::Right,
                max_width: w * constants::HORIZONTAL_TEXT_MAX,
            },
        );
    }

    if style.name_visible {
        let x = (w * constants::NEAR_TEXT_FRACTION).max(constants::MIN_TEXT_GAP);
        surface.fill_text(
            &style.name,
            Point::new(x, center_y),
            TextStyle {
                size: m.font_size,
                color: style.name_text_color,
                align: TextAlign::Left,
                max_width: w * constants::HORIZONTAL_TEXT_MAX,
            },
        );
    }

    if let (Some(zero), true) = (state.zero_position(), style.show_zero) {
        let x = w * zero;
        surface.stroke_line(
            Line::new((x, bar_y), (x, bar_y + m.thickness)),
            style.zero_color,
            m.zero_line_width(style.bar_background_filled),
            &constants::ZERO_DASHES,
        );
    }
}

fn render_vertical(state: &SliderState, surface: &mut impl Surface, w: f64, h: f64) {
    let style = state.style();
    let m = TrackMetrics::new(w);
    let bar_x = m.offset;
    let thumb_h = h * constants::THUMB_FRACTION;
    let thumb_x = bar_x - (m.thumb_thickness - m.thickness) * 0.5;
    // Normalized 0 is the bottom edge.
    let to_y = |n: f64| h - n * h;

    if style.bar_background_filled {
        surface.fill_round_rect(
            Rect::new(bar_x, 0.0, bar_x + m.thickness, h),
            m.corner_radius,
            style.bar_background_color,
        );
    } else {
        let lw = m.outline_width();
        surface.stroke_round_rect(
            Rect::from_origin_size((bar_x, lw + 0.5), (m.thickness, h - lw * 2.0)),
            m.corner_radius,
            style.bar_background_color,
            lw,
        );
    }

    let thumb_y = match bar_span(state) {
        BarSpan::Filled { start, end, thumb } => {
            surface.fill_round_rect(
                Rect::new(bar_x, to_y(end), bar_x + m.thickness, to_y(start)),
                m.corner_radius,
                style.bar_color,
            );
            to_y(thumb)
        }
        BarSpan::ThumbOnly { thumb } => to_y(thumb),
    };
    surface.fill_round_rect(
        Rect::new(
            thumb_x,
            thumb_y - thumb_h * 0.5,
            thumb_x + m.thumb_thickness,
            thumb_y + thumb_h * 0.5,
        ),
        m.corner_radius,
        style.thumb_color,
    );

    let center_x = bar_x + m.thickness * 0.5;
    if style.value_visible {
        let y = (h * constants::NEAR_TEXT_FRACTION).max(constants::MIN_TEXT_GAP);
        surface.save();
        surface.translate(Vec2::new(center_x, y));
        surface.rotate(-90.0);
        surface.fill_text(
            &style.format.format(state.value()),
            Point::ZERO,
            TextStyle {
                size: m.font_size,
                color: style.value_text_color,
                align: TextAlign::Right,
                max_width: h * constants::VERTICAL_TEXT_MAX,
            },
        );
        surface.restore();
    }

    if style.name_visible {
        let y = (h * constants::FAR_TEXT_FRACTION).max(constants::MIN_TEXT_GAP);
        surface.save();
        surface.translate(Vec2::new(center_x, y));
        surface.rotate(270.0);
        surface.fill_text(
            &style.name,
            Point::ZERO,
            TextStyle {
                size: m.font_size,
                color: style.name_text_color,
                align: TextAlign::Left,
                max_width: h * constants::VERTICAL_TEXT_MAX,
            },
        );
        surface.restore();
    }

    if let (Some(zero), true) = (state.zero_position(), style.show_zero) {
        let y = to_y(zero);
        surface.stroke_line(
            Line::new((bar_x, y), (bar_x + m.thickness, y)),
            style.zero_color,
            m.zero_line_width(style.bar_background_filled),
            &constants::ZERO_DASHES,
        );
    }
}
