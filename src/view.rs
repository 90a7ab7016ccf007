//! Floem view hosting a [`TouchSlider`].
//!
//! The layout box minus padding and border feeds [`TouchSlider::resize`].
//! Pointer events, shifted into that box, feed [`TouchSlider::handle_input`].
//! Paint replays the slider's display list through a kurbo-backed
//! [`Surface`].

use std::rc::Rc;

use floem::kurbo::{Affine, Insets, Line, Point, Rect, Size, Stroke, Vec2};
use floem::peniko::Color;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};
use floem::text::{Attrs, AttrsList, TextLayout};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::config::SliderConfig;
use crate::constants;
use crate::input::InputEvent;
use crate::observer::{SliderEvent, SliderObserver};
use crate::render::{Surface, TextAlign, TextStyle};
use crate::slider::TouchSlider;

enum SliderUpdate {
    Value(f64),
    Config(Box<SliderConfig>),
}

pub struct TouchSliderView {
    id: ViewId,
    held: bool,
    /// Drawable area inside padding and border, in view coordinates.
    content: Rect,
    slider: TouchSlider,
}

/// Creates a touch slider.
///
/// - `value`: the slider value in domain units. External writes move the
///   thumb; dragging writes the new value back.
/// - `config`: styling and behavior. Re-applied whenever a signal it reads
///   changes.
pub fn touch_slider(
    value: RwSignal<f64>,
    config: impl Fn() -> SliderConfig + 'static,
) -> TouchSliderView {
    let id = ViewId::new();
    let initial = config();

    create_effect(move |_| {
        let v = value.get();
        id.update_state(SliderUpdate::Value(v));
    });

    create_effect(move |_| {
        let c = config();
        id.update_state(SliderUpdate::Config(Box::new(c)));
    });

    let mut slider = TouchSlider::with_config(&initial);
    slider.set_value(value.get_untracked());
    let write_back: Rc<dyn SliderObserver> = Rc::new(move |e: &SliderEvent| {
        if value.get_untracked() != e.value {
            value.set(e.value);
        }
    });
    slider.add_observer(write_back);

    TouchSliderView {
        id,
        held: false,
        content: Rect::ZERO,
        slider,
    }
    .style(|s| {
        s.width(constants::PREFERRED_SIZE)
            .height(constants::PREFERRED_SIZE)
            .min_width(constants::MINIMUM_SIZE)
            .min_height(constants::MINIMUM_SIZE)
            .max_width(constants::MAXIMUM_SIZE)
            .max_height(constants::MAXIMUM_SIZE)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl TouchSliderView {
    /// Call `on_change` with the new domain value whenever the value changes.
    pub fn on_change(mut self, on_change: impl Fn(f64) + 'static) -> Self {
        let observer: Rc<dyn SliderObserver> = Rc::new(move |e: &SliderEvent| on_change(e.value));
        self.slider.add_observer(observer);
        self
    }

    pub fn slider(&self) -> &TouchSlider {
        &self.slider
    }
}

impl View for TouchSliderView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<SliderUpdate>() {
            match *update {
                SliderUpdate::Value(v) => {
                    // Our own write-back echoes here; skip it.
                    if (self.slider.value() - v).abs() > constants::SYNC_EPSILON {
                        self.slider.set_value(v);
                    }
                }
                SliderUpdate::Config(config) => {
                    if let Err(err) = self.slider.apply_config(&config) {
                        log::warn!("slider config kept previous format: {err}");
                    }
                }
            }
            self.id.request_layout();
        }
    }

    fn event_before_children(
        &mut self,
        cx: &mut EventCx,
        event: &Event,
    ) -> EventPropagation {
        let modality = self.slider.modality();
        match event {
            Event::PointerDown(_) => {
                cx.update_active(self.id());
                self.held = true;
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                if self.held {
                    let pos = e.pos - self.content.origin().to_vec2();
                    self.slider
                        .handle_input(InputEvent::moved(modality, pos.x, pos.y));
                    self.id.request_layout();
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(_) | Event::FocusLost => {
                if self.held {
                    self.held = false;
                    self.slider.handle_input(InputEvent::released(modality));
                    self.id.request_layout();
                }
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        let insets = Insets::new(
            (layout.padding.left + layout.border.left) as f64,
            (layout.padding.top + layout.border.top) as f64,
            (layout.padding.right + layout.border.right) as f64,
            (layout.padding.bottom + layout.border.bottom) as f64,
        );
        let size = Size::new(layout.size.width as f64, layout.size.height as f64);
        self.content = content_rect(size, insets);
        self.slider
            .resize(self.content.width(), self.content.height());
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let (w, h) = self.slider.state().size();
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let offset = self.content.origin().to_vec2();
        let window_origin = self.id.layout_rect().origin().to_vec2() + offset;
        cx.save();
        let mut surface = PaintSurface {
            cx: &mut *cx,
            offset,
            window_origin,
            current: Affine::IDENTITY,
            saved: Vec::new(),
            absolute: false,
        };
        self.slider.scene().replay(&mut surface);
        cx.restore();
    }
}

/// The drawable box of a view of `size` with `insets` removed.
///
/// The box is centred in the view, so uneven insets split the difference.
fn content_rect(size: Size, insets: Insets) -> Rect {
    let width = (size.width - insets.x0 - insets.x1).max(0.0);
    let height = (size.height - insets.y0 - insets.y1).max(0.0);
    Rect::from_origin_size(
        ((size.width - width) * 0.5, (size.height - height) * 0.5),
        (width, height),
    )
}

fn is_translation(transform: Affine) -> bool {
    let [a, b, c, d, _, _] = transform.as_coeffs();
    a == 1.0 && b == 0.0 && c == 0.0 && d == 1.0
}

/// Replays slider draw calls onto a Floem paint context.
///
/// Drawing stays in the context's own transform, shifted to the content box.
/// Rotated text needs an absolute renderer transform built from the content
/// box's window position; the context transform is put back afterwards.
struct PaintSurface<'a, 'b> {
    cx: &'a mut PaintCx<'b>,
    offset: Vec2,
    window_origin: Vec2,
    current: Affine,
    saved: Vec<Affine>,
    absolute: bool,
}

impl PaintSurface<'_, '_> {
    /// Prepare the renderer for drawing in slider coordinates and return the
    /// shift to add to them.
    fn place(&mut self) -> Vec2 {
        if is_translation(self.current) {
            if self.absolute {
                self.cx.restore();
                self.cx.save();
                self.absolute = false;
            }
            self.offset + self.current.translation()
        } else {
            Renderer::transform(
                &mut **self.cx,
                Affine::translate(self.window_origin) * self.current,
            );
            self.absolute = true;
            Vec2::ZERO
        }
    }

    fn text_layout(text: &str, size: f64, color: Color) -> TextLayout {
        let mut layout = TextLayout::new();
        layout.set_text(
            text,
            AttrsList::new(Attrs::new().font_size(size as f32).color(color)),
        );
        layout
    }
}

impl Surface for PaintSurface<'_, '_> {
    fn clear_rect(&mut self, _rect: Rect) {
        // Floem repaints from scratch every frame.
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: f64, color: Color) {
        let shift = self.place();
        self.cx.fill(&(rect + shift).to_rounded_rect(radius), color, 0.0);
    }

    fn stroke_round_rect(&mut self, rect: Rect, radius: f64, color: Color, width: f64) {
        let shift = self.place();
        self.cx.stroke(
            &(rect + shift).to_rounded_rect(radius),
            color,
            &Stroke::new(width),
        );
    }

    fn stroke_line(&mut self, line: Line, color: Color, width: f64, dashes: &[f64]) {
        let shift = self.place();
        let stroke = Stroke::new(width).with_dashes(0.0, dashes.iter().copied());
        self.cx
            .stroke(&Line::new(line.p0 + shift, line.p1 + shift), color, &stroke);
    }

    fn fill_text(&mut self, text: &str, anchor: Point, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        let mut layout = Self::text_layout(text, style.size, style.color);
        let mut size = layout.size();
        if style.max_width > 0.0 && size.width > style.max_width {
            let shrunk = style.size * style.max_width / size.width;
            layout = Self::text_layout(text, shrunk, style.color);
            size = layout.size();
        }
        let x = match style.align {
            TextAlign::Left => anchor.x,
            TextAlign::Right => anchor.x - size.width,
        };
        let y = anchor.y - size.height * 0.5;
        let shift = self.place();
        self.cx.draw_text(&layout, Point::new(x, y) + shift);
    }

    fn save(&mut self) {
        self.saved.push(self.current);
    }

    fn restore(&mut self) {
        self.current = self.saved.pop().unwrap_or(Affine::IDENTITY);
    }

    fn translate(&mut self, offset: Vec2) {
        self.current = self.current * Affine::translate(offset);
    }

    fn rotate(&mut self, degrees: f64) {
        self.current = self.current * Affine::rotate(degrees.to_radians());
    }
}
