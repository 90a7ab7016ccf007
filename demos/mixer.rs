//! Standalone demo: three mixer sliders and toggles for the treble slider.

use floem::prelude::*;
use floem::reactive::{RwSignal, SignalGet, SignalUpdate};
use floem::window::WindowConfig;
use floem_touch_slider::{parse_hex, touch_slider, Orientation, SliderConfig};

fn color(hex: &str) -> Color {
    parse_hex(hex).unwrap_or(Color::WHITE)
}

fn toggle(text: &'static str, flag: RwSignal<bool>) -> impl IntoView {
    label(move || format!("[{}] {}", if flag.get() { "x" } else { " " }, text))
        .style(|s| s.font_size(13.0).cursor(floem::style::CursorStyle::Pointer))
        .on_click_stop(move |_| flag.update(|v| *v = !*v))
}

fn main() {
    env_logger::init();

    let volume = RwSignal::new(0.0);
    let bass = RwSignal::new(0.0);
    let treble = RwSignal::new(0.0);

    let value_visible = RwSignal::new(true);
    let name_visible = RwSignal::new(true);
    let filled = RwSignal::new(false);
    let show_zero = RwSignal::new(true);
    let start_from_zero = RwSignal::new(true);
    let snap_to_zero = RwSignal::new(true);
    let return_to_zero = RwSignal::new(false);

    let view = move || {
        h_stack((
            touch_slider(volume, || SliderConfig {
                name: "Volume".into(),
                orientation: Orientation::Vertical,
                range: 100.0,
                format: "%.0f".into(),
                bar_background_color: color("#32323280"),
                bar_color: color("#323232"),
                thumb_color: color("#646464"),
                ..SliderConfig::default()
            })
            .on_change(|v| log::info!("Volume: {v}"))
            .style(|s| s.width(200.0).height(600.0)),
            touch_slider(bass, || SliderConfig {
                name: "Bass".into(),
                orientation: Orientation::Vertical,
                min_value: -50.0,
                range: 100.0,
                format: "%.0f".into(),
                bar_background_color: color("#32329680"),
                bar_color: color("#323296"),
                thumb_color: color("#000064"),
                ..SliderConfig::default()
            })
            .on_change(|v| log::info!("Bass: {v}"))
            .style(|s| s.width(200.0).height(600.0)),
            touch_slider(treble, move || SliderConfig {
                name: "Treble".into(),
                orientation: Orientation::Vertical,
                min_value: -100.0,
                range: 200.0,
                bar_background_color: color("#96323280"),
                bar_color: color("#963232"),
                thumb_color: color("#640000"),
                value_visible: value_visible.get(),
                name_visible: name_visible.get(),
                bar_background_filled: filled.get(),
                show_zero: show_zero.get(),
                start_from_zero: start_from_zero.get(),
                snap_to_zero: snap_to_zero.get(),
                return_to_zero: return_to_zero.get(),
                ..SliderConfig::default()
            })
            .on_change(|v| log::info!("Treble: {v}"))
            .style(|s| s.width(200.0).height(600.0)),
            v_stack((
                toggle("Value visible", value_visible),
                toggle("Name visible", name_visible),
                toggle("Bar background filled", filled),
                toggle("Show zero", show_zero),
                toggle("Start from zero", start_from_zero),
                toggle("Snap to zero", snap_to_zero),
                toggle("Return to zero", return_to_zero),
            ))
            .style(|s| s.gap(5.0)),
        ))
        .style(|s| {
            s.padding(20.0)
                .gap(20.0)
                .size_full()
                .background(Color::rgb8(30, 30, 30))
                .color(Color::WHITE)
        })
    };

    floem::Application::new()
        .window(
            move |_| {
                view().on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                    floem::quit_app()
                })
            },
            Some(
                WindowConfig::default()
                    .size((900.0, 660.0))
                    .title("floem-touch-slider"),
            ),
        )
        .run();
}
