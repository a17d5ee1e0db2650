//! Benchmarks for the per-frame work of the runtime:
//! - pack layout over growing widget counts
//! - painting a full frame
//! - one animation tick with many easing sliders

use std::time::Instant;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use softgui_core::geometry::{Pos, Size};
use softgui_render::{Compositor, Surface};
use softgui_test_utils::RecordingPresenter;
use softgui_ui::{Fill, PackOptions, UiCore};

fn build_column(widget_count: usize) -> UiCore {
    let mut ui = UiCore::headless(800, 600);
    for i in 0..widget_count {
        let id = match i % 3 {
            0 => ui.create_label(&format!("Label {}", i)).id(),
            1 => ui.create_button(&format!("Button {}", i)).id(),
            _ => ui.create_hslider(0, 100).id(),
        };
        ui.pack(id, PackOptions::top().fill(Fill::X));
    }
    ui
}

fn bench_pack_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/pack");

    for count in [10, 50, 200] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut ui = build_column(count);
            b.iter(|| {
                ui.layout();
                black_box(ui.tree().len());
            });
        });
    }

    group.finish();
}

fn bench_paint_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/paint");

    for count in [10, 50] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut ui = build_column(count);
            let mut surface = Surface::new(Size::new(800, 600)).expect("surface");
            b.iter(|| {
                ui.paint(&mut surface, Instant::now());
                black_box(surface.pixel(0, 0));
            });
        });
    }

    group.finish();
}

fn bench_render_frame(c: &mut Criterion) {
    c.bench_function("render/compose_and_present", |b| {
        let mut ui = build_column(30);
        let mut compositor = Compositor::new();
        b.iter(|| {
            // a fresh presenter keeps captured frames from piling up
            let mut presenter = RecordingPresenter::new();
            let outcome = ui.render_frame(&mut compositor, &mut presenter, Instant::now());
            black_box(outcome).ok();
        });
    });
}

fn bench_slider_tick(c: &mut Criterion) {
    c.bench_function("animation/tick_100_sliders", |b| {
        let mut ui = UiCore::headless(800, 600);
        let sliders: Vec<_> = (0..100).map(|_| ui.create_hslider(0, 1000)).collect();
        for &slider in &sliders {
            ui.add_child(slider);
        }
        let mut target = 0.0;
        b.iter(|| {
            if !ui.is_animating() {
                target = if target == 0.0 { 1000.0 } else { 0.0 };
                for &slider in &sliders {
                    ui.update(slider, |s| s.set_target(target));
                }
            }
            black_box(ui.tick());
        });
    });
}

fn bench_pointer_routing(c: &mut Criterion) {
    c.bench_function("input/press_release", |b| {
        let mut ui = build_column(200);
        ui.layout();
        b.iter(|| {
            ui.pointer_down(black_box(Pos::new(400, 300)));
            ui.pointer_up(Pos::new(400, 300));
        });
    });
}

criterion_group!(
    benches,
    bench_pack_layout,
    bench_paint_frame,
    bench_render_frame,
    bench_slider_tick,
    bench_pointer_routing,
);
criterion_main!(benches);
