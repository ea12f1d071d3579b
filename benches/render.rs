#[macro_use]
extern crate criterion;

use criterion::Criterion;

use mandelzoom::{evaluate, render, render_threaded, Cancel, Frame, OffsetPalette, ViewTransform};

fn bench_evaluate(c: &mut Criterion) {
    let view = ViewTransform::default();
    c.bench_function("evaluate edge pixel", move |b| {
        b.iter(|| evaluate(1000, 1000, 250, 700, &view))
    });
}

fn bench_render(c: &mut Criterion) {
    c.bench_function("render 200x200", |b| {
        let mut frame = Frame::new(200, 200).unwrap();
        let palette = OffsetPalette::default();
        let view = ViewTransform::default();
        b.iter(|| render(frame.pixels_mut(), 200, 200, &palette, &view).unwrap())
    });
}

fn bench_render_threaded(c: &mut Criterion) {
    let threads = num_cpus::get();
    c.bench_function("render 200x200 threaded", move |b| {
        let mut frame = Frame::new(200, 200).unwrap();
        let palette = OffsetPalette::default();
        let view = ViewTransform::default();
        let cancel = Cancel::new();
        b.iter(|| {
            render_threaded(
                frame.pixels_mut(),
                200,
                200,
                &evaluate,
                &palette,
                &view,
                threads,
                &cancel,
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, bench_evaluate, bench_render, bench_render_threaded);
criterion_main!(benches);
