//! Benchmarks for the per-frame gesture pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::{Duration, Instant};

use face_gesture_control::blink::BlinkDetector;
use face_gesture_control::cursor::CursorMapper;
use face_gesture_control::dwell::DwellSelector;
use face_gesture_control::eye_metrics::{aperture_ratio, EyeClosure};
use face_gesture_control::keyboard::KeyboardLayout;
use face_gesture_control::landmarks::Point;
use face_gesture_control::scroll::DragScrollEngine;

fn benchmark_aperture(c: &mut Criterion) {
    let contour = [
        Point::new(100, 200),
        Point::new(105, 196),
        Point::new(115, 196),
        Point::new(120, 200),
        Point::new(115, 204),
        Point::new(105, 204),
    ];

    c.bench_function("aperture_ratio", |b| {
        b.iter(|| aperture_ratio(black_box(&contour)).unwrap());
    });
}

fn benchmark_blink_detector(c: &mut Criterion) {
    // A repeating pattern of winks, blinks and noise.
    let pattern: Vec<EyeClosure> = (0..100)
        .map(|i| EyeClosure {
            left: i % 7 < 3,
            right: i % 11 < 4,
        })
        .collect();

    c.bench_function("blink_detector_100_frames", |b| {
        b.iter(|| {
            let mut detector = BlinkDetector::new(2);
            for &closure in &pattern {
                black_box(detector.update(closure, false));
            }
        });
    });
}

fn benchmark_cursor_mapper(c: &mut Criterion) {
    c.bench_function("cursor_map", |b| {
        let mut mapper = CursorMapper::new(1920.0, 1080.0, 3.0, 5);
        mapper.recalibrate((320.0, 240.0));
        let mut x = 320.0;
        b.iter(|| {
            x += 0.25;
            black_box(mapper.map(black_box(x), 240.0));
        });
    });
}

fn benchmark_scroll_engine(c: &mut Criterion) {
    c.bench_function("scroll_update", |b| {
        let mut engine = DragScrollEngine::new(5.0);
        let mut y = 0.0;
        b.iter(|| {
            y += 2.0;
            black_box(engine.update(true, black_box(y)));
        });
    });
}

fn benchmark_dwell_tick(c: &mut Criterion) {
    let targets = KeyboardLayout::new(1920.0, 300.0).key_rects();
    let start = Instant::now();

    c.bench_function("dwell_tick_44_keys", |b| {
        let mut selector = DwellSelector::new(Duration::from_secs(1));
        let mut tick = 0u64;
        b.iter(|| {
            tick += 1;
            black_box(selector.update(
                black_box(Some((900.0, 150.0))),
                &targets,
                start + Duration::from_millis(tick),
            ));
        });
    });
}

criterion_group!(
    benches,
    benchmark_aperture,
    benchmark_blink_detector,
    benchmark_cursor_mapper,
    benchmark_scroll_engine,
    benchmark_dwell_tick
);
criterion_main!(benches);
