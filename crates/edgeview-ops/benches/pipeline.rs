use criterion::{criterion_group, criterion_main, Criterion};
use edgeview_core::{PixelBuffer, PixelFormat};
use edgeview_ops::process;
use std::hint::black_box;

/// Synthetic camera frame: smooth horizontal ramp with a few hard vertical
/// bars, so every pipeline stage has real work to do.
fn synthetic_frame(width: u32, height: u32) -> PixelBuffer {
    let mut buf = PixelBuffer::new(width, height, PixelFormat::Rgba).unwrap();
    for y in 0..height {
        for x in 0..width {
            let ramp = (x * 255 / width) as u8;
            let v = if x % 80 < 4 { 255 - ramp } else { ramp };
            buf.set_pixel(x, y, &[v, v, v, 255]);
        }
    }
    buf
}

fn bench_process(c: &mut Criterion) {
    let vga = synthetic_frame(640, 480);
    let hd = synthetic_frame(1280, 720);

    c.bench_function("process_640x480", |b| {
        b.iter(|| process(black_box(&vga)).unwrap())
    });
    c.bench_function("process_1280x720", |b| {
        b.iter(|| process(black_box(&hd)).unwrap())
    });
}

criterion_group!(benches, bench_process);
criterion_main!(benches);
