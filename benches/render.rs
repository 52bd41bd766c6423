use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cubist::bench::{EdgeFunctionRasterizer, FrameBuffer, TriVertex, Triangle};
use cubist::prelude::*;

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn vertex(x: f32, y: f32, u: f32, v: f32) -> TriVertex {
    TriVertex {
        x,
        y,
        depth: 1.0,
        u,
        v,
    }
}

fn triangle(points: [(f32, f32); 3], texture: &Texture) -> Triangle {
    let [a, b, c] = points;
    Triangle::new(
        [
            vertex(a.0, a.1, 0.0, 0.0),
            vertex(b.0, b.1, 1.0, 0.0),
            vertex(c.0, c.1, 1.0, 1.0),
        ],
        texture.clone(),
        0.8,
    )
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");
    let texture = PlaceholderPalette::texture(0);
    let rasterizer = EdgeFunctionRasterizer::new();

    for (name, tri) in [
        ("small", triangle([(100.0, 100.0), (120.0, 100.0), (110.0, 120.0)], &texture)),
        ("medium", triangle([(100.0, 100.0), (300.0, 100.0), (200.0, 300.0)], &texture)),
        ("large", triangle([(50.0, 50.0), (750.0, 100.0), (400.0, 550.0)], &texture)),
    ] {
        group.bench_with_input(BenchmarkId::new("edge_function", name), &tri, |b, tri| {
            let mut color = vec![0u32; (BUFFER_WIDTH * BUFFER_HEIGHT) as usize];
            let mut depth = vec![f32::NEG_INFINITY; (BUFFER_WIDTH * BUFFER_HEIGHT) as usize];
            b.iter(|| {
                depth.fill(f32::NEG_INFINITY);
                let mut fb = FrameBuffer::new(&mut color, &mut depth, BUFFER_WIDTH, BUFFER_HEIGHT);
                rasterizer.fill_triangle(black_box(tri), &mut fb);
            });
        });
    }

    group.finish();
}

fn voxel_scene(side: usize) -> Engine {
    let mut palette = PlaceholderPalette::new();
    let mut engine = Engine::new(BUFFER_WIDTH, BUFFER_HEIGHT);
    engine.camera_mut().set_rotation(30, 45, 0).set_zoom(0.15);
    for x in 0..side {
        for z in 0..side {
            let from = Vec3::new(x as f32, 0.0, z as f32);
            engine.add_element(
                Cube::builder(from, from + Vec3::new(1.0, 1.0 + (x + z) as f32 % 3.0, 1.0))
                    .texture(&palette.next_texture()),
            );
        }
    }
    engine
}

fn benchmark_scene(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene");

    for side in [4usize, 16] {
        group.bench_function(BenchmarkId::new("render", side * side), |b| {
            let mut engine = voxel_scene(side);
            b.iter(|| black_box(engine.render()));
        });
        group.bench_function(BenchmarkId::new("auto_frame", side * side), |b| {
            let mut engine = voxel_scene(side);
            let framer = AutoFramer::new();
            b.iter(|| black_box(framer.render(&mut engine)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_triangle, benchmark_scene);
criterion_main!(benches);
