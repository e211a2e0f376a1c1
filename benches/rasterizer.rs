use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cornell_raster::camera::Camera;
use cornell_raster::config::RenderConfig;
use cornell_raster::light::PointLight;
use cornell_raster::math::vec3::Vec3;
use cornell_raster::render::{
    draw_rows, FlatShader, FrameBuffer, PolygonRows, ProjectedSample, Renderer, SpanStrategy,
};
use cornell_raster::scene::cornell_box;

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn sample(x: i32, y: i32, zinv: f32) -> ProjectedSample {
    ProjectedSample::new(x, y, zinv, Vec3::new(0.0, 0.0, 1.0))
}

fn small_triangle() -> [ProjectedSample; 3] {
    [sample(100, 100, 0.5), sample(120, 100, 0.5), sample(110, 120, 0.4)]
}

fn medium_triangle() -> [ProjectedSample; 3] {
    [sample(100, 100, 0.5), sample(300, 100, 0.5), sample(200, 300, 0.4)]
}

fn large_triangle() -> [ProjectedSample; 3] {
    [sample(50, 50, 0.5), sample(750, 100, 0.3), sample(400, 550, 0.4)]
}

fn benchmark_span_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");
    let shader = FlatShader::new(0xFFFF0000);

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        let rows = PolygonRows::compute(&triangle);
        for strategy in [SpanStrategy::Dda, SpanStrategy::Bresenham] {
            group.bench_with_input(
                BenchmarkId::new(strategy.to_string(), name),
                &rows,
                |b, rows| {
                    let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
                    b.iter(|| {
                        fb.clear();
                        draw_rows(black_box(rows), &strategy, &shader, &fb)
                    });
                },
            );
        }
    }

    group.finish();
}

fn benchmark_cornell_box(c: &mut Criterion) {
    let mut group = c.benchmark_group("cornell_box");

    let scene = cornell_box();
    let camera = Camera::default();
    let light = PointLight::default();

    for parallel in [false, true] {
        let name = if parallel { "parallel" } else { "sequential" };
        group.bench_function(name, |b| {
            let mut renderer = Renderer::new(RenderConfig {
                parallel,
                ..RenderConfig::default()
            });
            b.iter(|| renderer.draw(black_box(&scene), &camera, &light));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_span_strategies, benchmark_cornell_box);
criterion_main!(benches);
