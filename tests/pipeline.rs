use cornell_raster::colors;
use cornell_raster::prelude::*;
use cornell_raster::render::{
    draw_rows, interpolate, project_vertex, FlatShader, PointLightShader, PolygonRows, ProjectedSample,
};

fn sample(x: i32, y: i32, zinv: f32) -> ProjectedSample {
    ProjectedSample::new(x, y, zinv, Vec3::new(0.0, 0.0, 1.0))
}

fn count_written(fb: &FrameBuffer) -> usize {
    let mut n = 0;
    for y in 0..fb.height() as i32 {
        for x in 0..fb.width() as i32 {
            if fb.depth(x, y) != Some(0.0) {
                n += 1;
            }
        }
    }
    n
}

#[test]
fn single_triangle_fills_exactly_its_rows() {
    let fb = FrameBuffer::new(64, 64);
    let vertices = [sample(10, 10, 0.5), sample(50, 10, 0.5), sample(30, 40, 0.5)];
    let rows = PolygonRows::compute(&vertices);

    assert_eq!(rows.min_y(), 10);
    assert_eq!(rows.len(), 31);
    let (left, right) = rows.row(0).unwrap();
    assert_eq!((left.x, right.x), (10, 50));

    // Ambient only, so every covered pixel gets the same color.
    let light = PointLight::new(Vec3::new(30.0, -10.0, 1.0), Vec3::ZERO, Vec3::splat(0.5));
    let color = Vec3::new(1.0, 0.5, 0.0);
    let shader = PointLightShader::new(&light, Vec3::new(0.0, -1.0, 0.0), color, Vec3::ONE);
    let written = draw_rows(&rows, &SpanStrategy::Dda, &shader, &fb);

    let expected = colors::pack_rgb(Vec3::new(0.5, 0.25, 0.0));
    let mut covered = 0;
    for (left, right) in rows.iter() {
        for x in left.x..=right.x {
            assert_eq!(fb.color(x, left.y), Some(expected));
            assert_eq!(fb.depth(x, left.y), Some(0.5));
            covered += 1;
        }
    }
    assert_eq!(written, covered);
    assert_eq!(count_written(&fb), covered);
    assert_eq!(fb.color(5, 5), Some(colors::BLACK));
    assert_eq!(fb.color(30, 41), Some(colors::BLACK));
}

#[test]
fn single_triangle_under_light_gets_lambert_color() {
    let fb = FrameBuffer::new(64, 64);
    let rows = PolygonRows::compute(&[sample(10, 10, 0.5), sample(50, 10, 0.5), sample(30, 40, 0.5)]);

    // Every sample rebuilds to p = (0, 0, 1). The light sits one unit above
    // it along the normal, so D = P / (4 * pi) = 0.5.
    let power = Vec3::splat(2.0 * std::f32::consts::PI);
    let light = PointLight::new(Vec3::new(0.0, -1.0, 1.0), power, Vec3::splat(0.25));
    let color = Vec3::new(1.0, 0.5, 0.0);
    let shader = PointLightShader::new(&light, Vec3::new(0.0, -1.0, 0.0), color, Vec3::ONE);
    let written = draw_rows(&rows, &SpanStrategy::Dda, &shader, &fb);
    assert!(written > 0);

    // (D + ambient) * color = 0.75 * (1, 0.5, 0)
    let expected = colors::pack_rgb(Vec3::new(0.75, 0.375, 0.0));
    for (left, right) in rows.iter() {
        for x in left.x..=right.x {
            assert_eq!(fb.color(x, left.y), Some(expected));
        }
    }
}

#[test]
fn nearer_triangle_wins_the_overlap() {
    let fb = FrameBuffer::new(64, 64);
    let near = FlatShader::new(0xFFFF_0000);
    let far = FlatShader::new(0xFF00_00FF);

    // Far first, then near, then far again: order must not matter.
    let far_tri = PolygonRows::compute(&[sample(0, 0, 0.25), sample(40, 0, 0.25), sample(0, 40, 0.25)]);
    let near_tri = PolygonRows::compute(&[sample(10, 10, 0.5), sample(50, 10, 0.5), sample(10, 50, 0.5)]);
    draw_rows(&far_tri, &SpanStrategy::Dda, &far, &fb);
    draw_rows(&near_tri, &SpanStrategy::Bresenham, &near, &fb);
    draw_rows(&far_tri, &SpanStrategy::Dda, &far, &fb);

    assert_eq!(fb.color(15, 15), Some(0xFFFF_0000));
    assert_eq!(fb.depth(15, 15), Some(0.5));
    assert_eq!(fb.color(2, 2), Some(0xFF00_00FF));
    assert_eq!(fb.depth(2, 2), Some(0.25));
}

#[test]
fn depth_test_is_monotonic_per_pixel() {
    let fb = FrameBuffer::new(1, 1);
    let mut best = 0.0f32;
    for d in [0.3f32, 0.1, 0.3, 0.7, 0.5, 0.7, 0.9, 0.2] {
        let accepted = fb.depth_test_and_set(0, 0, d, || colors::WHITE);
        assert_eq!(accepted, d > best);
        best = best.max(d);
        assert_eq!(fb.depth(0, 0), Some(best));
    }
}

#[test]
fn interpolation_is_linear() {
    let a = 3.0f32;
    let b = 47.0f32;
    let n = 12;
    for (i, x) in interpolate(a, b, n).enumerate() {
        let expected = a + i as f32 * (b - a) / (n - 1) as f32;
        assert!((x - expected).abs() < 1e-4);
    }
}

#[test]
fn projection_is_bit_identical_on_repeat() {
    let camera = Camera::default();
    let v = Vec3::new(-0.3, 0.6, 0.2);
    let a = project_vertex(v, &camera, 500, 500).unwrap();
    let b = project_vertex(v, &camera, 500, 500).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.zinv.to_bits(), b.zinv.to_bits());
}

fn facing_forward_scene() -> Scene {
    // Normal equals the camera forward vector: dot = 1 > 0.8.
    Scene::new(vec![Triangle::with_normal(
        Vec3::new(-0.5, -0.5, 0.0),
        Vec3::new(0.5, -0.5, 0.0),
        Vec3::new(0.0, 0.5, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::ONE,
    )])
}

#[test]
fn backfacing_triangle_is_culled_and_draws_nothing() {
    let mut engine = Engine::new(facing_forward_scene(), RenderConfig::with_size(100, 100));
    let stats = engine.render();
    assert!(stats.pixels > 0);

    engine.apply(Command::ToggleBackfaceCulling);
    let stats = engine.render();
    assert!(engine.scene().triangles()[0].culled);
    assert_eq!(stats.culled, 1);
    assert_eq!(stats.pixels, 0);
    assert_eq!(count_written(engine.frame_buffer()), 0);
}

#[test]
fn disabling_backface_culling_resets_flags_before_next_draw() {
    let mut engine = Engine::new(facing_forward_scene(), RenderConfig::with_size(100, 100));
    engine.apply(Command::ToggleBackfaceCulling);
    engine.render();
    assert_eq!(engine.scene().culled_count(), 1);

    engine.apply(Command::ToggleBackfaceCulling);
    assert_eq!(engine.scene().culled_count(), 0);
    let stats = engine.render();
    assert!(stats.pixels > 0);
}

#[test]
fn cornell_box_renders_lit_pixels() {
    let mut engine = Engine::new(cornell_box(), RenderConfig::with_size(100, 100));
    let stats = engine.render();
    assert_eq!(stats.drawn, 30);
    let center = engine.frame_buffer().color(50, 50).unwrap();
    assert_ne!(center, colors::BLACK);
}

#[test]
fn snapshot_is_written_as_bmp() {
    let mut engine = Engine::new(cornell_box(), RenderConfig::with_size(32, 32));
    engine.render();
    let path = std::env::temp_dir().join(format!("cornell-raster-{}.bmp", std::process::id()));
    engine.save_snapshot(&path).unwrap();
    let metadata = std::fs::metadata(&path).unwrap();
    assert!(metadata.len() > 32 * 32 * 3);
    std::fs::remove_file(&path).unwrap();
}
