use std::path::PathBuf;

use clap::Parser;
use log::{debug, info};

use cornell_raster::config::{self, RenderConfig};
use cornell_raster::engine::{Engine, Pipeline};
use cornell_raster::error::Result;
use cornell_raster::scene::{self, Scene};
use cornell_raster::window::{FrameTimer, Window, WindowEvent};

/// Software rasterizer and ray tracer for the Cornell Box.
///
/// Controls: arrows move and turn the camera, W/S/A/D move the light,
/// B and C toggle backface and view-cuboid culling, R switches between the
/// rasterizer and the ray tracer, L switches the span filler, M toggles
/// wireframe, P toggles parallel drawing, Escape quits.
#[derive(Parser, Debug)]
#[command(name = "cornell-raster", version)]
struct Args {
    /// Wavefront OBJ file to render instead of the built-in Cornell Box.
    scene: Option<PathBuf>,

    /// Start in the ray-tracing pipeline.
    #[arg(long)]
    raytrace: bool,

    /// Draw triangles on all cores.
    #[arg(long)]
    parallel: bool,

    /// Where the last frame is saved on exit.
    #[arg(long, default_value = config::SCREENSHOT_PATH)]
    out: PathBuf,

    /// Exit after rendering N frames.
    #[arg(long)]
    max_frames: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let scene = match &args.scene {
        Some(path) => Scene::from_obj(path, scene::WHITE)?,
        None => scene::cornell_box(),
    };
    info!("Scene ready: {} triangles", scene.len());

    let render_config = RenderConfig {
        parallel: args.parallel,
        ..RenderConfig::default()
    };
    let mut window = Window::new("Cornell Box", render_config.width, render_config.height)?;
    let mut engine = Engine::new(scene, render_config);
    if args.raytrace {
        engine.set_pipeline(Pipeline::RayTracer);
    }
    info!("Pipeline: {}", engine.pipeline());

    let mut timer = FrameTimer::new(&window);
    let mut pixels = Vec::new();
    let mut frames = 0u64;

    'running: loop {
        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => break 'running,
                WindowEvent::Command(command) => engine.apply(command),
            }
        }

        engine.update(&window.input_state());
        let stats = engine.render();
        engine.frame_buffer().copy_colors_into(&mut pixels);
        window.present(&pixels)?;

        let (frame_ms, fps) = timer.tick(&window);
        debug!(
            "Frame {frames}: {frame_ms} ms, {} drawn, {} culled, {} skipped",
            stats.drawn, stats.culled, stats.skipped
        );
        if let Some(fps) = fps {
            info!("{fps:.1} FPS");
            window.set_title(&format!("Cornell Box - {} - {fps:.1} FPS", engine.pipeline()));
        }

        frames += 1;
        if args.max_frames.is_some_and(|max| frames >= max) {
            break;
        }
    }

    engine.save_snapshot(&args.out)?;
    Ok(())
}
