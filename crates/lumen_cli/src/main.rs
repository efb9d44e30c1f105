mod cli;
mod scene_file;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use lumen_math::Color;
use lumen_renderer::{BasicRayTracer, ImageWriter};

use cli::Args;
use scene_file::SceneFile;

/// Rendered when no scene file is given
const DEMO_SCENE: &str = include_str!("../../../scenes/mirrors.json");

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::new();
    logger.filter_level(LevelFilter::Info).parse_default_env();
    if let Some(level) = args.log_level {
        logger.filter_level(level.into());
    }
    logger.init();

    let desc = match &args.scene {
        Some(path) => SceneFile::load(path)?,
        None => {
            info!("No scene file given, rendering the built-in demo");
            SceneFile::from_json(DEMO_SCENE)?
        }
    };

    let start = Instant::now();
    let scene = desc.build_scene()?;
    info!(
        "Scene '{}' built in {:?}: {} geometries, {} lights",
        scene.name,
        start.elapsed(),
        scene.geometries.len(),
        scene.lights.len()
    );

    let mut camera = desc
        .build_camera()?
        .with_threads(args.threads)
        .with_ray_tracer(Arc::new(BasicRayTracer::new(Arc::new(scene))));
    if let Some(samples) = args.anti_aliasing {
        camera = camera.with_anti_aliasing(true, samples);
    }

    let [nx, ny] = desc.resolution;
    let mut image = ImageWriter::new(&desc.name, nx, ny);
    camera
        .render_image(&mut image)
        .with_context(|| format!("failed to render '{}'", desc.name))?;

    if let Some(interval) = args.grid {
        camera.print_grid(&mut image, interval, Color::new(255.0, 255.0, 255.0));
    }

    let path = image
        .write_to_file(&args.output)
        .with_context(|| format!("failed to save image to {}", args.output.display()))?;
    println!("Saved {}", path.display());
    Ok(())
}
