//! Simple ray tracer example.
//!
//! Renders a glass sphere over a mirror floor, lit by a spot light, and saves
//! it as `images/simple_render.png`.

use std::sync::Arc;

use lumen_renderer::{
    AmbientLight, BasicRayTracer, Camera, Color, ImageWriter, Material, Plane, Point, Scene, Sphere,
    SpotLight, Vector,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let scene = build_scene()?;

    let camera = Camera::new(
        Point::new(0.0, 0.0, 1000.0),
        Vector::new(0.0, 0.0, -1.0)?,
        Vector::new(0.0, 1.0, 0.0)?,
    )?
    .with_view_plane_size(200.0, 200.0)
    .with_view_plane_distance(1000.0)
    .with_anti_aliasing(true, 3)
    .with_threads(0)
    .with_ray_tracer(Arc::new(BasicRayTracer::new(Arc::new(scene))));

    let mut image = ImageWriter::new("simple_render", 400, 400);
    camera.render_image(&mut image)?;
    let path = image.write_to_file("images")?;
    println!("Saved to {}", path.display());
    Ok(())
}

fn build_scene() -> Result<Scene, Box<dyn std::error::Error>> {
    let glass = Sphere::new(Point::new(0.0, 0.0, -50.0), 50.0)?
        .with_emission(Color::new(0.0, 0.0, 255.0))
        .with_material(
            Material::new()
                .with_kd(0.4)
                .with_ks(0.3)
                .with_shininess(100)
                .with_kt(0.3),
        );
    let core = Sphere::new(Point::new(0.0, 0.0, -50.0), 25.0)?
        .with_emission(Color::new(255.0, 0.0, 0.0))
        .with_material(Material::new().with_kd(0.5).with_ks(0.5).with_shininess(100));
    let floor = Plane::new(Point::new(0.0, -60.0, 0.0), Vector::new(0.0, 1.0, 0.0)?)
        .with_emission(Color::new(20.0, 20.0, 20.0))
        .with_material(Material::new().with_kd(0.3).with_kr(0.4));

    let spot = SpotLight::new(
        Color::new(1000.0, 600.0, 0.0),
        Point::new(-100.0, 100.0, 500.0),
        Vector::new(1.0, -1.0, -5.0)?,
    )
    .with_kl(0.0004)
    .with_kq(0.0000006);

    Ok(Scene::new("simple render")
        .with_ambient_light(AmbientLight::new(Color::new(255.0, 255.0, 255.0), 0.1))
        .with_geometry(glass)
        .with_geometry(core)
        .with_geometry(floor)
        .with_light(spot))
}
