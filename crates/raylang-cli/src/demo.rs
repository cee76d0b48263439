use raylang_core::{Color, RaylangResult, RenderDefaults};
use raylang_ir::combinators::{group, material, mesh, rotate, scale_uniform, sphere, translate};
use raylang_ir::{CameraSpec, LightSpec, MaterialOverrides, MaterialSpec, SceneDescriptor, Shading};

/// A small still life: a row of three spheres in derived materials, a mesh
/// on a turntable and a large gray floor sphere under the default material.
pub fn demo_scene(defaults: &RenderDefaults, image: &str) -> RaylangResult<SceneDescriptor> {
    let plastic = MaterialSpec::default();
    let glossy = plastic.derive(MaterialOverrides::default().k_specular(0.8).n_shininess(200.0));

    let row = group(vec![
        translate(
            [-1.2, 0.0, 0.0],
            material(plastic.with_color(Color::Red), sphere(0.5, [0.0, 0.0, 0.0])?)?,
        )?,
        material(glossy.with_color(Color::Azure), sphere(0.5, [0.0, 0.0, 0.0])?)?,
        translate(
            [1.2, 0.0, 0.0],
            material(glossy.with_color(Color::Brightorange), sphere(0.5, [0.0, 0.0, 0.0])?)?,
        )?,
    ]);

    let statue = translate(
        [0.0, 0.0, -2.0],
        rotate(
            30.0,
            [0.0, 1.0, 0.0],
            scale_uniform(0.8, material(plastic.with_color(Color::Brown), mesh("models/bunny.smf", Shading::Smooth))?)?,
        )?,
    )?;

    let floor = sphere(1000.0, [0.0, -1000.5, 0.0])?;

    SceneDescriptor::builder()
        .with_defaults(defaults)
        .image(image)
        .size(640, 480)
        .default_material(plastic.with_color(Color::Gray))
        .camera(CameraSpec::looking_at([0.0, 1.0, 5.0], [0.0, 0.0, 0.0], 45.0))
        .light(LightSpec::new(Color::White, [4.0, 4.0, 9.0]).with_intensity(0.7))
        .light(LightSpec::new(Color::SkyBlue, [-6.0, 3.0, 2.0]).with_intensity(0.3))
        .objects(group(vec![row, statue, floor]))
        .build()
}
