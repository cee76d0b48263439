use raylang_core::{Color, RaylangError, RaylangResult, RenderDefaults};

use crate::camera::CameraSpec;
use crate::light::LightSpec;
use crate::material::MaterialSpec;
use crate::node::Node;
use crate::path::IrPath;
use crate::scene::SceneDescriptor;
use crate::validate::validate_scene;

/// Assembles a [`SceneDescriptor`], filling defaults and running full
/// validation before handing the scene out.
///
/// Integer settings are taken as signed values so that a negative count
/// coming from a script or config surfaces as a validation error instead
/// of wrapping.
#[derive(Debug, Clone, Default)]
pub struct SceneBuilder {
    threads: Option<i64>,
    image: Option<String>,
    size: Option<(i64, i64)>,
    subsamples: Option<i64>,
    bbox_limit: Option<i64>,
    background: Option<Color>,
    ambient_light: Option<Color>,
    default_material: Option<MaterialSpec>,
    camera: Option<CameraSpec>,
    lights: Vec<LightSpec>,
    objects: Option<Node>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed unset settings from project-level defaults. Explicit setters win
    /// regardless of call order.
    pub fn with_defaults(mut self, defaults: &RenderDefaults) -> Self {
        self.threads = self.threads.or(Some(defaults.threads as i64));
        self.subsamples = self.subsamples.or(Some(defaults.subsamples as i64));
        self.background = self.background.or(Some(defaults.background));
        self.ambient_light = self.ambient_light.or(Some(defaults.ambient_light));
        self
    }

    pub fn threads(mut self, threads: i64) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn size(mut self, width: i64, height: i64) -> Self {
        self.size = Some((width, height));
        self
    }

    pub fn subsamples(mut self, subsamples: i64) -> Self {
        self.subsamples = Some(subsamples);
        self
    }

    pub fn bbox_limit(mut self, limit: i64) -> Self {
        self.bbox_limit = Some(limit);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn ambient_light(mut self, color: Color) -> Self {
        self.ambient_light = Some(color);
        self
    }

    pub fn default_material(mut self, material: MaterialSpec) -> Self {
        self.default_material = Some(material);
        self
    }

    pub fn camera(mut self, camera: CameraSpec) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Append one light. Lights keep insertion order.
    pub fn light(mut self, light: LightSpec) -> Self {
        self.lights.push(light);
        self
    }

    pub fn lights(mut self, lights: impl IntoIterator<Item = LightSpec>) -> Self {
        self.lights.extend(lights);
        self
    }

    pub fn objects(mut self, objects: Node) -> Self {
        self.objects = Some(objects);
        self
    }

    /// Produce the descriptor. All problems found are reported together.
    pub fn build(self) -> RaylangResult<SceneDescriptor> {
        let root = IrPath::root();
        let mut errors = Vec::new();

        let threads = positive(&root, "threads", self.threads, &mut errors);
        let (width, height) = match self.size {
            Some((w, h)) => (
                positive(&root, "width", Some(w), &mut errors),
                positive(&root, "height", Some(h), &mut errors),
            ),
            None => {
                errors.push(missing(&root, "width"));
                errors.push(missing(&root, "height"));
                (0, 0)
            }
        };
        let subsamples = positive(&root, "subsamples", Some(self.subsamples.unwrap_or(1)), &mut errors);
        let bbox_limit = self
            .bbox_limit
            .map(|limit| positive(&root, "bbox_limit", Some(limit), &mut errors));

        if self.image.is_none() {
            errors.push(missing(&root, "image"));
        }
        if self.camera.is_none() {
            errors.push(missing(&root, "camera"));
        }
        if self.objects.is_none() {
            errors.push(missing(&root, "objects"));
        }

        let (Some(image), Some(camera), Some(objects)) = (self.image, self.camera, self.objects)
        else {
            return Err(RaylangError::from_validation(errors));
        };
        if !errors.is_empty() {
            return Err(RaylangError::from_validation(errors));
        }

        let scene = SceneDescriptor {
            threads,
            image,
            width,
            height,
            subsamples,
            bbox_limit,
            background: self.background.unwrap_or(Color::Black),
            ambient_light: self.ambient_light.unwrap_or(Color::White),
            default_material: self.default_material,
            camera,
            lights: self.lights,
            objects,
        };
        validate_scene(&scene).map_err(RaylangError::from_validation)?;
        Ok(scene)
    }
}

impl SceneDescriptor {
    pub fn builder() -> SceneBuilder {
        SceneBuilder::new()
    }
}

fn missing(root: &IrPath, name: &str) -> RaylangError {
    RaylangError::validation(root.field(name), "missing required field")
}

fn positive(root: &IrPath, name: &str, value: Option<i64>, errors: &mut Vec<RaylangError>) -> u32 {
    match value {
        None => {
            errors.push(missing(root, name));
            0
        }
        Some(v) => match u32::try_from(v) {
            Ok(n) if n > 0 => n,
            _ => {
                errors.push(RaylangError::validation(
                    root.field(name),
                    format!("must be a positive integer, got {}", v),
                ));
                0
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Primitive;
    use raylang_core::Vector3;

    fn ball() -> Node {
        Node::Primitive(Primitive::Sphere {
            radius: 0.08,
            center: Vector3::zero(),
        })
    }

    fn complete() -> SceneBuilder {
        SceneDescriptor::builder()
            .threads(4)
            .image("out.png")
            .size(512, 512)
            .default_material(MaterialSpec::default())
            .camera(CameraSpec::looking_at([0.0, 0.0, 5.0], [0.0, 0.0, 0.0], 45.0))
            .light(LightSpec::new(Color::White, [4.0, 4.0, 9.0]).with_intensity(0.5))
            .objects(Node::Group(vec![ball()]))
    }

    #[test]
    fn test_build_fills_defaults() {
        let scene = complete().build().unwrap();
        assert_eq!(scene.subsamples, 1);
        assert_eq!(scene.background, Color::Black);
        assert_eq!(scene.ambient_light, Color::White);
        assert_eq!(scene.bbox_limit, None);
        assert_eq!(scene.lights.len(), 1);
    }

    #[test]
    fn test_zero_width_rejected() {
        let err = complete().size(0, 512).build().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.path(), Some("width"));
    }

    #[test]
    fn test_negative_threads_rejected() {
        let err = complete().threads(-1).build().unwrap_err();
        assert_eq!(err.path(), Some("threads"));
        assert!(err.to_string().contains("got -1"));
    }

    #[test]
    fn test_missing_fields_collected() {
        let err = SceneBuilder::new().build().unwrap_err();
        match err {
            RaylangError::InvalidScene(errors) => {
                let paths: Vec<_> = errors.iter().filter_map(|e| e.path()).collect();
                assert_eq!(
                    paths,
                    vec!["threads", "width", "height", "image", "camera", "objects"]
                );
            }
            other => panic!("expected InvalidScene, got {:?}", other),
        }
    }

    #[test]
    fn test_with_defaults_supplies_threads_but_not_overrides() {
        let defaults = RenderDefaults {
            threads: 8,
            subsamples: 2,
            background: Color::SkyBlue,
            ambient_light: Color::Gray,
        };
        let scene = SceneBuilder::new()
            .subsamples(3)
            .with_defaults(&defaults)
            .image("out.png")
            .size(64, 48)
            .default_material(MaterialSpec::default())
            .camera(CameraSpec::looking_at([0.0, 0.0, 5.0], [0.0, 0.0, 0.0], 45.0))
            .objects(ball())
            .build()
            .unwrap();
        assert_eq!(scene.threads, 8);
        assert_eq!(scene.subsamples, 3);
        assert_eq!(scene.background, Color::SkyBlue);
    }

    #[test]
    fn test_uncovered_leaf_rejected() {
        let err = SceneDescriptor::builder()
            .threads(1)
            .image("out.png")
            .size(8, 8)
            .camera(CameraSpec::looking_at([0.0, 0.0, 5.0], [0.0, 0.0, 0.0], 45.0))
            .objects(Node::Group(vec![ball()]))
            .build()
            .unwrap_err();
        assert_eq!(err.path(), Some("objects.Group[0]"));
    }

    #[test]
    fn test_bbox_limit_must_be_positive() {
        assert!(complete().bbox_limit(0).build().is_err());
        assert_eq!(complete().bbox_limit(12).build().unwrap().bbox_limit, Some(12));
    }
}
