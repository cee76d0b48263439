use std::cell::RefCell;
use std::path::PathBuf;
use std::time::Duration;

use raylang_core::hash::hash_document;
use raylang_core::{Color, RaylangError, RaylangResult};
use raylang_ir::combinators::{group, material, sphere, translate};
use raylang_ir::{codec, CameraSpec, LightSpec, MaterialSpec, SceneDescriptor};
use raylang_render::{submit, RenderOutcome, Renderer};

/// Keeps decoded scenes in memory and records what it was asked to do.
#[derive(Default)]
struct RecordingRenderer {
    decoded: RefCell<Vec<SceneDescriptor>>,
    rendered: RefCell<usize>,
    fail_with: Option<String>,
}

struct Handle {
    scene: SceneDescriptor,
    document: Vec<u8>,
}

impl Renderer for RecordingRenderer {
    type Handle = Handle;

    fn decode(&self, document: &[u8]) -> RaylangResult<Handle> {
        let scene = codec::decode(document)?;
        self.decoded.borrow_mut().push(scene.clone());
        Ok(Handle {
            scene,
            document: document.to_vec(),
        })
    }

    fn render(&self, handle: Handle) -> RaylangResult<RenderOutcome> {
        if let Some(message) = &self.fail_with {
            return Err(RaylangError::Render(message.clone()));
        }
        *self.rendered.borrow_mut() += 1;
        Ok(RenderOutcome {
            image: PathBuf::from(handle.scene.image),
            fingerprint: hash_document(&handle.document),
            elapsed: Duration::from_millis(1),
        })
    }
}

fn scene() -> SceneDescriptor {
    SceneDescriptor::builder()
        .threads(4)
        .image("renders/pair.png")
        .size(320, 240)
        .default_material(MaterialSpec::default())
        .camera(CameraSpec::looking_at([0.0, 1.0, 6.0], [0.0, 0.0, 0.0], 50.0))
        .light(LightSpec::new(Color::White, [4.0, 4.0, 9.0]).with_intensity(0.8))
        .objects(group(vec![
            sphere(1.0, [0.0, 0.0, 0.0]).unwrap(),
            translate(
                [2.5, 0.0, 0.0],
                material(
                    MaterialSpec::default().with_color(Color::Orange),
                    sphere(0.5, [0.0, 0.0, 0.0]).unwrap(),
                )
                .unwrap(),
            )
            .unwrap(),
        ]))
        .build()
        .expect("scene should assemble")
}

#[test]
fn test_submit_hands_over_an_equal_scene() {
    let renderer = RecordingRenderer::default();
    let scene = scene();
    let outcome = submit(&renderer, &scene).unwrap();

    assert_eq!(renderer.decoded.borrow().as_slice(), &[scene.clone()]);
    assert_eq!(*renderer.rendered.borrow(), 1);
    assert_eq!(outcome.image, PathBuf::from("renders/pair.png"));
    assert_eq!(outcome.fingerprint, hash_document(&codec::encode(&scene).unwrap()));
}

#[test]
fn test_invalid_scene_never_reaches_renderer() {
    let renderer = RecordingRenderer::default();
    let mut bad = scene();
    bad.width = 0;

    let err = submit(&renderer, &bad).unwrap_err();
    assert!(err.is_validation());
    assert!(renderer.decoded.borrow().is_empty());
}

#[test]
fn test_render_failure_is_opaque() {
    let renderer = RecordingRenderer {
        fail_with: Some("renderer aborted".into()),
        ..Default::default()
    };
    let err = submit(&renderer, &scene()).unwrap_err();
    assert_eq!(err.to_string(), "render error: renderer aborted");
    assert_eq!(renderer.decoded.borrow().len(), 1);
    assert_eq!(*renderer.rendered.borrow(), 0);
}

#[test]
fn test_resubmitting_rerenders_with_same_fingerprint() {
    let renderer = RecordingRenderer::default();
    let scene = scene();
    let first = submit(&renderer, &scene).unwrap();
    let second = submit(&renderer, &scene).unwrap();
    assert_eq!(first.fingerprint, second.fingerprint);
    assert_eq!(*renderer.rendered.borrow(), 2);
}
