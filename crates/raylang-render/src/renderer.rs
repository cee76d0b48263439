use std::path::PathBuf;
use std::time::Duration;

use raylang_core::hash::hash_document;
use raylang_core::{ContentHash, RaylangResult};
use raylang_ir::{codec, SceneDescriptor};

/// What a finished render reports back.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutcome {
    /// Image written by the renderer, as named in the scene.
    pub image: PathBuf,
    /// Hash of the wire document that was rendered.
    pub fingerprint: ContentHash,
    pub elapsed: Duration,
}

/// A consumer of wire documents.
///
/// `decode` parses a document into the renderer's own representation and
/// `render` consumes it. A handle is used at most once. Native renderers
/// that report nothing on failure surface as an opaque
/// [`raylang_core::RaylangError::Render`] message.
pub trait Renderer {
    type Handle;

    fn decode(&self, document: &[u8]) -> RaylangResult<Self::Handle>;

    fn render(&self, handle: Self::Handle) -> RaylangResult<RenderOutcome>;
}

/// Encode `scene` and run it through `renderer`, blocking until the render
/// completes. The scene is validated before the renderer sees anything.
pub fn submit<R: Renderer>(renderer: &R, scene: &SceneDescriptor) -> RaylangResult<RenderOutcome> {
    let document = codec::encode(scene)?;
    let fingerprint = hash_document(&document);
    tracing::debug!(
        "Encoded scene {} ({} bytes, {} leaves)",
        fingerprint.short(),
        document.len(),
        scene.leaf_count()
    );

    let handle = renderer.decode(&document)?;
    let outcome = renderer.render(handle)?;

    tracing::info!(
        "Rendered {} ({}x{}) to {} in {:.2}s",
        fingerprint.short(),
        scene.width,
        scene.height,
        outcome.image.display(),
        outcome.elapsed.as_secs_f64()
    );
    Ok(outcome)
}
