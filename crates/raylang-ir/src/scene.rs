use serde::{Deserialize, Serialize};

use raylang_core::Color;

use crate::camera::CameraSpec;
use crate::light::LightSpec;
use crate::material::MaterialSpec;
use crate::node::{Node, ResolvedLeaf};
use crate::path::IrPath;

fn default_subsamples() -> u32 {
    1
}

/// Top-level scene: output settings, camera, lights and the object tree.
///
/// Build one with [`crate::SceneBuilder`] so that defaults and validation
/// are applied; a descriptor is not mutated after it is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    /// Parallelism hint for the renderer.
    pub threads: u32,
    /// Output image path, written by the renderer.
    pub image: String,
    pub width: u32,
    pub height: u32,
    /// Antialiasing samples per pixel axis.
    #[serde(default = "default_subsamples")]
    pub subsamples: u32,
    /// Maximum number of faces per bounding-volume leaf when the renderer
    /// splits meshes. Left to the renderer when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox_limit: Option<u32>,
    pub background: Color,
    pub ambient_light: Color,
    /// Material for geometry not wrapped in an explicit `Material` node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_material: Option<MaterialSpec>,
    pub camera: CameraSpec,
    pub lights: Vec<LightSpec>,
    pub objects: Node,
}

impl SceneDescriptor {
    /// Number of pixels in the output image.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f64 / self.height as f64
    }

    pub fn leaf_count(&self) -> usize {
        self.objects.leaf_count()
    }

    /// Every geometry leaf with its effective material, falling back to the
    /// scene's `default_material`. Paths are rooted at `objects`.
    pub fn resolve_leaves(&self) -> Vec<ResolvedLeaf<'_>> {
        self.objects.resolve_leaves_at(
            IrPath::root().field("objects"),
            self.default_material.as_ref(),
        )
    }
}
