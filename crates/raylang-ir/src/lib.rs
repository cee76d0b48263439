//! # raylang-ir
//!
//! The Raylang Intermediate Representation: an immutable, tree-shaped scene
//! graph of primitives, transforms, material scopes, groups and mesh
//! references, plus the descriptor that wraps it for one render.
//!
//! Scenes are built with the pure functions in [`combinators`], assembled
//! with [`SceneBuilder`] and serialized for the renderer by [`codec`].

pub mod builder;
pub mod camera;
pub mod codec;
pub mod combinators;
pub mod light;
pub mod material;
pub mod node;
pub mod path;
pub mod scene;
pub mod validate;

pub use builder::SceneBuilder;
pub use camera::CameraSpec;
pub use codec::{decode, decode_node, decode_str, encode, encode_node, encode_pretty, SCHEMA_VERSION};
pub use light::LightSpec;
pub use material::{MaterialOverrides, MaterialSpec};
pub use node::{Node, Primitive, ResolvedLeaf, Shading, TransformKind};
pub use path::IrPath;
pub use scene::SceneDescriptor;
pub use validate::{validate_node, validate_scene, MAX_DEPTH};
