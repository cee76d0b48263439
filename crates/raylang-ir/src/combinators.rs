//! Pure functions that build scene trees by nesting.
//!
//! Numeric combinators validate their own fields and fail fast; children
//! are taken by value, so every call returns a fresh tree and never touches
//! its inputs.
//!
//! ```
//! use raylang_ir::combinators::{material, sphere, translate};
//! use raylang_ir::MaterialSpec;
//!
//! let node = translate(
//!     [1.0, 0.0, 0.0],
//!     material(MaterialSpec::default(), sphere(0.08, [0.0, 0.0, 0.0])?)?,
//! )?;
//! assert_eq!(node.depth(), 3);
//! # Ok::<(), raylang_core::RaylangError>(())
//! ```

use raylang_core::{RaylangError, RaylangResult, Vector3};

use crate::material::MaterialSpec;
use crate::node::{Node, Primitive, Shading, TransformKind};
use crate::path::IrPath;
use crate::validate::{validate_primitive, validate_transform};

fn checked(node: Node, errors: Vec<RaylangError>) -> RaylangResult<Node> {
    if errors.is_empty() {
        Ok(node)
    } else {
        Err(RaylangError::from_validation(errors))
    }
}

fn wrap(transform: TransformKind, child: Node) -> RaylangResult<Node> {
    let errors = validate_transform(&transform, &IrPath::root().field("Transform").field("transform"));
    checked(
        Node::Transform {
            transform,
            child: Box::new(child),
        },
        errors,
    )
}

/// Build a vector from loosely-typed components; anything but exactly three
/// is rejected.
pub fn vec3(components: &[f64]) -> RaylangResult<Vector3> {
    Vector3::try_from(components)
}

pub fn sphere(radius: f64, center: impl Into<Vector3>) -> RaylangResult<Node> {
    let primitive = Primitive::Sphere {
        radius,
        center: center.into(),
    };
    let errors = validate_primitive(&primitive, &IrPath::root().field("Primitive"));
    checked(Node::Primitive(primitive), errors)
}

pub fn translate(amount: impl Into<Vector3>, child: Node) -> RaylangResult<Node> {
    wrap(TransformKind::Translate(amount.into()), child)
}

pub fn scale(factors: impl Into<Vector3>, child: Node) -> RaylangResult<Node> {
    wrap(TransformKind::Scale(factors.into()), child)
}

pub fn scale_uniform(factor: f64, child: Node) -> RaylangResult<Node> {
    scale([factor, factor, factor], child)
}

/// Rotate `child` by `angle` degrees about `axis`.
pub fn rotate(angle: f64, axis: impl Into<Vector3>, child: Node) -> RaylangResult<Node> {
    wrap(
        TransformKind::Rotate {
            angle,
            axis: axis.into(),
        },
        child,
    )
}

/// Govern every leaf under `child` that is not re-wrapped by a nested
/// `material` call.
pub fn material(spec: MaterialSpec, child: Node) -> RaylangResult<Node> {
    let errors = spec.validate(&IrPath::root().field("Material").field("material"));
    checked(
        Node::Material {
            material: spec,
            child: Box::new(child),
        },
        errors,
    )
}

/// Order and duplicates are preserved.
pub fn group(items: impl IntoIterator<Item = Node>) -> Node {
    Node::Group(items.into_iter().collect())
}

/// Reference a mesh file. The renderer reads it; nothing is checked here.
pub fn mesh(file: impl Into<String>, shading: Shading) -> Node {
    Node::LoadMesh {
        file: file.into(),
        shading,
    }
}
