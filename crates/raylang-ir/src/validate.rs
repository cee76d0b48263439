use raylang_core::{RaylangError, Vector3};

use crate::node::{Node, Primitive, TransformKind};
use crate::path::IrPath;
use crate::scene::SceneDescriptor;

/// Deepest node tree the codec will encode or decode. The root is level 1.
pub const MAX_DEPTH: usize = 512;

fn finite_vector(v: &Vector3, path: IrPath, errors: &mut Vec<RaylangError>) {
    if !v.is_finite() {
        errors.push(RaylangError::validation(
            path,
            format!("vector components must be finite, got {}", v),
        ));
    }
}

/// Validate a primitive located at `path` (the path of its `Primitive` node).
pub fn validate_primitive(primitive: &Primitive, path: &IrPath) -> Vec<RaylangError> {
    let mut errors = Vec::new();
    match primitive {
        Primitive::Sphere { radius, center } => {
            let path = path.field("Sphere");
            if !radius.is_finite() || *radius <= 0.0 {
                errors.push(RaylangError::validation(
                    path.field("radius"),
                    format!("must be a finite, positive number, got {}", radius),
                ));
            }
            finite_vector(center, path.field("center"), &mut errors);
        }
    }
    errors
}

/// Validate a transform located at `path` (the path of its `transform` field).
pub fn validate_transform(transform: &TransformKind, path: &IrPath) -> Vec<RaylangError> {
    let mut errors = Vec::new();
    let path = path.field(transform.name());
    match transform {
        TransformKind::Translate(v) => finite_vector(v, path, &mut errors),
        TransformKind::Scale(v) => {
            finite_vector(v, path.clone(), &mut errors);
            if v.x == 0.0 || v.y == 0.0 || v.z == 0.0 {
                errors.push(RaylangError::validation(
                    path,
                    format!("scale factors must be non-zero, got {}", v),
                ));
            }
        }
        TransformKind::Rotate { angle, axis } => {
            if !angle.is_finite() {
                errors.push(RaylangError::validation(
                    path.field("angle"),
                    format!("must be finite, got {}", angle),
                ));
            }
            finite_vector(axis, path.field("axis"), &mut errors);
            if axis.is_zero() {
                errors.push(RaylangError::validation(
                    path.field("axis"),
                    "rotation axis must be non-zero",
                ));
            }
        }
    }
    errors
}

/// Validate every node in the subtree rooted at `node`. Subtrees deeper
/// than [`MAX_DEPTH`] are reported once, at the first node past the limit.
pub fn validate_node(node: &Node, path: &IrPath) -> Vec<RaylangError> {
    let mut errors = Vec::new();
    collect_node_errors(node, path, 1, &mut errors);
    errors
}

fn collect_node_errors(node: &Node, path: &IrPath, level: usize, errors: &mut Vec<RaylangError>) {
    let path = path.field(node.kind_name());
    if level > MAX_DEPTH {
        errors.push(RaylangError::validation(
            path,
            format!("node tree nests deeper than {} levels", MAX_DEPTH),
        ));
        return;
    }
    match node {
        Node::Primitive(primitive) => errors.extend(validate_primitive(primitive, &path)),
        Node::Transform { transform, child } => {
            errors.extend(validate_transform(transform, &path.field("transform")));
            collect_node_errors(child, &path.field("child"), level + 1, errors);
        }
        Node::Material { material, child } => {
            errors.extend(material.validate(&path.field("material")));
            collect_node_errors(child, &path.field("child"), level + 1, errors);
        }
        Node::Group(items) => {
            for (i, item) in items.iter().enumerate() {
                collect_node_errors(item, &path.index(i), level + 1, errors);
            }
        }
        Node::LoadMesh { file, .. } => {
            if file.trim().is_empty() {
                errors.push(RaylangError::validation(
                    path.field("file"),
                    "mesh file path must be non-empty",
                ));
            }
        }
    }
}

/// Validate a complete scene: top-level counts, camera, lights, materials,
/// every node, and that each leaf is covered by some material.
pub fn validate_scene(scene: &SceneDescriptor) -> Result<(), Vec<RaylangError>> {
    let mut errors = Vec::new();
    let root = IrPath::root();

    for (name, value) in [
        ("threads", scene.threads),
        ("width", scene.width),
        ("height", scene.height),
        ("subsamples", scene.subsamples),
    ] {
        if value == 0 {
            errors.push(RaylangError::validation(
                root.field(name),
                "must be a positive integer, got 0",
            ));
        }
    }
    if scene.bbox_limit == Some(0) {
        errors.push(RaylangError::validation(
            root.field("bbox_limit"),
            "must be a positive integer when set, got 0",
        ));
    }

    if scene.image.trim().is_empty() {
        errors.push(RaylangError::validation(
            root.field("image"),
            "output image path must be non-empty",
        ));
    }

    for (name, color) in [
        ("background", scene.background),
        ("ambient_light", scene.ambient_light),
    ] {
        if !color.is_finite() {
            errors.push(RaylangError::validation(
                root.field(name),
                "color components must be finite",
            ));
        }
    }

    if let Some(material) = &scene.default_material {
        errors.extend(material.validate(&root.field("default_material")));
    }

    errors.extend(scene.camera.validate(&root.field("camera")));

    let lights = root.field("lights");
    for (i, light) in scene.lights.iter().enumerate() {
        errors.extend(light.validate(&lights.index(i)));
    }

    let objects = root.field("objects");
    errors.extend(validate_node(&scene.objects, &objects));

    for leaf in scene
        .objects
        .resolve_leaves_at(objects, scene.default_material.as_ref())
    {
        if leaf.material.is_none() {
            errors.push(RaylangError::validation(
                leaf.path,
                "geometry has no enclosing Material and the scene has no default_material",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
