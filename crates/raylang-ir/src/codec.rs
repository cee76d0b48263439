//! The wire document exchanged with the renderer.
//!
//! Every node is a single-key object whose key names the variant:
//!
//! ```json
//! {"Transform": {"transform": {"Translate": [1.0, 0.0, 0.0]},
//!                "child": {"Primitive": {"Sphere": {"radius": 0.08, "center": [0.0, 0.0, 0.0]}}}}}
//! ```
//!
//! The top-level document is the scene's fields preceded by `"version"`.
//! Encoding validates first, so anything [`encode`] emits is accepted by
//! [`decode`]. Decoding is strict: unknown tags and fields are errors, and
//! every failure carries the document path it was found at.
//!
//! Node trees may nest up to [`MAX_DEPTH`] levels. Documents whose brackets
//! nest deeper than any such tree could produce are refused before parsing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use raylang_core::{RaylangError, RaylangResult, Vector3};

use crate::camera::CameraSpec;
use crate::light::LightSpec;
use crate::material::MaterialSpec;
use crate::node::{Node, Primitive, Shading, TransformKind};
use crate::path::IrPath;
use crate::scene::SceneDescriptor;
use crate::validate::{validate_node, validate_scene, MAX_DEPTH};

/// Version written into every encoded document.
pub const SCHEMA_VERSION: u32 = 1;

/// Each node level opens at most two containers; the envelope and the
/// deepest leaf add a few more.
const MAX_NESTING: usize = 2 * MAX_DEPTH + 8;

const SCENE_FIELDS: &[&str] = &[
    "version",
    "threads",
    "image",
    "width",
    "height",
    "subsamples",
    "bbox_limit",
    "background",
    "ambient_light",
    "default_material",
    "camera",
    "lights",
    "objects",
];

#[derive(Serialize)]
struct WireDocument<'a> {
    version: u32,
    #[serde(flatten)]
    scene: &'a SceneDescriptor,
}

fn checked(scene: &SceneDescriptor) -> RaylangResult<WireDocument<'_>> {
    validate_scene(scene).map_err(RaylangError::from_validation)?;
    Ok(WireDocument {
        version: SCHEMA_VERSION,
        scene,
    })
}

/// Encode a scene as a compact document.
pub fn encode(scene: &SceneDescriptor) -> RaylangResult<Vec<u8>> {
    let document = checked(scene)?;
    serde_json::to_vec(&document).map_err(|e| RaylangError::Encode(e.to_string()))
}

/// Encode a scene as an indented document, for files meant to be read.
pub fn encode_pretty(scene: &SceneDescriptor) -> RaylangResult<Vec<u8>> {
    let document = checked(scene)?;
    serde_json::to_vec_pretty(&document).map_err(|e| RaylangError::Encode(e.to_string()))
}

pub fn decode(bytes: &[u8]) -> RaylangResult<SceneDescriptor> {
    let value = parse(bytes)?;
    let scene = decode_scene(&value)?;
    validate_scene(&scene).map_err(RaylangError::from_validation)?;
    Ok(scene)
}

pub fn decode_str(document: &str) -> RaylangResult<SceneDescriptor> {
    decode(document.as_bytes())
}

/// Encode a standalone subtree, without the document envelope.
pub fn encode_node(node: &Node) -> RaylangResult<Vec<u8>> {
    let errors = validate_node(node, &IrPath::root());
    if !errors.is_empty() {
        return Err(RaylangError::from_validation(errors));
    }
    serde_json::to_vec(node).map_err(|e| RaylangError::Encode(e.to_string()))
}

pub fn decode_node(bytes: &[u8]) -> RaylangResult<Node> {
    let value = parse(bytes)?;
    let root = IrPath::root();
    let node = node_from_value(&value, &root)?;
    let errors = validate_node(&node, &root);
    if !errors.is_empty() {
        return Err(RaylangError::from_validation(errors));
    }
    Ok(node)
}

fn malformed(e: serde_json::Error) -> RaylangError {
    RaylangError::decode(IrPath::root(), format!("malformed document: {}", e))
}

fn parse(bytes: &[u8]) -> RaylangResult<Value> {
    let nesting = nesting_depth(bytes);
    if nesting > MAX_NESTING {
        return Err(RaylangError::decode(
            IrPath::root(),
            format!(
                "document nests {} containers deep, the limit is {} (node trees up to {} levels)",
                nesting, MAX_NESTING, MAX_DEPTH
            ),
        ));
    }
    let mut de = serde_json::Deserializer::from_slice(bytes);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de)).map_err(malformed)?;
    de.end().map_err(malformed)?;
    Ok(value)
}

/// Deepest bracket nesting outside string literals. Malformed input is left
/// for the parser to report.
fn nesting_depth(bytes: &[u8]) -> usize {
    let (mut depth, mut deepest) = (0usize, 0usize);
    let (mut in_string, mut escaped) = (false, false);
    for &b in bytes {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn object<'v>(value: &'v Value, path: &IrPath) -> RaylangResult<&'v Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        RaylangError::decode(path, format!("expected an object, found {}", describe(value)))
    })
}

fn array<'v>(value: &'v Value, path: &IrPath) -> RaylangResult<&'v Vec<Value>> {
    value.as_array().ok_or_else(|| {
        RaylangError::decode(path, format!("expected an array, found {}", describe(value)))
    })
}

fn deny_unknown(obj: &Map<String, Value>, allowed: &[&str], path: &IrPath) -> RaylangResult<()> {
    match obj.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(RaylangError::decode(
            path.field(key.as_str()),
            format!("unknown field, expected one of: {}", allowed.join(", ")),
        )),
        None => Ok(()),
    }
}

fn field<'v>(obj: &'v Map<String, Value>, name: &str, path: &IrPath) -> RaylangResult<&'v Value> {
    obj.get(name)
        .ok_or_else(|| RaylangError::decode(path.field(name), "missing required field"))
}

fn value_as<T: DeserializeOwned>(value: &Value, path: &IrPath) -> RaylangResult<T> {
    T::deserialize(value).map_err(|e| RaylangError::decode(path, e.to_string()))
}

fn required<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    name: &str,
    path: &IrPath,
) -> RaylangResult<T> {
    value_as(field(obj, name, path)?, &path.field(name))
}

/// Absent and `null` both read as unset.
fn optional<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    name: &str,
    path: &IrPath,
) -> RaylangResult<Option<T>> {
    match obj.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value_as(value, &path.field(name)).map(Some),
    }
}

/// Split a single-key variant object into its tag and body.
fn tagged<'v>(value: &'v Value, path: &IrPath) -> RaylangResult<(&'v str, &'v Value)> {
    let obj = object(value, path)?;
    let mut entries = obj.iter();
    match (entries.next(), entries.next()) {
        (Some((tag, body)), None) => Ok((tag.as_str(), body)),
        _ => Err(RaylangError::decode(
            path,
            format!("expected a single-key variant object, found {} keys", obj.len()),
        )),
    }
}

fn unknown_variant(tag: &str, expected: &[&str], path: &IrPath) -> RaylangError {
    RaylangError::decode(
        path,
        format!("unknown variant `{}`, expected one of: {}", tag, expected.join(", ")),
    )
}

fn decode_scene(value: &Value) -> RaylangResult<SceneDescriptor> {
    let root = IrPath::root();
    let obj = object(value, &root)?;
    deny_unknown(obj, SCENE_FIELDS, &root)?;

    // Documents written before versioning carry no `version` key.
    if let Some(version) = optional::<u32>(obj, "version", &root)? {
        if version != SCHEMA_VERSION {
            return Err(RaylangError::decode(
                root.field("version"),
                format!(
                    "unsupported schema version {}, this build reads version {}",
                    version, SCHEMA_VERSION
                ),
            ));
        }
    }

    let lights_path = root.field("lights");
    let lights = array(field(obj, "lights", &root)?, &lights_path)?
        .iter()
        .enumerate()
        .map(|(i, light)| light_from_value(light, &lights_path.index(i)))
        .collect::<RaylangResult<Vec<_>>>()?;

    Ok(SceneDescriptor {
        threads: required(obj, "threads", &root)?,
        image: required(obj, "image", &root)?,
        width: required(obj, "width", &root)?,
        height: required(obj, "height", &root)?,
        subsamples: optional(obj, "subsamples", &root)?.unwrap_or(1),
        bbox_limit: optional(obj, "bbox_limit", &root)?,
        background: required(obj, "background", &root)?,
        ambient_light: required(obj, "ambient_light", &root)?,
        default_material: match obj.get("default_material") {
            None | Some(Value::Null) => None,
            Some(value) => Some(material_from_value(value, &root.field("default_material"))?),
        },
        camera: camera_from_value(field(obj, "camera", &root)?, &root.field("camera"))?,
        lights,
        objects: node_from_value(field(obj, "objects", &root)?, &root.field("objects"))?,
    })
}

fn material_from_value(value: &Value, path: &IrPath) -> RaylangResult<MaterialSpec> {
    let obj = object(value, path)?;
    deny_unknown(
        obj,
        &["k_diffuse", "k_specular", "k_ambient", "n_shininess", "color"],
        path,
    )?;
    Ok(MaterialSpec {
        k_diffuse: required(obj, "k_diffuse", path)?,
        k_specular: required(obj, "k_specular", path)?,
        k_ambient: required(obj, "k_ambient", path)?,
        n_shininess: required(obj, "n_shininess", path)?,
        color: required(obj, "color", path)?,
    })
}

fn light_from_value(value: &Value, path: &IrPath) -> RaylangResult<LightSpec> {
    let obj = object(value, path)?;
    deny_unknown(obj, &["color", "intensity", "position"], path)?;
    let color = required(obj, "color", path)?;
    let position: Vector3 = required(obj, "position", path)?;
    let light = LightSpec::new(color, position);
    Ok(match optional(obj, "intensity", path)? {
        Some(intensity) => light.with_intensity(intensity),
        None => light,
    })
}

fn camera_from_value(value: &Value, path: &IrPath) -> RaylangResult<CameraSpec> {
    let obj = object(value, path)?;
    deny_unknown(obj, &["distance", "fov_angle", "location", "direction", "up"], path)?;
    Ok(CameraSpec {
        distance: required(obj, "distance", path)?,
        fov_angle: required(obj, "fov_angle", path)?,
        location: required(obj, "location", path)?,
        direction: required(obj, "direction", path)?,
        up: required(obj, "up", path)?,
    })
}

fn node_from_value(value: &Value, path: &IrPath) -> RaylangResult<Node> {
    let (tag, body) = tagged(value, path)?;
    let here = path.field(tag);
    match tag {
        "Primitive" => Ok(Node::Primitive(primitive_from_value(body, &here)?)),
        "Transform" => {
            let obj = object(body, &here)?;
            deny_unknown(obj, &["transform", "child"], &here)?;
            let transform = transform_from_value(field(obj, "transform", &here)?, &here.field("transform"))?;
            let child = node_from_value(field(obj, "child", &here)?, &here.field("child"))?;
            Ok(Node::Transform {
                transform,
                child: Box::new(child),
            })
        }
        "Material" => {
            let obj = object(body, &here)?;
            deny_unknown(obj, &["material", "child"], &here)?;
            let material =
                material_from_value(field(obj, "material", &here)?, &here.field("material"))?;
            let child = node_from_value(field(obj, "child", &here)?, &here.field("child"))?;
            Ok(Node::Material {
                material,
                child: Box::new(child),
            })
        }
        "Group" => array(body, &here)?
            .iter()
            .enumerate()
            .map(|(i, item)| node_from_value(item, &here.index(i)))
            .collect::<RaylangResult<Vec<_>>>()
            .map(Node::Group),
        "LoadMesh" => {
            let obj = object(body, &here)?;
            deny_unknown(obj, &["file", "shading"], &here)?;
            Ok(Node::LoadMesh {
                file: required(obj, "file", &here)?,
                shading: required::<Shading>(obj, "shading", &here)?,
            })
        }
        other => Err(unknown_variant(
            other,
            &["Primitive", "Transform", "Material", "Group", "LoadMesh"],
            path,
        )),
    }
}

fn primitive_from_value(value: &Value, path: &IrPath) -> RaylangResult<Primitive> {
    let (tag, body) = tagged(value, path)?;
    let here = path.field(tag);
    match tag {
        "Sphere" => {
            let obj = object(body, &here)?;
            deny_unknown(obj, &["radius", "center"], &here)?;
            Ok(Primitive::Sphere {
                radius: required(obj, "radius", &here)?,
                center: required(obj, "center", &here)?,
            })
        }
        other => Err(unknown_variant(other, &["Sphere"], path)),
    }
}

fn transform_from_value(value: &Value, path: &IrPath) -> RaylangResult<TransformKind> {
    let (tag, body) = tagged(value, path)?;
    let here = path.field(tag);
    match tag {
        "Translate" => Ok(TransformKind::Translate(value_as(body, &here)?)),
        "Scale" => Ok(TransformKind::Scale(value_as(body, &here)?)),
        "Rotate" => {
            let obj = object(body, &here)?;
            deny_unknown(obj, &["angle", "axis"], &here)?;
            Ok(TransformKind::Rotate {
                angle: required(obj, "angle", &here)?,
                axis: required(obj, "axis", &here)?,
            })
        }
        other => Err(unknown_variant(other, &["Translate", "Scale", "Rotate"], path)),
    }
}
