use serde::{Deserialize, Serialize};

use raylang_core::{Matrix4, Vector3};

use crate::material::MaterialSpec;
use crate::path::IrPath;

/// A geometric primitive the renderer intersects directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Sphere { radius: f64, center: Vector3 },
}

/// An affine transform applied to a subtree, in the subtree's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransformKind {
    Translate(Vector3),
    Scale(Vector3),
    /// Right-handed rotation of `angle` degrees about `axis`.
    Rotate { angle: f64, axis: Vector3 },
}

impl TransformKind {
    pub fn matrix(&self) -> Matrix4 {
        match *self {
            TransformKind::Translate(v) => Matrix4::translation(v),
            TransformKind::Scale(v) => Matrix4::scaling(v),
            TransformKind::Rotate { angle, axis } => Matrix4::rotation(angle, axis),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TransformKind::Translate(_) => "Translate",
            TransformKind::Scale(_) => "Scale",
            TransformKind::Rotate { .. } => "Rotate",
        }
    }
}

/// Normal interpolation hint for loaded meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shading {
    Flat,
    Smooth,
}

/// One element of the scene tree.
///
/// Composite nodes exclusively own their children; the tree is never shared
/// or cyclic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Primitive(Primitive),
    Transform {
        transform: TransformKind,
        child: Box<Node>,
    },
    Material {
        material: MaterialSpec,
        child: Box<Node>,
    },
    Group(Vec<Node>),
    /// A mesh file the renderer loads; no I/O happens on this side.
    LoadMesh { file: String, shading: Shading },
}

/// A geometry leaf seen in context: where it sits, which material governs
/// it and which transforms enclose it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLeaf<'a> {
    pub path: IrPath,
    pub node: &'a Node,
    /// Nearest enclosing material, or the fallback passed to resolution.
    pub material: Option<&'a MaterialSpec>,
    /// Enclosing transforms, outermost first.
    pub transforms: Vec<&'a TransformKind>,
}

impl ResolvedLeaf<'_> {
    /// Local-to-world matrix. The innermost transform is applied to the
    /// leaf's geometry first, then each enclosing one outward.
    pub fn world_matrix(&self) -> Matrix4 {
        self.transforms
            .iter()
            .fold(Matrix4::identity(), |acc, t| acc * t.matrix())
    }
}

impl Node {
    /// Variant name, as used for the wire tag.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Primitive(_) => "Primitive",
            Node::Transform { .. } => "Transform",
            Node::Material { .. } => "Material",
            Node::Group(_) => "Group",
            Node::LoadMesh { .. } => "LoadMesh",
        }
    }

    /// Primitives and meshes are leaves; everything else wraps children.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Primitive(_) | Node::LoadMesh { .. })
    }

    /// Direct children in order.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Transform { child, .. } | Node::Material { child, .. } => vec![child.as_ref()],
            Node::Group(items) => items.iter().collect(),
            Node::Primitive(_) | Node::LoadMesh { .. } => Vec::new(),
        }
    }

    /// Number of nodes on the longest root-to-node chain (a leaf is 1).
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(|c| c.depth()).max().unwrap_or(0)
    }

    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children().iter().map(|c| c.leaf_count()).sum()
        }
    }

    /// Every leaf under this node, in document order, paired with the
    /// material that governs it (nearest enclosing `Material` wins, falling
    /// back to `default`) and its transform stack.
    pub fn resolve_leaves<'a>(&'a self, default: Option<&'a MaterialSpec>) -> Vec<ResolvedLeaf<'a>> {
        self.resolve_leaves_at(IrPath::root(), default)
    }

    /// As [`Node::resolve_leaves`], with leaf paths rooted at `root`.
    pub fn resolve_leaves_at<'a>(
        &'a self,
        root: IrPath,
        default: Option<&'a MaterialSpec>,
    ) -> Vec<ResolvedLeaf<'a>> {
        let mut out = Vec::new();
        let mut transforms = Vec::new();
        collect_leaves(self, root, default, &mut transforms, &mut out);
        out
    }
}

fn collect_leaves<'a>(
    node: &'a Node,
    path: IrPath,
    material: Option<&'a MaterialSpec>,
    transforms: &mut Vec<&'a TransformKind>,
    out: &mut Vec<ResolvedLeaf<'a>>,
) {
    match node {
        Node::Primitive(_) | Node::LoadMesh { .. } => out.push(ResolvedLeaf {
            path,
            node,
            material,
            transforms: transforms.clone(),
        }),
        Node::Transform { transform, child } => {
            transforms.push(transform);
            collect_leaves(
                child,
                path.field("Transform").field("child"),
                material,
                transforms,
                out,
            );
            transforms.pop();
        }
        Node::Material {
            material: inner,
            child,
        } => collect_leaves(
            child,
            path.field("Material").field("child"),
            Some(inner),
            transforms,
            out,
        ),
        Node::Group(items) => {
            let group = path.field("Group");
            for (i, item) in items.iter().enumerate() {
                collect_leaves(item, group.index(i), material, transforms, out);
            }
        }
    }
}
