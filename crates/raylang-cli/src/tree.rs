use raylang_ir::{MaterialSpec, Node, Primitive, TransformKind};

/// Render a node tree as indented lines, one node per line.
pub fn render_tree(node: &Node) -> Vec<String> {
    let mut lines = Vec::new();
    walk(node, "", true, true, &mut lines);
    lines
}

fn walk(node: &Node, prefix: &str, last: bool, root: bool, lines: &mut Vec<String>) {
    let (branch, next_prefix) = if root {
        (String::new(), String::new())
    } else if last {
        (format!("{}└── ", prefix), format!("{}    ", prefix))
    } else {
        (format!("{}├── ", prefix), format!("{}│   ", prefix))
    };
    lines.push(format!("{}{}", branch, label(node)));

    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        walk(child, &next_prefix, i + 1 == children.len(), false, lines);
    }
}

fn label(node: &Node) -> String {
    match node {
        Node::Primitive(Primitive::Sphere { radius, center }) => {
            format!("Sphere r={} at {}", radius, center)
        }
        Node::Transform { transform, .. } => match transform {
            TransformKind::Translate(v) => format!("Translate {}", v),
            TransformKind::Scale(v) => format!("Scale {}", v),
            TransformKind::Rotate { angle, axis } => format!("Rotate {}° about {}", angle, axis),
        },
        Node::Material { material, .. } => format!("Material {}", describe_material(material)),
        Node::Group(items) => format!("Group ({} items)", items.len()),
        Node::LoadMesh { file, shading } => format!("Mesh {} ({:?})", file, shading),
    }
}

pub fn describe_material(material: &MaterialSpec) -> String {
    format!(
        "{} kd={} ks={} ka={} n={}",
        material.color,
        material.k_diffuse,
        material.k_specular,
        material.k_ambient,
        material.n_shininess
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use raylang_core::Color;
    use raylang_ir::combinators::{group, material, sphere, translate};

    #[test]
    fn test_tree_layout() {
        let tree = group(vec![
            translate([1.0, 0.0, 0.0], sphere(1.0, [0.0, 0.0, 0.0]).unwrap()).unwrap(),
            material(
                MaterialSpec::default().with_color(Color::Red),
                sphere(2.0, [0.0, 0.0, 0.0]).unwrap(),
            )
            .unwrap(),
        ]);
        let lines = render_tree(&tree);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Group (2 items)");
        assert_eq!(lines[1], "├── Translate [1, 0, 0]");
        assert_eq!(lines[2], "│   └── Sphere r=1 at [0, 0, 0]");
        assert!(lines[3].starts_with("└── Material red"));
        assert_eq!(lines[4], "    └── Sphere r=2 at [0, 0, 0]");
    }
}
