use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Field(String),
    Index(usize),
}

/// A location inside a scene tree or wire document, e.g.
/// `objects.Group[2].Transform.child`. The empty path renders as `$`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IrPath {
    segments: Vec<Segment>,
}

impl IrPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// A new path with `name` appended.
    pub fn field(&self, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.segments.push(Segment::Field(name.into()));
        next
    }

    /// A new path with a sequence index appended.
    pub fn index(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.segments.push(Segment::Index(index));
        next
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for IrPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "$");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) if i == 0 => write!(f, "{}", name)?,
                Segment::Field(name) => write!(f, ".{}", name)?,
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_display() {
        assert_eq!(IrPath::root().to_string(), "$");
        assert!(IrPath::root().is_root());
    }

    #[test]
    fn test_nested_display() {
        let path = IrPath::root()
            .field("objects")
            .field("Group")
            .index(2)
            .field("Transform")
            .field("child");
        assert_eq!(path.to_string(), "objects.Group[2].Transform.child");
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn test_field_does_not_mutate_parent() {
        let parent = IrPath::root().field("lights");
        let child = parent.index(0);
        assert_eq!(parent.to_string(), "lights");
        assert_eq!(child.to_string(), "lights[0]");
    }
}
