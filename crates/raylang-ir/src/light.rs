use serde::{Deserialize, Serialize};

use raylang_core::{Color, RaylangError, Vector3};

use crate::path::IrPath;

fn default_intensity() -> f64 {
    1.0
}

/// A point light. Lights are summed by the renderer, so order carries no
/// meaning, but it is preserved for deterministic output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LightSpec {
    pub color: Color,
    #[serde(default = "default_intensity")]
    pub intensity: f64,
    pub position: Vector3,
}

impl LightSpec {
    /// A full-intensity light.
    pub fn new(color: Color, position: impl Into<Vector3>) -> Self {
        Self {
            color,
            intensity: default_intensity(),
            position: position.into(),
        }
    }

    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_position(mut self, position: impl Into<Vector3>) -> Self {
        self.position = position.into();
        self
    }

    pub fn validate(&self, path: &IrPath) -> Vec<RaylangError> {
        let mut errors = Vec::new();
        if !self.intensity.is_finite() || self.intensity < 0.0 {
            errors.push(RaylangError::validation(
                path.field("intensity"),
                format!("must be a finite, non-negative number, got {}", self.intensity),
            ));
        }
        if !self.position.is_finite() {
            errors.push(RaylangError::validation(
                path.field("position"),
                "position components must be finite",
            ));
        }
        if !self.color.is_finite() {
            errors.push(RaylangError::validation(
                path.field("color"),
                "color components must be finite",
            ));
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_intensity() {
        let light = LightSpec::new(Color::White, [4.0, 4.0, 9.0]);
        assert_eq!(light.intensity, 1.0);
        assert_eq!(light.position, Vector3::new(4.0, 4.0, 9.0));
    }

    #[test]
    fn test_missing_intensity_defaults_on_wire() {
        let light: LightSpec =
            serde_json::from_str(r#"{"color":"white","position":[4,4,9]}"#).unwrap();
        assert_eq!(light.intensity, 1.0);
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let key = LightSpec::new(Color::White, [4.0, 4.0, 9.0]).with_intensity(0.5);
        let fill = key.with_color(Color::Azure).with_position([-4.0, 2.0, 9.0]);
        assert_eq!(key.color, Color::White);
        assert_eq!(fill.intensity, 0.5);
        assert_eq!(fill.color, Color::Azure);
    }

    #[test]
    fn test_validate() {
        let bad = LightSpec::new(Color::White, [f64::NAN, 0.0, 0.0]).with_intensity(-1.0);
        let errors = bad.validate(&IrPath::root().field("lights").index(0));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].path(), Some("lights[0].intensity"));
        assert_eq!(errors[1].path(), Some("lights[0].position"));
    }
}
