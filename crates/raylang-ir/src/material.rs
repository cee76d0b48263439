use serde::{Deserialize, Serialize};

use raylang_core::{Color, RaylangError};

use crate::path::IrPath;

/// Phong-style surface parameters applied to every leaf under a `Material`
/// node (or to uncovered leaves, as the scene's default material).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialSpec {
    pub k_diffuse: f64,
    pub k_specular: f64,
    pub k_ambient: f64,
    pub n_shininess: f64,
    pub color: Color,
}

/// Field overrides for [`MaterialSpec::derive`]. Unset fields keep the base
/// material's value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MaterialOverrides {
    pub k_diffuse: Option<f64>,
    pub k_specular: Option<f64>,
    pub k_ambient: Option<f64>,
    pub n_shininess: Option<f64>,
    pub color: Option<Color>,
}

impl MaterialOverrides {
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn k_diffuse(mut self, k: f64) -> Self {
        self.k_diffuse = Some(k);
        self
    }

    pub fn k_specular(mut self, k: f64) -> Self {
        self.k_specular = Some(k);
        self
    }

    pub fn k_ambient(mut self, k: f64) -> Self {
        self.k_ambient = Some(k);
        self
    }

    pub fn n_shininess(mut self, n: f64) -> Self {
        self.n_shininess = Some(n);
        self
    }
}

impl MaterialSpec {
    pub fn new(
        k_diffuse: f64,
        k_specular: f64,
        k_ambient: f64,
        n_shininess: f64,
        color: Color,
    ) -> Self {
        Self {
            k_diffuse,
            k_specular,
            k_ambient,
            n_shininess,
            color,
        }
    }

    /// A new material equal to `self` except for the overridden fields.
    /// `self` is never modified.
    pub fn derive(&self, overrides: MaterialOverrides) -> Self {
        Self {
            k_diffuse: overrides.k_diffuse.unwrap_or(self.k_diffuse),
            k_specular: overrides.k_specular.unwrap_or(self.k_specular),
            k_ambient: overrides.k_ambient.unwrap_or(self.k_ambient),
            n_shininess: overrides.n_shininess.unwrap_or(self.n_shininess),
            color: overrides.color.unwrap_or(self.color),
        }
    }

    pub fn with_color(self, color: Color) -> Self {
        self.derive(MaterialOverrides::default().color(color))
    }

    pub fn with_shininess(self, n_shininess: f64) -> Self {
        self.derive(MaterialOverrides::default().n_shininess(n_shininess))
    }

    /// Check coefficients are finite and non-negative.
    pub fn validate(&self, path: &IrPath) -> Vec<RaylangError> {
        let mut errors = Vec::new();
        for (name, value) in [
            ("k_diffuse", self.k_diffuse),
            ("k_specular", self.k_specular),
            ("k_ambient", self.k_ambient),
            ("n_shininess", self.n_shininess),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(RaylangError::validation(
                    path.field(name),
                    format!("must be a finite, non-negative number, got {}", value),
                ));
            }
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

impl Default for MaterialSpec {
    /// White plastic: mostly diffuse with a moderate highlight.
    fn default() -> Self {
        Self::new(0.7, 0.3, 0.1, 30.0, Color::White)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_overrides_only_named_fields() {
        let base = MaterialSpec::default();
        let gray = base.derive(MaterialOverrides::default().color(Color::Gray));
        assert_eq!(gray.color, Color::Gray);
        assert_eq!(gray.k_diffuse, base.k_diffuse);
        assert_eq!(gray.k_specular, base.k_specular);
        assert_eq!(gray.k_ambient, base.k_ambient);
        assert_eq!(gray.n_shininess, base.n_shininess);
    }

    #[test]
    fn test_derive_never_aliases_base() {
        let base = MaterialSpec::default();
        let snapshot = base;
        let mut derived = base.with_color(Color::Red);
        derived.k_diffuse = 0.0;
        let _further = derived.with_shininess(2.0);
        assert_eq!(base, snapshot);
        assert_eq!(base.color, Color::White);
    }

    #[test]
    fn test_validate_rejects_negative_and_nan() {
        let mut m = MaterialSpec::default();
        m.k_specular = -0.1;
        m.n_shininess = f64::NAN;
        let errors = m.validate(&IrPath::root().field("default_material"));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].path(), Some("default_material.k_specular"));
        assert_eq!(errors[1].path(), Some("default_material.n_shininess"));
    }

    #[test]
    fn test_validate_rejects_non_finite_rgb() {
        let m = MaterialSpec::default().with_color(Color::rgb(f64::INFINITY, 0.0, 0.0));
        assert_eq!(m.validate(&IrPath::root()).len(), 1);
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(MaterialSpec::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "k_diffuse": 0.7,
                "k_specular": 0.3,
                "k_ambient": 0.1,
                "n_shininess": 30.0,
                "color": "white"
            })
        );
    }
}
