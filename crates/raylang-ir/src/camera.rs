use serde::{Deserialize, Serialize};

use raylang_core::{RaylangError, Vector3};

use crate::path::IrPath;

/// Pinhole camera. `direction` need not be normalized; the renderer builds
/// its basis from `direction` and `up`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraSpec {
    /// Distance from the eye to the image plane.
    pub distance: f64,
    /// Horizontal field of view, in degrees.
    pub fov_angle: f64,
    pub location: Vector3,
    pub direction: Vector3,
    pub up: Vector3,
}

impl CameraSpec {
    pub fn new(
        distance: f64,
        fov_angle: f64,
        location: impl Into<Vector3>,
        direction: impl Into<Vector3>,
        up: impl Into<Vector3>,
    ) -> Self {
        Self {
            distance,
            fov_angle,
            location: location.into(),
            direction: direction.into(),
            up: up.into(),
        }
    }

    /// Camera at `location` looking at `target`, with +Y up.
    pub fn looking_at(
        location: impl Into<Vector3>,
        target: impl Into<Vector3>,
        fov_angle: f64,
    ) -> Self {
        let location = location.into();
        let direction = target.into() - location;
        Self {
            distance: direction.magnitude(),
            fov_angle,
            location,
            direction,
            up: Vector3::new(0.0, 1.0, 0.0),
        }
    }

    pub fn validate(&self, path: &IrPath) -> Vec<RaylangError> {
        let mut errors = Vec::new();
        if !self.distance.is_finite() || self.distance <= 0.0 {
            errors.push(RaylangError::validation(
                path.field("distance"),
                format!("must be a finite, positive number, got {}", self.distance),
            ));
        }
        if !self.fov_angle.is_finite() || self.fov_angle <= 0.0 || self.fov_angle >= 180.0 {
            errors.push(RaylangError::validation(
                path.field("fov_angle"),
                format!("must be between 0 and 180 degrees, got {}", self.fov_angle),
            ));
        }
        for (name, v) in [
            ("location", self.location),
            ("direction", self.direction),
            ("up", self.up),
        ] {
            if !v.is_finite() {
                errors.push(RaylangError::validation(
                    path.field(name),
                    "components must be finite",
                ));
            }
        }
        if self.direction.is_zero() {
            errors.push(RaylangError::validation(
                path.field("direction"),
                "view direction must be non-zero",
            ));
        }
        if self.up.is_zero() {
            errors.push(RaylangError::validation(
                path.field("up"),
                "up vector must be non-zero",
            ));
        } else if self.up.is_finite()
            && self.direction.is_finite()
            && !self.direction.is_zero()
            && self.up.is_parallel_to(&self.direction)
        {
            errors.push(RaylangError::validation(
                path.field("up"),
                "up vector must not be parallel to the view direction",
            ));
        }
        errors
    }
}
