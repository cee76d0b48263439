use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{RaylangError, RaylangResult};

/// Degrees to radians.
pub fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// A 3D vector: positions, directions, axes, scale and translation amounts.
///
/// On the wire a vector is always a three-element array `[x, y, z]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub const fn one() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    pub fn dot(&self, rhs: &Vector3) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    pub fn cross(&self, rhs: &Vector3) -> Vector3 {
        Vector3 {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    pub fn magnitude_squared(&self) -> f64 {
        self.dot(self)
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Unit vector in the same direction. Returns `None` for the zero vector
    /// and for non-finite input. Components are rescaled before squaring, so
    /// large finite vectors do not overflow.
    pub fn normalize(&self) -> Option<Vector3> {
        let largest = self.x.abs().max(self.y.abs()).max(self.z.abs());
        if largest == 0.0 || !largest.is_finite() {
            return None;
        }
        let scaled = *self * (1.0 / largest);
        Some(scaled * (1.0 / scaled.magnitude()))
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Whether two vectors point along the same line (either direction).
    /// The zero vector counts as parallel to everything.
    pub fn is_parallel_to(&self, other: &Vector3) -> bool {
        match (self.normalize(), other.normalize()) {
            (Some(a), Some(b)) => a.cross(&b).magnitude() <= 1e-9,
            _ => true,
        }
    }

    /// Component-wise approximate equality, for tests and tolerance checks.
    pub fn approx_eq(&self, other: &Vector3, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.z - other.z).abs() <= eps
    }
}

impl Default for Vector3 {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Vector3> for [f64; 3] {
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}

impl From<(f64, f64, f64)> for Vector3 {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl TryFrom<&[f64]> for Vector3 {
    type Error = RaylangError;

    fn try_from(v: &[f64]) -> RaylangResult<Self> {
        match v {
            [x, y, z] => Ok(Self::new(*x, *y, *z)),
            _ => Err(RaylangError::validation(
                "$",
                format!("expected a vector of 3 components, got {}", v.len()),
            )),
        }
    }
}

impl Add for Vector3 {
    type Output = Vector3;
    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;
    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;
    fn mul(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;
    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl std::fmt::Display for Vector3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

/// A row-major 4x4 affine matrix. Points are column vectors: `M * p`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    pub rows: [[f64; 4]; 4],
}

impl Matrix4 {
    pub const fn identity() -> Self {
        Self {
            rows: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn translation(t: Vector3) -> Self {
        let mut m = Self::identity();
        m.rows[0][3] = t.x;
        m.rows[1][3] = t.y;
        m.rows[2][3] = t.z;
        m
    }

    pub fn scaling(s: Vector3) -> Self {
        let mut m = Self::identity();
        m.rows[0][0] = s.x;
        m.rows[1][1] = s.y;
        m.rows[2][2] = s.z;
        m
    }

    /// Right-handed rotation of `angle_degrees` about `axis` (Rodrigues).
    /// A zero axis yields the identity.
    pub fn rotation(angle_degrees: f64, axis: Vector3) -> Self {
        let Some(u) = axis.normalize() else {
            return Self::identity();
        };
        let theta = to_radians(angle_degrees);
        let (s, c) = theta.sin_cos();
        let t = 1.0 - c;
        Self {
            rows: [
                [
                    t * u.x * u.x + c,
                    t * u.x * u.y - s * u.z,
                    t * u.x * u.z + s * u.y,
                    0.0,
                ],
                [
                    t * u.x * u.y + s * u.z,
                    t * u.y * u.y + c,
                    t * u.y * u.z - s * u.x,
                    0.0,
                ],
                [
                    t * u.x * u.z - s * u.y,
                    t * u.y * u.z + s * u.x,
                    t * u.z * u.z + c,
                    0.0,
                ],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn transform_point(&self, p: Vector3) -> Vector3 {
        let r = &self.rows;
        Vector3::new(
            r[0][0] * p.x + r[0][1] * p.y + r[0][2] * p.z + r[0][3],
            r[1][0] * p.x + r[1][1] * p.y + r[1][2] * p.z + r[1][3],
            r[2][0] * p.x + r[2][1] * p.y + r[2][2] * p.z + r[2][3],
        )
    }

    /// Transform a direction (ignores translation).
    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        let r = &self.rows;
        Vector3::new(
            r[0][0] * v.x + r[0][1] * v.y + r[0][2] * v.z,
            r[1][0] * v.x + r[1][1] * v.y + r[1][2] * v.z,
            r[2][0] * v.x + r[2][1] * v.y + r[2][2] * v.z,
        )
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: Matrix4) -> Matrix4 {
        let mut out = [[0.0; 4]; 4];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.rows[i][k] * rhs.rows[k][j]).sum();
            }
        }
        Matrix4 { rows: out }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_radians() {
        assert!((to_radians(360.0) - std::f64::consts::PI * 2.0).abs() < EPS);
    }

    #[test]
    fn test_vector_ops() {
        let u = Vector3::new(1.0, 2.0, 3.0);
        let v = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(u + v, Vector3::new(5.0, 7.0, 9.0));
        assert_eq!(u - v, Vector3::new(-3.0, -3.0, -3.0));
        assert_eq!(u.cross(&v), Vector3::new(-3.0, 6.0, -3.0));
        assert_eq!(u.dot(&v), 32.0);
        assert_eq!(u * 3.0, Vector3::new(3.0, 6.0, 9.0));
        assert_eq!(u.magnitude_squared(), 14.0);
    }

    #[test]
    fn test_normalize_zero_is_none() {
        assert!(Vector3::zero().normalize().is_none());
        let n = Vector3::new(0.0, 3.0, 4.0).normalize().unwrap();
        assert!(n.approx_eq(&Vector3::new(0.0, 0.6, 0.8), EPS));
    }

    #[test]
    fn test_normalize_large_and_tiny_vectors() {
        let n = Vector3::new(0.0, 3e200, 4e200).normalize().unwrap();
        assert!(n.approx_eq(&Vector3::new(0.0, 0.6, 0.8), EPS));
        let n = Vector3::new(3e-200, 0.0, -4e-200).normalize().unwrap();
        assert!(n.approx_eq(&Vector3::new(0.6, 0.0, -0.8), EPS));
        assert!(Vector3::new(f64::INFINITY, 0.0, 0.0).normalize().is_none());
        assert!(Vector3::new(f64::NAN, 1.0, 0.0).normalize().is_none());
    }

    #[test]
    fn test_vector_wire_form_is_array() {
        let json = serde_json::to_string(&Vector3::new(0.0, 1.5, -2.0)).unwrap();
        assert_eq!(json, "[0.0,1.5,-2.0]");
        let back: Vector3 = serde_json::from_str("[4, 4, 9]").unwrap();
        assert_eq!(back, Vector3::new(4.0, 4.0, 9.0));
    }

    #[test]
    fn test_vector_wrong_arity_rejected() {
        assert!(serde_json::from_str::<Vector3>("[1, 2]").is_err());
        assert!(serde_json::from_str::<Vector3>("[1, 2, 3, 4]").is_err());
        assert!(Vector3::try_from(&[1.0, 2.0][..]).is_err());
        assert!(Vector3::try_from(&[1.0, 2.0, 3.0][..]).is_ok());
    }

    #[test]
    fn test_parallel() {
        let y = Vector3::new(0.0, 1.0, 0.0);
        assert!(y.is_parallel_to(&Vector3::new(0.0, -3.0, 0.0)));
        assert!(!y.is_parallel_to(&Vector3::new(0.0, 0.0, -1.0)));

        let big_x = Vector3::new(1e200, 0.0, 0.0);
        assert!(!big_x.is_parallel_to(&Vector3::new(0.0, 1e200, 0.0)));
        assert!(big_x.is_parallel_to(&Vector3::new(-2e200, 0.0, 0.0)));
        assert!(Vector3::new(1e-200, 0.0, 0.0).is_parallel_to(&Vector3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_rotation_about_y() {
        let m = Matrix4::rotation(90.0, Vector3::new(0.0, 1.0, 0.0));
        let p = m.transform_point(Vector3::new(1.0, 0.0, 0.0));
        assert!(p.approx_eq(&Vector3::new(0.0, 0.0, -1.0), EPS));
    }

    #[test]
    fn test_translate_after_scale() {
        let m = Matrix4::translation(Vector3::new(1.0, 0.0, 0.0))
            * Matrix4::scaling(Vector3::new(2.0, 2.0, 2.0));
        let p = m.transform_point(Vector3::new(1.0, 1.0, 1.0));
        assert!(p.approx_eq(&Vector3::new(3.0, 2.0, 2.0), EPS));
        let d = m.transform_vector(Vector3::new(1.0, 0.0, 0.0));
        assert!(d.approx_eq(&Vector3::new(2.0, 0.0, 0.0), EPS));
    }
}
