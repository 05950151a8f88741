use glam::Vec4;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use crate::structs3d::Vector3;

/// A 4-component vector, used for homogeneous coordinates and quaternion bridging
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl fmt::Display for Vector4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector4({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

impl Vector4 {
    /// Zero vector4 constant (0, 0, 0, 0)
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 0.0,
    };

    /// Unit W axis (0, 0, 0, 1)
    pub const W: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Creates a new 4D vector
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// A point in homogeneous coordinates (w = 1)
    pub const fn from_point(v: Vector3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
            w: 1.0,
        }
    }

    /// Dot product between this vector and another
    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    /// Squared length
    pub fn length_squared(&self) -> f32 {
        self.dot(*self)
    }

    /// Magnitude (length) of the vector
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Drops the w component
    pub const fn xyz(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }
}

// Conversion traits for seamless glam integration
impl From<Vector4> for Vec4 {
    #[inline]
    fn from(v: Vector4) -> Self {
        Vec4::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vec4> for Vector4 {
    #[inline]
    fn from(v: Vec4) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
            w: v.w,
        }
    }
}

// ---------------------- Arithmetic Ops ----------------------

impl Add for Vector4 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
            self.w + rhs.w,
        )
    }
}
impl AddAssign for Vector4 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector4 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(
            self.x - rhs.x,
            self.y - rhs.y,
            self.z - rhs.z,
            self.w - rhs.w,
        )
    }
}
impl SubAssign for Vector4 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

// Scalar multiply
impl Mul<f32> for Vector4 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}
impl MulAssign<f32> for Vector4 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_point_sets_w_to_one() {
        let p = Vector4::from_point(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(p, Vector4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(p.xyz(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn dot_includes_w_component() {
        let a = Vector4::new(1.0, 0.0, 0.0, 2.0);
        let b = Vector4::new(3.0, 0.0, 0.0, 4.0);
        assert_eq!(a.dot(b), 11.0);
    }
}
