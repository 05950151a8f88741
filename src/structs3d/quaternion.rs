use glam::Quat;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::structs3d::{AxisAngle, Vector3, Vector4};

/// A quaternion representing rotation in 3D space.
///
/// A proper rotation quaternion has squared norm 1. That invariant is not
/// enforced structurally; callers normalize explicitly, and the operations
/// that assume unit length ([`Quaternion::rotate_vec3`], [`Quaternion::pow`])
/// say so.
///
/// `q` and `-q` describe the same rotation (double cover). Interpolation entry
/// points that care about the shorter arc handle the sign themselves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Serialize for Quaternion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [self.x, self.y, self.z, self.w].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Quaternion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let arr = <[f32; 4]>::deserialize(deserializer)?;
        Ok(Quaternion::new(arr[0], arr[1], arr[2], arr[3]))
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quaternion({}, {}, {}, {})",
            self.x, self.y, self.z, self.w
        )
    }
}

impl Quaternion {
    /// Identity rotation (0, 0, 0, 1)
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Squared norm. 1 for a proper rotation quaternion.
    pub fn norm_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Scales to unit norm, unless the squared norm is exactly 1 or 0 already.
    ///
    /// The no-op check is exact equality, not an epsilon band: repeated calls
    /// on a near-but-not-exactly-normalized value may re-scale it by a
    /// negligible factor each time.
    pub fn normalize(&self) -> Self {
        let norm = self.norm_squared();
        if norm != 1.0 && norm != 0.0 {
            let ool = 1.0 / norm.sqrt();
            Self::new(self.x * ool, self.y * ool, self.z * ool, self.w * ool)
        } else {
            *self
        }
    }

    /// Negates the vector part. Equals the inverse for unit quaternions.
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Conjugate divided by the squared norm.
    pub fn inverse(&self) -> Self {
        self.conjugate().scaled(1.0 / self.dot(*self))
    }

    /// Component-wise scale
    pub fn scaled(&self, c: f32) -> Self {
        Self::new(self.x * c, self.y * c, self.z * c, self.w * c)
    }

    /// Four-component dot product, in [-1, 1] for two unit quaternions.
    pub fn dot(&self, other: Self) -> f32 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Whether interpolating from `self` to `other` already follows the
    /// shorter of the two arcs (dot >= 0).
    pub fn is_shortest_rotation(&self, other: Self) -> bool {
        self.dot(other) >= 0.0
    }

    /// Named form of the [`Mul`] operator, for call chains. The right factor
    /// is the rotation applied first.
    pub fn mul(&self, rhs: Self) -> Self {
        *self * rhs
    }

    /// Product of three quaternions, left to right.
    pub fn mul3(a: Self, b: Self, c: Self) -> Self {
        a * b * c
    }

    /// Rotates a vector by this quaternion: q * v * conj(q).
    ///
    /// Requires `self` to be unit length; the conjugate stands in for the
    /// inverse, so a non-unit quaternion scales the result.
    pub fn rotate_vec3(&self, v: Vector3) -> Vector3 {
        let p = Self::new(v.x, v.y, v.z, 0.0);
        let r = *self * p * self.conjugate();
        Vector3::new(r.x, r.y, r.z)
    }

    // ------------------ Axis-angle ------------------

    /// Builds the rotation of `angle` radians around `axis`, normalizing the
    /// result so a non-unit axis still yields a proper rotation.
    pub fn from_axis_angle(axis: Vector3, angle: f32) -> Self {
        let half = angle * 0.5;
        let (sina, cosa) = half.sin_cos();
        Self::new(axis.x * sina, axis.y * sina, axis.z * sina, cosa).normalize()
    }

    /// Rotation of `angle` radians around the X axis
    pub fn from_x_rotation(angle: f32) -> Self {
        let (sina, cosa) = (angle * 0.5).sin_cos();
        Self::new(sina, 0.0, 0.0, cosa)
    }

    /// Rotation of `angle` radians around the Y axis
    pub fn from_y_rotation(angle: f32) -> Self {
        let (sina, cosa) = (angle * 0.5).sin_cos();
        Self::new(0.0, sina, 0.0, cosa)
    }

    /// Rotation of `angle` radians around the Z axis
    pub fn from_z_rotation(angle: f32) -> Self {
        let (sina, cosa) = (angle * 0.5).sin_cos();
        Self::new(0.0, 0.0, sina, cosa)
    }

    /// Extracts the rotation axis and angle of a unit quaternion.
    ///
    /// Near the identity the sine of the half angle vanishes; below a
    /// magnitude of 1e-4 the vector part is returned unscaled instead of
    /// being divided by it.
    pub fn to_axis_angle(&self) -> AxisAngle {
        let angle = self.w.acos() * 2.0;
        let sina = (1.0 - self.w * self.w).sqrt();
        let oo_sin = if sina.abs() > 1e-4 { 1.0 / sina } else { 1.0 };
        AxisAngle::new(
            Vector3::new(self.x * oo_sin, self.y * oo_sin, self.z * oo_sin),
            angle,
        )
    }

    // ------------------ Interpolation ------------------

    /// Straight-line blend of the four components. Not renormalized; the
    /// midpoint of two unit quaternions is shorter than unit.
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        a + (b - a).scaled(t)
    }

    /// Normalized linear interpolation.
    pub fn nlerp(a: Self, b: Self, t: f32) -> Self {
        Self::lerp(a, b, t).normalize()
    }

    /// Spherical linear interpolation at constant angular velocity.
    ///
    /// Falls back to [`Quaternion::nlerp`] when the inputs are nearly aligned
    /// (dot > 0.9995), where the sine denominator is too small to divide by.
    ///
    /// Does NOT pick the shorter arc: antipodal inputs interpolate the long
    /// way around. [`Quaternion::slerp_shortest`] is the general-purpose
    /// entry point.
    pub fn slerp(a: Self, b: Self, t: f32) -> Self {
        let dot = a.dot(b);
        if dot > 0.9995 {
            return Self::nlerp(a, b, t);
        }
        let theta = dot.clamp(-1.0, 1.0).acos() * t;
        // Orthogonal remainder of b against a, so (a, ortho) is an
        // orthonormal basis of the interpolation plane.
        let ortho = (b - a.scaled(dot)).normalize();
        a.scaled(theta.cos()) + ortho.scaled(theta.sin())
    }

    /// Shortest-arc spherical interpolation: negates `b` first when the dot
    /// product is <= 0, then runs [`Quaternion::slerp`].
    pub fn slerp_shortest(a: Self, b: Self, t: f32) -> Self {
        if a.dot(b) <= 0.0 {
            Self::slerp(a, -b, t)
        } else {
            Self::slerp(a, b, t)
        }
    }

    /// Raises a unit quaternion to a power, scaling its rotation angle.
    ///
    /// Returns `self` unchanged when |w| >= 0.9999: at that point the half
    /// angle is small enough that the sine ratio below turns unstable, and
    /// identity^e is identity anyway.
    pub fn pow(&self, exponent: f32) -> Self {
        if self.w.abs() >= 0.9999 {
            return *self;
        }
        let alpha = self.w.acos();
        let new_alpha = alpha * exponent;
        let mult = new_alpha.sin() / alpha.sin();
        Self::new(
            self.x * mult,
            self.y * mult,
            self.z * mult,
            new_alpha.cos(),
        )
    }

    // ------------------ Bridging ------------------

    pub const fn to_vec4(&self) -> Vector4 {
        Vector4::new(self.x, self.y, self.z, self.w)
    }

    pub const fn from_vec4(v: Vector4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }

    /// Convert to glam Quat
    #[inline]
    pub fn to_glam(self) -> Quat {
        Quat::from_xyzw(self.x, self.y, self.z, self.w)
    }

    /// Create from glam Quat
    #[inline]
    pub fn from_glam(q: Quat) -> Self {
        Self {
            x: q.x,
            y: q.y,
            z: q.z,
            w: q.w,
        }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// Convenient conversions using From/Into traits
impl From<Quat> for Quaternion {
    #[inline]
    fn from(q: Quat) -> Self {
        Self::from_glam(q)
    }
}

impl From<Quaternion> for Quat {
    #[inline]
    fn from(q: Quaternion) -> Self {
        q.to_glam()
    }
}

// ---------------------- Arithmetic Ops ----------------------

/// Hamilton product. Non-commutative, and the result is not renormalized;
/// the caller decides when to pay for a normalize.
impl Mul for Quaternion {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y + self.y * rhs.w + self.z * rhs.x - self.x * rhs.z,
            self.w * rhs.z + self.z * rhs.w + self.x * rhs.y - self.y * rhs.x,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

impl Add for Quaternion {
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

impl Sub for Quaternion {
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

/// The antipodal quaternion: same rotation, opposite sign.
impl Neg for Quaternion {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}
