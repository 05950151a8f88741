use glam::Mat4 as GlamMat4;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Index, IndexMut};

use crate::math_util::float_eq;
use crate::structs2d::Mat2;
use crate::structs3d::{Mat3, Vector3, Vector4};

/// A 4x4 matrix stored as four column vectors.
///
/// Only the rotation-relevant subset lives here: elementary rotation
/// builders, embeddings of the smaller shapes, and vector transforms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4 {
    pub cols: [Vector4; 4],
}

impl Serialize for Mat4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let c = &self.cols;
        [
            [c[0].x, c[0].y, c[0].z, c[0].w],
            [c[1].x, c[1].y, c[1].z, c[1].w],
            [c[2].x, c[2].y, c[2].z, c[2].w],
            [c[3].x, c[3].y, c[3].z, c[3].w],
        ]
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Mat4 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let a = <[[f32; 4]; 4]>::deserialize(deserializer)?;
        Ok(Mat4::new(
            Vector4::new(a[0][0], a[0][1], a[0][2], a[0][3]),
            Vector4::new(a[1][0], a[1][1], a[1][2], a[1][3]),
            Vector4::new(a[2][0], a[2][1], a[2][2], a[2][3]),
            Vector4::new(a[3][0], a[3][1], a[3][2], a[3][3]),
        ))
    }
}

impl Mat4 {
    /// All-zero matrix
    pub const ZERO: Self = Self {
        cols: [Vector4::ZERO, Vector4::ZERO, Vector4::ZERO, Vector4::ZERO],
    };

    /// Identity matrix
    pub const IDENTITY: Self = Self {
        cols: [
            Vector4 {
                x: 1.0,
                y: 0.0,
                z: 0.0,
                w: 0.0,
            },
            Vector4 {
                x: 0.0,
                y: 1.0,
                z: 0.0,
                w: 0.0,
            },
            Vector4 {
                x: 0.0,
                y: 0.0,
                z: 1.0,
                w: 0.0,
            },
            Vector4::W,
        ],
    };

    /// Creates a matrix from four column vectors
    pub const fn new(c0: Vector4, c1: Vector4, c2: Vector4, c3: Vector4) -> Self {
        Self {
            cols: [c0, c1, c2, c3],
        }
    }

    /// Sum of the full diagonal
    pub fn trace(&self) -> f32 {
        self.cols[0].x + self.cols[1].y + self.cols[2].z + self.cols[3].w
    }

    /// Sum of the rotation block's diagonal
    pub fn trace3(&self) -> f32 {
        self.cols[0].x + self.cols[1].y + self.cols[2].z
    }

    // ------------------ Rotation builders ------------------

    /// Rotation of `angle` radians around the X axis; same sign convention
    /// as [`Mat3::from_x_rotation`], padded with an identity fourth row and
    /// column.
    pub fn from_x_rotation(angle: f32) -> Self {
        let (sina, cosa) = angle.sin_cos();
        Self::new(
            Vector4::new(1.0, 0.0, 0.0, 0.0),
            Vector4::new(0.0, cosa, sina, 0.0),
            Vector4::new(0.0, -sina, cosa, 0.0),
            Vector4::W,
        )
    }

    /// Rotation of `angle` radians around the Y axis.
    pub fn from_y_rotation(angle: f32) -> Self {
        let (sina, cosa) = angle.sin_cos();
        Self::new(
            Vector4::new(cosa, 0.0, -sina, 0.0),
            Vector4::new(0.0, 1.0, 0.0, 0.0),
            Vector4::new(sina, 0.0, cosa, 0.0),
            Vector4::W,
        )
    }

    /// Rotation of `angle` radians around the Z axis.
    pub fn from_z_rotation(angle: f32) -> Self {
        let (sina, cosa) = angle.sin_cos();
        Self::new(
            Vector4::new(cosa, sina, 0.0, 0.0),
            Vector4::new(-sina, cosa, 0.0, 0.0),
            Vector4::new(0.0, 0.0, 1.0, 0.0),
            Vector4::W,
        )
    }

    // ------------------ Embedding ------------------

    /// Embeds a 3x3 rotation block into the upper-left corner.
    pub fn from_mat3(m: &Mat3) -> Self {
        Self::new(
            Vector4::new(m.cols[0].x, m.cols[0].y, m.cols[0].z, 0.0),
            Vector4::new(m.cols[1].x, m.cols[1].y, m.cols[1].z, 0.0),
            Vector4::new(m.cols[2].x, m.cols[2].y, m.cols[2].z, 0.0),
            Vector4::W,
        )
    }

    /// Embeds a 2x2 matrix into the upper-left corner.
    pub fn from_mat2(m: &Mat2) -> Self {
        Self::new(
            Vector4::new(m.cols[0].x, m.cols[0].y, 0.0, 0.0),
            Vector4::new(m.cols[1].x, m.cols[1].y, 0.0, 0.0),
            Vector4::new(0.0, 0.0, 1.0, 0.0),
            Vector4::W,
        )
    }

    /// The rotation block, dropping the fourth row and column.
    pub fn rotation_block(&self) -> Mat3 {
        Mat3::new(self.cols[0].xyz(), self.cols[1].xyz(), self.cols[2].xyz())
    }

    // ------------------ Transforms ------------------

    /// v' = M * v
    pub fn mul_vec4(&self, v: Vector4) -> Vector4 {
        let c = &self.cols;
        Vector4::new(
            c[0].x * v.x + c[1].x * v.y + c[2].x * v.z + c[3].x * v.w,
            c[0].y * v.x + c[1].y * v.y + c[2].y * v.z + c[3].y * v.w,
            c[0].z * v.x + c[1].z * v.y + c[2].z * v.z + c[3].z * v.w,
            c[0].w * v.x + c[1].w * v.y + c[2].w * v.z + c[3].w * v.w,
        )
    }

    /// Transforms a point (w = 1) and projects back by the resulting w.
    /// A near-zero w is replaced with 1 instead of dividing by it.
    pub fn mul_vec3(&self, v: Vector3) -> Vector3 {
        let r = self.mul_vec4(Vector4::from_point(v));
        let w = if float_eq(r.w, 0.0) { 1.0 } else { r.w };
        r.xyz() * (1.0 / w)
    }

    // ------------------ Bridging ------------------

    /// Convert to glam Mat4
    #[inline]
    pub fn to_glam(self) -> GlamMat4 {
        GlamMat4::from_cols(
            self.cols[0].into(),
            self.cols[1].into(),
            self.cols[2].into(),
            self.cols[3].into(),
        )
    }

    /// Create from glam Mat4
    #[inline]
    pub fn from_glam(m: GlamMat4) -> Self {
        Self::new(
            m.x_axis.into(),
            m.y_axis.into(),
            m.z_axis.into(),
            m.w_axis.into(),
        )
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Index<usize> for Mat4 {
    type Output = Vector4;
    fn index(&self, col: usize) -> &Self::Output {
        &self.cols[col]
    }
}

impl IndexMut<usize> for Mat4 {
    fn index_mut(&mut self, col: usize) -> &mut Self::Output {
        &mut self.cols[col]
    }
}

impl From<Mat4> for GlamMat4 {
    #[inline]
    fn from(m: Mat4) -> Self {
        m.to_glam()
    }
}

impl From<GlamMat4> for Mat4 {
    #[inline]
    fn from(m: GlamMat4) -> Self {
        Mat4::from_glam(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs3d::EulerAngles;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn elementary_rotations_match_mat3_in_the_upper_left() {
        for angle in [0.4, -1.7] {
            assert_eq!(
                Mat4::from_x_rotation(angle).rotation_block(),
                Mat3::from_x_rotation(angle)
            );
            assert_eq!(
                Mat4::from_y_rotation(angle).rotation_block(),
                Mat3::from_y_rotation(angle)
            );
            assert_eq!(
                Mat4::from_z_rotation(angle).rotation_block(),
                Mat3::from_z_rotation(angle)
            );
        }
    }

    #[test]
    fn from_mat3_round_trips_through_rotation_block() {
        let m3 = Mat3::from_euler(EulerAngles::new(0.3, -0.8, 1.9));
        let m4 = Mat4::from_mat3(&m3);
        assert_eq!(m4.rotation_block(), m3);
        assert_eq!(m4.cols[3], Vector4::W);
    }

    #[test]
    fn mul_vec3_applies_the_rotation_block() {
        let m = Mat4::from_z_rotation(FRAC_PI_2);
        let v = m.mul_vec3(Vector3::X);
        assert!((v - Vector3::Y).length() < 1e-6);
    }

    #[test]
    fn mul_vec3_guards_a_vanishing_w() {
        // last row zero: transformed w is 0 and must not be divided by
        let mut m = Mat4::from_y_rotation(0.9);
        m[3].w = 0.0;
        let v = Vector3::new(1.0, 2.0, 3.0);
        let direct = m.rotation_block().mul_vec3(v);
        assert!((m.mul_vec3(v) - direct).length() < 1e-6);
    }

    #[test]
    fn trace3_sums_only_the_rotation_diagonal() {
        assert_eq!(Mat4::IDENTITY.trace(), 4.0);
        assert_eq!(Mat4::IDENTITY.trace3(), 3.0);
    }

    #[test]
    fn mat4_serde_round_trips() {
        let m = Mat4::from_x_rotation(0.77);
        let json = serde_json::to_string(&m).expect("serialize");
        let back: Mat4 = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, m);
    }
}
