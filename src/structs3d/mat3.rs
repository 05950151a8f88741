use glam::Mat3 as GlamMat3;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::f32::consts::FRAC_PI_2;
use std::ops::{Index, IndexMut, Mul};

use crate::structs2d::Mat2;
use crate::structs3d::{EulerAngles, Vector3};

/// A 3x3 matrix stored as three column vectors.
///
/// A pure rotation has orthonormal columns and determinant +1; the type does
/// not enforce that, it is up to the builders and callers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat3 {
    pub cols: [Vector3; 3],
}

impl Serialize for Mat3 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [
            [self.cols[0].x, self.cols[0].y, self.cols[0].z],
            [self.cols[1].x, self.cols[1].y, self.cols[1].z],
            [self.cols[2].x, self.cols[2].y, self.cols[2].z],
        ]
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Mat3 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let a = <[[f32; 3]; 3]>::deserialize(deserializer)?;
        Ok(Mat3::new(
            Vector3::new(a[0][0], a[0][1], a[0][2]),
            Vector3::new(a[1][0], a[1][1], a[1][2]),
            Vector3::new(a[2][0], a[2][1], a[2][2]),
        ))
    }
}

impl Mat3 {
    /// All-zero matrix
    pub const ZERO: Self = Self {
        cols: [Vector3::ZERO, Vector3::ZERO, Vector3::ZERO],
    };

    /// Identity matrix
    pub const IDENTITY: Self = Self {
        cols: [Vector3::X, Vector3::Y, Vector3::Z],
    };

    /// Creates a matrix from three column vectors
    pub const fn new(c0: Vector3, c1: Vector3, c2: Vector3) -> Self {
        Self { cols: [c0, c1, c2] }
    }

    /// Entry at (column, row)
    pub const fn get(&self, col: usize, row: usize) -> f32 {
        let c = &self.cols[col];
        match row {
            0 => c.x,
            1 => c.y,
            2 => c.z,
            _ => panic!("row out of range"),
        }
    }

    /// Sum of the diagonal
    pub fn trace(&self) -> f32 {
        self.cols[0].x + self.cols[1].y + self.cols[2].z
    }

    /// Rows become columns. For a pure rotation this is the inverse.
    pub fn transposed(&self) -> Self {
        Self::new(
            Vector3::new(self.cols[0].x, self.cols[1].x, self.cols[2].x),
            Vector3::new(self.cols[0].y, self.cols[1].y, self.cols[2].y),
            Vector3::new(self.cols[0].z, self.cols[1].z, self.cols[2].z),
        )
    }

    /// v' = M * v
    pub fn mul_vec3(&self, v: Vector3) -> Vector3 {
        Vector3::new(
            self.cols[0].x * v.x + self.cols[1].x * v.y + self.cols[2].x * v.z,
            self.cols[0].y * v.x + self.cols[1].y * v.y + self.cols[2].y * v.z,
            self.cols[0].z * v.x + self.cols[1].z * v.y + self.cols[2].z * v.z,
        )
    }

    // ------------------ Rotation builders ------------------

    /// Rotation of `angle` radians around the X axis.
    ///
    /// Sign convention, fixed for this library: col1 = (0, cos, sin),
    /// col2 = (0, -sin, cos).
    pub fn from_x_rotation(angle: f32) -> Self {
        let (sina, cosa) = angle.sin_cos();
        Self::new(
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, cosa, sina),
            Vector3::new(0.0, -sina, cosa),
        )
    }

    /// Rotation of `angle` radians around the Y axis.
    pub fn from_y_rotation(angle: f32) -> Self {
        let (sina, cosa) = angle.sin_cos();
        Self::new(
            Vector3::new(cosa, 0.0, -sina),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(sina, 0.0, cosa),
        )
    }

    /// Rotation of `angle` radians around the Z axis.
    pub fn from_z_rotation(angle: f32) -> Self {
        let (sina, cosa) = angle.sin_cos();
        Self::new(
            Vector3::new(cosa, sina, 0.0),
            Vector3::new(-sina, cosa, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        )
    }

    /// Builds the rotation matrix for a yaw/pitch/bank triple.
    ///
    /// The input is canonicalized first. Composition order is bank, then
    /// pitch, then yaw (object-space Z, X, Y under this library's column
    /// convention); the order and signs are a deliberate fixed choice that
    /// downstream composition depends on.
    pub fn from_euler(e: EulerAngles) -> Self {
        let e = e.canonicalized();
        let (sy, cy) = e.yaw.sin_cos();
        let (sp, cp) = e.pitch.sin_cos();
        let (sb, cb) = e.bank.sin_cos();
        Self::new(
            Vector3::new(cy * cb + sy * sp * sb, sb * cp, -sy * cb + cy * sp * sb),
            Vector3::new(-cy * sb + sy * sp * cb, cb * cp, sy * sb + cy * sp * cb),
            Vector3::new(sy * cp, -sp, cy * cp),
        )
    }

    /// Extracts the canonical yaw/pitch/bank triple of a pure rotation.
    ///
    /// Branches three ways on sp = -m[2][1]. Within 0.001 of |sp| = 1 the
    /// matrix is looking straight up or down: pitch snaps to the pole, bank
    /// is zero by convention, and yaw absorbs the remaining rotation, read
    /// from a different pair of entries than the regular case.
    pub fn to_euler(&self) -> EulerAngles {
        let sp = -self.cols[2].y;
        if sp > 0.999 {
            // north pole
            EulerAngles::new(self.cols[1].x.atan2(self.cols[0].x), FRAC_PI_2, 0.0)
        } else if sp < -0.999 {
            // south pole
            EulerAngles::new((-self.cols[1].x).atan2(self.cols[0].x), -FRAC_PI_2, 0.0)
        } else {
            EulerAngles::new(
                self.cols[2].x.atan2(self.cols[2].z),
                sp.asin(),
                self.cols[0].y.atan2(self.cols[1].y),
            )
        }
    }

    // ------------------ Embedding ------------------

    /// Embeds a 2x2 matrix into the upper-left corner, reading the supplied
    /// argument column for column.
    pub fn from_mat2(m: &Mat2) -> Self {
        Self::new(
            Vector3::new(m.cols[0].x, m.cols[0].y, 0.0),
            Vector3::new(m.cols[1].x, m.cols[1].y, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        )
    }

    // ------------------ Bridging ------------------

    /// Convert to glam Mat3
    #[inline]
    pub fn to_glam(self) -> GlamMat3 {
        GlamMat3::from_cols(
            self.cols[0].into(),
            self.cols[1].into(),
            self.cols[2].into(),
        )
    }

    /// Create from glam Mat3
    #[inline]
    pub fn from_glam(m: GlamMat3) -> Self {
        Self::new(m.x_axis.into(), m.y_axis.into(), m.z_axis.into())
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Index<usize> for Mat3 {
    type Output = Vector3;
    fn index(&self, col: usize) -> &Self::Output {
        &self.cols[col]
    }
}

impl IndexMut<usize> for Mat3 {
    fn index_mut(&mut self, col: usize) -> &mut Self::Output {
        &mut self.cols[col]
    }
}

/// Matrix product: each column of the right factor transformed by the left.
impl Mul for Mat3 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(
            self.mul_vec3(rhs.cols[0]),
            self.mul_vec3(rhs.cols[1]),
            self.mul_vec3(rhs.cols[2]),
        )
    }
}

impl From<Mat3> for GlamMat3 {
    #[inline]
    fn from(m: Mat3) -> Self {
        m.to_glam()
    }
}

impl From<GlamMat3> for Mat3 {
    #[inline]
    fn from(m: GlamMat3) -> Self {
        Mat3::from_glam(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn assert_mat_eq(a: &Mat3, b: &Mat3, eps: f32) {
        for col in 0..3 {
            for row in 0..3 {
                assert!(
                    (a.get(col, row) - b.get(col, row)).abs() < eps,
                    "entry ({col},{row}): {} != {}",
                    a.get(col, row),
                    b.get(col, row)
                );
            }
        }
    }

    fn assert_euler_eq(a: EulerAngles, b: EulerAngles, eps: f32) {
        assert!(
            (a.yaw - b.yaw).abs() < eps
                && (a.pitch - b.pitch).abs() < eps
                && (a.bank - b.bank).abs() < eps,
            "{a} != {b}"
        );
    }

    #[test]
    fn x_rotation_follows_fixed_sign_convention() {
        let m = Mat3::from_x_rotation(0.5);
        let (s, c) = 0.5f32.sin_cos();
        assert_eq!(m.cols[0], Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(m.cols[1], Vector3::new(0.0, c, s));
        assert_eq!(m.cols[2], Vector3::new(0.0, -s, c));
    }

    #[test]
    fn zero_angle_rotations_are_identity() {
        assert_eq!(Mat3::from_x_rotation(0.0), Mat3::IDENTITY);
        assert_eq!(Mat3::from_y_rotation(0.0), Mat3::IDENTITY);
        assert_eq!(Mat3::from_z_rotation(0.0), Mat3::IDENTITY);
    }

    #[test]
    fn elementary_rotations_agree_with_glam() {
        for angle in [0.3, -1.2, 2.8] {
            assert_mat_eq(
                &Mat3::from_y_rotation(angle),
                &GlamMat3::from_rotation_y(angle).into(),
                1e-6,
            );
            assert_mat_eq(
                &Mat3::from_z_rotation(angle),
                &GlamMat3::from_rotation_z(angle).into(),
                1e-6,
            );
        }
    }

    #[test]
    fn product_composes_same_axis_rotations() {
        let m = Mat3::from_z_rotation(0.4) * Mat3::from_z_rotation(0.3);
        assert_mat_eq(&m, &Mat3::from_z_rotation(0.7), 1e-6);
    }

    #[test]
    fn transpose_inverts_a_pure_rotation() {
        let m = Mat3::from_euler(EulerAngles::new(0.7, 0.4, -1.1));
        let id = m * m.transposed();
        assert_mat_eq(&id, &Mat3::IDENTITY, 1e-5);
    }

    #[test]
    fn mul_vec3_rotates_basis_vectors() {
        let m = Mat3::from_z_rotation(FRAC_PI_2);
        let v = m.mul_vec3(Vector3::X);
        assert!((v - Vector3::Y).length() < 1e-6);
    }

    #[test]
    fn from_euler_of_single_axes_matches_elementary_builders() {
        assert_mat_eq(
            &Mat3::from_euler(EulerAngles::new(0.8, 0.0, 0.0)),
            &Mat3::from_y_rotation(0.8),
            1e-6,
        );
        assert_mat_eq(
            &Mat3::from_euler(EulerAngles::new(0.0, 0.8, 0.0)),
            &Mat3::from_x_rotation(0.8),
            1e-6,
        );
        assert_mat_eq(
            &Mat3::from_euler(EulerAngles::new(0.0, 0.0, 0.8)),
            &Mat3::from_z_rotation(0.8),
            1e-6,
        );
    }

    #[test]
    fn from_euler_composes_bank_pitch_yaw() {
        let e = EulerAngles::new(0.6, -0.4, 1.3);
        let composed = Mat3::from_y_rotation(e.yaw)
            * Mat3::from_x_rotation(e.pitch)
            * Mat3::from_z_rotation(e.bank);
        assert_mat_eq(&Mat3::from_euler(e), &composed, 1e-6);
    }

    #[test]
    fn euler_round_trip_reproduces_the_matrix() {
        // Away from the poles: extract then rebuild gives the same matrix.
        // Angle equality is not promised, matrix equality is.
        for e in [
            EulerAngles::new(0.3, 0.2, 0.1),
            EulerAngles::new(-2.9, 1.3, 3.0),
            EulerAngles::new(1.0, -1.4, -2.0),
        ] {
            let m = Mat3::from_euler(e);
            let rebuilt = Mat3::from_euler(m.to_euler());
            assert_mat_eq(&m, &rebuilt, 1e-5);
        }
    }

    #[test]
    fn extraction_regular_branch_recovers_canonical_angles() {
        let e = EulerAngles::new(0.5, 0.9, -2.2);
        let out = Mat3::from_euler(e).to_euler();
        assert_euler_eq(out, e, 1e-5);
    }

    #[test]
    fn extraction_north_pole_branch_reads_yaw_from_first_columns() {
        let m = Mat3::from_euler(EulerAngles::new(0.7, FRAC_PI_2, 0.0));
        let e = m.to_euler();
        assert!((e.pitch - FRAC_PI_2).abs() < 1e-6);
        assert_eq!(e.bank, 0.0);
        assert!((e.yaw - 0.7).abs() < 1e-5);
    }

    #[test]
    fn extraction_south_pole_branch_negates_the_sine_entry() {
        let m = Mat3::from_euler(EulerAngles::new(-0.9, -FRAC_PI_2, 0.0));
        let e = m.to_euler();
        assert!((e.pitch + FRAC_PI_2).abs() < 1e-6);
        assert_eq!(e.bank, 0.0);
        assert!((e.yaw + 0.9).abs() < 1e-5);
    }

    #[test]
    fn near_pole_band_snaps_to_the_pole() {
        // |sp| just over the 0.999 pole threshold: pitch snaps to pi/2 and
        // the rebuilt matrix is only close, not equal. Exact round-tripping
        // is promised strictly outside the lock neighborhood.
        let e = EulerAngles::new(1.2, FRAC_PI_2 - 0.02, 0.0);
        let m = Mat3::from_euler(e);
        let out = m.to_euler();
        assert!((out.pitch - FRAC_PI_2).abs() < 1e-6);
        assert_eq!(out.bank, 0.0);
        let rebuilt = Mat3::from_euler(out);
        assert_mat_eq(&m, &rebuilt, 5e-2);
    }

    #[test]
    fn from_mat2_embeds_upper_left_and_pads_identity() {
        let m2 = Mat2::from_rotation(0.6);
        let m3 = Mat3::from_mat2(&m2);
        assert_mat_eq(&m3, &Mat3::from_z_rotation(0.6), 1e-6);
        assert_eq!(m3.cols[2], Vector3::Z);
    }

    #[test]
    fn serializes_as_nested_column_arrays() {
        let m = Mat3::IDENTITY;
        let json = serde_json::to_string(&m).expect("serialize");
        assert_eq!(json, "[[1.0,0.0,0.0],[0.0,1.0,0.0],[0.0,0.0,1.0]]");
        let back: Mat3 = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, m);
    }

    #[test]
    fn wrapped_input_angles_reach_the_same_matrix() {
        let m1 = Mat3::from_euler(EulerAngles::new(0.4 + 2.0 * PI, 0.2, -0.3));
        let m2 = Mat3::from_euler(EulerAngles::new(0.4, 0.2, -0.3));
        assert_mat_eq(&m1, &m2, 1e-5);
    }
}
