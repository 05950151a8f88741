//! Conversions between the rotation representations.
//!
//! Pure orchestration over the value types: no state, every function is a
//! deterministic map of its inputs. Quaternion -> matrix is the only
//! singularity-free direction and everything that needs a matrix from a
//! quaternion goes through it; the reverse uses Shepperd's method to stay
//! clear of near-zero square roots.

use crate::error::StructsError;
use crate::structs2d::{Mat2, Vector2};
use crate::structs3d::{EulerAngles, Mat3, Mat4, Quaternion, Vector3};

impl Quaternion {
    /// Builds the quaternion for a yaw/pitch/bank triple.
    ///
    /// Canonicalizes first, then evaluates the closed-form half-angle
    /// product for the bank, pitch, yaw composition order shared with
    /// [`Mat3::from_euler`].
    pub fn from_euler(e: EulerAngles) -> Self {
        let e = e.canonicalized();
        let (sh, ch) = (e.yaw * 0.5).sin_cos();
        let (sp, cp) = (e.pitch * 0.5).sin_cos();
        let (sb, cb) = (e.bank * 0.5).sin_cos();
        Self::new(
            ch * sp * cb + sh * cp * sb,
            sh * cp * cb - ch * sp * sb,
            ch * cp * sb - sh * sp * cb,
            ch * cp * cb + sh * sp * sb,
        )
    }

    /// Extracts the canonical yaw/pitch/bank triple of a unit quaternion,
    /// by converting to a matrix and reusing its pole-aware extraction.
    pub fn to_euler(&self) -> EulerAngles {
        self.to_mat3().to_euler()
    }

    /// The rotation matrix of a unit quaternion (closed form, no
    /// singularities).
    pub fn to_mat3(&self) -> Mat3 {
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);
        Mat3::new(
            Vector3::new(
                1.0 - 2.0 * y * y - 2.0 * z * z,
                2.0 * x * y + 2.0 * w * z,
                2.0 * x * z - 2.0 * w * y,
            ),
            Vector3::new(
                2.0 * x * y - 2.0 * w * z,
                1.0 - 2.0 * x * x - 2.0 * z * z,
                2.0 * y * z + 2.0 * w * x,
            ),
            Vector3::new(
                2.0 * x * z + 2.0 * w * y,
                2.0 * y * z - 2.0 * w * x,
                1.0 - 2.0 * x * x - 2.0 * y * y,
            ),
        )
    }

    /// The rotation block of a 4x4 matrix as a quaternion.
    pub fn from_mat4(m: &Mat4) -> Self {
        Self::from_mat3(&m.rotation_block())
    }

    /// Extracts the quaternion of a pure rotation matrix (Shepperd's method).
    ///
    /// Picks whichever of x, y, z, w has the largest squared value, read off
    /// the diagonal, and takes the one square root that is safely away from
    /// zero; the other three components come from off-diagonal differences
    /// and sums. Ties keep the first candidate in x, y, z, w order. The
    /// result is renormalized to absorb residual floating-point error.
    pub fn from_mat3(m: &Mat3) -> Self {
        let (m00, m11, m22) = (m[0].x, m[1].y, m[2].z);

        let four_x_squared_minus1 = m00 - m11 - m22;
        let four_y_squared_minus1 = m11 - m00 - m22;
        let four_z_squared_minus1 = m22 - m00 - m11;
        let four_w_squared_minus1 = m00 + m11 + m22;

        let mut biggest_index = 0;
        let mut biggest = four_x_squared_minus1;
        if four_y_squared_minus1 > biggest {
            biggest = four_y_squared_minus1;
            biggest_index = 1;
        }
        if four_z_squared_minus1 > biggest {
            biggest = four_z_squared_minus1;
            biggest_index = 2;
        }
        if four_w_squared_minus1 > biggest {
            biggest = four_w_squared_minus1;
            biggest_index = 3;
        }

        let biggest_val = (biggest + 1.0).sqrt() * 0.5;
        let mult = 0.25 / biggest_val;

        let q = match biggest_index {
            0 => Self::new(
                biggest_val,
                (m[0].y + m[1].x) * mult,
                (m[2].x + m[0].z) * mult,
                (m[1].z - m[2].y) * mult,
            ),
            1 => Self::new(
                (m[0].y + m[1].x) * mult,
                biggest_val,
                (m[1].z + m[2].y) * mult,
                (m[2].x - m[0].z) * mult,
            ),
            2 => Self::new(
                (m[2].x + m[0].z) * mult,
                (m[1].z + m[2].y) * mult,
                biggest_val,
                (m[0].y - m[1].x) * mult,
            ),
            _ => Self::new(
                (m[1].z - m[2].y) * mult,
                (m[2].x - m[0].z) * mult,
                (m[0].y - m[1].x) * mult,
                biggest_val,
            ),
        };
        q.normalize()
    }
}

impl EulerAngles {
    /// Shorthand for [`Quaternion::from_euler`]
    pub fn to_quaternion(&self) -> Quaternion {
        Quaternion::from_euler(*self)
    }

    /// Shorthand for [`Mat3::from_euler`]
    pub fn to_mat3(&self) -> Mat3 {
        Mat3::from_euler(*self)
    }
}

/// The closed set of square column-major shapes accepted at conversion
/// boundaries, in place of a duck-typed rows/cols/get interface. A mismatch
/// is an error result, never a process abort.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnyMatrix {
    Mat2(Mat2),
    Mat3(Mat3),
    Mat4(Mat4),
}

impl AnyMatrix {
    pub const fn cols(&self) -> usize {
        match self {
            AnyMatrix::Mat2(_) => 2,
            AnyMatrix::Mat3(_) => 3,
            AnyMatrix::Mat4(_) => 4,
        }
    }

    pub const fn rows(&self) -> usize {
        self.cols()
    }

    const fn mismatch(&self) -> StructsError {
        StructsError::DimensionMismatch {
            cols: self.cols(),
            rows: self.rows(),
        }
    }
}

impl From<Mat2> for AnyMatrix {
    fn from(m: Mat2) -> Self {
        AnyMatrix::Mat2(m)
    }
}

impl From<Mat3> for AnyMatrix {
    fn from(m: Mat3) -> Self {
        AnyMatrix::Mat3(m)
    }
}

impl From<Mat4> for AnyMatrix {
    fn from(m: Mat4) -> Self {
        AnyMatrix::Mat4(m)
    }
}

/// 2x2 from any shape: larger matrices truncate to the upper-left block.
impl TryFrom<AnyMatrix> for Mat2 {
    type Error = StructsError;

    fn try_from(src: AnyMatrix) -> Result<Self, Self::Error> {
        match src {
            AnyMatrix::Mat2(m) => Ok(m),
            AnyMatrix::Mat3(m) => Ok(Mat2::new(
                Vector2::new(m[0].x, m[0].y),
                Vector2::new(m[1].x, m[1].y),
            )),
            AnyMatrix::Mat4(m) => Ok(Mat2::new(
                Vector2::new(m[0].x, m[0].y),
                Vector2::new(m[1].x, m[1].y),
            )),
        }
    }
}

/// 3x3 from a 3x3 or the upper-left block of a 4x4; a 2x2 source is a
/// dimension mismatch (its embedding is [`Mat3::from_mat2`], an explicit
/// choice rather than an implicit widening).
impl TryFrom<AnyMatrix> for Mat3 {
    type Error = StructsError;

    fn try_from(src: AnyMatrix) -> Result<Self, Self::Error> {
        match src {
            AnyMatrix::Mat3(m) => Ok(m),
            AnyMatrix::Mat4(m) => Ok(m.rotation_block()),
            AnyMatrix::Mat2(_) => Err(src.mismatch()),
        }
    }
}

/// 4x4 only from a 4x4; widening a smaller shape is an explicit embedding.
impl TryFrom<AnyMatrix> for Mat4 {
    type Error = StructsError;

    fn try_from(src: AnyMatrix) -> Result<Self, Self::Error> {
        match src {
            AnyMatrix::Mat4(m) => Ok(m),
            AnyMatrix::Mat2(_) | AnyMatrix::Mat3(_) => Err(src.mismatch()),
        }
    }
}
