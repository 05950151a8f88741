use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Index, IndexMut, Mul};

use crate::structs2d::Vector2;

/// A 2x2 matrix stored as two column vectors, the smallest member of the
/// fixed shape set accepted at the matrix conversion boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat2 {
    pub cols: [Vector2; 2],
}

impl Serialize for Mat2 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [
            [self.cols[0].x, self.cols[0].y],
            [self.cols[1].x, self.cols[1].y],
        ]
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Mat2 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let a = <[[f32; 2]; 2]>::deserialize(deserializer)?;
        Ok(Mat2::new(
            Vector2::new(a[0][0], a[0][1]),
            Vector2::new(a[1][0], a[1][1]),
        ))
    }
}

impl Mat2 {
    /// All-zero matrix
    pub const ZERO: Self = Self {
        cols: [Vector2::ZERO, Vector2::ZERO],
    };

    /// Identity matrix
    pub const IDENTITY: Self = Self {
        cols: [Vector2 { x: 1.0, y: 0.0 }, Vector2 { x: 0.0, y: 1.0 }],
    };

    /// Creates a matrix from two column vectors
    pub const fn new(c0: Vector2, c1: Vector2) -> Self {
        Self { cols: [c0, c1] }
    }

    /// Planar rotation of `angle` radians, counter-clockwise. Matches the
    /// upper-left block of the Z-axis rotation builders.
    pub fn from_rotation(angle: f32) -> Self {
        let (sina, cosa) = angle.sin_cos();
        Self::new(Vector2::new(cosa, sina), Vector2::new(-sina, cosa))
    }

    /// Sum of the diagonal
    pub fn trace(&self) -> f32 {
        self.cols[0].x + self.cols[1].y
    }

    /// Rows become columns
    pub fn transposed(&self) -> Self {
        Self::new(
            Vector2::new(self.cols[0].x, self.cols[1].x),
            Vector2::new(self.cols[0].y, self.cols[1].y),
        )
    }

    /// v' = M * v
    pub fn mul_vec2(&self, v: Vector2) -> Vector2 {
        Vector2::new(
            self.cols[0].x * v.x + self.cols[1].x * v.y,
            self.cols[0].y * v.x + self.cols[1].y * v.y,
        )
    }
}

impl Default for Mat2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Index<usize> for Mat2 {
    type Output = Vector2;
    fn index(&self, col: usize) -> &Self::Output {
        &self.cols[col]
    }
}

impl IndexMut<usize> for Mat2 {
    fn index_mut(&mut self, col: usize) -> &mut Self::Output {
        &mut self.cols[col]
    }
}

/// Matrix product: each column of the right factor transformed by the left.
impl Mul for Mat2 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(self.mul_vec2(rhs.cols[0]), self.mul_vec2(rhs.cols[1]))
    }
}
