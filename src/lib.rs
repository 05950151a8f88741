pub mod convert;
pub mod error;
pub mod math_util;
pub mod structs2d;
pub mod structs3d;

pub use convert::AnyMatrix;
pub use error::{Result, StructsError};
pub use structs2d::*;
pub use structs3d::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn representations_agree_on_a_full_pipeline() {
        // author in Euler, convert to quaternion, interpolate, extract back
        let start = EulerAngles::new(0.2, 0.1, 0.0).to_quaternion();
        let end = EulerAngles::new(1.4, 0.5, 0.0).to_quaternion();

        let mid = Quaternion::slerp_shortest(start, end, 0.5);
        let e = mid.to_euler();
        assert!(e.yaw > 0.2 && e.yaw < 1.4);
        assert!(e.pitch > 0.1 && e.pitch < 0.5);

        // and the matrix path sees the same rotation
        let m = mid.to_mat3();
        let v = Vector3::new(0.0, 0.0, 1.0);
        assert!((m.mul_vec3(v) - mid.rotate_vec3(v)).length() < 1e-5);
    }

    #[test]
    fn elementary_builders_agree_across_representations() {
        let angle = FRAC_PI_2 * 0.6;
        let from_quat = Quaternion::from_y_rotation(angle).to_mat3();
        let direct = Mat3::from_y_rotation(angle);
        for col in 0..3 {
            assert!((from_quat[col] - direct[col]).length() < 1e-6);
        }
    }
}
