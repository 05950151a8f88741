pub mod axis_angle;
pub mod euler;
pub mod mat3;
pub mod mat4;
pub mod quaternion;
pub mod vector3;
pub mod vector4;

pub use axis_angle::AxisAngle;
pub use euler::{EulerAngles, GIMBAL_LOCK_ZONE};
pub use mat3::Mat3;
pub use mat4::Mat4;
pub use quaternion::Quaternion;
pub use vector3::Vector3;
pub use vector4::Vector4;
