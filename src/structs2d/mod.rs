pub mod mat2;
pub mod vector2;

pub use mat2::Mat2;
pub use vector2::Vector2;
