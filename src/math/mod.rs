//! # Math Module
//!
//! 3D mathematics for the drift field: vectors, matrices, and colors.

mod color;
mod matrix4;
mod vector3;

pub use color::Color;
pub use matrix4::Matrix4;
pub use vector3::Vector3;

/// Common math constants.
pub mod consts {
    /// Pi constant.
    pub const PI: f32 = std::f32::consts::PI;
    /// Degrees to radians conversion factor.
    pub const DEG2RAD: f32 = PI / 180.0;
    /// Small epsilon for floating point comparisons.
    pub const EPSILON: f32 = 1e-6;
}

/// Convert degrees to radians.
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * consts::DEG2RAD
}
