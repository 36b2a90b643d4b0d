//! 4x4 Matrix implementation.

use super::Vector3;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A 4x4 matrix stored in column-major order.
/// Used for 3D transformations (model, view, projection matrices).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Matrix4 {
    /// Matrix elements in column-major order.
    /// [m00, m10, m20, m30, m01, m11, m21, m31, m02, m12, m22, m32, m03, m13, m23, m33]
    pub elements: [f32; 16],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Create from column-major array.
    #[inline]
    pub const fn from_cols_array(elements: [f32; 16]) -> Self {
        Self { elements }
    }

    /// Create a translation matrix.
    pub fn from_translation(v: &Vector3) -> Self {
        Self {
            elements: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                v.x, v.y, v.z, 1.0,
            ],
        }
    }

    /// Create a non-uniform scale matrix.
    pub fn from_scale(v: &Vector3) -> Self {
        Self {
            elements: [
                v.x, 0.0, 0.0, 0.0,
                0.0, v.y, 0.0, 0.0,
                0.0, 0.0, v.z, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Create a rotation matrix around the X axis.
    pub fn from_rotation_x(theta: f32) -> Self {
        let (s, c) = theta.sin_cos();
        Self {
            elements: [
                1.0, 0.0, 0.0, 0.0,
                0.0, c, s, 0.0,
                0.0, -s, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Create a rotation matrix around the Y axis.
    pub fn from_rotation_y(theta: f32) -> Self {
        let (s, c) = theta.sin_cos();
        Self {
            elements: [
                c, 0.0, -s, 0.0,
                0.0, 1.0, 0.0, 0.0,
                s, 0.0, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Create a rotation matrix around the Z axis.
    pub fn from_rotation_z(theta: f32) -> Self {
        let (s, c) = theta.sin_cos();
        Self {
            elements: [
                c, s, 0.0, 0.0,
                -s, c, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Create a rotation matrix from Euler angles applied about X, then Y, then Z.
    pub fn from_euler_xyz(angles: &Vector3) -> Self {
        Self::from_rotation_x(angles.x)
            .multiply(&Self::from_rotation_y(angles.y))
            .multiply(&Self::from_rotation_z(angles.z))
    }

    /// Compose a model matrix from a position and Euler XYZ orientation.
    pub fn compose(position: &Vector3, orientation: &Vector3) -> Self {
        Self::from_translation(position).multiply(&Self::from_euler_xyz(orientation))
    }

    /// Create a view matrix (look-at).
    /// Returns the inverse of the camera transform.
    pub fn look_at(eye: &Vector3, target: &Vector3, up: &Vector3) -> Self {
        let f = (*target - *eye).normalized(); // forward
        let r = f.cross(up).normalized(); // right
        let u = r.cross(&f); // up

        // View matrix is inverse of camera matrix
        // For orthonormal basis, inverse = transpose for rotation part
        // Translation is -dot(axis, eye) for each axis
        Self {
            elements: [
                r.x, u.x, -f.x, 0.0,
                r.y, u.y, -f.y, 0.0,
                r.z, u.z, -f.z, 0.0,
                -r.dot(eye), -u.dot(eye), f.dot(eye), 1.0,
            ],
        }
    }

    /// Create a perspective projection matrix.
    /// Uses wgpu/Vulkan depth range (0 to 1).
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let tan_half_fov = (fov_y / 2.0).tan();
        let f = 1.0 / tan_half_fov;

        // wgpu uses 0-1 depth range (not -1 to 1 like OpenGL)
        Self {
            elements: [
                f / aspect, 0.0, 0.0, 0.0,
                0.0, f, 0.0, 0.0,
                0.0, 0.0, far / (near - far), -1.0,
                0.0, 0.0, (near * far) / (near - far), 0.0,
            ],
        }
    }

    /// Multiply this matrix by another.
    pub fn multiply(&self, other: &Matrix4) -> Self {
        let a = &self.elements;
        let b = &other.elements;

        Self {
            elements: [
                a[0] * b[0] + a[4] * b[1] + a[8] * b[2] + a[12] * b[3],
                a[1] * b[0] + a[5] * b[1] + a[9] * b[2] + a[13] * b[3],
                a[2] * b[0] + a[6] * b[1] + a[10] * b[2] + a[14] * b[3],
                a[3] * b[0] + a[7] * b[1] + a[11] * b[2] + a[15] * b[3],

                a[0] * b[4] + a[4] * b[5] + a[8] * b[6] + a[12] * b[7],
                a[1] * b[4] + a[5] * b[5] + a[9] * b[6] + a[13] * b[7],
                a[2] * b[4] + a[6] * b[5] + a[10] * b[6] + a[14] * b[7],
                a[3] * b[4] + a[7] * b[5] + a[11] * b[6] + a[15] * b[7],

                a[0] * b[8] + a[4] * b[9] + a[8] * b[10] + a[12] * b[11],
                a[1] * b[8] + a[5] * b[9] + a[9] * b[10] + a[13] * b[11],
                a[2] * b[8] + a[6] * b[9] + a[10] * b[10] + a[14] * b[11],
                a[3] * b[8] + a[7] * b[9] + a[11] * b[10] + a[15] * b[11],

                a[0] * b[12] + a[4] * b[13] + a[8] * b[14] + a[12] * b[15],
                a[1] * b[12] + a[5] * b[13] + a[9] * b[14] + a[13] * b[15],
                a[2] * b[12] + a[6] * b[13] + a[10] * b[14] + a[14] * b[15],
                a[3] * b[12] + a[7] * b[13] + a[11] * b[14] + a[15] * b[15],
            ],
        }
    }

    /// Transform a Vector3 as a point (with translation and perspective divide).
    pub fn transform_point(&self, v: &Vector3) -> Vector3 {
        let e = &self.elements;
        let w = 1.0 / (e[3] * v.x + e[7] * v.y + e[11] * v.z + e[15]);
        Vector3 {
            x: (e[0] * v.x + e[4] * v.y + e[8] * v.z + e[12]) * w,
            y: (e[1] * v.x + e[5] * v.y + e[9] * v.z + e[13]) * w,
            z: (e[2] * v.x + e[6] * v.y + e[10] * v.z + e[14]) * w,
        }
    }

    /// Check if approximately equal to another matrix.
    pub fn approx_eq(&self, other: &Matrix4, epsilon: f32) -> bool {
        self.elements
            .iter()
            .zip(other.elements.iter())
            .all(|(a, b)| (a - b).abs() < epsilon)
    }

    /// Convert to column-major 2D array (for GPU uniform buffers).
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        let e = &self.elements;
        [
            [e[0], e[1], e[2], e[3]],
            [e[4], e[5], e[6], e[7]],
            [e[8], e[9], e[10], e[11]],
            [e[12], e[13], e[14], e[15]],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_multiply() {
        let m = Matrix4::from_translation(&Vector3::new(1.0, 2.0, 3.0));
        assert!(m.multiply(&Matrix4::IDENTITY).approx_eq(&m, 1e-6));
        assert!(Matrix4::IDENTITY.multiply(&m).approx_eq(&m, 1e-6));
    }

    #[test]
    fn test_translation_transforms_point() {
        let m = Matrix4::from_translation(&Vector3::new(1.0, -2.0, 0.5));
        let p = m.transform_point(&Vector3::ZERO);
        assert!(p.approx_eq(&Vector3::new(1.0, -2.0, 0.5), 1e-6));
    }

    #[test]
    fn test_rotation_z_quarter_turn() {
        let m = Matrix4::from_rotation_z(std::f32::consts::FRAC_PI_2);
        let p = m.transform_point(&Vector3::UNIT_X);
        assert!(p.approx_eq(&Vector3::UNIT_Y, 1e-6));
    }

    #[test]
    fn test_compose_rotates_then_translates() {
        let m = Matrix4::compose(
            &Vector3::new(0.0, 0.0, 10.0),
            &Vector3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2),
        );
        let p = m.transform_point(&Vector3::UNIT_X);
        assert!(p.approx_eq(&Vector3::new(0.0, 1.0, 10.0), 1e-5));
    }

    #[test]
    fn test_perspective_maps_near_plane_to_zero_depth() {
        let m = Matrix4::perspective(75.0f32.to_radians(), 16.0 / 9.0, 0.1, 1000.0);
        let p = m.transform_point(&Vector3::new(0.0, 0.0, -0.1));
        assert!(p.z.abs() < 1e-4);
    }
}
