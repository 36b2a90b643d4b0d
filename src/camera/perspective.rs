//! Perspective camera.

use crate::math::{deg_to_rad, Matrix4, Vector3};

/// Default field of view in degrees.
pub const DEFAULT_FOV: f32 = 75.0;
/// Default near clipping plane.
pub const DEFAULT_NEAR: f32 = 0.1;
/// Default far clipping plane.
pub const DEFAULT_FAR: f32 = 1000.0;
/// Default camera distance from the origin along +Z.
pub const DEFAULT_DISTANCE: f32 = 5.0;

/// A perspective projection camera.
pub struct PerspectiveCamera {
    /// Field of view in degrees.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Camera position.
    pub position: Vector3,
    /// Camera target (look-at point).
    pub target: Vector3,
    /// Up vector.
    pub up: Vector3,
    /// View matrix.
    view_matrix: Matrix4,
    /// Projection matrix.
    projection_matrix: Matrix4,
    /// Combined view-projection matrix.
    view_projection_matrix: Matrix4,
    /// Whether matrices need updating.
    needs_update: bool,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(DEFAULT_FOV, 1.0, DEFAULT_NEAR, DEFAULT_FAR)
    }
}

impl PerspectiveCamera {
    /// Create a new perspective camera looking at the origin from
    /// (0, 0, [`DEFAULT_DISTANCE`]).
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            position: Vector3::new(0.0, 0.0, DEFAULT_DISTANCE),
            target: Vector3::ZERO,
            up: Vector3::UP,
            view_matrix: Matrix4::IDENTITY,
            projection_matrix: Matrix4::IDENTITY,
            view_projection_matrix: Matrix4::IDENTITY,
            needs_update: true,
        };
        camera.update_matrices();
        camera
    }

    /// Set the aspect ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.needs_update = true;
    }

    /// Get the view matrix.
    pub fn view_matrix(&mut self) -> &Matrix4 {
        if self.needs_update {
            self.update_matrices();
        }
        &self.view_matrix
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&mut self) -> &Matrix4 {
        if self.needs_update {
            self.update_matrices();
        }
        &self.projection_matrix
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&mut self) -> &Matrix4 {
        if self.needs_update {
            self.update_matrices();
        }
        &self.view_projection_matrix
    }

    /// Recompute all matrices from the current parameters.
    pub fn update_matrices(&mut self) {
        self.view_matrix = Matrix4::look_at(&self.position, &self.target, &self.up);
        self.projection_matrix =
            Matrix4::perspective(deg_to_rad(self.fov), self.aspect, self.near, self.far);
        self.view_projection_matrix = self.projection_matrix.multiply(&self.view_matrix);
        self.needs_update = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let camera = PerspectiveCamera::default();
        assert_eq!(camera.fov, 75.0);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 1000.0);
        assert_eq!(camera.position.z, 5.0);
    }

    #[test]
    fn test_set_aspect_recomputes_projection() {
        let mut camera = PerspectiveCamera::default();
        let before = *camera.projection_matrix();
        camera.set_aspect(2.0);
        let after = *camera.projection_matrix();
        assert!(!before.approx_eq(&after, 1e-9));
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn test_view_projection_maps_origin_in_front() {
        let mut camera = PerspectiveCamera::new(75.0, 16.0 / 9.0, 0.1, 1000.0);
        let p = camera.view_projection_matrix().transform_point(&crate::math::Vector3::ZERO);
        // The origin sits 5 units in front of the camera, within the frustum.
        assert!(p.z > 0.0 && p.z < 1.0);
        assert!(p.x.abs() < 1e-5 && p.y.abs() < 1e-5);
    }
}
