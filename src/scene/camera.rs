use glam::{Affine3A, Mat4, Vec3};

/// The camera matrices the global binding phase reads.
///
/// Owned by the external scene; the material only borrows it per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub(crate) world_matrix: Affine3A,
    pub(crate) view_matrix: Mat4,
    pub(crate) projection_matrix: Mat4,
    pub(crate) view_projection_matrix: Mat4,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            world_matrix: Affine3A::IDENTITY,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            view_projection_matrix: Mat4::IDENTITY,
        }
    }
}

impl CameraState {
    /// Perspective camera placed by `world_transform`. `fov` is in degrees.
    #[must_use]
    pub fn perspective(
        world_transform: Affine3A,
        fov: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut camera = Self {
            projection_matrix: Mat4::perspective_rh(fov.to_radians(), aspect, near, far),
            ..Self::default()
        };
        camera.update_view_projection(&world_transform);
        camera
    }

    /// Recomputes view and view-projection after the camera moved.
    pub fn update_view_projection(&mut self, world_transform: &Affine3A) {
        self.world_matrix = *world_transform;
        self.view_matrix = Mat4::from(*world_transform).inverse();
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
    }

    #[inline]
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    #[inline]
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.view_projection_matrix
    }

    /// Camera position in world space.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.world_matrix.translation.into()
    }

    /// Up axis of the view matrix, the base of the rim light direction.
    #[inline]
    #[must_use]
    pub fn view_up(&self) -> Vec3 {
        self.view_matrix.y_axis.truncate()
    }
}
