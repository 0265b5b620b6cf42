/// Camera — a view transform, a lens and the viewport they render into.
///
/// The view is stored directly as the world-to-camera `Affine`, so
/// `view_matrix()` is a plain extraction and the camera's world matrix is
/// the closed-form inverse. Every matrix here is derived on demand from
/// the decomposed state; nothing is cached.

use std::f32::consts::FRAC_PI_4;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use crate::engine_err;
use crate::error::{Error, Result};
use crate::transform::{Affine, Projection};
use super::viewport::Viewport;

const SOURCE: &str = "galaxy3d::Camera";

/// Vertical field of view of `Camera::with_viewport_size`
pub const DEFAULT_FOVY: f32 = FRAC_PI_4;
/// Near plane of `Camera::with_viewport_size`
pub const DEFAULT_NEAR: f32 = 0.1;
/// Far plane of `Camera::with_viewport_size`
pub const DEFAULT_FAR: f32 = 40.0;
/// Distance from the camera to the world origin of `Camera::with_viewport_size`
pub const DEFAULT_DISTANCE: f32 = 2.5;

/// Per-frame camera matrices laid out for direct uniform upload.
///
/// Column-major, 3 x 64 bytes, no padding.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: Mat4,
    pub projection: Mat4,
    pub view_projection: Mat4,
}

impl CameraUniform {
    /// Raw bytes, ready for a buffer update.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// View transform + projection + viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    view: Affine,
    projection: Projection,
    viewport: Viewport,
}

impl Camera {
    /// Create a camera from its parts.
    ///
    /// `view` maps world space to camera space.
    pub fn new(view: Affine, projection: Projection, viewport: Viewport) -> Self {
        Self {
            view,
            projection,
            viewport,
        }
    }

    /// Perspective camera backed off `DEFAULT_DISTANCE` along -Z from the
    /// origin, with its frustum width fitted to the viewport.
    pub fn with_viewport_size(width: u32, height: u32) -> Result<Self> {
        let view = Affine::translation(Vec3::new(0.0, 0.0, -DEFAULT_DISTANCE));
        let projection = Projection::perspective(DEFAULT_FOVY, 1.0, DEFAULT_NEAR, DEFAULT_FAR)?;
        let mut camera = Self::new(view, projection, Viewport::from_size(1, 1));
        camera.resize(width, height)?;
        Ok(camera)
    }

    // ===== GETTERS =====

    /// World-to-camera transform.
    pub fn view(&self) -> &Affine {
        &self.view
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Mutable view, for input handlers steering the camera.
    pub fn view_mut(&mut self) -> &mut Affine {
        &mut self.view
    }

    pub fn projection_mut(&mut self) -> &mut Projection {
        &mut self.projection
    }

    // ===== MATRICES =====

    /// World to camera space.
    pub fn view_matrix(&self) -> Mat4 {
        self.view.extract_transform_matrix()
    }

    /// Camera to world space (the camera's placement in the scene).
    pub fn world_matrix(&self) -> Mat4 {
        self.view.extract_inverse_transform_matrix()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.extract_transform_matrix()
    }

    pub fn inverse_projection_matrix(&self) -> Mat4 {
        self.projection.extract_inverse_transform_matrix()
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Clip space back to world space, from the two closed-form inverses.
    pub fn inverse_view_projection_matrix(&self) -> Mat4 {
        self.world_matrix() * self.inverse_projection_matrix()
    }

    /// Camera position in world space.
    pub fn eye_position(&self) -> Vec3 {
        self.world_matrix().w_axis.truncate()
    }

    /// Snapshot of the matrices for the frame uniform buffer.
    pub fn uniform(&self) -> CameraUniform {
        let view = self.view_matrix();
        let projection = self.projection_matrix();
        CameraUniform {
            view,
            projection,
            view_projection: projection * view,
        }
    }

    // ===== SETTERS =====

    pub fn set_view(&mut self, view: Affine) {
        self.view = view;
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    /// Follow a window resize: full-window viewport, frustum width fitted
    /// to the new aspect ratio (height kept).
    ///
    /// Zero-sized windows (minimized) are rejected and leave the camera
    /// unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(engine_err!(
                SOURCE,
                Error::InvalidViewport(format!("size {}x{} has a zero extent", width, height))
            ));
        }

        let viewport = Viewport::from_size(width, height);
        self.projection.fit_width_to_aspect(viewport.aspect())?;
        self.viewport = viewport;

        crate::engine_debug!(
            SOURCE,
            "Resized to {}x{} (aspect {:.3})",
            width,
            height,
            self.projection.aspect()
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
