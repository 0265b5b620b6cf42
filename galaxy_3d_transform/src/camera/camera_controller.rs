/// CameraController — mouse-driven steering of a `Camera`.
///
/// Maps raw input deltas onto the view transform:
/// - rotate drag: pitch about the world X axis, then yaw about the view's
///   own Y axis, so the horizon stays level
/// - pan drag: slide the view in the screen plane
/// - wheel: dolly along the world Z axis
///
/// The controller only tracks which drag mode is active. Deltas arrive
/// already measured by the windowing layer (pixels and seconds).

use glam::Vec3;
use crate::engine_err;
use crate::error::{Error, Result};
use super::camera::Camera;

const SOURCE: &str = "galaxy3d::CameraController";

/// Controller tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraControllerConfig {
    /// Radians per pixel per second of rotate drag
    pub rotate_speed: f32,
    /// World units per pixel per second of pan drag
    pub pan_speed: f32,
    /// World units per wheel notch
    pub zoom_step: f32,
}

impl Default for CameraControllerConfig {
    fn default() -> Self {
        Self {
            rotate_speed: 5.0,
            pan_speed: 2.0,
            zoom_step: 0.15,
        }
    }
}

impl CameraControllerConfig {
    /// Every speed must be finite and > 0.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("rotate_speed", self.rotate_speed),
            ("pan_speed", self.pan_speed),
            ("zoom_step", self.zoom_step),
        ];
        for (name, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(engine_err!(
                    SOURCE,
                    Error::InvalidConfig(format!("{} must be finite and > 0, got {}", name, value))
                ));
            }
        }
        Ok(())
    }
}

/// Orbit/pan/zoom input mapping.
#[derive(Debug, Clone)]
pub struct CameraController {
    config: CameraControllerConfig,
    rotating: bool,
    panning: bool,
}

impl CameraController {
    /// Create a controller from a validated configuration.
    pub fn new(config: CameraControllerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rotating: false,
            panning: false,
        })
    }

    pub fn config(&self) -> &CameraControllerConfig {
        &self.config
    }

    // ===== DRAG STATE =====

    /// Rotate button pressed / released.
    pub fn set_rotating(&mut self, rotating: bool) {
        self.rotating = rotating;
    }

    /// Pan button pressed / released.
    pub fn set_panning(&mut self, panning: bool) {
        self.panning = panning;
    }

    pub fn is_rotating(&self) -> bool {
        self.rotating
    }

    pub fn is_panning(&self) -> bool {
        self.panning
    }

    // ===== INPUT =====

    /// Apply a mouse move of (`dx`, `dy`) pixels, `delta_seconds` after the
    /// previous frame. Screen Y grows downward.
    pub fn mouse_moved(&self, camera: &mut Camera, dx: f32, dy: f32, delta_seconds: f32) {
        let view = camera.view_mut();

        if self.rotating {
            view.rotate_about_world_x(self.config.rotate_speed * dy * delta_seconds);
            view.rotate_about_local_y(self.config.rotate_speed * dx * delta_seconds);
        }
        if self.panning {
            view.translate_world(
                delta_seconds * Vec3::new(self.config.pan_speed * dx, -self.config.pan_speed * dy, 0.0),
            );
        }

        if self.rotating || self.panning {
            crate::engine_trace!(
                SOURCE,
                "Mouse moved ({}, {}), view position {}",
                dx,
                dy,
                view.position()
            );
        }
    }

    /// Apply wheel notches. Positive `direction` moves the scene toward
    /// the viewer.
    pub fn wheel(&self, camera: &mut Camera, direction: f32) {
        camera
            .view_mut()
            .translate_world(Vec3::new(0.0, 0.0, direction * self.config.zoom_step));
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            config: CameraControllerConfig::default(),
            rotating: false,
            panning: false,
        }
    }
}

#[cfg(test)]
#[path = "camera_controller_tests.rs"]
mod tests;
