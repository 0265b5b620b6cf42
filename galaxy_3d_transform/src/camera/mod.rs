//! Camera module — view transform, lens and input steering.
//!
//! A `Camera` bundles a world-to-camera `Affine`, a `Projection` and the
//! `Viewport` they render into, and derives every per-frame matrix from
//! them. `CameraController` turns mouse input into view mutations.
//! Cameras are plain values owned and driven by the caller.

mod camera;
mod camera_controller;
mod viewport;

pub use camera::{
    Camera, CameraUniform,
    DEFAULT_DISTANCE, DEFAULT_FAR, DEFAULT_FOVY, DEFAULT_NEAR,
};
pub use camera_controller::{CameraController, CameraControllerConfig};
pub use viewport::Viewport;
