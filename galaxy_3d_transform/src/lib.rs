/*!
# Galaxy 3D Transform

Scene placement and camera math for the Galaxy 3D engine.

This crate provides the two value types every frame of a right-handed 3D
scene is built from, and derives the 4x4 matrices a rendering backend
uploads as uniforms. Matrices are extracted from a decomposed
representation, so inverses are closed-form instead of generic 4x4
inversion.

## Architecture

- **Affine**: orthonormal basis + position + uniform scale
- **Projection**: explicit frustum, perspective or orthographic
- **Camera**: view Affine + Projection + Viewport, per-frame matrices
- **CameraController**: mouse rotate / pan / wheel mapping onto a Camera

All geometric preconditions (positive scale, non-degenerate look-at,
non-collapsed frustum) are checked at the point of mutation. Violations
return an `Error`, are logged, and leave the receiver unchanged.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod transform;
pub mod camera;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Global services (logger)
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are exported at the crate root by #[macro_export]
    }

    // Transform sub-module
    pub mod transform {
        pub use crate::transform::*;
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Most used types at namespace level
    pub use crate::transform::{Affine, Projection, ProjectionType};
    pub use crate::camera::Camera;
}

// Re-export math library at crate root
pub use glam;
