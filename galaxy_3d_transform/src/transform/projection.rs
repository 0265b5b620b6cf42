/// Projection — perspective or orthographic camera lens.
///
/// Stored as an explicit frustum (`left`, `right`, `bottom`, `top`,
/// `near`, `far`) in camera space plus a type tag. Matrices follow the
/// OpenGL conventions: right-handed camera space looking down -Z, clip
/// space z in [-1, 1].
///
/// Invariants held by every public entry point:
/// - all six bounds are finite
/// - `right > left`, `top > bottom`, `far > near`
/// - `near > 0` and normal for `Perspective` (orthographic `near` may be <= 0)
/// - width, height and depth are normal floats, and both extracted
///   matrices are finite
///
/// Setters validate the resulting frustum and leave the projection
/// unchanged when it would break an invariant.

use glam::{Mat4, Vec4};
use crate::engine_err;
use crate::error::{Error, Result};

const SOURCE: &str = "galaxy3d::Projection";

/// Projection kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectionType {
    /// Off-center perspective frustum
    Perspective,
    /// Parallel projection of an axis-aligned box
    Orthographic,
}

/// Camera projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
    projection_type: ProjectionType,
}

impl Projection {
    /// Check every invariant, without logging.
    fn check(&self) -> Result<()> {
        let bounds = [self.left, self.right, self.bottom, self.top, self.near, self.far];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(Error::InvalidFrustum(format!(
                "bounds must be finite: {:?}",
                bounds
            )));
        }
        if self.projection_type == ProjectionType::Perspective
            && !(self.near > 0.0 && self.near.is_normal())
        {
            return Err(Error::InvalidFrustum(format!(
                "perspective near ({}) must be a normal float greater than 0",
                self.near
            )));
        }
        if self.far <= self.near {
            return Err(Error::InvalidFrustum(format!(
                "far ({}) must be greater than near ({})",
                self.far, self.near
            )));
        }
        if self.right <= self.left {
            return Err(Error::InvalidFrustum(format!(
                "right ({}) must be greater than left ({})",
                self.right, self.left
            )));
        }
        if self.top <= self.bottom {
            return Err(Error::InvalidFrustum(format!(
                "top ({}) must be greater than bottom ({})",
                self.top, self.bottom
            )));
        }
        let extents = [("width", self.width()), ("height", self.height()), ("depth", self.depth())];
        if let Some((name, extent)) = extents.iter().find(|(_, extent)| !extent.is_normal()) {
            return Err(Error::InvalidFrustum(format!(
                "{} ({}) is not representable as a normal float",
                name, extent
            )));
        }
        if !self.extract_transform_matrix().is_finite()
            || !self.extract_inverse_transform_matrix().is_finite()
        {
            return Err(Error::InvalidFrustum(format!(
                "bounds {:?} overflow the projection matrix",
                bounds
            )));
        }
        Ok(())
    }

    fn validated(self) -> Result<Self> {
        match self.check() {
            Ok(()) => Ok(self),
            Err(error) => Err(engine_err!(SOURCE, error)),
        }
    }

    /// Replace `self` with `candidate` only if it is valid.
    fn apply(&mut self, candidate: Projection) -> Result<()> {
        *self = candidate.validated()?;
        Ok(())
    }

    fn check_aspect(aspect: f32) -> Result<()> {
        if aspect.is_finite() && aspect > 0.0 {
            Ok(())
        } else {
            Err(engine_err!(SOURCE, Error::InvalidAspect(aspect)))
        }
    }

    // ===== FACTORIES =====

    /// Orthographic box.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Result<Self> {
        Projection {
            left,
            right,
            bottom,
            top,
            near,
            far,
            projection_type: ProjectionType::Orthographic,
        }
        .validated()
    }

    /// Symmetric perspective frustum from a vertical field of view.
    ///
    /// `top = near * tan(fovy / 2)`, `right = top * aspect`, mirrored for
    /// `bottom` and `left`.
    pub fn perspective(fovy_radians: f32, aspect: f32, near: f32, far: f32) -> Result<Self> {
        if !(fovy_radians > 0.0 && fovy_radians < std::f32::consts::PI) {
            return Err(engine_err!(SOURCE, Error::InvalidFieldOfView(fovy_radians)));
        }
        Self::check_aspect(aspect)?;

        let top = near * (fovy_radians * 0.5).tan();
        let right = top * aspect;
        Self::frustum(-right, right, -top, top, near, far)
    }

    /// Off-center perspective frustum given by its near-plane bounds.
    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Result<Self> {
        Projection {
            left,
            right,
            bottom,
            top,
            near,
            far,
            projection_type: ProjectionType::Perspective,
        }
        .validated()
    }

    // ===== MANIPULATION =====

    /// Keep the width, recompute `bottom`/`top` so that `aspect()` equals
    /// `aspect`. The vertical center is preserved.
    pub fn fit_height_to_aspect(&mut self, aspect: f32) -> Result<()> {
        Self::check_aspect(aspect)?;
        let half_height = 0.5 * self.width() / aspect;
        let center = 0.5 * (self.bottom + self.top);
        self.apply(Projection {
            bottom: center - half_height,
            top: center + half_height,
            ..*self
        })
    }

    /// Keep the height, recompute `left`/`right` so that `aspect()` equals
    /// `aspect`. The horizontal center is preserved.
    pub fn fit_width_to_aspect(&mut self, aspect: f32) -> Result<()> {
        Self::check_aspect(aspect)?;
        let half_width = 0.5 * self.height() * aspect;
        let center = 0.5 * (self.left + self.right);
        self.apply(Projection {
            left: center - half_width,
            right: center + half_width,
            ..*self
        })
    }

    // ===== MATRIX EXTRACTION =====

    /// Camera space to clip space.
    pub fn extract_transform_matrix(&self) -> Mat4 {
        let (l, r, b, t, n, f) = (self.left, self.right, self.bottom, self.top, self.near, self.far);
        let (w, h, d) = (r - l, t - b, f - n);

        match self.projection_type {
            ProjectionType::Perspective => Mat4::from_cols(
                Vec4::new(2.0 * n / w, 0.0, 0.0, 0.0),
                Vec4::new(0.0, 2.0 * n / h, 0.0, 0.0),
                Vec4::new((r + l) / w, (t + b) / h, -(f + n) / d, -1.0),
                Vec4::new(0.0, 0.0, -2.0 * f * n / d, 0.0),
            ),
            ProjectionType::Orthographic => Mat4::from_cols(
                Vec4::new(2.0 / w, 0.0, 0.0, 0.0),
                Vec4::new(0.0, 2.0 / h, 0.0, 0.0),
                Vec4::new(0.0, 0.0, -2.0 / d, 0.0),
                Vec4::new(-(r + l) / w, -(t + b) / h, -(f + n) / d, 1.0),
            ),
        }
    }

    /// Clip space to camera space, closed form of each formula.
    pub fn extract_inverse_transform_matrix(&self) -> Mat4 {
        let (l, r, b, t, n, f) = (self.left, self.right, self.bottom, self.top, self.near, self.far);
        let (w, h, d) = (r - l, t - b, f - n);

        match self.projection_type {
            ProjectionType::Perspective => {
                let two_fn = 2.0 * f * n;
                Mat4::from_cols(
                    Vec4::new(w / (2.0 * n), 0.0, 0.0, 0.0),
                    Vec4::new(0.0, h / (2.0 * n), 0.0, 0.0),
                    Vec4::new(0.0, 0.0, 0.0, -d / two_fn),
                    Vec4::new((r + l) / (2.0 * n), (t + b) / (2.0 * n), -1.0, (f + n) / two_fn),
                )
            }
            ProjectionType::Orthographic => Mat4::from_cols(
                Vec4::new(0.5 * w, 0.0, 0.0, 0.0),
                Vec4::new(0.0, 0.5 * h, 0.0, 0.0),
                Vec4::new(0.0, 0.0, -0.5 * d, 0.0),
                Vec4::new(0.5 * (r + l), 0.5 * (t + b), -0.5 * (f + n), 1.0),
            ),
        }
    }

    // ===== QUERIES =====

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    pub fn depth(&self) -> f32 {
        self.far - self.near
    }

    /// Width over height of the near-plane cross-section.
    pub fn aspect(&self) -> f32 {
        self.width() / self.height()
    }

    pub fn is_perspective(&self) -> bool {
        self.projection_type == ProjectionType::Perspective
    }

    pub fn is_orthographic(&self) -> bool {
        self.projection_type == ProjectionType::Orthographic
    }

    // ===== MUTATORS =====

    pub fn set_left(&mut self, left: f32) -> Result<()> {
        self.apply(Projection { left, ..*self })
    }

    pub fn set_right(&mut self, right: f32) -> Result<()> {
        self.apply(Projection { right, ..*self })
    }

    pub fn set_bottom(&mut self, bottom: f32) -> Result<()> {
        self.apply(Projection { bottom, ..*self })
    }

    pub fn set_top(&mut self, top: f32) -> Result<()> {
        self.apply(Projection { top, ..*self })
    }

    pub fn set_near(&mut self, near: f32) -> Result<()> {
        self.apply(Projection { near, ..*self })
    }

    pub fn set_far(&mut self, far: f32) -> Result<()> {
        self.apply(Projection { far, ..*self })
    }

    /// Switch between perspective and orthographic.
    ///
    /// Switching to `Perspective` fails if `near <= 0`.
    pub fn set_type(&mut self, projection_type: ProjectionType) -> Result<()> {
        self.apply(Projection { projection_type, ..*self })
    }

    // ===== ACCESSORS =====

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn right(&self) -> f32 {
        self.right
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn projection_type(&self) -> ProjectionType {
        self.projection_type
    }
}

#[cfg(test)]
#[path = "projection_tests.rs"]
mod tests;
