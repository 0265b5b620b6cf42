/// Affine — rotation, uniform scale and translation in a right-handed frame.
///
/// Stored decomposed: an orthonormal basis (columns are the local X/Y/Z
/// axes in world space), a position and a single positive scale. The
/// decomposition is what lets `extract_inverse_transform_matrix()` use a
/// transpose instead of a general 4x4 inversion.
///
/// Invariants held by every public entry point:
/// - the basis columns are orthonormal within `ORTHONORMAL_TOLERANCE`
/// - `scale` is a normal, strictly positive float whose reciprocal is finite
///
/// Rejected operations return an `Error`, log it, and leave the value
/// unchanged.

use glam::{Mat3, Mat4, Vec3};
use crate::engine_err;
use crate::error::{Error, Result};
use super::basis;

const SOURCE: &str = "galaxy3d::Affine";

/// Absolute per-component tolerance used by `PartialEq`.
pub const EQUALITY_TOLERANCE: f32 = 1e-5;

/// How far a rotation axis may deviate from unit length.
pub const UNIT_LENGTH_TOLERANCE: f32 = 1e-3;

/// Rigid transform with uniform scale.
#[derive(Debug, Clone, Copy)]
pub struct Affine {
    unit_axis: Mat3,
    position: Vec3,
    scale: f32,
    /// `scale == 1`: extraction can skip the scale multiply
    is_rotation_only: bool,
}

impl Affine {
    /// Neutral transformation: identity basis, origin, unit scale.
    pub const IDENTITY: Affine = Affine {
        unit_axis: Mat3::IDENTITY,
        position: Vec3::ZERO,
        scale: 1.0,
        is_rotation_only: true,
    };

    fn from_parts(unit_axis: Mat3, position: Vec3, scale: f32) -> Self {
        Self {
            unit_axis,
            position,
            scale,
            is_rotation_only: scale == 1.0,
        }
    }

    fn from_rotation(unit_axis: Mat3) -> Self {
        Self::from_parts(unit_axis, Vec3::ZERO, 1.0)
    }

    fn check_scale(scale: f32) -> Result<()> {
        if scale.is_normal() && scale > 0.0 && scale.recip().is_finite() {
            Ok(())
        } else {
            Err(engine_err!(SOURCE, Error::InvalidScale(scale)))
        }
    }

    fn check_angle(radians: f32) -> Result<()> {
        if radians.is_finite() {
            Ok(())
        } else {
            Err(engine_err!(SOURCE, Error::InvalidAngle(radians)))
        }
    }

    /// Elementary rotation, or the identity when `radians` is not finite.
    fn elementary(radians: f32, rotation: fn(f32) -> Mat3) -> Mat3 {
        match Self::check_angle(radians) {
            Ok(()) => rotation(radians),
            Err(_) => Mat3::IDENTITY,
        }
    }

    fn look_at_axis(position: Vec3, target: Vec3, unit_up: Vec3) -> Result<Mat3> {
        basis::look_at_basis(target - position, unit_up).ok_or_else(|| {
            engine_err!(
                SOURCE,
                Error::DegenerateLookAt(format!(
                    "direction {} from {} to {} is zero or parallel to up {}",
                    target - position,
                    position,
                    target,
                    unit_up
                ))
            )
        })
    }

    // ===== FACTORIES =====

    /// Pure translation.
    pub fn translation(translation: Vec3) -> Self {
        Self::from_parts(Mat3::IDENTITY, translation, 1.0)
    }

    /// Rotation about the world X axis.
    ///
    /// A non-finite angle is logged and yields the identity basis, as do
    /// the other elementary rotation factories.
    pub fn rotation_about_x(radians: f32) -> Self {
        Self::from_rotation(Self::elementary(radians, Mat3::from_rotation_x))
    }

    /// Rotation about the world Y axis.
    pub fn rotation_about_y(radians: f32) -> Self {
        Self::from_rotation(Self::elementary(radians, Mat3::from_rotation_y))
    }

    /// Rotation about the world Z axis.
    pub fn rotation_about_z(radians: f32) -> Self {
        Self::from_rotation(Self::elementary(radians, Mat3::from_rotation_z))
    }

    /// Rotation about an arbitrary axis (Rodrigues).
    ///
    /// `unit_axis` must already be normalized, within
    /// `UNIT_LENGTH_TOLERANCE`; it is re-normalized before use.
    pub fn rotation_about_axis(unit_axis: Vec3, radians: f32) -> Result<Self> {
        let length = unit_axis.length();
        if !((length - 1.0).abs() <= UNIT_LENGTH_TOLERANCE) {
            return Err(engine_err!(SOURCE, Error::NonUnitAxis(length)));
        }
        Self::check_angle(radians)?;
        Ok(Self::from_rotation(Mat3::from_axis_angle(unit_axis / length, radians)))
    }

    /// Yaw / pitch / roll rotation.
    ///
    /// Intrinsic Y-X-Z order: yaw about world Y, then pitch about the
    /// resulting local X, then roll about the resulting local Z. A
    /// non-finite angle is logged and contributes no rotation.
    pub fn rotation(yaw_radians: f32, pitch_radians: f32, roll_radians: f32) -> Self {
        Self::from_rotation(
            Self::elementary(yaw_radians, Mat3::from_rotation_y)
                * Self::elementary(pitch_radians, Mat3::from_rotation_x)
                * Self::elementary(roll_radians, Mat3::from_rotation_z),
        )
    }

    /// Uniform scale. `factor` must be a normal float > 0.
    pub fn scale(factor: f32) -> Result<Self> {
        Self::check_scale(factor)?;
        Ok(Self::from_parts(Mat3::IDENTITY, Vec3::ZERO, factor))
    }

    /// Frame at `position` whose Z axis points at `target`.
    ///
    /// Fails with `DegenerateLookAt` when `target == position` or the
    /// direction is parallel to `unit_up`.
    pub fn look_at(position: Vec3, target: Vec3, unit_up: Vec3) -> Result<Self> {
        let unit_axis = Self::look_at_axis(position, target, unit_up)?;
        Ok(Self::from_parts(unit_axis, position, 1.0))
    }

    // ===== TRANSLATIONS =====

    /// Move by `direction` expressed in world space.
    pub fn translate_world(&mut self, direction: Vec3) {
        self.position += direction;
    }

    /// Move by `direction` expressed in the local axes.
    pub fn translate_local(&mut self, direction: Vec3) {
        self.position += self.unit_axis * direction;
    }

    // ===== ROTATIONS =====

    // A non-finite angle is logged and leaves the basis unchanged.
    fn rotate_world(&mut self, radians: f32, rotation: fn(f32) -> Mat3) {
        if Self::check_angle(radians).is_ok() {
            self.unit_axis = basis::renormalize(rotation(radians) * self.unit_axis);
        }
    }

    fn rotate_local(&mut self, radians: f32, rotation: fn(f32) -> Mat3) {
        if Self::check_angle(radians).is_ok() {
            self.unit_axis = basis::renormalize(self.unit_axis * rotation(radians));
        }
    }

    /// Rotate the basis about the world X axis. Position is unchanged.
    pub fn rotate_about_world_x(&mut self, radians: f32) {
        self.rotate_world(radians, Mat3::from_rotation_x);
    }

    /// Rotate the basis about the world Y axis. Position is unchanged.
    pub fn rotate_about_world_y(&mut self, radians: f32) {
        self.rotate_world(radians, Mat3::from_rotation_y);
    }

    /// Rotate the basis about the world Z axis. Position is unchanged.
    pub fn rotate_about_world_z(&mut self, radians: f32) {
        self.rotate_world(radians, Mat3::from_rotation_z);
    }

    /// Rotate about the current local X axis.
    pub fn rotate_about_local_x(&mut self, radians: f32) {
        self.rotate_local(radians, Mat3::from_rotation_x);
    }

    /// Rotate about the current local Y axis.
    pub fn rotate_about_local_y(&mut self, radians: f32) {
        self.rotate_local(radians, Mat3::from_rotation_y);
    }

    /// Rotate about the current local Z axis.
    pub fn rotate_about_local_z(&mut self, radians: f32) {
        self.rotate_local(radians, Mat3::from_rotation_z);
    }

    // ===== LOOK AT =====

    /// Re-aim the Z axis at `target` from the current position.
    ///
    /// Position and scale are unchanged. On failure the basis is untouched.
    pub fn look_at_target(&mut self, target: Vec3, unit_up: Vec3) -> Result<()> {
        self.unit_axis = Self::look_at_axis(self.position, target, unit_up)?;
        Ok(())
    }

    // ===== RESETS =====

    /// Reset the basis to the world axes.
    pub fn make_default_axis(&mut self) {
        self.unit_axis = Mat3::IDENTITY;
    }

    /// Move back to the origin.
    pub fn make_zero_position(&mut self) {
        self.position = Vec3::ZERO;
    }

    /// Reset the scale to 1.
    pub fn make_unit_scale(&mut self) {
        self.scale = 1.0;
        self.is_rotation_only = true;
    }

    // ===== MATRIX EXTRACTION =====

    /// `[unit_axis * scale | position; 0 0 0 1]`
    pub fn extract_transform_matrix(&self) -> Mat4 {
        let axis = if self.is_rotation_only {
            self.unit_axis
        } else {
            self.unit_axis * self.scale
        };
        let mut matrix = Mat4::from_mat3(axis);
        matrix.w_axis = self.position.extend(1.0);
        matrix
    }

    /// Closed-form inverse of `extract_transform_matrix()`.
    ///
    /// `[unit_axisᵀ / scale | -unit_axisᵀ * position / scale; 0 0 0 1]`
    pub fn extract_inverse_transform_matrix(&self) -> Mat4 {
        let transposed = self.unit_axis.transpose();
        let axis = if self.is_rotation_only {
            transposed
        } else {
            transposed * self.scale.recip()
        };
        let mut matrix = Mat4::from_mat3(axis);
        matrix.w_axis = (-(axis * self.position)).extend(1.0);
        matrix
    }

    // ===== AXIS QUERIES =====

    /// Local X axis in world space.
    pub fn unit_x_axis(&self) -> Vec3 {
        self.unit_axis.x_axis
    }

    /// Local Y axis in world space.
    pub fn unit_y_axis(&self) -> Vec3 {
        self.unit_axis.y_axis
    }

    /// Local Z axis in world space.
    pub fn unit_z_axis(&self) -> Vec3 {
        self.unit_axis.z_axis
    }

    // ===== ACCESSORS =====

    /// Orthonormal basis (columns are the local axes).
    pub fn unit_axis(&self) -> &Mat3 {
        &self.unit_axis
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale
    }

    // ===== MUTATORS =====

    /// Set the uniform scale. `factor` must be a normal float > 0.
    pub fn set_scale(&mut self, factor: f32) -> Result<()> {
        Self::check_scale(factor)?;
        self.scale = factor;
        self.is_rotation_only = factor == 1.0;
        Ok(())
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Component-wise comparison within `EQUALITY_TOLERANCE`.
impl PartialEq for Affine {
    fn eq(&self, other: &Self) -> bool {
        self.unit_axis.abs_diff_eq(other.unit_axis, EQUALITY_TOLERANCE)
            && self.position.abs_diff_eq(other.position, EQUALITY_TOLERANCE)
            && (self.scale - other.scale).abs() <= EQUALITY_TOLERANCE
    }
}

#[cfg(test)]
#[path = "affine_tests.rs"]
mod tests;
