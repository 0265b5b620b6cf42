/// Orthonormal basis helpers shared by the transform types.
///
/// A basis is stored as a `Mat3` whose columns are the local X/Y/Z axes
/// expressed in world space. Every helper here returns a right-handed
/// orthonormal basis (X × Y = Z).

use glam::{Mat3, Vec3};

/// Maximum deviation from unit length / orthogonality tolerated on the
/// columns of a basis at any externally observable point.
pub const ORTHONORMAL_TOLERANCE: f32 = 1e-5;

/// Below this `|up × forward|` the two directions are treated as parallel.
pub(crate) const PARALLEL_EPSILON: f32 = 1e-6;

/// Re-orthonormalize a basis that drifted through repeated composition.
///
/// Gram-Schmidt on the columns: X is kept as the reference direction,
/// Y loses its X component, Z is rebuilt as X × Y so handedness is
/// preserved.
pub(crate) fn renormalize(basis: Mat3) -> Mat3 {
    let x = basis.x_axis.normalize();
    let y = (basis.y_axis - x * x.dot(basis.y_axis)).normalize();
    let z = x.cross(y);
    Mat3::from_cols(x, y, z)
}

/// Build a basis whose Z column points along `direction`.
///
/// Columns are (right, up, forward) with
/// `right = normalize(up × forward)` and `up' = forward × right`.
/// Returns `None` when `direction` is zero or parallel to `unit_up`.
pub(crate) fn look_at_basis(direction: Vec3, unit_up: Vec3) -> Option<Mat3> {
    let forward = direction.try_normalize()?;
    let side = unit_up.cross(forward);
    if !(side.length() > PARALLEL_EPSILON) {
        return None;
    }
    let right = side.normalize();
    let up = forward.cross(right);
    Some(Mat3::from_cols(right, up, forward))
}

/// Whether every column is unit length and the columns are pairwise
/// orthogonal, within `tolerance`.
pub fn is_orthonormal(basis: &Mat3, tolerance: f32) -> bool {
    let (x, y, z) = (basis.x_axis, basis.y_axis, basis.z_axis);
    (x.length() - 1.0).abs() <= tolerance
        && (y.length() - 1.0).abs() <= tolerance
        && (z.length() - 1.0).abs() <= tolerance
        && x.dot(y).abs() <= tolerance
        && y.dot(z).abs() <= tolerance
        && z.dot(x).abs() <= tolerance
}

#[cfg(test)]
#[path = "basis_tests.rs"]
mod tests;
