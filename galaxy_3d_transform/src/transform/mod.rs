//! Transform module — decomposed affine transforms and camera projections.
//!
//! Both types are small `Copy` values that own no resources. They never
//! reference each other: an `Affine` placed as the view and a `Projection`
//! compose only through matrix multiplication.

mod affine;
mod basis;
mod projection;

pub use affine::{Affine, EQUALITY_TOLERANCE, UNIT_LENGTH_TOLERANCE};
pub use basis::{is_orthonormal, ORTHONORMAL_TOLERANCE};
pub use projection::{Projection, ProjectionType};
