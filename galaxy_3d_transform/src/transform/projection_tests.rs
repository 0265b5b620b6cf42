use glam::{Mat4, Vec3, Vec4};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use crate::error::Error;
use super::*;

fn assert_inverse_is_exact(projection: &Projection) {
    let product = projection.extract_transform_matrix() * projection.extract_inverse_transform_matrix();
    assert!(
        product.abs_diff_eq(Mat4::IDENTITY, 1e-5),
        "P * P^-1 is not identity: {:?}",
        product
    );
}

fn project(matrix: &Mat4, point: Vec3) -> Vec3 {
    matrix.project_point3(point)
}

// ============================================================================
// Perspective
// ============================================================================

#[test]
fn test_perspective_bounds() {
    let projection = Projection::perspective(FRAC_PI_2, 1.0, 1.0, 100.0).unwrap();
    let top = 1.0 * (FRAC_PI_2 * 0.5).tan();

    assert_eq!(projection.top(), top);
    assert!((projection.top() - FRAC_PI_4.tan()).abs() < 1e-6);
    assert_eq!(projection.bottom(), -projection.top());
    assert_eq!(projection.right(), projection.top());
    assert_eq!(projection.left(), -projection.top());
    assert_eq!(projection.aspect(), 1.0);
    assert_eq!(projection.depth(), 99.0);
    assert!(projection.is_perspective());
    assert!(!projection.is_orthographic());
}

#[test]
fn test_perspective_matches_glam() {
    let projection = Projection::perspective(FRAC_PI_4, 16.0 / 9.0, 0.1, 100.0).unwrap();
    let expected = Mat4::perspective_rh_gl(FRAC_PI_4, 16.0 / 9.0, 0.1, 100.0);
    assert!(projection.extract_transform_matrix().abs_diff_eq(expected, 1e-5));
}

#[test]
fn test_perspective_rejects_bad_arguments() {
    assert_eq!(
        Projection::perspective(0.0, 1.0, 0.1, 10.0),
        Err(Error::InvalidFieldOfView(0.0))
    );
    assert!(Projection::perspective(PI, 1.0, 0.1, 10.0).is_err());
    assert_eq!(
        Projection::perspective(FRAC_PI_4, 0.0, 0.1, 10.0),
        Err(Error::InvalidAspect(0.0))
    );
    assert!(matches!(
        Projection::perspective(FRAC_PI_4, 1.0, 0.0, 10.0),
        Err(Error::InvalidFrustum(_))
    ));
    assert!(matches!(
        Projection::perspective(FRAC_PI_4, 1.0, 10.0, 1.0),
        Err(Error::InvalidFrustum(_))
    ));
}

#[test]
fn test_frustum_off_center_matrix_maps_corners() {
    let projection = Projection::frustum(-1.0, 3.0, -0.5, 2.0, 1.0, 50.0).unwrap();
    let m = projection.extract_transform_matrix();

    // Near-plane corners land on the NDC cube corners
    assert!(project(&m, Vec3::new(-1.0, -0.5, -1.0)).abs_diff_eq(Vec3::new(-1.0, -1.0, -1.0), 1e-5));
    assert!(project(&m, Vec3::new(3.0, 2.0, -1.0)).abs_diff_eq(Vec3::new(1.0, 1.0, -1.0), 1e-5));

    // Far-plane corner scaled by far / near
    assert!(project(&m, Vec3::new(150.0, 100.0, -50.0)).abs_diff_eq(Vec3::new(1.0, 1.0, 1.0), 1e-4));
}

#[test]
fn test_frustum_matrix_layout() {
    let m = Projection::frustum(-2.0, 2.0, -1.0, 1.0, 1.0, 3.0)
        .unwrap()
        .extract_transform_matrix();

    assert_eq!(m.x_axis, Vec4::new(0.5, 0.0, 0.0, 0.0));
    assert_eq!(m.y_axis, Vec4::new(0.0, 1.0, 0.0, 0.0));
    assert_eq!(m.z_axis, Vec4::new(0.0, 0.0, -2.0, -1.0));
    assert_eq!(m.w_axis, Vec4::new(0.0, 0.0, -3.0, 0.0));
}

#[test]
fn test_perspective_inverse_is_exact() {
    assert_inverse_is_exact(&Projection::perspective(FRAC_PI_4, 1.5, 0.1, 40.0).unwrap());
    assert_inverse_is_exact(&Projection::frustum(-1.0, 3.0, -0.5, 2.0, 1.0, 50.0).unwrap());
}

#[test]
fn test_perspective_inverse_matches_generic_inverse() {
    let projection = Projection::frustum(-0.3, 0.5, -0.2, 0.4, 0.5, 20.0).unwrap();
    let generic = projection.extract_transform_matrix().inverse();
    assert!(projection.extract_inverse_transform_matrix().abs_diff_eq(generic, 1e-4));
}

// ============================================================================
// Orthographic
// ============================================================================

#[test]
fn test_orthographic_matches_glam() {
    let projection = Projection::orthographic(-10.0, 6.0, -4.0, 8.0, -1.0, 100.0).unwrap();
    let expected = Mat4::orthographic_rh_gl(-10.0, 6.0, -4.0, 8.0, -1.0, 100.0);
    assert!(projection.extract_transform_matrix().abs_diff_eq(expected, 1e-6));
    assert!(projection.is_orthographic());
}

#[test]
fn test_orthographic_allows_non_positive_near() {
    assert!(Projection::orthographic(-1.0, 1.0, -1.0, 1.0, 0.0, 1.0).is_ok());
    assert!(Projection::orthographic(-1.0, 1.0, -1.0, 1.0, -5.0, 5.0).is_ok());
}

#[test]
fn test_orthographic_inverse_is_exact() {
    assert_inverse_is_exact(&Projection::orthographic(-10.0, 6.0, -4.0, 8.0, -1.0, 100.0).unwrap());
    assert_inverse_is_exact(&Projection::orthographic(0.0, 1920.0, 0.0, 1080.0, 0.0, 1.0).unwrap());
}

#[test]
fn test_orthographic_maps_box_to_ndc() {
    let m = Projection::orthographic(0.0, 4.0, 0.0, 2.0, 1.0, 9.0)
        .unwrap()
        .extract_transform_matrix();
    assert!(m.transform_point3(Vec3::new(0.0, 0.0, -1.0)).abs_diff_eq(Vec3::new(-1.0, -1.0, -1.0), 1e-6));
    assert!(m.transform_point3(Vec3::new(4.0, 2.0, -9.0)).abs_diff_eq(Vec3::new(1.0, 1.0, 1.0), 1e-6));
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_collapsed_bounds_are_rejected() {
    assert!(matches!(
        Projection::orthographic(1.0, 1.0, -1.0, 1.0, 0.1, 10.0),
        Err(Error::InvalidFrustum(_))
    ));
    assert!(matches!(
        Projection::frustum(-1.0, 1.0, 2.0, 2.0, 0.1, 10.0),
        Err(Error::InvalidFrustum(_))
    ));
    assert!(matches!(
        Projection::frustum(-1.0, 1.0, -1.0, 1.0, 5.0, 5.0),
        Err(Error::InvalidFrustum(_))
    ));
}

#[test]
fn test_inverted_and_non_finite_bounds_are_rejected() {
    assert!(Projection::orthographic(1.0, -1.0, -1.0, 1.0, 0.1, 10.0).is_err());
    assert!(Projection::frustum(-1.0, 1.0, 1.0, -1.0, 0.1, 10.0).is_err());
    assert!(Projection::frustum(-1.0, f32::NAN, -1.0, 1.0, 0.1, 10.0).is_err());
    assert!(Projection::orthographic(-1.0, 1.0, -1.0, 1.0, 0.1, f32::INFINITY).is_err());
}

#[test]
fn test_subnormal_extents_are_rejected() {
    assert!(matches!(
        Projection::frustum(-1e-40, 1e-40, -1.0, 1.0, 1e-40, 10.0),
        Err(Error::InvalidFrustum(_))
    ));
    // Subnormal width alone, with a normal near plane
    match Projection::frustum(-1e-40, 1e-40, -1.0, 1.0, 0.1, 10.0) {
        Err(Error::InvalidFrustum(msg)) => assert!(msg.contains("width")),
        other => panic!("expected InvalidFrustum, got {:?}", other),
    }
    assert!(Projection::orthographic(-1.0, 1.0, 0.0, 1e-39, 0.1, 10.0).is_err());
    assert!(Projection::orthographic(-1.0, 1.0, -1.0, 1.0, 0.0, 1e-40).is_err());
}

#[test]
fn test_perspective_rejects_subnormal_near() {
    match Projection::frustum(-1.0, 1.0, -1.0, 1.0, 1e-40, 10.0) {
        Err(Error::InvalidFrustum(msg)) => assert!(msg.contains("near")),
        other => panic!("expected InvalidFrustum, got {:?}", other),
    }
    let mut projection = Projection::frustum(-1.0, 1.0, -1.0, 1.0, 0.1, 10.0).unwrap();
    let before = projection;
    assert!(projection.set_near(1e-40).is_err());
    assert_eq!(projection, before);
}

#[test]
fn test_overflowing_extents_are_rejected() {
    match Projection::orthographic(-f32::MAX, f32::MAX, -1.0, 1.0, 0.1, 10.0) {
        Err(Error::InvalidFrustum(msg)) => assert!(msg.contains("width")),
        other => panic!("expected InvalidFrustum, got {:?}", other),
    }
    assert!(Projection::orthographic(-1.0, 1.0, -1.0, 1.0, -f32::MAX, f32::MAX).is_err());
    // Finite width, but left + right overflows the translation column
    assert!(Projection::orthographic(f32::MAX * 0.75, f32::MAX, -1.0, 1.0, 0.1, 10.0).is_err());
}

#[test]
fn test_accepted_projections_have_finite_matrices() {
    let projections = [
        Projection::perspective(FRAC_PI_4, 16.0 / 9.0, 0.1, 1000.0).unwrap(),
        Projection::frustum(-1e-3, 1e-3, -1e-3, 1e-3, 1e-3, 1e6).unwrap(),
        Projection::orthographic(-1e6, 1e6, -1e6, 1e6, -1e6, 1e6).unwrap(),
    ];
    for projection in projections {
        let matrix = projection.extract_transform_matrix();
        let inverse = projection.extract_inverse_transform_matrix();
        assert!(matrix.is_finite(), "{:?}", projection);
        assert!(inverse.is_finite(), "{:?}", projection);
        assert!(matrix.determinant() != 0.0, "{:?}", projection);
    }
}

#[test]
fn test_frustum_error_message_names_bound() {
    match Projection::orthographic(2.0, 2.0, -1.0, 1.0, 0.1, 10.0) {
        Err(Error::InvalidFrustum(msg)) => assert!(msg.contains("right")),
        other => panic!("expected InvalidFrustum, got {:?}", other),
    }
}

// ============================================================================
// Aspect fitting
// ============================================================================

#[test]
fn test_fit_width_to_aspect() {
    let mut projection = Projection::perspective(FRAC_PI_4, 1.0, 0.1, 40.0).unwrap();
    let height = projection.height();

    for &aspect in &[16.0 / 9.0, 0.5, 2.35, 1.0] {
        projection.fit_width_to_aspect(aspect).unwrap();
        assert!((projection.aspect() - aspect).abs() < 1e-5 * aspect);
        assert_eq!(projection.height(), height);
        // Symmetric frustum stays centered on 0
        assert!((projection.left() + projection.right()).abs() < 1e-6);
    }
}

#[test]
fn test_fit_width_keeps_off_center_midpoint() {
    let mut projection = Projection::orthographic(2.0, 6.0, -1.0, 1.0, 0.0, 10.0).unwrap();
    projection.fit_width_to_aspect(4.0).unwrap();

    assert_eq!(projection.left(), 0.0);
    assert_eq!(projection.right(), 8.0);
    assert_eq!(projection.bottom(), -1.0);
    assert_eq!(projection.top(), 1.0);
}

#[test]
fn test_fit_height_to_aspect() {
    let mut projection = Projection::orthographic(-8.0, 8.0, 1.0, 5.0, 0.0, 10.0).unwrap();
    let width = projection.width();

    projection.fit_height_to_aspect(2.0).unwrap();

    assert_eq!(projection.width(), width);
    assert!((projection.aspect() - 2.0).abs() < 1e-6);
    assert_eq!(projection.bottom(), -1.0);
    assert_eq!(projection.top(), 7.0);
}

#[test]
fn test_fit_leaves_depth_and_type_untouched() {
    let mut projection = Projection::frustum(-1.0, 1.0, -1.0, 1.0, 0.5, 30.0).unwrap();
    projection.fit_width_to_aspect(1.7).unwrap();
    projection.fit_height_to_aspect(0.9).unwrap();

    assert_eq!(projection.near(), 0.5);
    assert_eq!(projection.far(), 30.0);
    assert_eq!(projection.projection_type(), ProjectionType::Perspective);
}

#[test]
fn test_fit_rejects_invalid_aspect() {
    let mut projection = Projection::perspective(FRAC_PI_4, 1.0, 0.1, 40.0).unwrap();
    let before = projection;

    assert_eq!(projection.fit_width_to_aspect(0.0), Err(Error::InvalidAspect(0.0)));
    assert!(projection.fit_height_to_aspect(-1.0).is_err());
    assert!(projection.fit_width_to_aspect(f32::NAN).is_err());
    assert_eq!(projection, before);
}

// ============================================================================
// Setters
// ============================================================================

#[test]
fn test_setters_update_bounds() {
    let mut projection = Projection::orthographic(-1.0, 1.0, -1.0, 1.0, 0.1, 10.0).unwrap();

    projection.set_left(-2.0).unwrap();
    projection.set_right(3.0).unwrap();
    projection.set_bottom(-4.0).unwrap();
    projection.set_top(5.0).unwrap();
    projection.set_near(-6.0).unwrap();
    projection.set_far(7.0).unwrap();

    assert_eq!(projection.width(), 5.0);
    assert_eq!(projection.height(), 9.0);
    assert_eq!(projection.depth(), 13.0);
}

#[test]
fn test_setter_rejection_leaves_projection_unchanged() {
    let mut projection = Projection::frustum(-1.0, 1.0, -1.0, 1.0, 0.1, 10.0).unwrap();
    let before = projection;

    assert!(projection.set_left(1.0).is_err());
    assert!(projection.set_right(-1.0).is_err());
    assert!(projection.set_top(-1.0).is_err());
    assert!(projection.set_bottom(1.0).is_err());
    assert!(projection.set_near(0.0).is_err());
    assert!(projection.set_near(-1.0).is_err());
    assert!(projection.set_far(0.1).is_err());

    assert_eq!(projection, before);
}

#[test]
fn test_set_type() {
    let mut projection = Projection::orthographic(-1.0, 1.0, -1.0, 1.0, 0.5, 10.0).unwrap();
    projection.set_type(ProjectionType::Perspective).unwrap();
    assert!(projection.is_perspective());

    projection.set_type(ProjectionType::Orthographic).unwrap();
    projection.set_near(-1.0).unwrap();

    // Perspective needs a positive near plane
    assert!(projection.set_type(ProjectionType::Perspective).is_err());
    assert!(projection.is_orthographic());
}

#[test]
fn test_copies_are_independent() {
    let original = Projection::perspective(FRAC_PI_4, 1.0, 0.1, 40.0).unwrap();
    let mut copy = original;
    copy.fit_width_to_aspect(2.0).unwrap();
    assert_eq!(original.aspect(), 1.0);
    assert!((copy.aspect() - 2.0).abs() < 1e-6);
}
