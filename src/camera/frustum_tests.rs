use glam::{Mat4, Vec3};
use crate::math::Aabb;
use super::*;

fn perspective_frustum() -> Frustum {
    let projection = Mat4::perspective_rh(
        std::f32::consts::FRAC_PI_2, // 90° FOV
        1.0,
        1.0,
        10.0,
    );
    Frustum::from_view_projection(projection)
}

// ============================================================================
// Plane extraction
// ============================================================================

#[test]
fn test_frustum_from_identity_matrix() {
    let mut frustum = Frustum::from_view_projection(Mat4::IDENTITY);

    // Identity VP → plane volume x,y,z in [-1, 1] (the row-sum near
    // plane always sits at ndc z = -1). All 6 planes normalized.
    for plane in frustum.planes() {
        let normal_len = Vec3::new(plane.x, plane.y, plane.z).length();
        assert!((normal_len - 1.0).abs() < 1e-5, "plane normal should be unit length");
    }

    assert!(frustum.contains_point(Vec3::new(0.0, 0.0, 0.5)));
    assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -0.5)));
    assert!(!frustum.contains_point(Vec3::new(2.0, 0.0, 0.5)));
    assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 2.0)));
}

#[test]
fn test_frustum_from_perspective_projection() {
    let projection = Mat4::perspective_rh(
        std::f32::consts::FRAC_PI_4, // 45° FOV
        16.0 / 9.0,                  // aspect ratio
        0.1,                         // near
        100.0,                       // far
    );
    let view = Mat4::look_at_rh(
        Vec3::new(0.0, 0.0, 5.0),   // eye
        Vec3::ZERO,                  // target
        Vec3::Y,                     // up
    );
    let mut frustum = Frustum::from_view_projection(projection * view);

    // Planes should be normalized
    for plane in frustum.planes() {
        let normal_len = Vec3::new(plane.x, plane.y, plane.z).length();
        assert!((normal_len - 1.0).abs() < 1e-4, "plane normal should be unit length");
    }
}

#[test]
fn test_frustum_from_orthographic_projection() {
    let projection = Mat4::orthographic_rh(
        -10.0, 10.0, // left, right
        -10.0, 10.0, // bottom, top
        0.1, 100.0,  // near, far
    );
    let mut frustum = Frustum::from_view_projection(projection);

    // All planes should be normalized
    for plane in frustum.planes() {
        let normal_len = Vec3::new(plane.x, plane.y, plane.z).length();
        assert!((normal_len - 1.0).abs() < 1e-4, "plane normal should be unit length");
    }
}

// ============================================================================
// Corner extraction
// ============================================================================

#[test]
fn test_corners_of_identity_are_ndc_cube() {
    let mut frustum = Frustum::from_view_projection(Mat4::IDENTITY);
    let corners = *frustum.corners();

    assert_eq!(corners[CORNER_LEFT_BOTTOM_NEAR], Vec3::new(-1.0, -1.0, 0.0));
    assert_eq!(corners[CORNER_RIGHT_BOTTOM_NEAR], Vec3::new(1.0, -1.0, 0.0));
    assert_eq!(corners[CORNER_LEFT_TOP_NEAR], Vec3::new(-1.0, 1.0, 0.0));
    assert_eq!(corners[CORNER_RIGHT_TOP_NEAR], Vec3::new(1.0, 1.0, 0.0));
    assert_eq!(corners[CORNER_LEFT_BOTTOM_FAR], Vec3::new(-1.0, -1.0, 1.0));
    assert_eq!(corners[CORNER_RIGHT_BOTTOM_FAR], Vec3::new(1.0, -1.0, 1.0));
    assert_eq!(corners[CORNER_LEFT_TOP_FAR], Vec3::new(-1.0, 1.0, 1.0));
    assert_eq!(corners[CORNER_RIGHT_TOP_FAR], Vec3::new(1.0, 1.0, 1.0));
}

#[test]
fn test_corners_of_perspective_projection() {
    // 90° FOV, square aspect, near 1, far 10, looking down -Z from the
    // origin: the near face is a 2x2 square at z = -1, the far face a
    // 20x20 square at z = -10
    let mut frustum = perspective_frustum();
    let corners = *frustum.corners();

    let expect = |actual: Vec3, expected: Vec3| {
        assert!(
            (actual - expected).length() < 1e-3,
            "corner {:?} expected {:?}",
            actual,
            expected
        );
    };

    expect(corners[CORNER_LEFT_BOTTOM_NEAR], Vec3::new(-1.0, -1.0, -1.0));
    expect(corners[CORNER_RIGHT_TOP_NEAR], Vec3::new(1.0, 1.0, -1.0));
    expect(corners[CORNER_LEFT_BOTTOM_FAR], Vec3::new(-10.0, -10.0, -10.0));
    expect(corners[CORNER_RIGHT_TOP_FAR], Vec3::new(10.0, 10.0, -10.0));
}

// ============================================================================
// Lazy recomputation
// ============================================================================

#[test]
fn test_setters_mark_dirty() {
    let mut frustum = perspective_frustum();
    let _ = frustum.planes();
    assert!(!frustum.dirty);

    frustum.set_world(Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)));
    assert!(frustum.dirty);
    let _ = frustum.corners();
    assert!(!frustum.dirty);

    frustum.set_view_projection(Mat4::IDENTITY);
    assert!(frustum.dirty);
}

#[test]
fn test_recompute_tracks_latest_matrices() {
    let mut frustum = Frustum::from_view_projection(Mat4::IDENTITY);
    let identity_corners = *frustum.corners();

    let projection = Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 1.0, 10.0);
    frustum.set_view_projection(projection);
    let perspective_corners = *frustum.corners();
    assert_ne!(identity_corners, perspective_corners);

    // Same matrices through a fresh frustum give the same derived data
    let mut fresh = Frustum::from_view_projection(projection);
    assert_eq!(*fresh.corners(), perspective_corners);
    assert_eq!(*fresh.planes(), *frustum.planes());
}

#[test]
fn test_world_matrix_shifts_tested_space() {
    // world maps tested points ahead of the projection, so a +10 x
    // translation makes points around x = -10 project into view
    let projection = Mat4::orthographic_rh(-5.0, 5.0, -5.0, 5.0, 0.1, 100.0);
    let mut frustum = Frustum::from_view_projection(projection);

    assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -10.0)));
    assert!(!frustum.contains_point(Vec3::new(-10.0, 0.0, -10.0)));

    frustum.set_world(Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)));
    assert!(frustum.contains_point(Vec3::new(-10.0, 0.0, -10.0)));
    assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -10.0)));
}

// ============================================================================
// AABB intersection
// ============================================================================

#[test]
fn test_aabb_inside_frustum() {
    let mut frustum = perspective_frustum();

    // Unit box straight ahead, well within all planes
    let aabb = Aabb::from_center_extents(Vec3::new(0.0, 0.0, -5.0), Vec3::ONE);
    assert!(frustum.intersects_aabb(&aabb));
}

#[test]
fn test_aabb_outside_frustum() {
    let mut frustum = perspective_frustum();

    // Far off to the side
    let aabb = Aabb::new(Vec3::new(100.0, 100.0, 100.0), Vec3::new(101.0, 101.0, 101.0));
    assert!(!frustum.intersects_aabb(&aabb));
}

#[test]
fn test_aabb_behind_camera() {
    let mut frustum = perspective_frustum();

    let aabb = Aabb::from_center_extents(Vec3::new(0.0, 0.0, 5.0), Vec3::ONE);
    assert!(!frustum.intersects_aabb(&aabb));
}

#[test]
fn test_aabb_beyond_far_plane() {
    let mut frustum = perspective_frustum();

    // Far plane sits at z = -10
    let aabb = Aabb::from_center_extents(Vec3::new(0.0, 0.0, -20.0), Vec3::ONE);
    assert!(!frustum.intersects_aabb(&aabb));
}

#[test]
fn test_aabb_intersecting_frustum_boundary() {
    let projection = Mat4::orthographic_rh(-5.0, 5.0, -5.0, 5.0, 0.1, 100.0);
    let mut frustum = Frustum::from_view_projection(projection);

    // Straddles the right boundary at x = 5
    let aabb = Aabb::new(Vec3::new(4.0, 0.0, -10.0), Vec3::new(6.0, 1.0, -5.0));
    assert!(frustum.intersects_aabb(&aabb));
}

// ============================================================================
// AABB classification
// ============================================================================

#[test]
fn test_classify_aabb_three_ways() {
    let projection = Mat4::orthographic_rh(-5.0, 5.0, -5.0, 5.0, 0.1, 100.0);
    let mut frustum = Frustum::from_view_projection(projection);

    let inside = Aabb::from_center_extents(Vec3::new(0.0, 0.0, -10.0), Vec3::ONE);
    assert_eq!(frustum.classify_aabb(&inside), ClipState::Inside);

    let straddling = Aabb::new(Vec3::new(4.0, -1.0, -10.0), Vec3::new(6.0, 1.0, -8.0));
    assert_eq!(frustum.classify_aabb(&straddling), ClipState::Partial);

    let outside = Aabb::new(Vec3::new(10.0, -1.0, -10.0), Vec3::new(12.0, 1.0, -8.0));
    assert_eq!(frustum.classify_aabb(&outside), ClipState::Outside);
}

#[test]
fn test_classify_box_moving_through_perspective_frustum() {
    // 90° FOV, near 1, far 10, looking down -Z: a unit box must flip
    // classification as it travels through the volume
    let mut frustum = perspective_frustum();

    let at = |z: f32| Aabb::from_center_extents(Vec3::new(0.0, 0.0, z), Vec3::ONE);

    // Behind the camera
    assert_eq!(frustum.classify_aabb(&at(5.0)), ClipState::Outside);
    // Straddling the near boundary
    assert_eq!(frustum.classify_aabb(&at(-1.0)), ClipState::Partial);
    // Fully inside
    assert_eq!(frustum.classify_aabb(&at(-5.0)), ClipState::Inside);
    // Straddling the far plane
    assert_eq!(frustum.classify_aabb(&at(-10.5)), ClipState::Partial);
    // Beyond the far plane
    assert_eq!(frustum.classify_aabb(&at(-15.0)), ClipState::Outside);
}

#[test]
fn test_classify_wide_box_straddles_side_planes() {
    let mut frustum = perspective_frustum();

    // At z = -5 the frustum half-width is 5; a box spanning x in [-8, 8]
    // pokes through both side planes
    let aabb = Aabb::new(Vec3::new(-8.0, -1.0, -6.0), Vec3::new(8.0, 1.0, -4.0));
    assert_eq!(frustum.classify_aabb(&aabb), ClipState::Partial);
}

#[test]
fn test_classify_box_exactly_filling_ortho_volume_is_inside() {
    // Box faces lying exactly on the planes still count as inside:
    // the n-vertex test is >= 0. All matrix entries here are powers of
    // two, so the plane distances come out exactly 0.0 in f32.
    let projection = Mat4::orthographic_rh(-4.0, 4.0, -4.0, 4.0, 1.0, 9.0);
    let mut frustum = Frustum::from_view_projection(projection);

    let exact_fit = Aabb::new(Vec3::new(-4.0, -4.0, -9.0), Vec3::new(4.0, 4.0, -1.0));
    assert_eq!(frustum.classify_aabb(&exact_fit), ClipState::Inside);

    // Nudge one face past a side plane and the box straddles it
    let nudged = Aabb::new(Vec3::new(-4.5, -4.0, -9.0), Vec3::new(4.0, 4.0, -1.0));
    assert_eq!(frustum.classify_aabb(&nudged), ClipState::Partial);
}

#[test]
fn test_empty_aabb_is_outside() {
    let mut frustum = perspective_frustum();

    assert!(!frustum.intersects_aabb(&Aabb::EMPTY));
    assert_eq!(frustum.classify_aabb(&Aabb::EMPTY), ClipState::Outside);
}

// ============================================================================
// Index constants
// ============================================================================

#[test]
fn test_plane_constants() {
    assert_eq!(PLANE_LEFT, 0);
    assert_eq!(PLANE_RIGHT, 1);
    assert_eq!(PLANE_BOTTOM, 2);
    assert_eq!(PLANE_TOP, 3);
    assert_eq!(PLANE_NEAR, 4);
    assert_eq!(PLANE_FAR, 5);
}

#[test]
fn test_corner_constants() {
    assert_eq!(CORNER_LEFT_BOTTOM_NEAR, 0);
    assert_eq!(CORNER_RIGHT_BOTTOM_NEAR, 1);
    assert_eq!(CORNER_LEFT_TOP_NEAR, 2);
    assert_eq!(CORNER_RIGHT_TOP_NEAR, 3);
    assert_eq!(CORNER_LEFT_BOTTOM_FAR, 4);
    assert_eq!(CORNER_RIGHT_BOTTOM_FAR, 5);
    assert_eq!(CORNER_LEFT_TOP_FAR, 6);
    assert_eq!(CORNER_RIGHT_TOP_FAR, 7);
}
