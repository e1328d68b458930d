use glam::{Mat4, Quat, Vec3};
use super::*;

fn make_aabb(min: Vec3, max: Vec3) -> Aabb {
    Aabb::new(min, max)
}

// ============================================================================
// Construction and derived quantities
// ============================================================================

#[test]
fn test_center_and_extents() {
    let aabb = make_aabb(Vec3::new(-2.0, 0.0, 4.0), Vec3::new(2.0, 6.0, 10.0));

    assert_eq!(aabb.center(), Vec3::new(0.0, 3.0, 7.0));
    assert_eq!(aabb.extents(), Vec3::new(2.0, 3.0, 3.0));
    assert_eq!(aabb.size(), Vec3::new(4.0, 6.0, 6.0));
}

#[test]
fn test_from_center_extents() {
    let aabb = Aabb::from_center_extents(Vec3::new(1.0, 2.0, 3.0), Vec3::splat(0.5));

    assert_eq!(aabb.min, Vec3::new(0.5, 1.5, 2.5));
    assert_eq!(aabb.max, Vec3::new(1.5, 2.5, 3.5));
    assert!(!aabb.is_empty());
}

#[test]
fn test_empty_aabb() {
    assert!(Aabb::EMPTY.is_empty());
    assert!(!Aabb::EMPTY.is_finite());

    let valid = make_aabb(Vec3::ZERO, Vec3::ONE);
    assert!(!valid.is_empty());
    assert!(valid.is_finite());

    // A degenerate (zero-volume) box is not empty — it contains its surface
    let point = make_aabb(Vec3::ONE, Vec3::ONE);
    assert!(!point.is_empty());
}

// ============================================================================
// Merge and expand
// ============================================================================

#[test]
fn test_merge() {
    let a = make_aabb(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
    let b = make_aabb(Vec3::new(0.0, 0.0, 0.0), Vec3::new(3.0, 2.0, 1.0));

    let merged = a.merge(&b);
    assert_eq!(merged.min, Vec3::new(-1.0, -1.0, -1.0));
    assert_eq!(merged.max, Vec3::new(3.0, 2.0, 1.0));
}

#[test]
fn test_merge_with_empty_is_identity() {
    let a = make_aabb(Vec3::new(-1.0, 2.0, -3.0), Vec3::new(4.0, 5.0, 6.0));

    assert_eq!(Aabb::EMPTY.merge(&a), a);
    assert_eq!(a.merge(&Aabb::EMPTY), a);
}

#[test]
fn test_expanded() {
    let aabb = make_aabb(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

    let loose = aabb.expanded(1.5);
    assert_eq!(loose.min, Vec3::splat(-1.5));
    assert_eq!(loose.max, Vec3::splat(1.5));

    // Expansion is about the center, not the origin
    let offset = make_aabb(Vec3::new(4.0, 4.0, 4.0), Vec3::new(6.0, 6.0, 6.0));
    let loose = offset.expanded(2.0);
    assert_eq!(loose.min, Vec3::splat(3.0));
    assert_eq!(loose.max, Vec3::splat(7.0));
    assert_eq!(loose.center(), offset.center());
}

// ============================================================================
// Containment and intersection
// ============================================================================

#[test]
fn test_contains() {
    let big = make_aabb(Vec3::splat(-10.0), Vec3::splat(10.0));
    let small = make_aabb(Vec3::splat(-1.0), Vec3::splat(1.0));
    let straddling = make_aabb(Vec3::new(5.0, 5.0, 5.0), Vec3::new(15.0, 15.0, 15.0));

    assert!(big.contains(&small));
    assert!(!small.contains(&big));
    assert!(!big.contains(&straddling));
    // Containment is surface inclusive
    assert!(big.contains(&big));
}

#[test]
fn test_contains_point() {
    let aabb = make_aabb(Vec3::splat(-1.0), Vec3::splat(1.0));

    assert!(aabb.contains_point(Vec3::ZERO));
    assert!(aabb.contains_point(Vec3::ONE)); // corner counts
    assert!(!aabb.contains_point(Vec3::new(1.1, 0.0, 0.0)));
}

#[test]
fn test_intersects() {
    let a = make_aabb(Vec3::splat(-2.0), Vec3::splat(2.0));
    let b = make_aabb(Vec3::splat(1.0), Vec3::splat(3.0));
    let c = make_aabb(Vec3::splat(5.0), Vec3::splat(7.0));

    assert!(a.intersects(&b)); // overlapping
    assert!(!a.intersects(&c)); // disjoint
    assert!(b.intersects(&a)); // symmetric

    // Touching faces count as intersecting
    let d = make_aabb(Vec3::new(2.0, -1.0, -1.0), Vec3::new(4.0, 1.0, 1.0));
    assert!(a.intersects(&d));
}

// ============================================================================
// Matrix transform (Arvo)
// ============================================================================

#[test]
fn test_transformed_translation() {
    let aabb = make_aabb(Vec3::splat(-1.0), Vec3::splat(1.0));
    let matrix = Mat4::from_translation(Vec3::new(10.0, 0.0, -5.0));

    let moved = aabb.transformed(&matrix);
    assert_eq!(moved.min, Vec3::new(9.0, -1.0, -6.0));
    assert_eq!(moved.max, Vec3::new(11.0, 1.0, -4.0));
}

#[test]
fn test_transformed_scale() {
    let aabb = make_aabb(Vec3::splat(-1.0), Vec3::splat(1.0));
    let matrix = Mat4::from_scale(Vec3::new(2.0, 3.0, 0.5));

    let scaled = aabb.transformed(&matrix);
    assert_eq!(scaled.min, Vec3::new(-2.0, -3.0, -0.5));
    assert_eq!(scaled.max, Vec3::new(2.0, 3.0, 0.5));
}

#[test]
fn test_transformed_rotation_stays_conservative() {
    let aabb = make_aabb(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0));
    let matrix = Mat4::from_quat(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));

    // 90° about Y swaps the X and Z extents
    let rotated = aabb.transformed(&matrix);
    assert!((rotated.min.x - -3.0).abs() < 1e-5);
    assert!((rotated.max.x - 3.0).abs() < 1e-5);
    assert!((rotated.min.z - -1.0).abs() < 1e-5);
    assert!((rotated.max.z - 1.0).abs() < 1e-5);
    assert!((rotated.min.y - -2.0).abs() < 1e-5);
    assert!((rotated.max.y - 2.0).abs() < 1e-5);
}

#[test]
fn test_transformed_contains_all_corners() {
    let aabb = make_aabb(Vec3::new(-1.0, 0.5, -2.0), Vec3::new(3.0, 2.0, 0.0));
    let matrix = Mat4::from_scale_rotation_translation(
        Vec3::new(1.5, 0.75, 2.0),
        Quat::from_rotation_z(0.4) * Quat::from_rotation_x(-1.1),
        Vec3::new(4.0, -2.0, 9.0),
    );

    let transformed = aabb.transformed(&matrix);

    // Every transformed source corner must land inside the result
    for ix in 0..2 {
        for iy in 0..2 {
            for iz in 0..2 {
                let corner = Vec3::new(
                    if ix == 0 { aabb.min.x } else { aabb.max.x },
                    if iy == 0 { aabb.min.y } else { aabb.max.y },
                    if iz == 0 { aabb.min.z } else { aabb.max.z },
                );
                let p = matrix.transform_point3(corner);
                let eps = Vec3::splat(1e-4);
                let padded = Aabb::new(transformed.min - eps, transformed.max + eps);
                assert!(padded.contains_point(p), "corner {:?} escaped {:?}", p, transformed);
            }
        }
    }
}

#[test]
fn test_transformed_empty_stays_empty() {
    let matrix = Mat4::from_translation(Vec3::splat(100.0));
    let moved = Aabb::EMPTY.transformed(&matrix);
    assert!(moved.is_empty());
}
