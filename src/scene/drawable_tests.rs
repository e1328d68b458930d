use glam::{Mat4, Vec3};
use crate::math::Aabb;
use super::*;

fn unit_box() -> Aabb {
    Aabb::from_center_extents(Vec3::ZERO, Vec3::ONE)
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_caches_derived_state() {
    let world = Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0));
    let drawable = Drawable::new(unit_box(), world, DrawableFlags::default(), 0);

    assert_eq!(*drawable.world_matrix(), world);
    assert_eq!(*drawable.inv_world_matrix(), world.inverse());
    assert_eq!(drawable.world_bounding_box().min, Vec3::new(9.0, -1.0, -1.0));
    assert_eq!(drawable.world_bounding_box().max, Vec3::new(11.0, 1.0, 1.0));
}

#[test]
fn test_default_flags() {
    let flags = DrawableFlags::default();

    assert!(flags.contains(DrawableFlags::VISIBLE));
    assert!(flags.contains(DrawableFlags::CAST_SHADOW));
    assert!(flags.contains(DrawableFlags::PICKABLE));
    assert!(!flags.contains(DrawableFlags::CLIP_DISABLED));
}

#[test]
fn test_flag_accessors() {
    let drawable = Drawable::new(
        unit_box(),
        Mat4::IDENTITY,
        DrawableFlags::VISIBLE | DrawableFlags::CLIP_DISABLED,
        0,
    );

    assert!(drawable.is_visible());
    assert!(drawable.clip_disabled());
    assert!(!drawable.casts_shadow());
    assert!(!drawable.is_pickable());
}

// ============================================================================
// World matrix updates
// ============================================================================

#[test]
fn test_set_world_matrix_refreshes_caches() {
    let mut drawable = Drawable::new(unit_box(), Mat4::IDENTITY, DrawableFlags::default(), 0);

    let world = Mat4::from_scale(Vec3::splat(2.0))
        * Mat4::from_translation(Vec3::new(0.0, 5.0, 0.0));
    drawable.set_world_matrix(world);

    assert_eq!(*drawable.world_matrix(), world);
    assert_eq!(*drawable.inv_world_matrix(), world.inverse());

    // Scaled by 2 about the origin after a +5 Y translation
    assert_eq!(drawable.world_bounding_box().min, Vec3::new(-2.0, 8.0, -2.0));
    assert_eq!(drawable.world_bounding_box().max, Vec3::new(2.0, 12.0, 2.0));
}

#[test]
fn test_set_bounding_box_refreshes_world_bounds() {
    let world = Mat4::from_translation(Vec3::new(3.0, 0.0, 0.0));
    let mut drawable = Drawable::new(unit_box(), world, DrawableFlags::default(), 0);

    drawable.set_bounding_box(Aabb::from_center_extents(Vec3::ZERO, Vec3::splat(2.0)));

    assert_eq!(drawable.world_bounding_box().min, Vec3::new(1.0, -2.0, -2.0));
    assert_eq!(drawable.world_bounding_box().max, Vec3::new(5.0, 2.0, 2.0));
}

// ============================================================================
// Render order
// ============================================================================

#[test]
fn test_render_order() {
    let mut drawable = Drawable::new(unit_box(), Mat4::IDENTITY, DrawableFlags::default(), 7);
    assert_eq!(drawable.render_order(), 7);

    drawable.set_render_order(-3);
    assert_eq!(drawable.render_order(), -3);
}
