//! Skinning Palette Tests
//!
//! Tests for:
//! - Identity poses produce identity palettes
//! - Composition order (inverse bind, then global, then inverse node)
//! - Palette sized to the primitive's bone count, in primitive order
//! - Bone limit and out-of-range node errors

mod common;

use glam::{Affine3A, Mat4, Quat, Vec3};

use actor_material::errors::MaterialError;
use actor_material::renderer::{SkinningPalette, skinning_matrix};
use actor_material::scene::{Primitive, SkeletonPose};

fn identity_pose(nodes: usize) -> SkeletonPose {
    SkeletonPose {
        global_transforms: vec![Affine3A::IDENTITY; nodes],
        inverse_bind_poses: vec![Affine3A::IDENTITY; nodes],
    }
}

// ============================================================================
// Identity
// ============================================================================

#[test]
fn identity_pose_gives_identity_palette() {
    let pose = identity_pose(4);
    let primitive = Primitive::new(0, 0, 1).with_bones([1, 2, 3]);

    let mut palette = SkinningPalette::new(16);
    let matrices = palette.compute(&primitive, &pose).unwrap();

    assert_eq!(matrices.len(), 3);
    for m in matrices {
        assert!(m.abs_diff_eq(Mat4::IDENTITY, common::EPSILON));
    }
}

#[test]
fn bind_pose_equal_to_current_pose_cancels_out() {
    let bind = vec![
        Affine3A::from_translation(Vec3::new(0.0, 0.0, 0.0)),
        Affine3A::from_rotation_translation(Quat::from_rotation_y(0.7), Vec3::new(0.0, 1.0, 0.0)),
        Affine3A::from_scale_rotation_translation(
            Vec3::splat(2.0),
            Quat::from_rotation_x(-0.3),
            Vec3::new(1.0, 2.0, 0.5),
        ),
    ];
    let pose = SkeletonPose::from_bind_pose(bind);
    let primitive = Primitive::new(0, 0, 1).with_bones([1, 2]);

    let mut palette = SkinningPalette::new(16);
    for m in palette.compute(&primitive, &pose).unwrap() {
        assert!(m.abs_diff_eq(Mat4::IDENTITY, 1e-4));
    }
}

// ============================================================================
// Composition Order
// ============================================================================

#[test]
fn skinning_matrix_applies_inverse_bind_then_global_then_inverse_node() {
    let a = Affine3A::from_rotation_z(std::f32::consts::FRAC_PI_2);
    let b = Affine3A::from_translation(Vec3::new(3.0, 0.0, 0.0));
    let c = Affine3A::from_scale(Vec3::new(1.0, 2.0, 1.0));

    let m = skinning_matrix(a, b, c);
    let expected = Mat4::from(c) * Mat4::from(b) * Mat4::from(a);
    assert!(m.abs_diff_eq(expected, common::EPSILON));

    // A point on +X: rotated to +Y, moved to (3,1,0), then Y scaled to (3,2,0).
    let p = m.transform_point3(Vec3::X);
    assert!(p.abs_diff_eq(Vec3::new(3.0, 2.0, 0.0), common::EPSILON));

    // Any other ordering lands elsewhere.
    let reversed = Mat4::from(a) * Mat4::from(b) * Mat4::from(c);
    assert!(!m.abs_diff_eq(reversed, 1e-3));
}

#[test]
fn palette_uses_reference_node_inverse() {
    let mut pose = identity_pose(3);
    pose.global_transforms[0] = Affine3A::from_translation(Vec3::new(0.0, 5.0, 0.0));
    pose.global_transforms[2] = Affine3A::from_rotation_y(1.0);
    pose.inverse_bind_poses[2] = Affine3A::from_translation(Vec3::new(-1.0, 0.0, 0.0));

    let primitive = Primitive::new(0, 0, 1).with_bones([2]);
    let mut palette = SkinningPalette::new(4);
    let matrices = palette.compute(&primitive, &pose).unwrap();

    let expected = Mat4::from(pose.global_transforms[0].inverse())
        * Mat4::from(pose.global_transforms[2])
        * Mat4::from(pose.inverse_bind_poses[2]);
    assert!(matrices[0].abs_diff_eq(expected, common::EPSILON));
}

// ============================================================================
// Ordering & Sizing
// ============================================================================

#[test]
fn palette_follows_primitive_bone_order() {
    let mut pose = identity_pose(4);
    for i in 0..4 {
        pose.global_transforms[i] = Affine3A::from_translation(Vec3::new(i as f32, 0.0, 0.0));
    }
    pose.global_transforms[0] = Affine3A::IDENTITY;

    let primitive = Primitive::new(0, 0, 1).with_bones([3, 1, 2]);
    let mut palette = SkinningPalette::new(8);
    let xs: Vec<f32> = palette
        .compute(&primitive, &pose)
        .unwrap()
        .iter()
        .map(|m| m.w_axis.x)
        .collect();

    assert_eq!(xs, [3.0, 1.0, 2.0]);
}

#[test]
fn palette_is_rebuilt_not_appended() {
    let pose = identity_pose(5);
    let mut palette = SkinningPalette::new(8);

    palette
        .compute(&Primitive::new(0, 0, 1).with_bones([1, 2, 3, 4]), &pose)
        .unwrap();
    let second = palette
        .compute(&Primitive::new(0, 0, 1).with_bones([1]), &pose)
        .unwrap();

    assert_eq!(second.len(), 1);
    assert_eq!(palette.matrices().len(), 1);
}

#[test]
fn primitive_without_bones_gives_empty_palette() {
    let pose = identity_pose(1);
    let mut palette = SkinningPalette::new(8);
    assert!(
        palette
            .compute(&Primitive::new(0, 0, 1), &pose)
            .unwrap()
            .is_empty()
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn too_many_bones_is_rejected() {
    let pose = identity_pose(4);
    let primitive = Primitive::new(0, 0, 1).with_bones([1, 2, 3]);
    let mut palette = SkinningPalette::new(2);

    let err = palette.compute(&primitive, &pose).unwrap_err();
    assert!(matches!(
        err,
        MaterialError::BonePaletteOverflow { bones: 3, max: 2 }
    ));
}

#[test]
fn unknown_bone_node_is_rejected() {
    let pose = identity_pose(2);
    let primitive = Primitive::new(0, 0, 1).with_bones([1, 7]);
    let mut palette = SkinningPalette::new(8);

    let err = palette.compute(&primitive, &pose).unwrap_err();
    assert!(matches!(
        err,
        MaterialError::NodeIndexOutOfRange { index: 7, len: 2, .. }
    ));
}

#[test]
fn unknown_reference_node_is_rejected() {
    let pose = identity_pose(2);
    let primitive = Primitive::new(9, 0, 1).with_bones([1]);
    let mut palette = SkinningPalette::new(8);

    assert!(palette.compute(&primitive, &pose).is_err());
}

#[test]
fn failed_rebuild_leaves_palette_empty() {
    let pose = identity_pose(3);
    let mut palette = SkinningPalette::new(8);

    palette
        .compute(&Primitive::new(0, 0, 1).with_bones([1, 2]), &pose)
        .unwrap();
    assert_eq!(palette.matrices().len(), 2);

    assert!(
        palette
            .compute(&Primitive::new(0, 0, 1).with_bones([1, 5]), &pose)
            .is_err()
    );
    assert!(palette.matrices().is_empty());

    assert!(
        palette
            .compute(&Primitive::new(0, 0, 1).with_bones([1, 2, 1, 2, 1, 2, 1, 2, 1]), &pose)
            .is_err()
    );
    assert!(palette.matrices().is_empty());
}
