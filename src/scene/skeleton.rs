use glam::Affine3A;

use crate::errors::{MaterialError, Result};

/// Read access to an externally owned skeletal pose.
///
/// Both arrays are indexed by the same stable node index.
pub trait PoseSource {
    /// World-space transform of every node for the current pose.
    fn global_transforms(&self) -> &[Affine3A];

    /// Precomputed inverse bind-pose transform of every node.
    fn inverse_bind_poses(&self) -> &[Affine3A];

    /// World transform of one node, bounds-checked.
    fn global_transform(&self, node_index: usize) -> Result<Affine3A> {
        let globals = self.global_transforms();
        globals
            .get(node_index)
            .copied()
            .ok_or(MaterialError::NodeIndexOutOfRange {
                context: "global transform",
                index: node_index,
                len: globals.len(),
            })
    }

    /// Inverse bind pose of one node, bounds-checked.
    fn inverse_bind_pose(&self, node_index: usize) -> Result<Affine3A> {
        let inverse_binds = self.inverse_bind_poses();
        inverse_binds
            .get(node_index)
            .copied()
            .ok_or(MaterialError::NodeIndexOutOfRange {
                context: "inverse bind pose",
                index: node_index,
                len: inverse_binds.len(),
            })
    }
}

/// Owned pose storage, for callers without their own transform store.
#[derive(Debug, Clone, Default)]
pub struct SkeletonPose {
    /// Recomputed by the animation system every frame.
    pub global_transforms: Vec<Affine3A>,

    /// Static after load; `inverse(bind_pose_world[i])`.
    pub inverse_bind_poses: Vec<Affine3A>,
}

impl SkeletonPose {
    /// A pose whose inverse bind poses are the inverses of `bind_pose`, and
    /// whose current pose equals the bind pose.
    #[must_use]
    pub fn from_bind_pose(bind_pose: Vec<Affine3A>) -> Self {
        let inverse_bind_poses = bind_pose.iter().map(Affine3A::inverse).collect();
        Self {
            global_transforms: bind_pose,
            inverse_bind_poses,
        }
    }

    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.global_transforms.len()
    }
}

impl PoseSource for SkeletonPose {
    fn global_transforms(&self) -> &[Affine3A] {
        &self.global_transforms
    }

    fn inverse_bind_poses(&self) -> &[Affine3A] {
        &self.inverse_bind_poses
    }
}
