//! Skinning Palette
//!
//! Builds the bone matrices a skinned primitive is drawn with. For every bone
//! influencing the primitive the palette entry transforms a vertex
//!
//! 1. by the bone's inverse bind pose (mesh space → bone space),
//! 2. then by the bone's current global transform (bone space → world),
//! 3. then by the inverse of the primitive's reference node (world → node space),
//!
//! because the shader applies the node's own world matrix afterwards. With
//! column vectors that is `inv_node * global[bone] * inv_bind[bone]`.

use glam::{Affine3A, Mat4};

use crate::errors::{MaterialError, Result};
use crate::scene::{PoseSource, Primitive};

/// One palette entry, applying `inverse_bind`, then `global`, then `inverse_node`.
#[inline]
#[must_use]
pub fn skinning_matrix(inverse_bind: Affine3A, global: Affine3A, inverse_node: Affine3A) -> Mat4 {
    (inverse_node * global * inverse_bind).into()
}

/// Reusable palette storage. The contents are rebuilt on every
/// [`compute`](Self::compute); only the allocation survives between draws.
#[derive(Debug, Clone)]
pub struct SkinningPalette {
    matrices: Vec<Mat4>,
    max_bones: usize,
}

impl SkinningPalette {
    #[must_use]
    pub fn new(max_bones: usize) -> Self {
        Self {
            matrices: Vec::with_capacity(max_bones.min(64)),
            max_bones,
        }
    }

    #[inline]
    #[must_use]
    pub fn max_bones(&self) -> usize {
        self.max_bones
    }

    /// Rebuilds the palette for `primitive` from `pose`.
    ///
    /// The result has exactly one entry per influencing bone, in the order the
    /// primitive lists them. On error the palette is left empty.
    pub fn compute(
        &mut self,
        primitive: &Primitive,
        pose: &(impl PoseSource + ?Sized),
    ) -> Result<&[Mat4]> {
        self.matrices.clear();

        let bones = primitive.bone_count();
        if bones > self.max_bones {
            return Err(MaterialError::BonePaletteOverflow {
                bones,
                max: self.max_bones,
            });
        }

        if let Err(e) = Self::fill(&mut self.matrices, primitive, pose) {
            self.matrices.clear();
            return Err(e);
        }

        log::trace!(
            "Skinning palette rebuilt: {} bones for node {}",
            bones,
            primitive.node_index
        );
        Ok(&self.matrices)
    }

    fn fill(
        matrices: &mut Vec<Mat4>,
        primitive: &Primitive,
        pose: &(impl PoseSource + ?Sized),
    ) -> Result<()> {
        let inverse_node = pose.global_transform(primitive.node_index)?.inverse();
        for &node in &primitive.bone_node_indices {
            matrices.push(skinning_matrix(
                pose.inverse_bind_pose(node)?,
                pose.global_transform(node)?,
                inverse_node,
            ));
        }
        Ok(())
    }

    /// The most recently computed palette.
    #[inline]
    #[must_use]
    pub fn matrices(&self) -> &[Mat4] {
        &self.matrices
    }
}
