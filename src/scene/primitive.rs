use smallvec::SmallVec;

use crate::errors::{MaterialError, Result};

/// A drawable range of an actor's index buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Primitive {
    /// Node whose transform places the primitive in the world.
    pub node_index: usize,
    /// Skeleton nodes influencing this primitive; position `i` is palette slot `i`.
    pub bone_node_indices: SmallVec<[usize; 32]>,
    /// First index of the primitive inside the shared index buffer.
    pub index_offset: u32,
    pub num_triangles: u32,
}

impl Primitive {
    #[must_use]
    pub fn new(node_index: usize, index_offset: u32, num_triangles: u32) -> Self {
        Self {
            node_index,
            bone_node_indices: SmallVec::new(),
            index_offset,
            num_triangles,
        }
    }

    #[must_use]
    pub fn with_bones(mut self, bones: impl IntoIterator<Item = usize>) -> Self {
        self.bone_node_indices.extend(bones);
        self
    }

    #[inline]
    #[must_use]
    pub fn bone_count(&self) -> usize {
        self.bone_node_indices.len()
    }

    /// Number of indices drawn, three per triangle.
    #[inline]
    pub fn index_count(&self) -> Result<u32> {
        self.num_triangles
            .checked_mul(3)
            .ok_or(MaterialError::IndexCountOverflow {
                num_triangles: self.num_triangles,
            })
    }
}
