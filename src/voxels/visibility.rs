use glam::IVec3;
use log::trace;

use crate::{
    blocks::{BlockFlags, BlockKind},
    meshes::BlockGeometry,
    renderer::{MeshSink, RenderPass},
};

use super::{coords::neighbors, mesh_queue::MeshJob, world::VoxelWorld};

impl<S: MeshSink> VoxelWorld<S> {
    /// Whether at least one face of the block at `position` can be seen.
    /// Absent positions have no faces.
    pub fn exposed(&self, position: IVec3) -> bool {
        let Some(&own) = self.blocks.get(&position) else {
            return false;
        };
        neighbors(position).any(|neighbor| match self.blocks.get(&neighbor) {
            None => true,
            Some(kind) => !kind.culls(own),
        })
    }

    /// Re-classifies the six face neighbours of `position` after an edit
    pub fn check_neighbors(&mut self, position: IVec3) {
        for neighbor in neighbors(position) {
            let Some(&kind) = self.blocks.get(&neighbor) else {
                continue;
            };
            let shown = self.shown.contains_key(&neighbor);
            if self.exposed(neighbor) {
                if !shown {
                    self.show(neighbor, kind, true);
                }
            } else if shown {
                self.hide(neighbor, true);
            }
        }
    }

    /// Marks the block as shown. Geometry is created now or by a later queue pump.
    pub fn show(&mut self, position: IVec3, kind: BlockKind, immediate: bool) {
        debug_assert_eq!(self.blocks.get(&position), Some(&kind));
        self.shown.insert(position, kind);
        if immediate {
            self.create_mesh(position, kind);
        } else {
            self.queue.push(MeshJob::Show { position, kind });
        }
    }

    /// Marks the block as hidden. Geometry is released now or by a later queue pump.
    pub fn hide(&mut self, position: IVec3, immediate: bool) {
        self.shown.remove(&position);
        if immediate {
            self.release_mesh(position);
        } else {
            self.queue.push(MeshJob::Hide { position });
        }
    }

    /// Uploads geometry for the block, dropping any stale geometry at the same position
    pub(super) fn create_mesh(&mut self, position: IVec3, kind: BlockKind) {
        self.release_mesh(position);
        let pass = if kind.has(BlockFlags::RENDERS_LATE) {
            RenderPass::Blended
        } else {
            RenderPass::Opaque
        };
        let geometry = BlockGeometry::new(position, kind);
        let handle = match pass {
            RenderPass::Opaque => self.opaque.add(geometry),
            RenderPass::Blended => self.blended.add(geometry),
        };
        trace!("Created {pass:?} mesh {handle:?} for {kind} at {position}");
        self.meshes.insert(position, (pass, handle));
    }

    pub(super) fn release_mesh(&mut self, position: IVec3) {
        let Some((pass, handle)) = self.meshes.remove(&position) else {
            return;
        };
        match pass {
            RenderPass::Opaque => self.opaque.release(handle),
            RenderPass::Blended => self.blended.release(handle),
        }
    }
}
