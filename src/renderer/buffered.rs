use std::collections::HashMap;

use log::warn;

use crate::meshes::BlockGeometry;

use super::{MeshHandle, MeshSink};

/// CPU side sink keeping every uploaded block geometry until released.
/// Stands in for a GPU batch in headless runs and tests.
#[derive(Default)]
pub struct BufferedSink {
    meshes: HashMap<MeshHandle, BlockGeometry>,
    next_handle: u64,
    total_added: usize,
    total_released: usize,
}

impl BufferedSink {
    pub fn new() -> BufferedSink {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn get(&self, handle: MeshHandle) -> Option<&BlockGeometry> {
        self.meshes.get(&handle)
    }

    pub fn total_added(&self) -> usize {
        self.total_added
    }

    pub fn total_released(&self) -> usize {
        self.total_released
    }

    /// Bytes that would be uploaded for the currently held geometry
    pub fn byte_size(&self) -> usize {
        self.meshes
            .values()
            .map(|g| g.vertex_bytes().len() + g.tex_coord_bytes().len())
            .sum()
    }
}

impl MeshSink for BufferedSink {
    fn add(&mut self, geometry: BlockGeometry) -> MeshHandle {
        let handle = MeshHandle(self.next_handle);
        self.next_handle += 1;
        self.total_added += 1;
        self.meshes.insert(handle, geometry);
        handle
    }

    fn release(&mut self, handle: MeshHandle) {
        if self.meshes.remove(&handle).is_none() {
            warn!("Released unknown mesh handle {handle:?}");
            return;
        }
        self.total_released += 1;
    }
}
