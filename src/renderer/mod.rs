mod buffered;

pub use buffered::BufferedSink;

use crate::meshes::BlockGeometry;

/// Opaque reference to geometry owned by a [`MeshSink`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RenderPass {
    Opaque,
    /// Drawn after all opaque geometry with blending enabled
    Blended,
}

/// One ordered geometry batch of the render backend
pub trait MeshSink {
    fn add(&mut self, geometry: BlockGeometry) -> MeshHandle;
    fn release(&mut self, handle: MeshHandle);
}
