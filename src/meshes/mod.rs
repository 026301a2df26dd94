mod block_geometry;

pub use block_geometry::BlockGeometry;
pub use block_geometry::VERTEX_FLOATS;
pub use block_geometry::VERTICES_PER_BLOCK;
