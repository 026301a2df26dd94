mod coords;
pub mod generators;
mod mesh_queue;
mod sectors;
mod visibility;
mod world;

pub use coords::{FACES, neighbors, normalize, sectorize};
pub use mesh_queue::{MeshJob, MeshQueue};
pub use sectors::SectorIndex;
pub use world::{VoxelWorld, WorldStats};
