pub mod blocks;
pub mod collision;
pub mod command_queue;
pub mod config;
pub mod meshes;
pub mod player;
pub mod renderer;
pub mod simulation;
pub mod util;
pub mod voxels;
