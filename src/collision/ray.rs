use glam::{IVec3, Vec3};
use log::trace;

use crate::{renderer::MeshSink, voxels::VoxelWorld, voxels::normalize};

/// Samples taken per unit of `direction`
const STEPS_PER_UNIT: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RayHit {
    pub block: IVec3,
    /// Last voxel sampled before `block`. `None` when the ray starts inside a block.
    pub previous: Option<IVec3>,
}

pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Ray {
        Self { origin, direction }
    }

    /// Voxels containing the sample points `origin + direction * i / 8`
    pub fn samples(&self, max_distance: u32) -> impl Iterator<Item = IVec3> + '_ {
        let step = self.direction / STEPS_PER_UNIT as f32;
        let count = u64::from(max_distance) * u64::from(STEPS_PER_UNIT);
        (0..count).map(move |i| normalize(self.origin + step * i as f32))
    }

    /// First occupied voxel along the ray. Fixed-step sampling may skip
    /// voxels the ray only clips at a corner.
    pub fn cast<S: MeshSink>(&self, world: &VoxelWorld<S>, max_distance: u32) -> Option<RayHit> {
        if world.is_empty() {
            return None;
        }
        let mut previous: Option<IVec3> = None;
        for key in self.samples(max_distance) {
            if previous != Some(key) && world.contains(key) {
                trace!("Ray hit {key}, previous {previous:?}");
                return Some(RayHit {
                    block: key,
                    previous,
                });
            }
            previous = Some(key);
        }
        None
    }
}

pub fn hit_test<S: MeshSink>(
    world: &VoxelWorld<S>,
    origin: Vec3,
    direction: Vec3,
    max_distance: u32,
) -> Option<RayHit> {
    Ray::new(origin, direction).cast(world, max_distance)
}

#[cfg(test)]
mod tests {
    use glam::{IVec3, Vec3};

    use crate::{blocks::BlockKind, config::WorldConfig, voxels::VoxelWorld};

    use super::{Ray, hit_test};

    #[test]
    fn test_empty_world_never_hits() {
        let world = VoxelWorld::buffered(&WorldConfig::default());
        for max_distance in [0, 1, 8, 64] {
            let hit = hit_test(&world, Vec3::new(0.0, 10.0, 0.0), Vec3::X, max_distance);
            assert!(hit.is_none());
        }
    }

    #[test]
    fn test_huge_distance_does_not_overflow() {
        let mut world = VoxelWorld::buffered(&WorldConfig::default());
        let origin = Vec3::new(0.0, 10.0, 0.0);
        assert!(hit_test(&world, origin, Vec3::X, 1 << 30).is_none());
        assert!(hit_test(&world, origin, Vec3::X, u32::MAX).is_none());

        world.add(IVec3::new(3, 10, 0), BlockKind::Stone, false);
        let hit = hit_test(&world, origin, Vec3::X, u32::MAX).unwrap();
        assert_eq!(hit.block, IVec3::new(3, 10, 0));
    }

    #[test]
    fn test_hit_reports_previous_voxel() {
        let mut world = VoxelWorld::buffered(&WorldConfig::default());
        world.add(IVec3::new(4, 10, 0), BlockKind::Stone, false);
        let hit = hit_test(&world, Vec3::new(0.0, 10.0, 0.0), Vec3::X, 8).unwrap();
        assert_eq!(hit.block, IVec3::new(4, 10, 0));
        assert_eq!(hit.previous, Some(IVec3::new(3, 10, 0)));
    }

    #[test]
    fn test_hit_beyond_range_is_missed() {
        let mut world = VoxelWorld::buffered(&WorldConfig::default());
        world.add(IVec3::new(6, 0, 0), BlockKind::Stone, false);
        assert!(hit_test(&world, Vec3::ZERO, Vec3::X, 5).is_none());
        assert!(hit_test(&world, Vec3::ZERO, Vec3::X, 6).is_some());
    }

    #[test]
    fn test_start_inside_block() {
        let mut world = VoxelWorld::buffered(&WorldConfig::default());
        world.add(IVec3::ZERO, BlockKind::Stone, false);
        let hit = hit_test(&world, Vec3::ZERO, Vec3::NEG_Y, 8).unwrap();
        assert_eq!(hit.block, IVec3::ZERO);
        assert_eq!(hit.previous, None);
    }

    #[test]
    fn test_sample_count() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let samples: Vec<IVec3> = ray.samples(2).collect();
        assert_eq!(samples.len(), 16);
        assert_eq!(samples[0], IVec3::ZERO);
        // 15 / 8 rounds to 2
        assert_eq!(samples[15], IVec3::new(0, 0, 2));
    }
}
