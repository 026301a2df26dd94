use glam::{IVec3, Vec3};

/// Face-adjacent offsets in the order top, bottom, left, right, front, back.
/// Collision resolution and geometry both rely on this order.
pub const FACES: [IVec3; 6] = [
    IVec3::new(0, 1, 0),
    IVec3::new(0, -1, 0),
    IVec3::new(-1, 0, 0),
    IVec3::new(1, 0, 0),
    IVec3::new(0, 0, 1),
    IVec3::new(0, 0, -1),
];

/// Returns the voxel containing `position`. Ties round to even.
pub fn normalize(position: Vec3) -> IVec3 {
    IVec3::new(
        position.x.round_ties_even() as i32,
        position.y.round_ties_even() as i32,
        position.z.round_ties_even() as i32,
    )
}

/// Horizontal sector containing `position`, y is always 0
pub fn sectorize(position: IVec3, sector_size: i32) -> IVec3 {
    debug_assert!(sector_size > 0, "Sector size needs to be > 0");
    IVec3::new(
        position.x.div_euclid(sector_size),
        0,
        position.z.div_euclid(sector_size),
    )
}

pub fn neighbors(position: IVec3) -> impl Iterator<Item = IVec3> {
    FACES.into_iter().map(move |face| position + face)
}
