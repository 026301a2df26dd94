use std::collections::HashMap;

use glam::IVec3;
use log::debug;

use crate::renderer::MeshSink;

use super::{coords::sectorize, world::VoxelWorld};

/// Buckets of block positions per horizontal sector
#[derive(Debug, Clone, PartialEq)]
pub struct SectorIndex {
    sector_size: i32,
    buckets: HashMap<IVec3, Vec<IVec3>>,
}

impl SectorIndex {
    pub fn new(sector_size: i32) -> SectorIndex {
        Self {
            sector_size,
            buckets: HashMap::new(),
        }
    }

    pub fn sector_of(&self, position: IVec3) -> IVec3 {
        sectorize(position, self.sector_size)
    }

    pub fn insert(&mut self, position: IVec3) {
        let sector = self.sector_of(position);
        self.buckets.entry(sector).or_default().push(position);
    }

    /// Removes `position` from its bucket, keeping the order of the others.
    /// Empty buckets are dropped.
    pub fn remove(&mut self, position: IVec3) {
        let sector = self.sector_of(position);
        let Some(bucket) = self.buckets.get_mut(&sector) else {
            return;
        };
        if let Some(idx) = bucket.iter().position(|p| *p == position) {
            bucket.remove(idx);
        }
        if bucket.is_empty() {
            self.buckets.remove(&sector);
        }
    }

    pub fn bucket(&self, sector: IVec3) -> &[IVec3] {
        self.buckets.get(&sector).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of non-empty sectors
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of indexed positions over all sectors
    pub fn total_len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Sectors within the disc of radius `pad + 1` around `center`
    pub fn sectors_around(center: IVec3, pad: i32) -> Vec<IVec3> {
        let limit = (pad + 1) * (pad + 1);
        let mut res = vec![];
        for dx in -pad..=pad {
            for dz in -pad..=pad {
                if dx * dx + dz * dz > limit {
                    continue;
                }
                res.push(center + IVec3::new(dx, 0, dz));
            }
        }
        res
    }
}

impl<S: MeshSink> VoxelWorld<S> {
    /// Queues show jobs for the exposed blocks of newly visible sectors and
    /// hide jobs for the shown blocks of sectors that dropped out of range.
    /// Either side may be `None`.
    pub fn change_sectors(&mut self, before: Option<IVec3>, after: Option<IVec3>) {
        let before_set = before
            .map(|s| SectorIndex::sectors_around(s, self.sector_pad))
            .unwrap_or_default();
        let after_set = after
            .map(|s| SectorIndex::sectors_around(s, self.sector_pad))
            .unwrap_or_default();

        let to_show: Vec<IVec3> = after_set
            .iter()
            .filter(|s| !before_set.contains(*s))
            .copied()
            .collect();
        let to_hide: Vec<IVec3> = before_set
            .iter()
            .filter(|s| !after_set.contains(*s))
            .copied()
            .collect();

        debug!(
            "Changing sectors {before:?} -> {after:?}: showing {}, hiding {}",
            to_show.len(),
            to_hide.len()
        );
        for sector in to_show {
            self.show_sector(sector);
        }
        for sector in to_hide {
            self.hide_sector(sector);
        }
    }

    pub fn show_sector(&mut self, sector: IVec3) {
        let positions = self.sectors.bucket(sector).to_vec();
        for position in positions {
            if self.shown.contains_key(&position) || !self.exposed(position) {
                continue;
            }
            if let Some(&kind) = self.blocks.get(&position) {
                self.show(position, kind, false);
            }
        }
    }

    pub fn hide_sector(&mut self, sector: IVec3) {
        let positions = self.sectors.bucket(sector).to_vec();
        for position in positions {
            if self.shown.contains_key(&position) {
                self.hide(position, false);
            }
        }
    }
}
