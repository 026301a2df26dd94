use std::{collections::VecDeque, time::Instant};

use glam::IVec3;
use log::{debug, trace};

use crate::{blocks::BlockKind, renderer::MeshSink};

use super::world::VoxelWorld;

/// Deferred geometry work, executed in FIFO order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshJob {
    Show { position: IVec3, kind: BlockKind },
    Hide { position: IVec3 },
}

#[derive(Default)]
pub struct MeshQueue {
    queue: VecDeque<MeshJob>,
}

impl MeshQueue {
    pub fn new() -> MeshQueue {
        Self::default()
    }

    pub fn push(&mut self, job: MeshJob) {
        trace!("Enqueuing mesh job {job:?}");
        self.queue.push_back(job);
    }

    pub fn pop(&mut self) -> Option<MeshJob> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<S: MeshSink> VoxelWorld<S> {
    /// Runs queued jobs until the queue is empty or one tick worth of time is used up.
    /// Returns the number of jobs executed.
    pub fn process_queue(&mut self) -> usize {
        let start = Instant::now();
        let mut processed = 0;
        while start.elapsed() < self.tick_budget {
            let Some(job) = self.queue.pop() else {
                break;
            };
            self.run_job(job);
            processed += 1;
        }
        if processed > 0 {
            trace!(
                "Processed {processed} mesh jobs in {:?}, {} left",
                start.elapsed(),
                self.queue.len()
            );
        }
        processed
    }

    /// Runs every queued job regardless of time
    pub fn process_entire_queue(&mut self) -> usize {
        let start = Instant::now();
        let mut processed = 0;
        while let Some(job) = self.queue.pop() {
            self.run_job(job);
            processed += 1;
        }
        debug!("Drained {processed} mesh jobs in {:?}", start.elapsed());
        processed
    }

    /// Jobs that no longer match the shown set are dropped: a block hidden or
    /// replaced after its show was queued never gets geometry, and a block
    /// shown again after its hide was queued keeps it.
    fn run_job(&mut self, job: MeshJob) {
        match job {
            MeshJob::Show { position, kind } => {
                if self.shown.get(&position) == Some(&kind) {
                    self.create_mesh(position, kind);
                }
            }
            MeshJob::Hide { position } => {
                if !self.shown.contains_key(&position) {
                    self.release_mesh(position);
                }
            }
        }
    }
}
