//! The two memory models: an exact, frame-by-frame paging table behind a
//! [ProcessRegistry], and an aggregate [CapacityPool] that only counts units.
//!
//! Their semantics differ (a 1-unit process still costs a whole frame in
//! the former), so they are not merged. [MemoryModel] is the capability they
//! have in common.

pub mod frames;
pub mod registry;
pub mod pool;

pub use frames::FrameState;
pub use registry::Resident;
pub use pool::CapacityPool;

use crate::helpe::*;

/// Admit/evict/inspect, in units of memory.
pub trait MemoryModel {
    /// Reserves room for `size` units on behalf of `pid`.
    fn admit(&mut self, pid: Pid, size: usize) -> Result<(), SimError>;
    /// Releases everything `pid` holds. Returns the number of units freed.
    fn evict(&mut self, pid: Pid) -> Result<usize, SimError>;
    /// Units currently reserved, rounding included.
    fn used(&self) -> usize;
    fn capacity(&self) -> usize;
    /// A one-line picture of the model's state, for display.
    fn render(&self) -> String;

    #[inline(always)]
    fn available(&self) -> usize {
        self.capacity() - self.used()
    }
}
