//! Welcome to `kernsim`!
//!
//! A teaching simulator for two classic operating-system mechanisms:
//! CPU scheduling over a synthetic workload ([`Scheduler`]) and paged
//! physical memory ([`FrameTable`], [`ProcessRegistry`]).
//!
//! Nothing here runs on real hardware. Time is a plain integer counter
//! advanced by the scheduler, and memory is a vector of ownership slots.

mod process;
mod workload;
mod analyze;

pub mod sched;
pub mod mem;
pub mod stage;
pub mod config;
pub mod console;
pub mod helpe;

pub use crate::helpe::*;

/// Our fundamental unit of scheduling. A [`Process`] asks for
/// [`burst`](Process::burst) ticks of CPU time, and becomes eligible for
/// dispatch once the virtual clock reaches [`arrival`](Process::arrival).
///
/// > ***ATTENTION:*** in the legacy workload format the identifier *is*
/// > the arrival instant. [`Descriptor::new`] preserves that coupling;
/// > [`Descriptor::arriving_at`] breaks it.
///
/// Processes are created by [`Scheduler::new`], mutated only while a run is
/// in progress, and turned into [`Completion`] records once their burst has
/// been fully consumed.
#[derive(Debug, Clone)]
pub struct Process {
    pub pid:                Pid,
    pub arrival:            Ticks,
    pub burst:              Ticks,
    // Starts equal to `burst`. Only Round Robin ever leaves it somewhere
    // in between; the non-preemptive policies take it straight to zero.
    pub(crate) remaining:   Ticks,
    pub(crate) start:       Option<Ticks>,
    pub(crate) completion:  Option<Ticks>,
}

/// A discrete-event CPU scheduler.
///
/// Holds the processes that have not arrived yet (`pending`, sorted by
/// arrival), the FIFO of arrived-but-unfinished ones (`ready`), and a
/// virtual clock that never moves backwards. Every dispatch cycle first
/// admits arrivals, then lets a [`Policy`](sched::Policy) pick a process.
///
/// The queues are private: the only ways in are [`Scheduler::new`],
/// [`Scheduler::step`] and [`Scheduler::run`].
#[derive(Debug, Clone)]
pub struct Scheduler {
    pending:    VecDeque<Process>,
    ready:      VecDeque<Process>,
    clock:      Ticks,
    completed:  Vec<Completion>,
}

/// Fixed-length table of frame ownership slots.
///
/// Frame `i` covers bytes `[i * frame_size, (i + 1) * frame_size)` of the
/// simulated physical memory. A slot is either free or owned by exactly one
/// process.
#[derive(Debug, Clone)]
pub struct FrameTable {
    frames:     Vec<Option<Pid>>,
    frame_size: usize,
}

/// Maps process identifiers to their resident records, and keeps the
/// [`FrameTable`] in sync with them.
///
/// Iteration order is admission order.
#[derive(Debug, Clone)]
pub struct ProcessRegistry {
    residents:  IndexMap<Pid, Resident>,
    table:      FrameTable,
}
