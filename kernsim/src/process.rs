use crate::helpe::*;

impl Process {
    /// Spawns a fresh, never-dispatched process out of a [Descriptor].
    pub fn new(d: &Descriptor) -> Self {
        Self {
            pid:        d.pid,
            arrival:    d.arrival,
            burst:      d.burst,
            remaining:  d.burst,
            start:      None,
            completion: None,
        }
    }

    /// Returns `true` if the process may enter the ready queue at `t`.
    #[inline(always)]
    pub fn has_arrived_by(&self, t: Ticks) -> bool {
        self.arrival <= t
    }

    #[inline(always)]
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    pub fn remaining(&self) -> Ticks {
        self.remaining
    }

    /// When the process first got the CPU, if it has yet.
    pub fn start(&self) -> Option<Ticks> {
        self.start
    }

    pub fn completion(&self) -> Option<Ticks> {
        self.completion
    }

    /// Burns up to `slice` ticks starting at `now`. Returns the
    /// number of ticks actually consumed, which is smaller than `slice`
    /// only when the process finishes early.
    pub(crate) fn run_for(&mut self, now: Ticks, slice: Ticks) -> Ticks {
        if self.start.is_none() {
            self.start = Some(now);
        }
        let used = slice.min(self.remaining);
        self.remaining -= used;
        if self.remaining == 0 {
            self.completion = Some(now + used);
        }

        used
    }
}

/// What a finished [Process] leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub pid:        Pid,
    pub arrival:    Ticks,
    pub burst:      Ticks,
    pub start:      Ticks,
    pub completion: Ticks,
}

impl Completion {
    /// Seals a finished process. Returns `None` if it has not
    /// finished yet.
    pub fn seal(p: &Process) -> Option<Self> {
        match (p.start, p.completion) {
            (Some(start), Some(completion)) => Some(Self {
                pid:        p.pid,
                arrival:    p.arrival,
                burst:      p.burst,
                start,
                completion,
            }),
            _ => None,
        }
    }

    /// Time from arrival to completion.
    #[inline(always)]
    pub fn turnaround(&self) -> Ticks {
        self.completion - self.arrival
    }

    /// Time spent in the ready queue.
    #[inline(always)]
    pub fn waiting(&self) -> Ticks {
        self.turnaround() - self.burst
    }

    /// Time from arrival to first dispatch.
    #[inline(always)]
    pub fn response(&self) -> Ticks {
        self.start - self.arrival
    }
}
