use crate::{helpe::*, config::MemoryConfig};

/// What a single frame holds.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FrameState {
    Free,
    Owned(Pid),
}

impl fmt::Display for FrameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameState::Free        => f.pad("."),
            FrameState::Owned(pid)  => f.pad(&pid.to_string()),
        }
    }
}

impl From<Option<Pid>> for FrameState {
    fn from(slot: Option<Pid>) -> Self {
        match slot {
            Some(pid)   => FrameState::Owned(pid),
            None        => FrameState::Free,
        }
    }
}

impl FrameTable {
    /// Creates an all-free table shaped after `config`.
    pub fn new(config: &MemoryConfig) -> Result<Self, SimError> {
        config.validate()?;

        Ok(Self {
            frames:     vec![None; config.frame_count()],
            frame_size: config.frame_size,
        })
    }

    #[inline(always)]
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    #[inline(always)]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn used_frames(&self) -> usize {
        self.frames.iter()
            .filter(|f| f.is_some())
            .count()
    }

    #[inline(always)]
    pub fn free_frames(&self) -> usize {
        self.frame_count() - self.used_frames()
    }

    /// Number of frames a demand of `size` units occupies.
    #[inline(always)]
    pub fn pages_needed(&self, size: usize) -> usize {
        size.div_ceil(self.frame_size)
    }

    /// Hands `pid` the lowest-indexed free frames that cover `size` units.
    /// The frames need not be adjacent.
    ///
    /// Either every needed frame is assigned, or the table is left
    /// untouched. Callers are expected to keep `pid` unique; the table
    /// itself does not check.
    pub fn allocate(&mut self, pid: Pid, size: usize) -> Result<Vec<FrameIdx>, SimError> {
        if size == 0 {
            return Err(SimError::InvalidWorkload {
                pid,
                reason: "memory demand must be positive",
            });
        }
        let needed = self.pages_needed(size);
        let picked = self.frames.iter()
            .positions(|f| f.is_none())
            .take(needed)
            .collect_vec();
        if picked.len() < needed {
            let free = self.free_frames();
            warn!(pid, needed, free, "not enough free frames");
            return Err(SimError::InsufficientMemory { pid, needed, free });
        }
        for &idx in &picked {
            self.frames[idx] = Some(pid);
        }
        debug!(pid, frames = ?picked, "frames assigned");

        Ok(picked)
    }

    /// Clears every frame owned by `pid`. Returns how many were cleared;
    /// zero if `pid` owned nothing.
    pub fn free(&mut self, pid: Pid) -> usize {
        let mut cleared = 0;
        for slot in self.frames.iter_mut().filter(|f| **f == Some(pid)) {
            *slot = None;
            cleared += 1;
        }
        debug!(pid, cleared, "frames released");

        cleared
    }

    /// Frames currently owned by `pid`, in ascending order.
    pub fn frames_of(&self, pid: Pid) -> Vec<FrameIdx> {
        self.frames.iter()
            .positions(|f| *f == Some(pid))
            .collect()
    }

    /// A read-only, lazily produced view of every frame in index order.
    /// Clone the iterator to walk it again.
    pub fn snapshot(&self) -> impl Iterator<Item = FrameState> + Clone + '_ {
        self.frames.iter().map(|&f| FrameState::from(f))
    }

    /// Renders the table one cell per frame, e.g. `111..22...`. Cells
    /// widen when an owner needs more than one digit.
    pub fn render(&self) -> String {
        let width = self.frames.iter()
            .flatten()
            .map(|pid| pid.to_string().len())
            .max()
            .unwrap_or(1);
        if width == 1 {
            self.snapshot().join("")
        } else {
            self.snapshot()
                .map(|s| format!("{s:>width$}"))
                .join(" ")
        }
    }
}
