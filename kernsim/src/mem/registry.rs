use indexmap::map::Entry;

use crate::{helpe::*, config::MemoryConfig};

/// A process that currently holds memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resident {
    pub pid:    Pid,
    pub size:   usize,
    // Ascending. Length is always `ceil(size / frame_size)`.
    pub frames: Vec<FrameIdx>,
}

impl fmt::Display for Resident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PID: {}, Size: {}, Pages: {:?}", self.pid, self.size, self.frames)
    }
}

impl ProcessRegistry {
    pub fn new(config: &MemoryConfig) -> Result<Self, SimError> {
        Ok(Self {
            residents:  IndexMap::new(),
            table:      FrameTable::new(config)?,
        })
    }

    /// Registers `pid` and gives it enough frames for `size` units.
    ///
    /// A known `pid` is refused before any frame is touched. If the
    /// allocation fails the process is not registered, so the very same
    /// request can be retried once memory frees up.
    pub fn admit(&mut self, pid: Pid, size: usize) -> Result<&Resident, SimError> {
        match self.residents.entry(pid) {
            Entry::Occupied(_)  => {
                warn!(pid, "admission refused: already resident");
                Err(SimError::DuplicateIdentifier(pid))
            },
            Entry::Vacant(slot) => {
                let frames = self.table.allocate(pid, size)?;
                info!("Allocated process {pid} to memory: {frames:?}");
                let resident: &Resident = slot.insert(Resident { pid, size, frames });
                Ok(resident)
            },
        }
    }

    /// Releases every frame of `pid` and forgets it. Unknown identifiers
    /// are reported and change nothing.
    pub fn evict(&mut self, pid: Pid) -> Result<Resident, SimError> {
        if !self.residents.contains_key(&pid) {
            return Err(SimError::UnknownIdentifier(pid));
        }
        self.table.free(pid);
        let gone = self.residents
            .shift_remove(&pid)
            .ok_or(SimError::UnknownIdentifier(pid))?;
        debug_assert!(frames_are_consistent(self), "Frame table out of sync!");
        info!("Deallocated process {pid} from memory");

        Ok(gone)
    }

    pub fn get(&self, pid: Pid) -> Option<&Resident> {
        self.residents.get(&pid)
    }

    /// Residents in admission order.
    pub fn list(&self) -> impl Iterator<Item = &Resident> + '_ {
        self.residents.values()
    }

    pub fn len(&self) -> usize {
        self.residents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residents.is_empty()
    }

    pub fn table(&self) -> &FrameTable {
        &self.table
    }

    /// See [FrameTable::snapshot].
    pub fn memory_view(&self) -> impl Iterator<Item = FrameState> + Clone + '_ {
        self.table.snapshot()
    }
}

impl MemoryModel for ProcessRegistry {
    fn admit(&mut self, pid: Pid, size: usize) -> Result<(), SimError> {
        ProcessRegistry::admit(self, pid, size).map(|_| ())
    }

    fn evict(&mut self, pid: Pid) -> Result<usize, SimError> {
        let gone = ProcessRegistry::evict(self, pid)?;
        Ok(gone.frames.len() * self.table.frame_size())
    }

    fn used(&self) -> usize {
        self.table.used_frames() * self.table.frame_size()
    }

    fn capacity(&self) -> usize {
        self.table.frame_count() * self.table.frame_size()
    }

    fn render(&self) -> String {
        self.table.render()
    }
}
