use crate::helpe::*;

/// An aggregate memory model: a capacity, a running total, and who holds
/// how much. No frames, no rounding.
#[derive(Debug, Clone)]
pub struct CapacityPool {
    capacity:   usize,
    used:       usize,
    holdings:   IndexMap<Pid, usize>,
}

impl CapacityPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            used:       0,
            holdings:   IndexMap::new(),
        }
    }

    /// Reserves `size` units for `pid` if they fit.
    pub fn allocate(&mut self, pid: Pid, size: usize) -> Result<(), SimError> {
        if size == 0 {
            return Err(SimError::InvalidWorkload {
                pid,
                reason: "memory demand must be positive",
            });
        } else if self.holdings.contains_key(&pid) {
            return Err(SimError::DuplicateIdentifier(pid));
        }
        let free = self.capacity - self.used;
        if size > free {
            warn!(pid, size, free, "pool exhausted");
            return Err(SimError::InsufficientMemory { pid, needed: size, free });
        }
        self.used += size;
        self.holdings.insert(pid, size);

        Ok(())
    }

    /// Gives back whatever `pid` holds. Returns the amount released,
    /// zero if it held nothing.
    pub fn free(&mut self, pid: Pid) -> usize {
        let size = self.holdings.shift_remove(&pid).unwrap_or(0);
        self.used -= size;

        size
    }

    pub fn holding(&self, pid: Pid) -> Option<usize> {
        self.holdings.get(&pid).copied()
    }
}

impl MemoryModel for CapacityPool {
    fn admit(&mut self, pid: Pid, size: usize) -> Result<(), SimError> {
        self.allocate(pid, size)
    }

    fn evict(&mut self, pid: Pid) -> Result<usize, SimError> {
        if !self.holdings.contains_key(&pid) {
            return Err(SimError::UnknownIdentifier(pid));
        }
        Ok(self.free(pid))
    }

    fn used(&self) -> usize {
        self.used
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn render(&self) -> String {
        format!("{}/{} used by {} holders", self.used, self.capacity, self.holdings.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_to_the_brim_and_no_further() {
        let mut p = CapacityPool::new(100);
        p.allocate(1, 60).unwrap();
        p.allocate(2, 40).unwrap();
        assert_eq!(p.available(), 0);
        assert!(matches!(
            p.allocate(3, 1),
            Err(SimError::InsufficientMemory { pid: 3, needed: 1, free: 0 })
        ));
    }

    #[test]
    fn free_is_lenient_but_evict_is_not() {
        let mut p = CapacityPool::new(10);
        assert_eq!(p.free(4), 0);
        assert!(matches!(p.evict(4), Err(SimError::UnknownIdentifier(4))));
        p.allocate(4, 7).unwrap();
        assert_eq!(p.evict(4).unwrap(), 7);
        assert_eq!(p.used(), 0);
    }

    #[test]
    fn same_holder_cannot_double_book() {
        let mut p = CapacityPool::new(10);
        p.allocate(1, 3).unwrap();
        assert!(matches!(p.allocate(1, 3), Err(SimError::DuplicateIdentifier(1))));
        assert_eq!(p.used(), 3);
        assert_eq!(p.holding(1), Some(3));
    }

    #[test]
    fn models_disagree_on_rounding() {
        use crate::config::MemoryConfig;

        let mut paged = ProcessRegistry::new(&MemoryConfig::default()).unwrap();
        let mut pool = CapacityPool::new(100);
        let models: [&mut dyn MemoryModel; 2] = [&mut paged, &mut pool];
        let used = models.into_iter()
            .map(|m| {
                m.admit(1, 11).unwrap();
                m.used()
            })
            .collect_vec();
        assert_eq!(used, vec![20, 11]);
    }
}
