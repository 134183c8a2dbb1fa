use crate::helpe::*;

/// What the driver hands to [Scheduler::new]: who the process is, when it
/// shows up, and how much CPU it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    pub pid:        Pid,
    pub arrival:    Ticks,
    pub burst:      Ticks,
}

impl Descriptor {
    /// Legacy constructor: the process arrives at the instant named by
    /// its own identifier.
    pub fn new(pid: Pid, burst: Ticks) -> Self {
        Self {
            pid,
            arrival: pid as Ticks,
            burst,
        }
    }

    pub fn arriving_at(pid: Pid, arrival: Ticks, burst: Ticks) -> Self {
        Self {
            pid,
            arrival,
            burst,
        }
    }
}

/// The five-process workload the interactive shell schedules.
pub fn demo_workload() -> Vec<Descriptor> {
    [(1, 10), (2, 5), (3, 2), (4, 8), (5, 4)]
        .into_iter()
        .map(|(pid, burst)| Descriptor::new(pid, burst))
        .collect()
}

/// Validates a workload. A successfully returned set is guaranteed to be
/// compliant with the scheduler's assumptions:
/// - it is not empty
/// - no process has a zero burst
/// - no identifier appears twice
///
/// Either the whole workload passes, or none of it is admitted.
pub fn init(descriptors: Vec<Descriptor>) -> Result<Vec<Descriptor>, SimError> {
    if descriptors.is_empty() {
        return Err(SimError::InvalidWorkload {
            pid:    0,
            reason: "workload is empty",
        });
    }
    let mut seen: HashSet<Pid> = HashSet::with_capacity(descriptors.len());
    for d in &descriptors {
        if d.burst == 0 {
            return Err(SimError::InvalidWorkload {
                pid:    d.pid,
                reason: "burst length must be positive",
            });
        } else if !seen.insert(d.pid) {
            return Err(SimError::InvalidWorkload {
                pid:    d.pid,
                reason: "identifier appears more than once",
            });
        }
    }

    Ok(descriptors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_descriptor_arrives_at_its_pid() {
        let d = Descriptor::new(7, 3);
        assert_eq!(d.arrival, 7);
        assert_eq!(Descriptor::arriving_at(7, 0, 3).arrival, 0);
    }

    #[test]
    fn zero_burst_rejects_whole_workload() {
        let err = init(vec![Descriptor::new(1, 4), Descriptor::new(2, 0)]).unwrap_err();
        assert!(matches!(err, SimError::InvalidWorkload { pid: 2, .. }));
    }

    #[test]
    fn duplicate_pid_is_rejected() {
        let err = init(vec![Descriptor::new(3, 1), Descriptor::arriving_at(3, 9, 2)]).unwrap_err();
        assert!(matches!(err, SimError::InvalidWorkload { pid: 3, .. }));
    }

    #[test]
    fn empty_workload_is_rejected() {
        assert!(init(vec![]).is_err());
    }

    #[test]
    fn demo_workload_is_valid() {
        assert_eq!(init(demo_workload()).unwrap().len(), 5);
    }
}
