use crate::helpe::*;

/// Removes the next process to run from `ready`, or returns `None` if the
/// queue is empty.
///
/// FCFS and Round Robin take the head. SJN scans the whole queue for the
/// smallest burst; among equal bursts the one closest to the head wins, so
/// the choice is a pure function of the queue's current order.
pub fn select(ready: &mut VecDeque<Process>, policy: Policy) -> Option<Process> {
    match policy {
        Policy::Fcfs | Policy::RoundRobin { .. }    => ready.pop_front(),
        Policy::Sjn                                 => {
            let idx = ready.iter().position_min_by_key(|p| p.burst)?;
            ready.remove(idx)
        },
    }
}

/// The longest stretch `p` may hold the CPU for under `policy`.
#[inline(always)]
pub fn slice(policy: Policy, p: &Process) -> Ticks {
    match policy {
        Policy::RoundRobin { quantum }  => quantum.get(),
        _                               => p.remaining,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(jobs: &[(Pid, Ticks)]) -> VecDeque<Process> {
        jobs.iter()
            .map(|&(pid, burst)| Process::new(&Descriptor::new(pid, burst)))
            .collect()
    }

    #[test]
    fn sjn_tie_goes_to_the_head_side() {
        let snapshot = queue(&[(4, 6), (2, 3), (9, 3), (1, 3)]);
        let mut first = snapshot.clone();
        let mut second = snapshot.clone();
        let a = select(&mut first, Policy::Sjn).unwrap();
        let b = select(&mut second, Policy::Sjn).unwrap();
        assert_eq!(a.pid, 2);
        assert_eq!(a.pid, b.pid);
        // Removal happens mid-queue; the rest keep their order.
        assert_eq!(first.iter().map(|p| p.pid).collect_vec(), vec![4, 9, 1]);
    }

    #[test]
    fn fifo_policies_take_the_head() {
        let mut q = queue(&[(5, 1), (3, 9)]);
        assert_eq!(select(&mut q, Policy::Fcfs).unwrap().pid, 5);
        let rr = Policy::round_robin(2).unwrap();
        assert_eq!(select(&mut q, rr).unwrap().pid, 3);
        assert!(select(&mut q, Policy::Sjn).is_none());
    }

    #[test]
    fn slice_is_the_quantum_only_under_round_robin() {
        let p = Process::new(&Descriptor::new(1, 7));
        assert_eq!(slice(Policy::Fcfs, &p), 7);
        assert_eq!(slice(Policy::Sjn, &p), 7);
        assert_eq!(slice(Policy::round_robin(3).unwrap(), &p), 3);
    }
}
