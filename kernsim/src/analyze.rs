use crate::helpe::*;

/// Aggregate figures for one scheduling run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub processes:          usize,
    pub makespan:           Ticks,
    pub avg_turnaround:     f64,
    pub avg_waiting:        f64,
    pub avg_response:       f64,
    // Completed processes per tick of makespan.
    pub throughput:         f64,
}

impl Summary {
    /// Returns `None` for an empty run.
    pub fn of(done: &[Completion]) -> Option<Self> {
        if done.is_empty() {
            return None;
        }
        let n = done.len() as f64;
        let avg = |f: fn(&Completion) -> Ticks| {
            done.iter().map(f).sum::<Ticks>() as f64 / n
        };
        let makespan = done.iter()
            .map(|c| c.completion)
            .max()
            .unwrap_or(0);

        Some(Self {
            processes:      done.len(),
            makespan,
            avg_turnaround: avg(Completion::turnaround),
            avg_waiting:    avg(Completion::waiting),
            avg_response:   avg(Completion::response),
            throughput:     if makespan == 0 { 0.0 } else { n / makespan as f64 },
        })
    }
}

/// Renders completion records the way the shell prints them, followed by
/// the per-run averages.
pub fn results_table(done: &[Completion]) -> String {
    let mut out = String::from("PID\tBurst\tStart\tCompletion\tTurnaround\tWaiting\n");
    for c in done {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t\t{}\t\t{}\n",
            c.pid, c.burst, c.start, c.completion, c.turnaround(), c.waiting()
        ));
    }
    if let Some(s) = Summary::of(done) {
        out.push_str(&format!(
            "Average turnaround:\t{:.2}\nAverage waiting:\t{:.2}\nAverage response:\t{:.2}\nMakespan:\t\t{}\n",
            s.avg_turnaround,
            s.avg_waiting,
            s.avg_response,
            s.makespan
        ));
    }

    out
}

/// Sanity check for a finished run: every process started no earlier than
/// it arrived, got at least its burst worth of wall span, and the CPU was
/// never asked to do more work than the makespan allows.
pub fn schedule_is_valid(done: &[Completion]) -> bool {
    let busy: Ticks = done.iter().map(|c| c.burst).sum();
    let first_arrival = done.iter().map(|c| c.arrival).min().unwrap_or(0);
    let makespan = done.iter().map(|c| c.completion).max().unwrap_or(0);
    let ids: HashSet<Pid> = done.iter().map(|c| c.pid).collect();

    ids.len() == done.len()
        && busy <= makespan - first_arrival.min(makespan)
        && done.iter().all(|c| c.start >= c.arrival && c.completion >= c.start + c.burst)
}

/// Checks the paging invariants of a registry: each resident owns exactly
/// `ceil(size / frame_size)` frames, those are exactly the frames the table
/// attributes to it, and no frame is owned without a resident.
pub fn frames_are_consistent(reg: &ProcessRegistry) -> bool {
    let table = reg.table();
    let mut claimed = 0;
    for r in reg.list() {
        if r.frames.len() != table.pages_needed(r.size) { return false; }
        if table.frames_of(r.pid) != r.frames { return false; }
        claimed += r.frames.len();
    }

    claimed == table.used_frames()
        && table.used_frames() + table.free_frames() == table.frame_count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fcfs_demo_summary() {
        let done = Scheduler::new(demo_workload()).unwrap().run(Policy::Fcfs);
        let s = Summary::of(&done).unwrap();
        // Turnarounds: 10, 14, 15, 22, 25.
        assert_eq!(s.avg_turnaround, 17.2);
        // Waits: 0, 9, 13, 14, 21.
        assert_eq!(s.avg_waiting, 11.4);
        assert_eq!(s.avg_response, 11.4);
        assert_eq!(s.makespan, 30);
        assert!(schedule_is_valid(&done));
    }

    #[test]
    fn table_lists_every_process() {
        let done = Scheduler::new(demo_workload()).unwrap().run(Policy::Sjn);
        let table = results_table(&done);
        assert!(table.starts_with("PID\tBurst\tStart\tCompletion"));
        assert!(table.contains("3\t2\t11\t13\t"));
        assert!(table.contains("Makespan:\t\t30"));
        assert_eq!(table.lines().count(), 1 + 5 + 4);
    }

    #[test]
    fn empty_run_has_no_summary() {
        assert!(Summary::of(&[]).is_none());
        assert_eq!(results_table(&[]).lines().count(), 1);
    }

    #[test]
    fn overlapping_claims_are_caught() {
        let bogus = [
            Completion { pid: 1, arrival: 0, burst: 5, start: 0, completion: 5 },
            Completion { pid: 2, arrival: 0, burst: 5, start: 0, completion: 5 },
        ];
        assert!(!schedule_is_valid(&bogus));
    }
}
