pub mod dispatch;

use crate::helpe::*;

/// How the next process is picked out of the ready queue, and for how long
/// it may run.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Policy {
    Fcfs,
    Sjn,
    RoundRobin {
        quantum: NonZeroUsize,
    },
}

impl Policy {
    /// Builds a policy from its command-line name. The quantum is ignored
    /// unless `algo` is Round Robin, in which case it must be positive.
    pub fn new(algo: Algorithm, quantum: Ticks) -> Result<Self, SimError> {
        match algo {
            Algorithm::Fcfs => Ok(Policy::Fcfs),
            Algorithm::Sjn  => Ok(Policy::Sjn),
            Algorithm::Rr   => Self::round_robin(quantum),
        }
    }

    pub fn round_robin(quantum: Ticks) -> Result<Self, SimError> {
        NonZeroUsize::new(quantum)
            .map(|quantum| Policy::RoundRobin { quantum })
            .ok_or_else(|| SimError::InvalidConfig(String::from("quantum must be positive")))
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Policy::Fcfs                => Algorithm::Fcfs,
            Policy::Sjn                 => Algorithm::Sjn,
            Policy::RoundRobin { .. }   => Algorithm::Rr,
        }
    }
}

/// The outcome of a single dispatch cycle.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Step {
    /// Nothing was ready; the clock moved forward by one tick.
    Idle {
        clock: Ticks,
    },
    /// `pid` held the CPU over `[from, to)`.
    Ran {
        pid:        Pid,
        from:       Ticks,
        to:         Ticks,
        finished:   bool,
    },
    /// Every process has completed.
    Done,
}

impl Scheduler {
    /// Builds a scheduler over a validated copy of `descriptors`. These need
    /// not be sorted: pending processes are ordered by arrival, then pid.
    pub fn new(descriptors: Vec<Descriptor>) -> Result<Self, SimError> {
        let mut processes = crate::workload::init(descriptors)?
            .iter()
            .map(Process::new)
            .collect_vec();
        processes.sort_by_key(|p| (p.arrival, p.pid));
        debug!(processes = processes.len(), "workload accepted");

        Ok(Self {
            pending:    processes.into(),
            ready:      VecDeque::new(),
            clock:      0,
            completed:  vec![],
        })
    }

    #[inline(always)]
    pub fn clock(&self) -> Ticks {
        self.clock
    }

    /// Returns `true` once nothing is left to run.
    #[inline(always)]
    pub fn is_finished(&self) -> bool {
        self.pending.is_empty() && self.ready.is_empty()
    }

    /// Finished processes, in completion order.
    pub fn completed(&self) -> &[Completion] {
        &self.completed
    }

    /// Identifiers currently waiting in the ready queue, head first.
    pub fn ready_pids(&self) -> impl Iterator<Item = Pid> + '_ {
        self.ready.iter().map(|p| p.pid)
    }

    /// Moves every pending process that has arrived by now to the tail of
    /// the ready queue, keeping their relative order.
    fn admit_arrivals(&mut self) {
        while let Some(next) = self.pending.front() {
            if !next.has_arrived_by(self.clock) {
                break;
            }
            if let Some(p) = self.pending.pop_front() {
                debug!(pid = p.pid, clock = self.clock, "admitted to ready queue");
                self.ready.push_back(p);
            }
        }
    }

    /// Runs exactly one admit-then-dispatch cycle under `policy`.
    ///
    /// A run may be abandoned between any two calls without breaking the
    /// scheduler's invariants. Mixing policies across calls is allowed but
    /// rarely meaningful.
    pub fn step(&mut self, policy: Policy) -> Step {
        if self.is_finished() {
            return Step::Done;
        }
        self.admit_arrivals();

        let Some(mut current) = dispatch::select(&mut self.ready, policy) else {
            self.clock += 1;
            debug!(clock = self.clock, "idle tick");
            return Step::Idle { clock: self.clock };
        };

        // Reconcile with the arrival instant.
        self.clock = self.clock.max(current.arrival);
        let from = self.clock;
        let used = current.run_for(from, dispatch::slice(policy, &current));
        self.clock += used;
        debug!(pid = current.pid, from, to = self.clock, "dispatched");

        let pid = current.pid;
        match Completion::seal(&current) {
            Some(done) => {
                info!(pid, completion = done.completion, "process completed");
                self.completed.push(done);
                Step::Ran { pid, from, to: self.clock, finished: true }
            },
            None => {
                // Back to the tail before the next admission pass, so it
                // stays ahead of whatever arrived during its slice.
                self.ready.push_back(current);
                Step::Ran { pid, from, to: self.clock, finished: false }
            },
        }
    }

    /// Drives the scheduler to completion and returns one record per
    /// process, in completion order.
    pub fn run(mut self, policy: Policy) -> Vec<Completion> {
        info!("Running {} scheduling...", policy.algorithm().label());
        while self.step(policy) != Step::Done {}
        info!(makespan = self.clock, "run finished");

        self.completed
    }

    /// Runs every algorithm over its own copy of this scheduler, in
    /// parallel. Results come back in [Algorithm::ALL] order.
    pub fn compare(&self, quantum: Ticks) -> Result<Vec<(Algorithm, Vec<Completion>)>, SimError> {
        Algorithm::ALL
            .par_iter()
            .map(|&algo| -> Result<_, SimError> {
                let policy = Policy::new(algo, quantum)?;
                Ok((algo, self.clone().run(policy)))
            })
            .collect()
    }
}
