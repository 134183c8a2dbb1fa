use kernsim::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

fn random_workload(rng: &mut StdRng, n: u32) -> Vec<Descriptor> {
    (0..n)
        .map(|pid| Descriptor::arriving_at(pid, rng.gen_range(0..40), rng.gen_range(1..12)))
        .collect()
}

fn all_policies(quantum: Ticks) -> Vec<Policy> {
    Algorithm::ALL
        .iter()
        .map(|&a| Policy::new(a, quantum).unwrap())
        .collect()
}

#[test]
fn test_every_policy_finishes_every_process() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let n = rng.gen_range(1..15);
        let workload = random_workload(&mut rng, n);
        let quantum = rng.gen_range(1..5);
        for policy in all_policies(quantum) {
            let done = Scheduler::new(workload.clone()).unwrap().run(policy);
            assert_eq!(done.len(), workload.len(), "{policy:?} lost a process");
            assert!(schedule_is_valid(&done), "{policy:?} produced {done:?}");
        }
    }
}

#[test]
fn test_non_preemptive_runs_are_gapless_back_to_back() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..100 {
        let workload = random_workload(&mut rng, 10);
        for policy in [Policy::Fcfs, Policy::Sjn] {
            let done = Scheduler::new(workload.clone()).unwrap().run(policy);
            for c in &done {
                assert_eq!(c.completion - c.start, c.burst);
            }
            for pair in done.windows(2) {
                // The next one starts when the CPU frees up, or when it
                // arrives if the CPU had been idle.
                assert_eq!(pair[1].start, pair[0].completion.max(pair[1].arrival));
            }
        }
    }
}

#[test]
fn test_fcfs_completes_in_arrival_order() {
    let mut rng = StdRng::seed_from_u64(3);
    let workload = random_workload(&mut rng, 25);
    let done = Scheduler::new(workload).unwrap().run(Policy::Fcfs);
    assert!(done.windows(2).all(|w| (w[0].arrival, w[0].pid) < (w[1].arrival, w[1].pid)));
}

#[test]
fn test_sjn_ignores_arrivals_during_a_burst() {
    // Pid 0 starts alone at 0; pid 1 (shorter) arrives while it runs.
    let w = vec![
        Descriptor::arriving_at(0, 0, 10),
        Descriptor::arriving_at(1, 2, 1),
        Descriptor::arriving_at(2, 1, 5),
    ];
    let done = Scheduler::new(w).unwrap().run(Policy::Sjn);
    let order: Vec<Pid> = done.iter().map(|c| c.pid).collect();
    assert_eq!(order, vec![0, 1, 2]);
    assert_eq!(done[1].start, 10);
}

#[test]
fn test_round_robin_total_work_is_conserved() {
    let mut rng = StdRng::seed_from_u64(42);
    for quantum in 1..6 {
        // Everyone is there from the start, so the CPU never idles.
        let workload: Vec<Descriptor> = (0..8)
            .map(|pid| Descriptor::arriving_at(pid, 0, rng.gen_range(1..20)))
            .collect();
        let total: Ticks = workload.iter().map(|d| d.burst).sum();
        let done = Scheduler::new(workload).unwrap().run(Policy::round_robin(quantum).unwrap());
        assert_eq!(done.iter().map(|c| c.completion).max(), Some(total));
        assert!(done.windows(2).all(|w| w[0].completion <= w[1].completion));
    }
}

#[test]
fn test_round_robin_serves_everyone_within_one_cycle() {
    // With all processes ready at 0 and quantum q, each gets the CPU within
    // the first n * q ticks.
    let workload: Vec<Descriptor> = (0..6)
        .map(|pid| Descriptor::arriving_at(pid, 0, 9))
        .collect();
    let done = Scheduler::new(workload).unwrap().run(Policy::round_robin(2).unwrap());
    assert!(done.iter().all(|c| c.start < 6 * 2));
}

#[test]
fn test_identical_runs_are_deterministic() {
    let mut rng = StdRng::seed_from_u64(9);
    let workload = random_workload(&mut rng, 12);
    for policy in all_policies(2) {
        let a = Scheduler::new(workload.clone()).unwrap().run(policy);
        let b = Scheduler::new(workload.clone()).unwrap().run(policy);
        assert_eq!(a, b);
    }
}

#[test]
fn test_abandoned_run_keeps_finished_records() {
    let mut s = Scheduler::new(demo_workload()).unwrap();
    let policy = Policy::round_robin(1).unwrap();
    let mut last_clock = s.clock();
    for _ in 0..12 {
        s.step(policy);
        assert!(s.clock() >= last_clock);
        last_clock = s.clock();
    }
    // Pid 3 finished at 11; the run stops here and nothing else is claimed.
    assert_eq!(s.completed().iter().map(|c| c.pid).collect::<Vec<_>>(), vec![3]);
    assert!(!s.is_finished());
}

#[test]
fn test_invalid_workloads_never_build() {
    assert!(matches!(
        Scheduler::new(vec![Descriptor::new(1, 3), Descriptor::new(2, 0)]),
        Err(SimError::InvalidWorkload { pid: 2, .. })
    ));
    assert!(Scheduler::new(vec![]).is_err());
}

#[test]
fn test_fresh_process_exposes_its_progress() {
    let p = Process::new(&Descriptor::arriving_at(4, 2, 6));
    assert_eq!((p.pid, p.arrival, p.burst), (4, 2, 6));
    assert_eq!(p.remaining(), 6);
    assert_eq!(p.start(), None);
    assert_eq!(p.completion(), None);
    assert!(!p.is_finished());
}
