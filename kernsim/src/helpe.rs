pub use std::{
    collections::{HashSet, VecDeque},
    io::{BufRead, BufReader, Write},
    path::PathBuf,
    num::NonZeroUsize,
    fmt,
};
pub use thiserror::Error;
pub use itertools::Itertools;
pub use rayon::prelude::*;
pub use indexmap::IndexMap;
pub use clap::{Parser, ValueEnum};
pub use tracing::{debug, info, warn};

pub use crate::{Process, Scheduler, FrameTable, ProcessRegistry,
    process::Completion,
    workload::*,
    analyze::*,
    sched::{Policy, Step},
    mem::{MemoryModel, FrameState, Resident, CapacityPool},
};

/// The unit for measuring simulated time. Bursts, arrivals, quanta and
/// clock readings all share it.
pub type Ticks = usize;

/// Process identifier. Shared by the scheduler and the memory side,
/// even though the two never exchange process objects.
pub type Pid = u32;

/// Index of a frame inside a [FrameTable].
pub type FrameIdx = usize;

/// Everything that can go wrong while talking to the simulator.
///
/// None of these are fatal: a failed request leaves the scheduler, frame
/// table and registry exactly as they were.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Process {0} already exists.")]
    DuplicateIdentifier(Pid),
    #[error("No such process: {0}")]
    UnknownIdentifier(Pid),
    #[error("Not enough memory to allocate process {pid} (needs {needed}, {free} available)")]
    InsufficientMemory {
        pid:    Pid,
        needed: usize,
        free:   usize,
    },
    #[error("Invalid workload (process {pid}): {reason}")]
    InvalidWorkload {
        pid:    Pid,
        reason: &'static str,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Line {line}: {message}")]
    Parse {
        line:       usize,
        message:    String,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum Algorithm {
    /// First-come-first-served, non-preemptive
    Fcfs,
    /// Shortest job next, non-preemptive
    Sjn,
    /// Round Robin with a fixed quantum
    Rr,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Fcfs, Algorithm::Sjn, Algorithm::Rr];

    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Sjn  => "SJN",
            Algorithm::Rr   => "Round Robin",
        }
    }
}

/// Defines the interface for reading workloads.
///
/// A CSV reader ships with the crate; anything else that can produce
/// [Descriptor]s may implement this as well.
pub trait WorkloadGen<T> {
    fn new(path: PathBuf) -> Self;
    /// Reads every descriptor. Validation is *not* done here, see
    /// [init](crate::init).
    fn read_descriptors(&self) -> Result<Vec<Descriptor>, SimError>;
    /// Turns one parsed record into a [Descriptor].
    fn gen_single(&self, d: T, line: usize) -> Result<Descriptor, SimError>;
}

//---START EXTERNAL INTERFACES
/// Reads `pid,burst[,arrival]` rows. The first line is a header.
///
/// Rows without an arrival column fall back to the legacy
/// "arrival equals pid" convention.
pub struct CsvWorkload {
    pub path: PathBuf,
}

impl WorkloadGen<&[&str]> for CsvWorkload {
    fn new(path: PathBuf) -> Self {
        Self {
            path
        }
    }

    fn read_descriptors(&self) -> Result<Vec<Descriptor>, SimError> {
        let fd = std::fs::File::open(self.path.as_path())?;
        let reader = BufReader::new(fd);
        let mut res = vec![];
        for (idx, line) in reader.lines()
            .enumerate()
            // First line is the header!
            .skip(1) {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let fields = trimmed.split(',')
                .map(str::trim)
                .collect_vec();
            res.push(self.gen_single(fields.as_slice(), idx + 1)?);
        }

        Ok(res)
    }

    fn gen_single(&self, d: &[&str], line: usize) -> Result<Descriptor, SimError> {
        let num = |s: &str, what: &str| -> Result<usize, SimError> {
            s.parse::<usize>().map_err(|_| SimError::Parse {
                line,
                message: format!("bad {what} `{s}`"),
            })
        };
        match d {
            [pid, burst]            => {
                let pid = pid_from(num(*pid, "pid")?, line)?;
                Ok(Descriptor::new(pid, num(*burst, "burst")?))
            },
            [pid, burst, arrival]   => {
                let pid = pid_from(num(*pid, "pid")?, line)?;
                Ok(Descriptor::arriving_at(pid, num(*arrival, "arrival")?, num(*burst, "burst")?))
            },
            _                       => Err(SimError::Parse {
                line,
                message: format!("expected 2 or 3 fields, found {}", d.len()),
            }),
        }
    }
}

fn pid_from(v: usize, line: usize) -> Result<Pid, SimError> {
    Pid::try_from(v).map_err(|_| SimError::Parse {
        line,
        message: format!("pid {v} out of range"),
    })
}
//---END EXTERNAL INTERFACES

/// Reads and validates a workload in one go.
pub fn read_from_path<T, B>(file_path: PathBuf) -> Result<Vec<Descriptor>, SimError>
where T: WorkloadGen<B> {
    let reader = T::new(file_path);
    let descriptors = reader.read_descriptors()?;
    crate::workload::init(descriptors)
}
