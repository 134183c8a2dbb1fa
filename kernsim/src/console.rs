//! Line-oriented command dispenser. Turns text into calls on the
//! scheduler, the process registry and the concert stage, and writes
//! whatever they have to say to an output sink.

use rand::{Rng, rngs::StdRng};

use crate::{
    helpe::*,
    config::{MemoryConfig, StageConfig},
    stage::Stage,
};

pub const HELP: &str = "
Available commands:
  fcfs                 - Run FCFS scheduling
  sjn                  - Run SJN scheduling
  rr [quantum]         - Run Round Robin scheduling
  alloc <pid> <size>   - Allocate memory to a process
  dealloc <pid>        - Deallocate memory from a process
  mem                  - Display memory usage
  procs                - Display process information
  new                  - Create a new rock concert themed process
  run                  - Run all created processes
  history              - Show command history
  help                 - Display this help message
  exit                 - Exit the shell
";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Not a number: {0}")]
    BadNumber(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the configured workload under an algorithm. A missing quantum
    /// means "use the console's default".
    Schedule(Algorithm, Option<Ticks>),
    Alloc {
        pid:    Pid,
        size:   usize,
    },
    Dealloc {
        pid:    Pid,
    },
    Mem,
    Procs,
    New,
    Run,
    History,
    Help,
    Exit,
    Nothing,
}

fn number<T: std::str::FromStr>(s: &str) -> Result<T, CommandError> {
    s.parse().map_err(|_| CommandError::BadNumber(s.to_string()))
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let parts = line.split_whitespace().collect_vec();
        let Some((&head, args)) = parts.split_first() else {
            return Ok(Command::Nothing);
        };
        match (head, args) {
            ("fcfs", _)             => Ok(Command::Schedule(Algorithm::Fcfs, None)),
            ("sjn", _)              => Ok(Command::Schedule(Algorithm::Sjn, None)),
            ("rr", [])              => Ok(Command::Schedule(Algorithm::Rr, None)),
            ("rr", [q, ..])         => Ok(Command::Schedule(Algorithm::Rr, Some(number(q)?))),
            ("alloc", [pid, size, ..])  => Ok(Command::Alloc {
                pid:    number(pid)?,
                size:   number(size)?,
            }),
            ("alloc", _)            => Err(CommandError::Usage("alloc <pid> <size>")),
            ("dealloc", [pid, ..])  => Ok(Command::Dealloc { pid: number(pid)? }),
            ("dealloc", _)          => Err(CommandError::Usage("dealloc <pid>")),
            ("mem", _)              => Ok(Command::Mem),
            ("procs", _)            => Ok(Command::Procs),
            ("new", _)              => Ok(Command::New),
            ("run", _)              => Ok(Command::Run),
            ("history", _)          => Ok(Command::History),
            ("help", _)             => Ok(Command::Help),
            ("exit", _)             => Ok(Command::Exit),
            (other, _)              => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// One interactive session. Owns its own registry, stage and history;
/// nothing is shared between consoles.
pub struct Console<R: Rng = StdRng> {
    registry:   ProcessRegistry,
    stage:      Stage<R>,
    workload:   Vec<Descriptor>,
    quantum:    Ticks,
    history:    Vec<String>,
}

impl Console<StdRng> {
    pub fn new(
        memory:     &MemoryConfig,
        stage:      &StageConfig,
        workload:   Vec<Descriptor>,
        quantum:    Ticks,
    ) -> Result<Self, SimError> {
        Self::with_stage(ProcessRegistry::new(memory)?, Stage::new(stage), workload, quantum)
    }
}

impl<R: Rng> Console<R> {
    pub fn with_stage(
        registry:   ProcessRegistry,
        stage:      Stage<R>,
        workload:   Vec<Descriptor>,
        quantum:    Ticks,
    ) -> Result<Self, SimError> {
        Policy::round_robin(quantum)?;

        Ok(Self {
            registry,
            stage,
            workload:   crate::workload::init(workload)?,
            quantum,
            history:    vec![],
        })
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    /// Records `line` in the history, then carries it out. Only failures
    /// of `out` itself are returned as errors; everything else is reported
    /// on `out` and the session goes on.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> std::io::Result<Flow> {
        self.history.push(line.to_string());
        let cmd = match Command::parse(line) {
            Ok(cmd) => cmd,
            Err(e)  => {
                writeln!(out, "{e}")?;
                return Ok(Flow::Continue);
            },
        };
        debug!(?cmd, "executing");

        match cmd {
            Command::Schedule(algo, quantum)    => {
                self.schedule(algo, quantum.unwrap_or(self.quantum), out)?;
            },
            Command::Alloc { pid, size }        => match self.registry.admit(pid, size) {
                Ok(r)   => writeln!(out, "Allocated process {pid} to memory: {:?}", r.frames)?,
                Err(e)  => writeln!(out, "{e}")?,
            },
            Command::Dealloc { pid }            => match self.registry.evict(pid) {
                Ok(_)   => writeln!(out, "Deallocated process {pid} from memory")?,
                Err(e)  => writeln!(out, "{e}")?,
            },
            Command::Mem                        => {
                writeln!(out, "Memory: {}", self.registry.render())?;
            },
            Command::Procs                      => {
                for r in self.registry.list() {
                    writeln!(out, "{r}")?;
                }
            },
            Command::New                        => match self.stage.book() {
                Ok(g)   => writeln!(
                    out,
                    "Process '{}' created with size {}MB and will run for {:.2} seconds.",
                    g.band,
                    g.size,
                    g.duration_ms as f64 / 1000.0
                )?,
                Err(SimError::InsufficientMemory { .. }) => {
                    writeln!(out, "Memory allocation failed. Try freeing up memory.")?
                },
                Err(e)  => writeln!(out, "{e}")?,
            },
            Command::Run                        => {
                for g in self.stage.perform() {
                    writeln!(out, "Running process: {} ({}MB)", g.band, g.size)?;
                    writeln!(out, "Process {} completed", g.band)?;
                }
            },
            Command::History                    => {
                for (i, cmd) in self.history.iter().enumerate() {
                    writeln!(out, "{i}: {cmd}")?;
                }
            },
            Command::Help                       => write!(out, "{HELP}")?,
            Command::Exit                       => {
                writeln!(out, "Exiting shell...")?;
                return Ok(Flow::Exit);
            },
            Command::Nothing                    => {},
        }

        Ok(Flow::Continue)
    }

    fn schedule<W: Write>(&self, algo: Algorithm, quantum: Ticks, out: &mut W) -> std::io::Result<()> {
        let outcome = Policy::new(algo, quantum)
            .and_then(|policy| Ok((policy, Scheduler::new(self.workload.clone())?)));
        match outcome {
            Ok((policy, scheduler)) => {
                writeln!(out, "Running {} Scheduling...", algo.label())?;
                write!(out, "{}", results_table(&scheduler.run(policy)))
            },
            Err(e)                  => writeln!(out, "{e}"),
        }
    }
}
