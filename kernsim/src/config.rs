use crate::helpe::*;

pub const DEFAULT_MEMORY_SIZE:  usize = 100;
pub const DEFAULT_FRAME_SIZE:   usize = 10;
pub const DEFAULT_STAGE_SIZE:   usize = 1024;
pub const DEFAULT_QUANTUM:      Ticks = 1;

/// Shape of the simulated physical memory.
#[derive(clap::Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryConfig {
    /// Total physical memory, in the same units as the frame size
    #[arg(short = 'm', long, default_value_t = DEFAULT_MEMORY_SIZE)]
    pub memory_size:    usize,

    /// Capacity of a single frame
    #[arg(short = 'p', long, default_value_t = DEFAULT_FRAME_SIZE)]
    pub frame_size:     usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            memory_size:    DEFAULT_MEMORY_SIZE,
            frame_size:     DEFAULT_FRAME_SIZE,
        }
    }
}

impl MemoryConfig {
    /// Number of whole frames that fit. A trailing partial frame is
    /// not addressable.
    #[inline(always)]
    pub fn frame_count(&self) -> usize {
        self.memory_size.checked_div(self.frame_size).unwrap_or(0)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.frame_size == 0 {
            Err(SimError::InvalidConfig(String::from("frame size must be positive")))
        } else if self.frame_count() == 0 {
            Err(SimError::InvalidConfig(format!(
                "memory of {} cannot hold a single frame of {}",
                self.memory_size,
                self.frame_size
            )))
        } else { Ok(()) }
    }
}

/// Knobs for the concert demo.
#[derive(clap::Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageConfig {
    /// Capacity of the aggregate memory pool the demo books gigs into
    #[arg(long, default_value_t = DEFAULT_STAGE_SIZE)]
    pub stage_size: usize,

    /// Seed for the demo's random bookings (random if omitted)
    #[arg(long)]
    pub seed:       Option<u64>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            stage_size: DEFAULT_STAGE_SIZE,
            seed:       None,
        }
    }
}

/// Maps repeated `-v` flags to a log level.
pub fn verbosity(count: u8) -> tracing::Level {
    match count {
        0   => tracing::Level::WARN,
        1   => tracing::Level::INFO,
        2   => tracing::Level::DEBUG,
        _   => tracing::Level::TRACE,
    }
}

/// Installs the global `tracing` subscriber. Safe to call more than once;
/// later calls leave the first subscriber in place and return `false`.
pub fn init_logging(count: u8) -> bool {
    match tracing_subscriber::fmt()
        .with_max_level(verbosity(count))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
    {
        Ok(())  => true,
        Err(e)  => {
            debug!(error = %e, "keeping the installed subscriber");
            false
        },
    }
}
