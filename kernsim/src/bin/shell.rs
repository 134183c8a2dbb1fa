use kernsim::{
    *,
    config::{DEFAULT_QUANTUM, MemoryConfig, StageConfig, init_logging},
    console::{Console, Flow},
};
use rustyline::{Editor, error::ReadlineError};

/// An interactive shell over the scheduler and the paged memory simulator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    memory:     MemoryConfig,

    #[command(flatten)]
    stage:      StageConfig,

    /// CSV workload scheduled by `fcfs`, `sjn` and `rr`
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    input:      Option<PathBuf>,

    /// Round Robin quantum used when `rr` is given none
    #[arg(short, long, default_value_t = DEFAULT_QUANTUM)]
    quantum:    Ticks,

    /// Increase logging verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose:    u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Args::parse();
    init_logging(cli.verbose);

    let workload = match cli.input {
        Some(path)  => read_from_path::<CsvWorkload, &[&str]>(path)?,
        None        => demo_workload(),
    };
    let mut console = Console::new(&cli.memory, &cli.stage, workload, cli.quantum)?;
    let mut rl = Editor::<()>::new()?;
    let mut stdout = std::io::stdout();

    println!("Type `help` for the list of commands.");
    loop {
        match rl.readline("my_shell> ") {
            Ok(line)    => {
                rl.add_history_entry(line.as_str());
                if console.execute(&line, &mut stdout)? == Flow::Exit {
                    break;
                }
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err)    => return Err(err.into()),
        }
    }

    Ok(())
}
