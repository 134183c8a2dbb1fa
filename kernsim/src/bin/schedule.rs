use kernsim::{*, config::{DEFAULT_QUANTUM, init_logging}};

/// A discrete-event CPU scheduling simulator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a CSV workload (`pid,burst[,arrival]`, header first).
    /// The built-in five-process workload is used if omitted.
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    input:      Option<PathBuf>,

    /// Scheduling algorithm. All three are run and compared if omitted.
    #[arg(value_enum)]
    algorithm:  Option<Algorithm>,

    /// Round Robin quantum
    #[arg(short, long, default_value_t = DEFAULT_QUANTUM)]
    #[arg(value_parser = clap::value_parser!(Ticks))]
    quantum:    Ticks,

    /// Print every dispatch decision as it happens
    #[arg(short, long, default_value_t = false)]
    trace:      bool,

    /// Increase logging verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose:    u8,
}

fn traced_run(mut scheduler: Scheduler, policy: Policy) -> Vec<Completion> {
    loop {
        match scheduler.step(policy) {
            Step::Done                              => break,
            Step::Idle { clock }                    => println!("t={clock:>4}\tidle"),
            Step::Ran { pid, from, to, finished }   => println!(
                "t={from:>4}\tpid {pid} runs until {to}{}",
                if finished { " (done)" } else { "" }
            ),
        }
    }

    scheduler.completed().to_vec()
}

fn main() -> anyhow::Result<()> {
    let cli = Args::parse();
    init_logging(cli.verbose);

    let workload = match cli.input {
        Some(path)  => read_from_path::<CsvWorkload, &[&str]>(path)?,
        None        => demo_workload(),
    };
    let scheduler = Scheduler::new(workload)?;

    match cli.algorithm {
        Some(algo)  => {
            let policy = Policy::new(algo, cli.quantum)?;
            println!("Running {} Scheduling...", algo.label());
            let done = if cli.trace {
                traced_run(scheduler, policy)
            } else { scheduler.run(policy) };
            print!("{}", results_table(&done));
        },
        None        => {
            for (algo, done) in scheduler.compare(cli.quantum)? {
                println!("=== {} ===", algo.label());
                print!("{}", results_table(&done));
                println!();
            }
        },
    }

    Ok(())
}
