use mwvc::io::{EdgeList, EdgeListRead};
use mwvc::runner::TimeoutPolicy;
use mwvc::solver::Solver;
use std::convert::TryFrom;
use std::error::Error;
use std::fs::File;
use std::io::{stdin, BufReader, Write};
use std::path::PathBuf;
use std::time::Duration;
use structopt::StructOpt;

#[cfg(feature = "handle-ctrlc")]
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "handle-ctrlc")]
static SIGINT: AtomicBool = AtomicBool::new(false);

#[derive(Debug, StructOpt)]
#[structopt(
    name = "mwvc-cli",
    about = "Computes minimum-weight vertex covers for a given input graph."
)]
struct Opt {
    /// Input file, DIMACS-style edge list. `stdin` if not specified.
    #[structopt(parse(from_os_str))]
    input: Option<PathBuf>,

    /// Per-step timeout in milliseconds. The search then runs in an
    /// isolated worker and every improving cover must arrive within
    /// this interval.
    #[structopt(short, long)]
    timeout_ms: Option<u64>,

    /// On timeout, end the stream quietly instead of failing.
    #[structopt(long)]
    silent_timeout: bool,
}

fn build_logger() {
    let mut builder = env_logger::Builder::from_default_env();
    builder
        .format(|buf, record| writeln!(buf, "c {} - {}", record.level(), record.args()))
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();
    build_logger();

    #[cfg(feature = "handle-ctrlc")]
    ctrlc::set_handler(|| {
        SIGINT.store(true, Ordering::SeqCst);
    })?;

    let edge_list: EdgeList = match opt.input {
        Some(path) => {
            let file = File::open(path)?;
            EdgeList::try_from(EdgeListRead(BufReader::new(file)))?
        }
        None => {
            let stdin = stdin();
            EdgeList::try_from(EdgeListRead(stdin.lock()))?
        }
    };

    let policy = if opt.silent_timeout {
        TimeoutPolicy::StopSilently
    } else {
        TimeoutPolicy::Raise
    };
    let solver = Solver::default()
        .per_step_timeout(opt.timeout_ms.map(Duration::from_millis))
        .timeout_policy(policy);

    let node_count = edge_list.node_count;
    let stream = solver.solve_stream(
        node_count,
        &edge_list.edges,
        mwvc::preprocessing::constant_weight,
    )?;

    let mut best = None;
    for solution in stream {
        #[cfg(feature = "handle-ctrlc")]
        if SIGINT.load(Ordering::SeqCst) {
            println!("c interrupted, reporting best cover so far");
            break;
        }
        let solution = solution?;
        println!(
            "c improving cover: count={} weight={}",
            solution.count, solution.weight_sum
        );
        best = Some(solution);
    }

    match best {
        Some(best) => {
            println!("s vc {} {}", node_count, best.count);
            for node in best.cover.iter() {
                println!("{}", node + 1);
            }
        }
        None => println!("c no cover found before the stream ended"),
    }
    Ok(())
}
