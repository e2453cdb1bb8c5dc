//! memsim: replay a memory-access trace against a simulated MMU.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use vmsim::common::config::frame_count;
use vmsim::trace::read_trace;
use vmsim::{Error, MemoryManager, MmuConfig, PolicyKind, Result, TraceEvent, TraceSink};

#[derive(Parser)]
#[command(name = "memsim")]
#[command(about = "Simulate page replacement over a memory-access trace")]
#[command(version)]
struct Cli {
    /// Trace file, one "<hex address> <R|W>" per line
    trace: PathBuf,

    /// Number of physical frames
    #[arg(allow_negative_numbers = true)]
    frames: i64,

    /// Replacement policy: rand, lru or clock
    algorithm: String,

    /// Output mode: quiet or debug
    mode: String,

    /// Seed for the rand policy
    #[arg(long)]
    seed: Option<u64>,
}

/// Prints every trace event on its own line.
struct StdoutSink;

impl TraceSink for StdoutSink {
    fn record(&mut self, event: &TraceEvent) {
        println!("{}", event);
    }
}

fn parse_mode(mode: &str) -> Result<bool> {
    match mode {
        "quiet" => Ok(false),
        "debug" => Ok(true),
        other => Err(Error::UnknownMode(other.to_string())),
    }
}

/// The end-of-run report, one counter per line.
fn summary(mmu: &MemoryManager, events: u64) -> String {
    format!(
        "total memory frames: {}\n\
         events in trace: {}\n\
         total disk reads: {}\n\
         total disk writes: {}\n\
         page fault rate: {:.4}",
        mmu.frames(),
        events,
        mmu.get_total_disk_reads(),
        mmu.get_total_disk_writes(),
        mmu.stats().fault_rate()
    )
}

/// Validate the arguments, then replay the trace.
fn simulate(cli: &Cli, sink: impl TraceSink + 'static) -> Result<(MemoryManager, u64)> {
    let frames = frame_count(cli.frames)?;
    let policy: PolicyKind = cli.algorithm.parse()?;
    let debug = parse_mode(&cli.mode)?;

    let mut config = MmuConfig::new(frames, policy).with_debug(debug);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let trace = read_trace(&cli.trace)?;
    let mut mmu = MemoryManager::new(config)?.with_sink(sink);
    let events = mmu.replay_trace(trace)?;

    Ok((mmu, events))
}

fn run(cli: Cli) -> Result<()> {
    let (mmu, events) = simulate(&cli, StdoutSink)?;
    println!("{}", summary(&mmu, events));
    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("memsim: {}", e);
            ExitCode::FAILURE
        }
    }
}
