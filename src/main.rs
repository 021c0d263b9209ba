//! Command-line power iteration run.
//!
//! `matvec-power <method> <threads> <iterations>` iterates `0.999 · I` on
//! `1, 2, ..., D` and prints the resulting vector plus timing.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use matvec_power::config::USAGE;
use matvec_power::{
    DEFAULT_SCALE, DIMENSION, Error, Matrix, RunConfig, RunOutcome, initial_vector, power_iterate,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if matches!(e, Error::InvalidArgument(_)) {
                eprintln!("error: {} ({})", e, USAGE);
            } else {
                eprintln!("error: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Error> {
    let config = RunConfig::from_args(std::env::args().skip(1))?;

    let a = Matrix::scaled_identity(DIMENSION, DEFAULT_SCALE)?;
    let v = initial_vector(DIMENSION)?;

    let outcome = power_iterate(&a, &v, &config)?;

    print_report(&config, &outcome)?;
    Ok(())
}

fn print_report(config: &RunConfig, outcome: &RunOutcome) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    writeln!(out, "Result")?;
    for x in &outcome.result {
        writeln!(out, "{:.6}", x)?;
    }

    let micros = outcome.elapsed.as_micros();
    writeln!(out)?;
    writeln!(out, "Method: {}", config.method)?;
    writeln!(out, "Threads: {}", config.threads)?;
    writeln!(out, "Iterations: {}", config.iterations)?;
    writeln!(out, "Time: {} microsec", micros)?;
    writeln!(out, "Time: {:.6} sec", micros as f64 / 1_000_000.0)?;
    out.flush()
}
