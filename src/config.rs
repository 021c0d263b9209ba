//! Run parameters and the positional command line.

use crate::error::{Error, Result};
use crate::kernels::Method;

pub const USAGE: &str = "usage: matvec-power <method: 1=row-major | 2=column-major> <threads> <iterations>";

/// What a run needs besides the matrix and starting vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub method: Method,
    pub threads: usize,
    pub iterations: usize,
}

impl RunConfig {
    pub fn new(method: Method, threads: usize, iterations: usize) -> Result<Self> {
        if threads == 0 {
            return Err(Error::InvalidConfiguration(
                "thread count must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            method,
            threads,
            iterations,
        })
    }

    /// Parses `<method> <threads> <iterations>`, program name already removed.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();
        let method_arg = next_arg(&mut args, "method")?;
        let threads_arg = next_arg(&mut args, "threads")?;
        let iterations_arg = next_arg(&mut args, "iterations")?;
        if let Some(extra) = args.next() {
            return Err(Error::InvalidArgument(format!(
                "unexpected argument {:?}",
                extra.as_ref()
            )));
        }

        let method: Method = method_arg.parse()?;

        let threads = parse_int("threads", &threads_arg)?;
        if threads <= 0 {
            return Err(Error::InvalidConfiguration(format!(
                "thread count must be at least 1, got {}",
                threads
            )));
        }

        let iterations = parse_int("iterations", &iterations_arg)?;
        if iterations < 0 {
            return Err(Error::InvalidArgument(format!(
                "iterations must be non-negative, got {}",
                iterations
            )));
        }

        Self::new(method, to_usize("threads", threads)?, to_usize("iterations", iterations)?)
    }
}

fn next_arg<I, S>(args: &mut I, name: &str) -> Result<String>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    args.next()
        .map(|s| s.as_ref().to_string())
        .ok_or_else(|| Error::InvalidArgument(format!("missing <{}>", name)))
}

fn parse_int(name: &str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("{} {:?} is not an integer", name, value)))
}

fn to_usize(name: &str, value: i64) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| Error::InvalidArgument(format!("{} {} is out of range", name, value)))
}
