use std::{error, fmt::Display, ops::Range, sync::mpsc, thread};

use clap::Parser;

pub const DEFAULT_WORKER_COUNT: usize = 64;

#[derive(Debug)]
pub enum Error {
    InvalidNumberText(String),
    NonPositiveNumber(i64),
    WorkerPanicked(usize),
    WorkerDisconnected(usize),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidNumberText(s) => {
                write!(f, "Invalid text({}) for number to factor.", s)
            }
            Error::NonPositiveNumber(n) => write!(
                f,
                "Invalid number({}) to factor, expect a positive integer.",
                n
            ),
            Error::WorkerPanicked(ind) => {
                write!(f, "Worker {} failed before finishing its scan.", ind)
            }
            Error::WorkerDisconnected(ind) => write!(
                f,
                "Worker {} disconnected before delivering its divisors.",
                ind
            ),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[arg(required = true, allow_hyphen_values = true)]
    pub numbers: Vec<String>,
    #[arg(short, long, default_value_t = DEFAULT_WORKER_COUNT)]
    pub workers: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    number: u64,
}

impl TryFrom<&str> for Query {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let number = value
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::InvalidNumberText(value.to_string()))?;
        if number <= 0 {
            return Err(Error::NonPositiveNumber(number));
        }

        Ok(Self {
            number: number as u64,
        })
    }
}

impl Query {
    pub fn number(&self) -> u64 {
        self.number
    }
}

#[derive(Debug)]
pub struct RangePlan {
    ranges: Vec<Range<u64>>,
    perfect_square: bool,
}

impl RangePlan {
    pub fn ranges(&self) -> &[Range<u64>] {
        &self.ranges
    }

    pub fn is_perfect_square(&self) -> bool {
        self.perfect_square
    }
}

// Splits [1, isqrt(n) + 1) into worker_count contiguous half-open ranges of
// (nearly) equal width. Ranges can be empty when worker_count exceeds isqrt(n).
pub fn partition_ranges(n: u64, worker_count: usize) -> RangePlan {
    let root = integer_sqrt(n);
    let w = worker_count.max(1) as u64;
    let boundary = |i: u64| 1 + i * root / w;
    let ranges = (0..w).map(|i| boundary(i)..boundary(i + 1)).collect();

    RangePlan {
        ranges,
        perfect_square: root * root == n,
    }
}

fn integer_sqrt(n: u64) -> u64 {
    // f64 can't represent every u64 exactly, so the float root may land one
    // off near large perfect squares. Nudge it back onto the floor root.
    let mut root = (n as f64).sqrt() as u64;
    while root > 0 && root.checked_mul(root).map(|sq| sq > n).unwrap_or(true) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).map(|sq| sq <= n).unwrap_or(false) {
        root += 1;
    }

    root
}

pub fn scan_range(n: u64, range: Range<u64>) -> Vec<u64> {
    range.filter(|cand| n % cand == 0).collect()
}

// small must be the strictly increasing sequence of all divisors of n not
// above isqrt(n); every divisor above it is the complement n / d of one of
// them.
pub fn expand_complements(n: u64, small: Vec<u64>, perfect_square: bool) -> Vec<u64> {
    if n == 1 {
        return vec![1];
    }

    let mut full = small;
    // The exact square root is its own complement, keep its single occurrence.
    let pair_n = if perfect_square {
        full.len().saturating_sub(1)
    } else {
        full.len()
    };
    for ind in (0..pair_n).rev() {
        full.push(n / full[ind]);
    }

    full
}

#[derive(Debug)]
pub struct FactorizationSession {
    worker_count: usize,
}

impl FactorizationSession {
    pub fn new(worker_count: usize) -> Self {
        Self {
            worker_count: worker_count.max(1),
        }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    // Runs one query: scans [1, isqrt(n)] with one thread per partitioned
    // range, then expands complements. Any worker failure fails the whole
    // query, partial results are never returned.
    pub fn divisors(&self, query: &Query) -> Result<Vec<u64>, Error> {
        let n = query.number();
        let plan = partition_ranges(n, self.worker_count);
        let small = thread::scope(|s| {
            let (handles, receivers): (Vec<_>, Vec<_>) = plan
                .ranges()
                .iter()
                .map(|range| {
                    let range = range.clone();
                    let (sender, receiver) = mpsc::channel();
                    let handle = s.spawn(move || {
                        let _ = sender.send(scan_range(n, range));
                    });
                    (handle, receiver)
                })
                .unzip();

            // Join every worker before judging the query, then merge the
            // partial lists strictly in range-index order, no matter which
            // worker finished first.
            let mut small = Vec::new();
            let mut failure = None;
            for (ind, (handle, receiver)) in handles.into_iter().zip(receivers).enumerate() {
                let joined = handle.join();
                if failure.is_some() {
                    continue;
                }

                if joined.is_err() {
                    failure = Some(Error::WorkerPanicked(ind));
                } else {
                    match receiver.recv() {
                        Ok(part) => small.extend(part),
                        Err(_) => failure = Some(Error::WorkerDisconnected(ind)),
                    }
                }
            }

            match failure {
                Some(e) => Err(e),
                None => Ok(small),
            }
        })?;

        Ok(expand_complements(n, small, plan.is_perfect_square()))
    }
}
