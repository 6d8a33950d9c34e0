use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use factors::{CLIArgs, FactorizationSession, Query};

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    let session = FactorizationSession::new(args.workers);

    let start_time = Instant::now();
    for text in &args.numbers {
        let query = Query::try_from(text.as_str())
            .with_context(|| format!("Failed to parse number from given text({}).", text))?;
        let divisors = session
            .divisors(&query)
            .with_context(|| format!("Failed to find divisors of {}.", query.number()))?;

        println!(
            "{}: {}",
            query.number(),
            divisors
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        );
    }
    println!(
        "\nOperation took {:.6} seconds.",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
