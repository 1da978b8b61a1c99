//! Command-line entry point: acquire the memory-lock privilege, print the
//! page-size banner, run the comparison and print the report.

use std::env;

use anyhow::{bail, Result};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use pagechase::alloc::syscall;
use pagechase::{driver, Config};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Large-page allocation needs the lock-memory privilege enabled up
    // front; without it every large-page sample would fail and the
    // comparison would be meaningless.
    if !syscall::acquire_lock_memory_privilege() {
        bail!("failed to acquire the lock-memory privilege required for large pages");
    }

    let default_page_size = syscall::native_page_size();
    let large_page_size = syscall::large_page_minimum();
    println!("default page size: {default_page_size}B");
    println!("large page size: {large_page_size}B");

    let config = Config::from_args(env::args().skip(1));
    let memory_size = driver::round_up(config.size, large_page_size);
    println!("test memory size: {memory_size}B");

    let mut rng = SmallRng::from_rng(&mut rand::rng());
    let report = driver::run(&config, memory_size, &mut rng);

    println!();
    println!();
    print!("{report}");

    Ok(())
}
