//! Benchmark tunables and the tolerant `--name=value` argument parser.
//!
//! The contract is deliberately forgiving: unrecognized flags are ignored
//! and a value that fails to parse leaves the default untouched, so an
//! invocation never dies on a typo; it just runs with defaults.

use std::str::FromStr;

use crate::offsets::OffsetMode;

/// Benchmark tunables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Target memory size in bytes (`--size=`). The driver rounds this up
    /// to a multiple of the large-page minimum before use.
    pub size: usize,
    /// Timed samples per strategy (`--sample_num=`).
    pub sample_num: u32,
    /// Full chase passes per timed sample (`--sample_pass_num=`).
    pub sample_pass_num: u32,
    /// Non-zero selects randomized offsets (`--use_random_offsets=`).
    pub use_random_offsets: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: 256 * 1024 * 1024,
            sample_num: 100,
            sample_pass_num: 1,
            use_random_offsets: 0,
        }
    }
}

impl Config {
    /// Parses command-line arguments (without the program name).
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut config = Self::default();
        for arg in args {
            let arg = arg.as_ref();
            read_arg(arg, "--size=", &mut config.size);
            read_arg(arg, "--sample_num=", &mut config.sample_num);
            read_arg(arg, "--sample_pass_num=", &mut config.sample_pass_num);
            read_arg(arg, "--use_random_offsets=", &mut config.use_random_offsets);
        }
        config
    }

    /// The offset-generation mode this configuration selects.
    pub fn mode(&self) -> OffsetMode {
        if self.use_random_offsets != 0 {
            OffsetMode::Randomized
        } else {
            OffsetMode::Strided
        }
    }
}

fn read_arg<T: FromStr>(arg: &str, key: &str, value: &mut T) {
    if let Some(rest) = arg.strip_prefix(key) {
        if let Ok(parsed) = rest.parse() {
            *value = parsed;
        }
    }
}
