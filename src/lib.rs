//! # `pagechase` - Large-Page Latency Microbenchmark
//!
//! Measures the latency impact of large (huge) memory pages versus
//! default-sized pages for a pointer-chasing access pattern on a single
//! machine.
//!
//! The benchmark allocates a memory region through two strategies, fills it
//! with a self-referential index pattern, walks it with data-dependent loads
//! that defeat hardware prefetching, and reports the relative difference in
//! wall-clock time. Large pages reduce TLB pressure for big working sets, so
//! the chase is expected to run measurably faster on a large-page-backed
//! region.
//!
//! ## Architecture
//!
//! - [`alloc`]: the two allocation strategies under comparison, behind a
//!   common [`Allocator`](alloc::Allocator) seam, with the platform page
//!   facilities in [`alloc::syscall`].
//! - [`offsets`]: builds the chase pattern, either page-strided (default) or
//!   randomized, from an explicitly seeded generator.
//! - [`runner`]: one timed sample (allocate, copy the pattern in, chase,
//!   release).
//! - [`driver`]: repeats samples per strategy and produces the [`Report`].
//! - [`config`]: the `--name=value` tunables.
//!
//! ## Measurement discipline
//!
//! The timed region is bounded by acquire/release fences so setup and
//! teardown cannot be reordered into it, and the chase accumulator is routed
//! through [`std::hint::black_box`] so the optimizer cannot prove the walk
//! dead. The walk itself uses double indirection (`buffer[buffer[j]]`): each
//! load address depends on a previous load's value, which is what makes the
//! page-translation cost visible.

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]

pub mod alloc;
pub mod config;
pub mod driver;
pub mod offsets;
pub mod runner;

pub use alloc::{Allocator, Strategy};
pub use config::Config;
pub use driver::{round_up, Report};
pub use offsets::{fill_offset_array, OffsetMode};
pub use runner::run_sample;
