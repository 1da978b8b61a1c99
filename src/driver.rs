//! Sample loops, size rounding and the comparison report.

use std::fmt;
use std::mem;

use rand::Rng;

use crate::alloc::{syscall, Strategy};
use crate::config::Config;
use crate::offsets::fill_offset_array;
use crate::runner::run_sample;

/// Rounds `size` up to the next multiple of `alignment`.
///
/// Used to align the requested test size to the large-page minimum, so the
/// large-page strategy never has to satisfy a partial page.
pub fn round_up(size: usize, alignment: usize) -> usize {
    size.div_ceil(alignment) * alignment
}

/// Accumulated strategy totals over one benchmark run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    /// Summed elapsed seconds for the default-allocator samples.
    pub malloc_total: f64,
    /// Summed elapsed seconds for the large-page samples.
    pub large_total: f64,
    /// Samples taken per strategy. Failed allocations contribute 0.0 to the
    /// totals and still divide into the averages.
    pub sample_num: u32,
}

impl Report {
    /// Average elapsed seconds per default-allocator sample.
    pub fn malloc_avg(&self) -> f64 {
        self.malloc_total / f64::from(self.sample_num)
    }

    /// Average elapsed seconds per large-page sample.
    pub fn large_avg(&self) -> f64 {
        self.large_total / f64::from(self.sample_num)
    }

    /// Relative improvement of the large-page strategy over the default, as
    /// a percentage truncated (not rounded) to two decimal places:
    /// `floor(((m - l) / m) * 10000) / 100`.
    ///
    /// A zero default total divides to NaN; callers only see that when
    /// every default-allocator sample failed.
    pub fn improvement_percent(&self) -> f64 {
        let delta = self.malloc_total - self.large_total;
        ((delta / self.malloc_total) * 10000.0).floor() * 0.01
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "malloc time: {}s (avg: {}s)",
            self.malloc_total,
            self.malloc_avg()
        )?;
        writeln!(
            f,
            "large page time: {}s (avg: {}s)",
            self.large_total,
            self.large_avg()
        )?;
        writeln!(f, "(m - l) / m = {:.2}%", self.improvement_percent())?;
        writeln!(f, "\tm: malloc allocator")?;
        writeln!(f, "\tl: large page allocator")
    }
}

/// Runs the whole comparison: builds one offset array shared by every sample
/// of both strategies (an identical access pattern is what makes the
/// comparison fair), takes `sample_num` large-page samples followed by
/// `sample_num` default-allocator samples, and returns the totals.
///
/// `memory_size` must already be rounded to the large-page minimum via
/// [`round_up`].
pub fn run<R: Rng>(config: &Config, memory_size: usize, rng: &mut R) -> Report {
    let stride = syscall::native_page_size() / mem::size_of::<u64>();
    let offset_array = fill_offset_array(config.mode(), memory_size / 8, stride, rng);

    let mut large_total = 0.0;
    for _ in 0..config.sample_num {
        large_total += run_sample(
            &Strategy::LargePage,
            &offset_array,
            memory_size,
            config.sample_pass_num,
        );
    }

    let mut malloc_total = 0.0;
    for _ in 0..config.sample_num {
        malloc_total += run_sample(
            &Strategy::Default,
            &offset_array,
            memory_size,
            config.sample_pass_num,
        );
    }

    Report {
        malloc_total,
        large_total,
        sample_num: config.sample_num,
    }
}
