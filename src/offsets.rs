//! Chase-pattern construction.
//!
//! The offset array holds one 64-bit index per element of the benchmark
//! buffer; the runner copies it into freshly allocated memory and then
//! follows `buffer[buffer[j]]` through it. Every stored value is a valid
//! index into the array itself, which is what keeps the chase in bounds.

use rand::Rng;

/// Access-pattern selector for the chase array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetMode {
    /// Jump roughly one native page per step, with a small random offset
    /// inside the page. Defeats linear prefetch while keeping page-granular
    /// locality.
    #[default]
    Strided,
    /// Weak additive shuffle: `(i + draw) % len`. Not a permutation; some
    /// indices may repeat or be unreachable. That is the documented
    /// behavior, kept verbatim.
    Randomized,
}

/// Fills a chase array of `len` elements.
///
/// `stride` is the number of 64-bit slots per native page
/// (`native_page_size() / 8`) and only matters in [`OffsetMode::Strided`].
/// The generator is passed in explicitly so a fixed seed reproduces the
/// exact pattern.
///
/// Every produced value is in `[0, len)`; a `len` of 0 yields an empty
/// array.
pub fn fill_offset_array<R: Rng>(
    mode: OffsetMode,
    len: usize,
    stride: usize,
    rng: &mut R,
) -> Vec<u64> {
    debug_assert!(stride > 0, "stride is native_page_size / 8, never zero");
    let stride = stride.max(1);

    let mut offsets = vec![0u64; len];
    if len == 0 {
        return offsets;
    }

    match mode {
        OffsetMode::Randomized => {
            for (i, slot) in offsets.iter_mut().enumerate() {
                let draw: usize = rng.random_range(0..len);
                *slot = ((i + draw) % len) as u64;
            }
        }
        OffsetMode::Strided => {
            // The trailing `% len` is a no-op whenever len is a multiple of
            // the stride, which the driver's size rounding guarantees; it
            // keeps the in-range invariant for arbitrary lengths.
            for (i, slot) in offsets.iter_mut().enumerate() {
                let draw: usize = rng.random_range(0..stride);
                *slot = ((((i * stride) % len) + draw) % len) as u64;
            }
        }
    }

    offsets
}
