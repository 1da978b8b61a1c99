//! The timed benchmark runner: one sample = allocate, install the chase
//! pattern, walk it under the clock, release.

use std::hint::black_box;
use std::mem;
use std::ptr;
use std::sync::atomic::{fence, Ordering};
use std::time::Instant;

use tracing::warn;

use crate::alloc::Allocator;

/// Runs one timed sample against `allocator` and returns the elapsed seconds
/// for `passes` full walks of the buffer.
///
/// The offset array must have exactly `memory_size / 8` elements, each a
/// valid index into itself (the generator's contract); both are checked
/// before any memory is touched. Allocation failure is the one expected
/// error: it is logged and reported as an elapsed time of exactly `0.0`,
/// with no deallocation performed.
///
/// The buffer is owned by this call alone and is released before returning.
/// Only the chase loop sits between the two fences and the two timestamps;
/// the pattern copy and the validation happen before the timer starts.
pub fn run_sample<A: Allocator>(
    allocator: &A,
    offset_array: &[u64],
    memory_size: usize,
    passes: u32,
) -> f64 {
    let item_num = memory_size / mem::size_of::<u64>();
    assert_eq!(
        offset_array.len(),
        item_num,
        "offset array must cover the buffer exactly"
    );
    assert!(
        offset_array.iter().all(|&v| (v as usize) < item_num),
        "offset array holds an out-of-range index"
    );

    // SAFETY: a Some result is paired with exactly one deallocate below; a
    // None result acquires nothing.
    let Some(buffer) = (unsafe { allocator.allocate(memory_size) }) else {
        warn!(
            allocator = allocator.name(),
            size = memory_size,
            "allocation failed"
        );
        return 0.0;
    };

    let items = buffer.as_ptr().cast::<u64>();

    // SAFETY: the buffer spans memory_size bytes and offset_array holds
    // exactly item_num elements; the regions are disjoint.
    unsafe { ptr::copy_nonoverlapping(offset_array.as_ptr(), items, item_num) };

    fence(Ordering::Acquire);
    let start = Instant::now();

    let mut value: u64 = 0;
    for _ in 0..black_box(passes) {
        for j in 0..item_num {
            // SAFETY: j < item_num, and every stored value was range-checked
            // above, so both loads stay inside the buffer.
            let b = unsafe { *items.add(j) };
            let c = unsafe { *items.add(b as usize) };
            value = value.wrapping_add(b.wrapping_mul(c));
        }
    }

    fence(Ordering::Release);
    let elapsed = start.elapsed().as_secs_f64();

    // SAFETY: buffer came from this allocator with this size; released once.
    unsafe { allocator.deallocate(buffer, memory_size) };

    // Observe the accumulator so the walk cannot be proven dead.
    black_box(value);

    elapsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::Strategy;
    use crate::offsets::{fill_offset_array, OffsetMode};
    use core::ptr::NonNull;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::cell::Cell;

    /// Delegates to the default strategy while counting calls.
    struct CountingAllocator {
        allocations: Cell<u32>,
        deallocations: Cell<u32>,
    }

    impl CountingAllocator {
        fn new() -> Self {
            Self {
                allocations: Cell::new(0),
                deallocations: Cell::new(0),
            }
        }
    }

    impl Allocator for CountingAllocator {
        unsafe fn allocate(&self, size: usize) -> Option<NonNull<u8>> {
            self.allocations.set(self.allocations.get() + 1);
            Strategy::Default.allocate(size)
        }

        unsafe fn deallocate(&self, ptr: NonNull<u8>, size: usize) {
            self.deallocations.set(self.deallocations.get() + 1);
            Strategy::Default.deallocate(ptr, size);
        }

        fn name(&self) -> &'static str {
            "counting allocator"
        }
    }

    /// Never satisfies a request; counts deallocate calls to prove none
    /// happen on the failure path.
    struct UnavailableAllocator {
        deallocations: Cell<u32>,
    }

    impl Allocator for UnavailableAllocator {
        unsafe fn allocate(&self, _size: usize) -> Option<NonNull<u8>> {
            None
        }

        unsafe fn deallocate(&self, _ptr: NonNull<u8>, _size: usize) {
            self.deallocations.set(self.deallocations.get() + 1);
        }

        fn name(&self) -> &'static str {
            "unavailable allocator"
        }
    }

    fn test_pattern(memory_size: usize) -> Vec<u64> {
        let mut rng = SmallRng::seed_from_u64(11);
        fill_offset_array(OffsetMode::Randomized, memory_size / 8, 512, &mut rng)
    }

    #[test]
    fn allocation_failure_yields_zero_and_no_deallocate() {
        let allocator = UnavailableAllocator {
            deallocations: Cell::new(0),
        };
        let memory_size = 4096;
        let elapsed = run_sample(&allocator, &test_pattern(memory_size), memory_size, 1);
        assert_eq!(elapsed, 0.0);
        assert_eq!(allocator.deallocations.get(), 0);
    }

    #[test]
    fn successful_sample_deallocates_exactly_once() {
        let allocator = CountingAllocator::new();
        let memory_size = 64 * 1024;
        let elapsed = run_sample(&allocator, &test_pattern(memory_size), memory_size, 2);
        assert!(elapsed >= 0.0);
        assert_eq!(allocator.allocations.get(), 1);
        assert_eq!(allocator.deallocations.get(), 1);
    }

    #[test]
    fn zero_passes_still_allocates_and_releases() {
        let allocator = CountingAllocator::new();
        let memory_size = 4096;
        let elapsed = run_sample(&allocator, &test_pattern(memory_size), memory_size, 0);
        assert!(elapsed >= 0.0);
        assert_eq!(allocator.deallocations.get(), 1);
    }

    #[test]
    #[should_panic(expected = "offset array must cover the buffer exactly")]
    fn mismatched_offset_array_is_rejected() {
        let allocator = CountingAllocator::new();
        run_sample(&allocator, &[0, 1, 2], 4096, 1);
    }
}
