use core::alloc::Layout;
use core::mem;
use core::ptr::NonNull;

use crate::alloc::syscall;

/// A named pair of allocate/deallocate operations for backing the chase
/// buffer.
///
/// This is the seam the benchmark runner is generic over, so tests can
/// substitute counting or always-failing allocators for the real strategies.
///
/// Calls must be paired: `deallocate` is invoked only with a pointer and size
/// that a preceding `allocate` on the same value returned `Some` for.
pub trait Allocator {
    /// Allocates `size` bytes, or `None` when the strategy cannot satisfy
    /// the request. A `None` result carries no resources; the caller must
    /// not call [`deallocate`](Allocator::deallocate) for it.
    ///
    /// # Safety
    /// The returned region is uninitialized. Caller must pair a `Some`
    /// result with exactly one `deallocate` of the same size.
    unsafe fn allocate(&self, size: usize) -> Option<NonNull<u8>>;

    /// Releases a region previously returned by `allocate`.
    ///
    /// # Safety
    /// `ptr` must come from a matching `allocate(size)` on this value and
    /// must not be used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, size: usize);

    /// Human-readable strategy name, used in failure reports.
    fn name(&self) -> &'static str;
}

/// The two region-backing strategies under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Standard heap allocation; no page-backing guarantee.
    Default,
    /// A region reserved and committed with the host's large-page facility.
    /// Allocation fails (rather than falling back) when the privilege or
    /// the reserved pool is unavailable.
    LargePage,
}

impl Allocator for Strategy {
    unsafe fn allocate(&self, size: usize) -> Option<NonNull<u8>> {
        // A zero-size request is unsatisfiable for either backing; treat it
        // as unavailable rather than handing out a dangling region.
        if size == 0 {
            return None;
        }

        match self {
            Strategy::Default => {
                let layout = Layout::from_size_align(size, mem::align_of::<u64>()).ok()?;
                NonNull::new(std::alloc::alloc(layout))
            }
            Strategy::LargePage => syscall::allocate_large_pages(size).and_then(NonNull::new),
        }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, size: usize) {
        match self {
            Strategy::Default => {
                let layout = Layout::from_size_align_unchecked(size, mem::align_of::<u64>());
                std::alloc::dealloc(ptr.as_ptr(), layout);
            }
            Strategy::LargePage => syscall::deallocate_large_pages(ptr.as_ptr(), size),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Strategy::Default => "default allocator",
            Strategy::LargePage => "large page allocator",
        }
    }
}
