#![cfg(unix)]
#![allow(clippy::missing_safety_doc)]

use libc::{
    c_void, mmap, munmap, sysconf, MAP_ANONYMOUS, MAP_FAILED, MAP_HUGETLB, MAP_PRIVATE, PROT_READ,
    PROT_WRITE, _SC_PAGESIZE,
};
use std::fs;
use std::ptr;

const FALLBACK_LARGE_PAGE: usize = 2 * 1024 * 1024;

/// Size in bytes of a default-sized page on this host.
pub fn native_page_size() -> usize {
    // SAFETY: sysconf has no memory preconditions.
    let size = unsafe { sysconf(_SC_PAGESIZE) };
    if size <= 0 {
        4096
    } else {
        size as usize
    }
}

/// Size in bytes of the smallest large page this host supports, taken from
/// the `Hugepagesize:` line of `/proc/meminfo` (2 MiB when absent).
pub fn large_page_minimum() -> usize {
    fs::read_to_string("/proc/meminfo")
        .ok()
        .and_then(|meminfo| parse_hugepagesize(&meminfo))
        .unwrap_or(FALLBACK_LARGE_PAGE)
}

fn parse_hugepagesize(meminfo: &str) -> Option<usize> {
    let line = meminfo.lines().find(|l| l.starts_with("Hugepagesize:"))?;
    let kib: usize = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kib * 1024)
}

/// Maps `size` bytes backed by hugetlb pages.
/// Returns None when the pool cannot satisfy the request.
pub unsafe fn allocate_large_pages(size: usize) -> Option<*mut u8> {
    let ptr = mmap(
        ptr::null_mut(),
        size,
        PROT_READ | PROT_WRITE,
        MAP_PRIVATE | MAP_ANONYMOUS | MAP_HUGETLB,
        -1,
        0,
    );

    if ptr == MAP_FAILED {
        None
    } else {
        Some(ptr.cast::<u8>())
    }
}

/// Releases a mapping produced by [`allocate_large_pages`].
/// `size` must be the size passed to the matching allocate call.
pub unsafe fn deallocate_large_pages(ptr: *mut u8, size: usize) {
    munmap(ptr.cast::<c_void>(), size);
}

/// Verifies that large-page mappings are actually available to this process
/// by creating and releasing a single large-page probe mapping.
///
/// On Linux the gate is the hugetlb pool (`vm.nr_hugepages`) together with
/// the process's mapping rights, so a one-page probe answers the same
/// question the Windows `SeLockMemoryPrivilege` check does.
pub fn acquire_lock_memory_privilege() -> bool {
    let size = large_page_minimum();
    // SAFETY: the probe mapping is released before returning.
    unsafe {
        match allocate_large_pages(size) {
            Some(ptr) => {
                deallocate_large_pages(ptr, size);
                true
            }
            None => false,
        }
    }
}
