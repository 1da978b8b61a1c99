#![cfg(windows)]
#![allow(clippy::missing_safety_doc)]

use std::mem;
use std::ptr;

use windows_sys::w;
use windows_sys::Win32::Foundation::{CloseHandle, GetLastError, ERROR_SUCCESS, HANDLE};
use windows_sys::Win32::Security::{
    AdjustTokenPrivileges, LookupPrivilegeValueW, SE_PRIVILEGE_ENABLED, TOKEN_ADJUST_PRIVILEGES,
    TOKEN_PRIVILEGES, TOKEN_QUERY,
};
use windows_sys::Win32::System::Memory::{
    GetLargePageMinimum, VirtualAlloc, VirtualFree, MEM_COMMIT, MEM_LARGE_PAGES, MEM_RELEASE,
    MEM_RESERVE, PAGE_READWRITE,
};
use windows_sys::Win32::System::SystemInformation::{GetSystemInfo, SYSTEM_INFO};
use windows_sys::Win32::System::Threading::{GetCurrentProcess, OpenProcessToken};

const FALLBACK_LARGE_PAGE: usize = 2 * 1024 * 1024;

/// Size in bytes of a default-sized page on this host.
pub fn native_page_size() -> usize {
    // SAFETY: GetSystemInfo only writes the out parameter.
    unsafe {
        let mut info: SYSTEM_INFO = mem::zeroed();
        GetSystemInfo(&mut info);
        info.dwPageSize as usize
    }
}

/// Size in bytes of the smallest large page this host supports.
pub fn large_page_minimum() -> usize {
    // SAFETY: no preconditions. Zero means the processor has no large-page
    // support; fall back to the common 2 MiB so size rounding stays defined.
    let minimum = unsafe { GetLargePageMinimum() };
    if minimum == 0 {
        FALLBACK_LARGE_PAGE
    } else {
        minimum
    }
}

/// Reserves and commits `size` bytes backed by large pages.
/// Returns None when the privilege or the contiguous physical memory is
/// unavailable.
pub unsafe fn allocate_large_pages(size: usize) -> Option<*mut u8> {
    let ptr = VirtualAlloc(
        ptr::null(),
        size,
        MEM_LARGE_PAGES | MEM_RESERVE | MEM_COMMIT,
        PAGE_READWRITE,
    );

    if ptr.is_null() {
        None
    } else {
        Some(ptr.cast::<u8>())
    }
}

/// Releases a region produced by [`allocate_large_pages`].
/// MEM_RELEASE frees the entire reservation; the size argument must be 0.
pub unsafe fn deallocate_large_pages(ptr: *mut u8, _size: usize) {
    VirtualFree(ptr.cast(), 0, MEM_RELEASE);
}

/// Enables `SeLockMemoryPrivilege` on the process token.
///
/// Large-page allocation requires the privilege to be both held and enabled.
/// `AdjustTokenPrivileges` succeeds even when the privilege is not held, so
/// the verdict comes from `GetLastError` after the call, exactly as the
/// MEM_LARGE_PAGES documentation prescribes.
pub fn acquire_lock_memory_privilege() -> bool {
    // SAFETY: token handle is closed on every path; the privilege struct is
    // fully initialized before the adjust call reads it.
    unsafe {
        let mut token: HANDLE = ptr::null_mut();
        if OpenProcessToken(
            GetCurrentProcess(),
            TOKEN_ADJUST_PRIVILEGES | TOKEN_QUERY,
            &mut token,
        ) == 0
        {
            return false;
        }

        let mut privileges: TOKEN_PRIVILEGES = mem::zeroed();
        if LookupPrivilegeValueW(
            ptr::null(),
            w!("SeLockMemoryPrivilege"),
            &mut privileges.Privileges[0].Luid,
        ) == 0
        {
            CloseHandle(token);
            return false;
        }

        privileges.PrivilegeCount = 1;
        privileges.Privileges[0].Attributes = SE_PRIVILEGE_ENABLED;

        if AdjustTokenPrivileges(token, 0, &privileges, 0, ptr::null_mut(), ptr::null_mut()) == 0 {
            CloseHandle(token);
            return false;
        }

        let error = GetLastError();

        if CloseHandle(token) == 0 {
            return false;
        }

        error == ERROR_SUCCESS
    }
}
