//! Platform page facilities: page-size queries, large-page mappings and the
//! memory-lock privilege.

#[cfg(unix)]
pub mod unix;

#[cfg(windows)]
pub mod windows;

#[cfg(unix)]
pub use unix::*;

#[cfg(windows)]
pub use windows::*;
