//! The two allocation strategies under comparison and the platform page
//! facilities behind them.

pub mod strategy;
pub mod syscall;

pub use strategy::{Allocator, Strategy};
