//! Raw Linux kernel interfaces for process capabilities.
//!
//! Everything in here is a direct mapping of a kernel structure or syscall.
//! Higher level logic lives in the `caps` crate.

#![allow(non_camel_case_types)]

#[macro_use]
extern crate failure;

mod errno;
#[macro_use]
mod syscall;

pub mod capabilities;
pub mod prctl;

pub use capabilities::*;
pub use errno::*;
pub use prctl::*;
pub use std::os::raw::{c_int, c_long, c_ulong};

// This should be 32bit.
pub type pid_t = c_int;
