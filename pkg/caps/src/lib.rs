//! Linux process capabilities.
//!
//! A [`Set`] holds the Effective, Permitted and Inheritable vectors of a
//! process in the layout used by the kernel. The width of that layout is
//! negotiated with the running kernel once per process (see [`Abi`]).
//!
//! The bounding and ambient sets are not part of a [`Set`]. They are queried
//! and modified directly through the functions in [`bound`] and [`ambient`].

#[macro_use]
extern crate failure;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

mod errors;
mod kernel;
mod marshal;

pub mod abi;
pub mod ambient;
pub mod bound;
pub mod process;
pub mod set;

pub use abi::{Abi, NAMED_COUNT};
pub use ambient::{get_ambient, reset_ambient, set_ambient};
pub use bound::{drop_bound, get_bound};
pub use caps_sys::{cap_user_data, pid_t, Errno};
pub use errors::*;
pub use process::{get_pid, get_proc};
pub use set::{Flag, Set, Value};

/// Number of capability bits named by the running kernel.
pub fn max_values() -> u32 {
    Abi::current().max_values()
}

#[cfg(test)]
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
