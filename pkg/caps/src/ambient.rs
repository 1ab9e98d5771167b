//! The ambient set holds capabilities that are kept across execve() of
//! programs without file capabilities.

use caps_sys::{
    c_ulong, PR_CAP_AMBIENT, PR_CAP_AMBIENT_CLEAR_ALL, PR_CAP_AMBIENT_IS_SET,
    PR_CAP_AMBIENT_LOWER, PR_CAP_AMBIENT_RAISE,
};

use crate::errors::*;
use crate::kernel::{Kernel, SystemKernel};
use crate::set::Value;

/// Determines whether val is currently part of the ambient set of the
/// calling process. Fails on kernels without ambient capabilities.
pub fn get_ambient(val: Value) -> Result<bool> {
    get_ambient_with(&SystemKernel, val)
}

/// Raises (enable = true) or lowers each of the values in the ambient set,
/// in order.
///
/// Raising requires the value to be in both the permitted and inheritable
/// sets. The first error is returned immediately and values already changed
/// before it stay changed.
pub fn set_ambient(enable: bool, vals: &[Value]) -> Result<()> {
    set_ambient_with(&SystemKernel, enable, vals)
}

/// Removes every value from the ambient set.
pub fn reset_ambient() -> Result<()> {
    reset_ambient_with(&SystemKernel)
}

pub(crate) fn get_ambient_with(kernel: &dyn Kernel, val: Value) -> Result<bool> {
    let v = kernel.prctl(PR_CAP_AMBIENT, PR_CAP_AMBIENT_IS_SET, val.as_raw() as c_ulong)?;
    Ok(v > 0)
}

pub(crate) fn set_ambient_with(kernel: &dyn Kernel, enable: bool, vals: &[Value]) -> Result<()> {
    let dir = if enable {
        PR_CAP_AMBIENT_RAISE
    } else {
        PR_CAP_AMBIENT_LOWER
    };

    for val in vals {
        trace!(
            "{} {} in the ambient set",
            if enable { "Raising" } else { "Lowering" },
            val
        );
        kernel.prctl(PR_CAP_AMBIENT, dir, val.as_raw() as c_ulong)?;
    }

    Ok(())
}

pub(crate) fn reset_ambient_with(kernel: &dyn Kernel) -> Result<()> {
    kernel.prctl(PR_CAP_AMBIENT, PR_CAP_AMBIENT_CLEAR_ALL, 0)?;
    Ok(())
}
