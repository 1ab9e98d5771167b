// Capability related prctl() options.
//
// Defined in:
// https://github.com/torvalds/linux/blob/master/include/uapi/linux/prctl.h

use crate::{c_int, c_ulong, Errno};

pub const PR_CAPBSET_READ: c_int = 23;
pub const PR_CAPBSET_DROP: c_int = 24;

pub const PR_CAP_AMBIENT: c_int = 47;
pub const PR_CAP_AMBIENT_IS_SET: c_ulong = 1;
pub const PR_CAP_AMBIENT_RAISE: c_ulong = 2;
pub const PR_CAP_AMBIENT_LOWER: c_ulong = 3;
pub const PR_CAP_AMBIENT_CLEAR_ALL: c_ulong = 4;

/// Runs one of the capability prctl() options.
///
/// Only PR_CAPBSET_READ, PR_CAPBSET_DROP and PR_CAP_AMBIENT are accepted.
/// None of these take pointer arguments which is what makes this safe. Any
/// other option fails with EINVAL without entering the kernel.
pub fn cap_prctl(option: c_int, arg2: c_ulong, arg3: c_ulong) -> Result<c_int, Errno> {
    match option {
        PR_CAPBSET_READ | PR_CAPBSET_DROP | PR_CAP_AMBIENT => {}
        _ => return Err(Errno::EINVAL),
    }

    unsafe { raw::prctl(option, arg2, arg3) }
}

mod raw {
    use super::*;

    syscall!(prctl, libc::SYS_prctl, option: c_int, arg2: c_ulong, arg3: c_ulong => Result<c_int>);
}
