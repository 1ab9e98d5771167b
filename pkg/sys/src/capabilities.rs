// Process capability syscalls.
//
// Capability syscalls are defined here:
// https://github.com/torvalds/linux/blob/master/include/uapi/linux/capability.h#L36

use core::mem::size_of;

use crate::{pid_t, Errno};

/// 32-bit capabilities. One row of data.
pub const _LINUX_CAPABILITY_VERSION_1: u32 = 0x19980330;
pub const _LINUX_CAPABILITY_U32S_1: usize = 1;

/// First 64-bit revision. Deprecated by the kernel but still accepted.
pub const _LINUX_CAPABILITY_VERSION_2: u32 = 0x20071026;
pub const _LINUX_CAPABILITY_U32S_2: usize = 2;

pub const _LINUX_CAPABILITY_VERSION_3: u32 = 0x20080522;
pub const _LINUX_CAPABILITY_U32S_3: usize = 2;

/// Number of cap_user_data rows the kernel reads or writes for the given
/// header version.
pub fn version_words(version: u32) -> Option<usize> {
    match version {
        _LINUX_CAPABILITY_VERSION_1 => Some(_LINUX_CAPABILITY_U32S_1),
        _LINUX_CAPABILITY_VERSION_2 => Some(_LINUX_CAPABILITY_U32S_2),
        _LINUX_CAPABILITY_VERSION_3 => Some(_LINUX_CAPABILITY_U32S_3),
        _ => None,
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct cap_user_header {
    pub version: u32,
    pub pid: pid_t,
}

/// One 32-bit word of each of the three capability vectors.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct cap_user_data {
    pub effective: u32,
    pub permitted: u32,
    pub inheritable: u32,
}

// The kernel copies these byte for byte so neither may contain padding.
const _: () = assert!(size_of::<cap_user_header>() == 8);
const _: () = assert!(size_of::<cap_user_data>() == 12);

/// Reads the capabilities of the process identified by hdr.pid (0 for the
/// calling thread).
///
/// If data is None, no capabilities are read and the kernel only writes back
/// its preferred version into hdr.version. The kernel will also do this if
/// hdr.version is not a version it understands.
pub fn capget(hdr: &mut cap_user_header, data: Option<&mut [cap_user_data]>) -> Result<(), Errno> {
    let datap = match data {
        Some(data) => {
            check_len(hdr.version, data.len())?;
            data.as_mut_ptr()
        }
        None => core::ptr::null_mut(),
    };

    unsafe { raw::capget(hdr, datap) }
}

/// Replaces the capabilities of the calling thread.
///
/// NOTE: The kernel only supports hdr.pid being 0 or the caller's own pid.
pub fn capset(hdr: &cap_user_header, data: &[cap_user_data]) -> Result<(), Errno> {
    check_len(hdr.version, data.len())?;
    unsafe { raw::capset(hdr, data.as_ptr()) }
}

/// Makes sure that the kernel will never touch memory past the end of the
/// given buffer. Unknown versions are treated like the newest one.
fn check_len(version: u32, len: usize) -> Result<(), Errno> {
    let words = version_words(version).unwrap_or(_LINUX_CAPABILITY_U32S_3);
    if len < words {
        return Err(Errno::EFAULT);
    }

    Ok(())
}

mod raw {
    use super::*;

    syscall!(capget, libc::SYS_capget, hdrp: *mut cap_user_header, datap: *mut cap_user_data => Result<()>);
    syscall!(capset, libc::SYS_capset, hdrp: *const cap_user_header, datap: *const cap_user_data => Result<()>);
}
