// Packing of capget/capset arguments.

use caps_sys::{cap_user_data, cap_user_header, pid_t, version_words};

use crate::errors::*;
use crate::kernel::Kernel;

fn header(magic: u32, pid: pid_t) -> cap_user_header {
    cap_user_header {
        version: magic,
        pid,
    }
}

/// Rows must match the layout the kernel associates with the magic exactly.
fn check_rows(magic: u32, rows: usize) -> Result<()> {
    if version_words(magic) != Some(rows) {
        return Err(CapabilityError::BadSet);
    }

    Ok(())
}

/// Reads the capabilities of pid into rows.
pub(crate) fn read(
    kernel: &dyn Kernel,
    magic: u32,
    pid: pid_t,
    rows: &mut [cap_user_data],
) -> Result<()> {
    check_rows(magic, rows.len())?;
    let mut hdr = header(magic, pid);
    kernel.capget(&mut hdr, Some(rows))?;
    Ok(())
}

/// Applies rows to the calling process.
pub(crate) fn write(kernel: &dyn Kernel, magic: u32, rows: &[cap_user_data]) -> Result<()> {
    check_rows(magic, rows.len())?;
    let hdr = header(magic, 0);
    kernel.capset(&hdr, rows)?;
    Ok(())
}
