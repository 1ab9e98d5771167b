//! The bounding set limits which capabilities a process and its descendants
//! can ever gain. Bits can be dropped but never raised again.

use caps_sys::{c_ulong, PR_CAPBSET_DROP, PR_CAPBSET_READ};

use crate::errors::*;
use crate::kernel::{Kernel, SystemKernel};
use crate::set::Value;

/// Determines whether val is currently part of the bounding set of the
/// calling process. Fails if the kernel doesn't know about val (or doesn't
/// support bounding sets at all).
pub fn get_bound(val: Value) -> Result<bool> {
    get_bound_with(&SystemKernel, val)
}

/// Drops each of the values from the bounding set, in order.
///
/// This usually requires CAP_SETPCAP in the effective set. If dropping a
/// value fails, the error is returned immediately. Values dropped before it
/// stay dropped as the kernel has no way of restoring them.
pub fn drop_bound(vals: &[Value]) -> Result<()> {
    drop_bound_with(&SystemKernel, vals)
}

pub(crate) fn get_bound_with(kernel: &dyn Kernel, val: Value) -> Result<bool> {
    let v = kernel.prctl(PR_CAPBSET_READ, val.as_raw() as c_ulong, 0)?;
    Ok(v > 0)
}

pub(crate) fn drop_bound_with(kernel: &dyn Kernel, vals: &[Value]) -> Result<()> {
    for val in vals {
        trace!("Dropping {} from the bounding set", val);
        kernel.prctl(PR_CAPBSET_DROP, val.as_raw() as c_ulong, 0)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use caps_sys::*;
    use serial_test::serial;

    use super::*;
    use crate::kernel::testing::FakeKernel;

    #[test]
    fn read_bits() {
        let kernel = FakeKernel::new(_LINUX_CAPABILITY_VERSION_3);
        kernel.state().bounding = 1 << 4;

        assert_eq!(get_bound_with(&kernel, Value::new(4)), Ok(true));
        assert_eq!(get_bound_with(&kernel, Value::new(5)), Ok(false));
        assert_eq!(
            get_bound_with(&kernel, Value::new(41)),
            Err(CapabilityError::Kernel(Errno::EINVAL))
        );
    }

    #[test]
    fn unsupported_kernel() {
        let kernel = FakeKernel::new(_LINUX_CAPABILITY_VERSION_3);
        kernel.state().last_cap = None;
        assert!(get_bound_with(&kernel, Value::new(0)).is_err());
    }

    #[test]
    fn drop_is_not_undone_on_failure() {
        crate::init_logging();
        let kernel = FakeKernel::new(_LINUX_CAPABILITY_VERSION_3);

        assert_eq!(
            drop_bound_with(&kernel, &[Value::new(3), Value::new(50), Value::new(6)]),
            Err(CapabilityError::Kernel(Errno::EINVAL))
        );

        assert_eq!(get_bound_with(&kernel, Value::new(3)), Ok(false));

        // Nothing after the failure is attempted.
        assert_eq!(get_bound_with(&kernel, Value::new(6)), Ok(true));
    }

    #[test]
    fn drop_needs_permission() {
        let kernel = FakeKernel::new(_LINUX_CAPABILITY_VERSION_3);
        kernel.state().setpcap = false;

        assert_eq!(
            drop_bound_with(&kernel, &[Value::new(1)]),
            Err(CapabilityError::Kernel(Errno::EPERM))
        );
        assert_eq!(get_bound_with(&kernel, Value::new(1)), Ok(true));
    }

    #[test]
    fn drop_all() {
        let kernel = FakeKernel::new(_LINUX_CAPABILITY_VERSION_3);
        let vals = (0..41).map(Value::new).collect::<Vec<_>>();
        drop_bound_with(&kernel, &vals).unwrap();
        assert_eq!(kernel.state().bounding, 0);
    }

    #[test]
    #[serial]
    fn running_kernel() {
        assert!(get_bound(Value::new(0)).is_ok());
        assert!(get_bound(Value::new(crate::max_values() - 1)).is_ok());
        assert!(get_bound(Value::new(crate::max_values())).is_err());

        // Empty drops never reach the kernel.
        drop_bound(&[]).unwrap();
    }
}
