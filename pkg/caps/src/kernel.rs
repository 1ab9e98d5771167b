use caps_sys::{c_int, c_ulong, cap_user_data, cap_user_header, Errno};

/// The syscalls every component goes through.
pub(crate) trait Kernel: Sync {
    fn capget(
        &self,
        hdr: &mut cap_user_header,
        data: Option<&mut [cap_user_data]>,
    ) -> Result<(), Errno>;

    fn capset(&self, hdr: &cap_user_header, data: &[cap_user_data]) -> Result<(), Errno>;

    fn prctl(&self, option: c_int, arg2: c_ulong, arg3: c_ulong) -> Result<c_int, Errno>;
}

/// The running kernel.
pub(crate) struct SystemKernel;

impl Kernel for SystemKernel {
    fn capget(
        &self,
        hdr: &mut cap_user_header,
        data: Option<&mut [cap_user_data]>,
    ) -> Result<(), Errno> {
        caps_sys::capget(hdr, data)
    }

    fn capset(&self, hdr: &cap_user_header, data: &[cap_user_data]) -> Result<(), Errno> {
        caps_sys::capset(hdr, data)
    }

    fn prctl(&self, option: c_int, arg2: c_ulong, arg3: c_ulong) -> Result<c_int, Errno> {
        caps_sys::cap_prctl(option, arg2, arg3)
    }
}
