//! Reading and writing the capabilities of a process.

use caps_sys::{cap_user_data, pid_t};

use crate::abi::Abi;
use crate::errors::*;
use crate::kernel::{Kernel, SystemKernel};
use crate::marshal;
use crate::set::Set;

/// Reads the capability set of the process with the given pid. A pid of 0
/// refers to the calling process.
pub fn get_pid(pid: pid_t) -> Result<Set> {
    get_pid_with(&SystemKernel, Abi::current(), pid)
}

/// Reads the capability set of the calling process.
///
/// # Panics
///
/// Every live process has a capability set, so this panics if the kernel
/// can't produce one.
pub fn get_proc() -> Set {
    get_proc_with(&SystemKernel, Abi::current())
}

pub(crate) fn get_pid_with(kernel: &dyn Kernel, abi: &Abi, pid: pid_t) -> Result<Set> {
    let mut rows = vec![cap_user_data::default(); abi.words()];
    marshal::read(kernel, abi.magic(), pid, &mut rows)?;
    Ok(Set::from_rows(rows))
}

pub(crate) fn get_proc_with(kernel: &dyn Kernel, abi: &Abi) -> Set {
    match get_pid_with(kernel, abi, 0) {
        Ok(set) => set,
        Err(e) => {
            error!("Failed to read capabilities of the current process: {}", e);
            panic!("Failed to read capabilities of the current process: {}", e);
        }
    }
}

impl Set {
    /// Applies this set to the calling process.
    ///
    /// The kernel performs all permission checks. Errors it returns are not
    /// retried.
    pub fn set_proc(&self) -> Result<()> {
        self.set_proc_with(&SystemKernel, Abi::current())
    }

    pub(crate) fn set_proc_with(&self, kernel: &dyn Kernel, abi: &Abi) -> Result<()> {
        self.with_rows(|rows| marshal::write(kernel, abi.magic(), rows))
    }
}

#[cfg(test)]
mod tests {
    use caps_sys::*;
    use serial_test::serial;

    use super::*;
    use crate::kernel::testing::FakeKernel;
    use crate::set::{Flag, Value};

    fn fake(version: u32) -> (FakeKernel, Abi) {
        let kernel = FakeKernel::new(version);
        let abi = Abi::negotiate(&kernel);
        (kernel, abi)
    }

    #[test]
    fn get_pid_returns_snapshot() {
        let (kernel, abi) = fake(_LINUX_CAPABILITY_VERSION_3);
        kernel.state().procs.get_mut(&0).unwrap()[1].permitted = 1 << 3;

        let set = get_pid_with(&kernel, &abi, 0).unwrap();
        assert_eq!(set.words(), 2);
        assert_eq!(set.get_flag(Flag::Permitted, Value::new(35)), Ok(true));

        // Decoupled from the kernel after the read.
        kernel.state().procs.get_mut(&0).unwrap()[1].permitted = 0;
        assert_eq!(set.get_flag(Flag::Permitted, Value::new(35)), Ok(true));
    }

    #[test]
    fn get_pid_legacy_width() {
        let (kernel, abi) = fake(_LINUX_CAPABILITY_VERSION_1);
        kernel.state().procs.get_mut(&0).unwrap()[0].effective = 1;

        let set = get_proc_with(&kernel, &abi);
        assert_eq!(set.words(), 1);
        assert_eq!(set.get_flag(Flag::Effective, Value::new(0)), Ok(true));
        assert_eq!(
            set.get_flag(Flag::Effective, Value::new(32)),
            Err(CapabilityError::BadValue)
        );
    }

    #[test]
    fn get_pid_unknown_process() {
        let (kernel, abi) = fake(_LINUX_CAPABILITY_VERSION_3);
        assert_eq!(
            get_pid_with(&kernel, &abi, 4321).err(),
            Some(CapabilityError::Kernel(Errno::ESRCH))
        );
    }

    #[test]
    #[should_panic(expected = "Failed to read capabilities")]
    fn get_proc_panics_without_a_set() {
        let (kernel, abi) = fake(_LINUX_CAPABILITY_VERSION_3);
        kernel.state().procs.clear();
        get_proc_with(&kernel, &abi);
    }

    #[test]
    fn set_proc_applies_rows() {
        let (kernel, abi) = fake(_LINUX_CAPABILITY_VERSION_3);
        kernel.state().procs.get_mut(&0).unwrap()[0].permitted = 0b110;

        let set = get_proc_with(&kernel, &abi);
        set.set_flag(Flag::Effective, true, &[Value::new(1), Value::new(2)])
            .unwrap();
        set.set_proc_with(&kernel, &abi).unwrap();

        assert_eq!(kernel.state().procs[&0][0].effective, 0b110);
    }

    #[test]
    fn set_proc_passes_kernel_errors_through() {
        let (kernel, abi) = fake(_LINUX_CAPABILITY_VERSION_3);

        let set = get_proc_with(&kernel, &abi);
        set.set_flag(Flag::Permitted, true, &[Value::new(21)]).unwrap();
        assert_eq!(
            set.set_proc_with(&kernel, &abi),
            Err(CapabilityError::Kernel(Errno::EPERM))
        );
        assert_eq!(kernel.state().procs[&0][0].permitted, 0);
    }

    #[test]
    fn set_proc_rejects_wrong_width() {
        let (kernel, abi) = fake(_LINUX_CAPABILITY_VERSION_3);
        let set = Set::with_words(1);
        assert_eq!(
            set.set_proc_with(&kernel, &abi),
            Err(CapabilityError::BadSet)
        );
    }

    #[test]
    #[serial]
    fn running_process_round_trip() {
        crate::init_logging();
        let set = get_proc();
        assert_eq!(set.words(), Abi::current().words());

        // Effective is always a subset of permitted.
        for v in 0..crate::max_values() {
            let v = Value::new(v);
            if set.get_flag(Flag::Effective, v).unwrap() {
                assert!(set.get_flag(Flag::Permitted, v).unwrap());
            }
        }

        let own = get_pid(0).unwrap();
        assert_eq!(own.raw(), set.raw());

        // Writing back what we already have is always allowed.
        set.set_proc().unwrap();
        assert_eq!(get_proc().raw(), set.raw());
    }
}
