//! Negotiation of the capability ABI used by the running kernel.

use caps_sys::{
    cap_user_header, _LINUX_CAPABILITY_VERSION_1, _LINUX_CAPABILITY_VERSION_2,
    _LINUX_CAPABILITY_VERSION_3,
};

use crate::bound::get_bound_with;
use crate::kernel::{Kernel, SystemKernel};
use crate::set::Value;

/// Number of capabilities named at build time (up to and including
/// CAP_CHECKPOINT_RESTORE). Used when the kernel can't tell us itself.
pub const NAMED_COUNT: u32 = 41;

lazy_static! {
    static ref CURRENT: Abi = Abi::negotiate(&SystemKernel);
}

/// Capability ABI agreed upon with the kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Abi {
    magic: u32,
    words: usize,
    max_values: u32,
}

impl Abi {
    /// The ABI of this process. Negotiated on first use and fixed afterwards.
    pub fn current() -> &'static Abi {
        &CURRENT
    }

    pub(crate) fn negotiate(kernel: &dyn Kernel) -> Self {
        let mut hdr = cap_user_header {
            version: _LINUX_CAPABILITY_VERSION_3,
            pid: 0,
        };

        // Without a data buffer nothing is read, but the kernel always writes
        // back the version it prefers, so the result is ignored.
        let _ = kernel.capget(&mut hdr, None);

        let (magic, words) = match hdr.version {
            _LINUX_CAPABILITY_VERSION_1 => (_LINUX_CAPABILITY_VERSION_1, 1),
            _LINUX_CAPABILITY_VERSION_2 | _LINUX_CAPABILITY_VERSION_3 => (hdr.version, 2),
            v => {
                warn!(
                    "Unknown kernel capability version 0x{:08x}. Falling back to 0x{:08x}",
                    v, _LINUX_CAPABILITY_VERSION_3
                );
                (_LINUX_CAPABILITY_VERSION_3, 2)
            }
        };

        let mut max_values = first_unbounded(kernel, words);
        if max_values == 0 {
            warn!(
                "Bounding set unavailable. Assuming {} named capabilities",
                NAMED_COUNT
            );
            max_values = NAMED_COUNT;
        }

        let abi = Self {
            magic,
            words,
            max_values,
        };
        debug!("Negotiated capability ABI: {:?}", abi);
        abi
    }

    /// Version magic sent to the kernel in every capget/capset header.
    pub fn magic(&self) -> u32 {
        self.magic
    }

    /// Number of 32-bit words in each capability vector (1 or 2).
    pub fn words(&self) -> usize {
        self.words
    }

    /// Number of capability values the kernel knows about. Values
    /// [0, max_values) are named.
    pub fn max_values(&self) -> u32 {
        self.max_values
    }
}

/// Binary searches for the smallest value that isn't readable from the
/// bounding set. All values below the kernel's last capability are readable
/// and all those above it fail.
fn first_unbounded(kernel: &dyn Kernel, words: usize) -> u32 {
    let mut lo = 0;
    let mut hi = (words * 32) as u32;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if get_bound_with(kernel, Value::new(mid)).is_err() {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }

    lo
}
