use caps_sys::Errno;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Fail)]
pub enum CapabilityError {
    /// The Set does not have the row layout required by the negotiated ABI.
    BadSet,

    /// A capability value or Flag is out of range for the negotiated ABI.
    BadValue,

    /// The kernel rejected the request. The error number is passed through
    /// as is.
    Kernel(Errno),
}

impl core::fmt::Display for CapabilityError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CapabilityError::BadSet => write!(f, "bad capability set"),
            CapabilityError::BadValue => write!(f, "bad capability value"),
            CapabilityError::Kernel(e) => write!(f, "{}", e),
        }
    }
}

impl From<Errno> for CapabilityError {
    fn from(e: Errno) -> Self {
        CapabilityError::Kernel(e)
    }
}

pub type Result<T, E = CapabilityError> = core::result::Result<T, E>;
