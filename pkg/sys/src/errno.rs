/// Positive error number returned by a failed syscall.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Fail)]
pub struct Errno(pub i64);

impl Errno {
    pub const EPERM: Errno = Errno(libc::EPERM as i64);
    pub const ESRCH: Errno = Errno(libc::ESRCH as i64);
    pub const EFAULT: Errno = Errno(libc::EFAULT as i64);
    pub const EINVAL: Errno = Errno(libc::EINVAL as i64);

    /// Reads the error left behind by the last failed libc call on this
    /// thread.
    pub fn last() -> Self {
        Errno(
            std::io::Error::last_os_error()
                .raw_os_error()
                .unwrap_or(libc::EINVAL) as i64,
        )
    }
}

impl std::fmt::Display for Errno {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} ({})",
            self,
            std::io::Error::from_raw_os_error(self.0 as i32)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errno_display_includes_os_message() {
        let s = Errno::EPERM.to_string();
        assert!(s.starts_with("Errno(1)"));
        assert!(s.len() > "Errno(1) ()".len());
    }
}
