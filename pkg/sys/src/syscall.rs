/*
All syscalls go through libc's generic syscall() entry point rather than the
glibc wrappers. The wrappers for capget/capset are missing on some libcs and
prctl() is variadic.

syscall() returns -1 and stores the error in errno on failure. syscall_raw()
folds that back into the kernel convention of returning a negative error
number so that the macros below only need to look at a single value.
*/

macro_rules! syscall {
    // The syscall should always return zero on success or a negative error number otherwise.
    ($name:ident, $number:expr $(, $arg:ident : $t:ty)* => Result<()>) => {
        pub unsafe fn $name($( $arg : $t ),*) -> Result<(), Errno>  {
            let val = syscall_expand!($number as u64 $(, $arg as u64 )*);
            if val != 0 {
                Err(Errno(-val))
            } else {
                Ok(())
            }
        }
    };

    // The syscall returns either a positive value or a negative error number.
    ($name:ident, $number:expr $(, $arg:ident : $t:ty)* => Result<$ret:ty>) => {
        pub unsafe fn $name($( $arg : $t ),*) -> Result<$ret, Errno>  {
            let val = syscall_expand!($number as u64 $(, $arg as u64 )*);
            if val < 0 {
                Err(Errno(-val))
            } else {
                Ok(val as $ret)
            }
        }
    };
}

macro_rules! syscall_expand {
    ($num:expr, $arg1:expr) => {
        $crate::syscall::syscall_raw($num, $arg1, 0, 0)
    };
    ($num:expr, $arg1:expr, $arg2:expr) => {
        $crate::syscall::syscall_raw($num, $arg1, $arg2, 0)
    };
    ($num:expr, $arg1:expr, $arg2:expr, $arg3:expr) => {
        $crate::syscall::syscall_raw($num, $arg1, $arg2, $arg3)
    };
}

/// Makes a single linux syscall with up to three arguments.
///
/// NOTE: prctl() takes five arguments. The capability related options
/// require the trailing two to be zero so they are always passed as zero.
pub unsafe fn syscall_raw(num: u64, arg1: u64, arg2: u64, arg3: u64) -> i64 {
    let val = libc::syscall(num as libc::c_long, arg1, arg2, arg3, 0u64, 0u64);
    if val == -1 {
        -crate::Errno::last().0
    } else {
        val as i64
    }
}
