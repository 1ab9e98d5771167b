use core::convert::TryFrom;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use caps_sys::{c_int, cap_user_data};

use crate::abi::Abi;
use crate::errors::*;

/// Selects one of the three capability vectors held in a Set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Flag {
    Effective = 0,
    Permitted = 1,
    Inheritable = 2,
}

impl Flag {
    pub const ALL: [Flag; 3] = [Flag::Effective, Flag::Permitted, Flag::Inheritable];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u32> for Flag {
    type Error = CapabilityError;

    fn try_from(value: u32) -> Result<Self> {
        Flag::ALL
            .get(value as usize)
            .copied()
            .ok_or(CapabilityError::BadValue)
    }
}

/// A single capability bit index (e.g. 21 for CAP_SYS_ADMIN).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Value(u32);

impl Value {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn as_raw(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn word(row: &cap_user_data, vec: Flag) -> u32 {
    match vec {
        Flag::Effective => row.effective,
        Flag::Permitted => row.permitted,
        Flag::Inheritable => row.inheritable,
    }
}

fn word_mut(row: &mut cap_user_data, vec: Flag) -> &mut u32 {
    match vec {
        Flag::Effective => &mut row.effective,
        Flag::Permitted => &mut row.permitted,
        Flag::Inheritable => &mut row.inheritable,
    }
}

/// Converts a Value into the row index and mask of its bit in a Set with
/// the given number of rows.
fn bit_of(words: usize, val: Value) -> Result<(usize, u32)> {
    let v = val.as_raw() as usize;
    if v >= words * 32 {
        return Err(CapabilityError::BadValue);
    }

    Ok((v / 32, 1 << (v % 32)))
}

/// In-memory capability set of a process.
///
/// This is only a local copy: changes are not visible to the kernel until
/// set_proc() is called.
pub struct Set {
    state: RwLock<SetState>,
}

struct SetState {
    /// One row per 32 capability values. Always has the width negotiated at
    /// construction time.
    flat: Vec<cap_user_data>,

    /// Root uid of the namespace the set is associated with. Carried along
    /// but not interpreted yet.
    ns_root: c_int,
}

impl Set {
    /// Creates an empty set sized for the running kernel.
    pub fn new() -> Self {
        Self::with_words(Abi::current().words())
    }

    pub(crate) fn with_words(words: usize) -> Self {
        Self::from_rows(vec![cap_user_data::default(); words])
    }

    pub(crate) fn from_rows(flat: Vec<cap_user_data>) -> Self {
        Self {
            state: RwLock::new(SetState { flat, ns_root: 0 }),
        }
    }

    /// Creates a set from rows in the kernel layout. There must be exactly
    /// one row per negotiated word.
    pub fn from_raw(rows: Vec<cap_user_data>) -> Result<Self> {
        if rows.len() != Abi::current().words() {
            return Err(CapabilityError::BadSet);
        }

        Ok(Self::from_rows(rows))
    }

    /// Snapshot of all rows in the kernel layout.
    pub fn raw(&self) -> Vec<cap_user_data> {
        self.read().flat.clone()
    }

    /// Number of 32-bit words per vector.
    pub fn words(&self) -> usize {
        self.read().flat.len()
    }

    pub(crate) fn with_rows<R, F: FnOnce(&[cap_user_data]) -> R>(&self, f: F) -> R {
        f(&self.read().flat)
    }

    fn read(&self) -> RwLockReadGuard<SetState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<SetState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Determines whether the bit for val is enabled in the vec vector.
    pub fn get_flag(&self, vec: Flag, val: Value) -> Result<bool> {
        let state = self.read();
        let (offset, mask) = bit_of(state.flat.len(), val)?;
        Ok(word(&state.flat[offset], vec) & mask != 0)
    }

    /// Sets all of the given bits of the vec vector to the enable state.
    ///
    /// No security checks are performed here. Only when the Set is applied
    /// with set_proc() does the kernel check the bits for validity and
    /// permission. If any value is out of range, BadValue is returned and
    /// the Set is left exactly as it was before the call.
    pub fn set_flag(&self, vec: Flag, enable: bool, vals: &[Value]) -> Result<()> {
        let mut state = self.write();

        let backup = state.flat.iter().map(|row| word(row, vec)).collect::<Vec<_>>();

        let mut result = Ok(());
        for val in vals {
            let (offset, mask) = match bit_of(state.flat.len(), *val) {
                Ok(v) => v,
                Err(e) => {
                    result = Err(e);
                    break;
                }
            };

            let w = word_mut(&mut state.flat[offset], vec);
            if enable {
                *w |= mask;
            } else {
                *w &= !mask;
            }
        }

        if result.is_err() {
            for (row, bits) in state.flat.iter_mut().zip(backup) {
                *word_mut(row, vec) = bits;
            }
        }

        result
    }

    /// Sets every bit of the vec vector to enable, including bits beyond the
    /// named capabilities.
    fn force_flag(&self, vec: Flag, enable: bool) {
        let m = if enable { !0 } else { 0 };

        let mut state = self.write();
        for row in state.flat.iter_mut() {
            *word_mut(row, vec) = m;
        }
    }

    /// Disables every value of the vec vector.
    pub fn clear_flag(&self, vec: Flag) {
        self.force_flag(vec, false)
    }

    /// Enables every value of the vec vector.
    ///
    /// NOTE: The kernel rejects bits above the named capabilities, so this
    /// is mainly useful for building masks.
    pub fn fill_flag(&self, vec: Flag) {
        self.force_flag(vec, true)
    }

    /// Resets the set to empty.
    pub fn clear(&self) {
        // Negotiation is not repeated: the width is the one this Set was
        // created with.
        let mut state = self.write();
        let words = state.flat.len();
        state.flat = vec![cap_user_data::default(); words];
        state.ns_root = 0;
    }

    /// Deep copy of the set. The copy shares nothing with the original.
    pub fn dup(&self) -> Set {
        let state = self.read();
        Set {
            state: RwLock::new(SetState {
                flat: state.flat.clone(),
                ns_root: state.ns_root,
            }),
        }
    }
}

impl Default for Set {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Set {
    fn clone(&self) -> Self {
        self.dup()
    }
}

impl core::fmt::Debug for Set {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.read();
        let hex = |vec: Flag| {
            state
                .flat
                .iter()
                .rev()
                .map(|row| format!("{:08x}", word(row, vec)))
                .collect::<Vec<_>>()
                .join("")
        };

        f.debug_struct("Set")
            .field("effective", &hex(Flag::Effective))
            .field("permitted", &hex(Flag::Permitted))
            .field("inheritable", &hex(Flag::Inheritable))
            .finish()
    }
}
