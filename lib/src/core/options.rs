//! # Execution Options
//!
//! File: lib/src/core/options.rs
//! Author: Christi Mahu
//!
//! A small set of independent flags that change how commands are executed.
//! Any subset is valid and the flags compose by set union:
//!
//! ```rust
//! use cmds::ExecuteOptions;
//!
//! let opts = ExecuteOptions::default() | ExecuteOptions::PRINT_ARGUMENTS;
//! assert!(opts.contains(ExecuteOptions::TERMINATE_ON_FAILURE));
//! assert!(opts.contains(ExecuteOptions::PRINT_ARGUMENTS));
//! ```
//!
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Flags controlling execution. The default contains only `TERMINATE_ON_FAILURE`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExecuteOptions(u8);

impl ExecuteOptions {
    /// Stop a batch at the first failing command and return that failure.
    pub const TERMINATE_ON_FAILURE: Self = Self(1);
    /// Write every argument list to stderr before the process starts.
    pub const PRINT_ARGUMENTS: Self = Self(1 << 2);
    /// Send the (final) standard output to the null device; nothing is captured.
    pub const SILENCE_STANDARD_OUT: Self = Self(1 << 3);

    const NAMED: [(Self, &'static str); 3] = [
        (Self::TERMINATE_ON_FAILURE, "TERMINATE_ON_FAILURE"),
        (Self::PRINT_ARGUMENTS, "PRINT_ARGUMENTS"),
        (Self::SILENCE_STANDARD_OUT, "SILENCE_STANDARD_OUT"),
    ];

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns a copy with every flag of `other` removed.
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self::TERMINATE_ON_FAILURE
    }
}

impl BitOr for ExecuteOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for ExecuteOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Debug for ExecuteOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Self::NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "ExecuteOptions({})", names.join(" | "))
    }
}
