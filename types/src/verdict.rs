//! The payload-free binary outcome.

use std::ops::{BitAnd, BitOr, BitXor, Not};

/// Success or failure with nothing attached.
///
/// Both variants are unit variants, so [`Verdict::AFFIRMED`] and [`Verdict::DENIED`] are the
/// canonical instances and copying one never allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Affirmed,
    Denied,
}

impl Verdict {
    pub const AFFIRMED: Self = Self::Affirmed;
    pub const DENIED: Self = Self::Denied;

    #[must_use]
    pub const fn from_bool(affirmed: bool) -> Self {
        if affirmed {
            Self::Affirmed
        } else {
            Self::Denied
        }
    }

    #[must_use]
    pub const fn is_affirmed(self) -> bool {
        matches!(self, Self::Affirmed)
    }

    #[must_use]
    pub const fn is_denied(self) -> bool {
        matches!(self, Self::Denied)
    }

    /// Affirmed iff both are affirmed.
    #[must_use]
    pub const fn and(self, other: Self) -> Self {
        Self::from_bool(self.is_affirmed() && other.is_affirmed())
    }

    /// Affirmed iff at least one is affirmed.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        Self::from_bool(self.is_affirmed() || other.is_affirmed())
    }

    /// Affirmed iff exactly one is affirmed.
    #[must_use]
    pub const fn xor(self, other: Self) -> Self {
        Self::from_bool(self.is_affirmed() ^ other.is_affirmed())
    }

    #[must_use]
    pub const fn invert(self) -> Self {
        Self::from_bool(self.is_denied())
    }

    pub fn inspect_affirmed(self, f: impl FnOnce()) -> Self {
        if self.is_affirmed() {
            f();
        }
        self
    }

    pub fn inspect_denied(self, f: impl FnOnce()) -> Self {
        if self.is_denied() {
            f();
        }
        self
    }
}

impl From<bool> for Verdict {
    fn from(affirmed: bool) -> Self {
        Self::from_bool(affirmed)
    }
}

impl From<Verdict> for bool {
    fn from(verdict: Verdict) -> Self {
        verdict.is_affirmed()
    }
}

impl BitAnd for Verdict {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.and(rhs)
    }
}

impl BitOr for Verdict {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.or(rhs)
    }
}

impl BitXor for Verdict {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        self.xor(rhs)
    }
}

impl Not for Verdict {
    type Output = Self;

    fn not(self) -> Self {
        self.invert()
    }
}
