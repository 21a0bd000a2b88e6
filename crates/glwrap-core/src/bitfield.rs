//! Typed replacement for raw `GLbitfield` masks.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign};

use gl::types::GLbitfield;

/// A single named flag that can be combined into a [`Bitfield`].
pub trait Bit: Copy + 'static {
    fn bits(self) -> GLbitfield;
}

/// A set of `B` flags stored as one `GLbitfield`.
///
/// ```
/// use glwrap_core::enums::BufferMapAccessFlags;
/// use glwrap_core::Bitfield;
///
/// let access = BufferMapAccessFlags::MapRead | BufferMapAccessFlags::MapWrite;
/// assert!(access.test(BufferMapAccessFlags::MapWrite));
/// assert_eq!(u32::from(access), gl::MAP_READ_BIT | gl::MAP_WRITE_BIT);
/// ```
pub struct Bitfield<B> {
    bits: GLbitfield,
    _bit: PhantomData<B>,
}

impl<B: Bit> Bitfield<B> {
    /// The empty set.
    pub const fn empty() -> Self {
        Self::from_bits(0)
    }

    /// Wraps a raw mask without checking that its bits are valid `B` flags.
    pub const fn from_bits(bits: GLbitfield) -> Self {
        Self {
            bits,
            _bit: PhantomData,
        }
    }

    pub const fn bits(&self) -> GLbitfield {
        self.bits
    }

    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Returns true if every bit of `other` is set in `self`.
    pub fn test(&self, other: impl Into<Bitfield<B>>) -> bool {
        let other = other.into().bits;
        self.bits & other == other
    }
}

impl<B: Bit> Default for Bitfield<B> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<B> Clone for Bitfield<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for Bitfield<B> {}

impl<B> PartialEq for Bitfield<B> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<B> Eq for Bitfield<B> {}

impl<B> Hash for Bitfield<B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
    }
}

impl<B> fmt::Debug for Bitfield<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitfield({:#x})", self.bits)
    }
}

impl<B: Bit> From<B> for Bitfield<B> {
    fn from(bit: B) -> Self {
        Self::from_bits(bit.bits())
    }
}

impl<B: Bit, const N: usize> From<[B; N]> for Bitfield<B> {
    fn from(bits: [B; N]) -> Self {
        bits.into_iter().collect()
    }
}

impl<B: Bit> FromIterator<B> for Bitfield<B> {
    fn from_iter<I: IntoIterator<Item = B>>(iter: I) -> Self {
        let mut field = Self::empty();
        field.extend(iter);
        field
    }
}

impl<B: Bit> Extend<B> for Bitfield<B> {
    fn extend<I: IntoIterator<Item = B>>(&mut self, iter: I) {
        for bit in iter {
            *self |= bit;
        }
    }
}

impl<B> From<Bitfield<B>> for GLbitfield {
    fn from(field: Bitfield<B>) -> GLbitfield {
        field.bits
    }
}

macro_rules! bitfield_op {
    ($op:ident, $method:ident, $assign:ident, $assign_method:ident, $sym:tt) => {
        impl<B: Bit> $op for Bitfield<B> {
            type Output = Bitfield<B>;

            fn $method(self, rhs: Bitfield<B>) -> Bitfield<B> {
                Bitfield::from_bits(self.bits $sym rhs.bits)
            }
        }

        impl<B: Bit> $op<B> for Bitfield<B> {
            type Output = Bitfield<B>;

            fn $method(self, rhs: B) -> Bitfield<B> {
                Bitfield::from_bits(self.bits $sym rhs.bits())
            }
        }

        impl<B: Bit> $assign for Bitfield<B> {
            fn $assign_method(&mut self, rhs: Bitfield<B>) {
                self.bits = self.bits $sym rhs.bits;
            }
        }

        impl<B: Bit> $assign<B> for Bitfield<B> {
            fn $assign_method(&mut self, rhs: B) {
                self.bits = self.bits $sym rhs.bits();
            }
        }
    };
}

bitfield_op!(BitOr, bitor, BitOrAssign, bitor_assign, |);
bitfield_op!(BitAnd, bitand, BitAndAssign, bitand_assign, &);
bitfield_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, ^);

/// Declares a `#[repr(u32)]` flag enum implementing [`Bit`], where
/// `Flag | Flag` produces a [`Bitfield`].
macro_rules! gl_bits {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(u32)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value),+
        }

        impl $crate::bitfield::Bit for $name {
            fn bits(self) -> ::gl::types::GLbitfield {
                self as ::gl::types::GLbitfield
            }
        }

        impl ::std::ops::BitOr for $name {
            type Output = $crate::bitfield::Bitfield<$name>;

            fn bitor(self, rhs: $name) -> Self::Output {
                $crate::bitfield::Bitfield::from(self) | rhs
            }
        }
    };
}

pub(crate) use gl_bits;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{BufferMapAccessFlags, BufferSelectBit};

    #[test]
    fn or_assign_accumulates_flags() {
        let mut f = Bitfield::<BufferMapAccessFlags>::empty();
        f |= BufferMapAccessFlags::MapRead;
        f |= BufferMapAccessFlags::MapWrite;
        assert_eq!(GLbitfield::from(f), gl::MAP_READ_BIT | gl::MAP_WRITE_BIT);
    }

    #[test]
    fn or_assign_is_idempotent() {
        let mut once = Bitfield::<BufferSelectBit>::empty();
        once |= BufferSelectBit::Depth;

        let mut twice = Bitfield::<BufferSelectBit>::empty();
        twice |= BufferSelectBit::Depth;
        twice |= BufferSelectBit::Depth;

        assert_eq!(once, twice);
    }

    #[test]
    fn test_requires_every_bit() {
        let f = BufferSelectBit::Color | BufferSelectBit::Depth;
        assert!(f.test(BufferSelectBit::Color));
        assert!(f.test(BufferSelectBit::Color | BufferSelectBit::Depth));
        assert!(!f.test(BufferSelectBit::Stencil));
        assert!(!f.test(BufferSelectBit::Depth | BufferSelectBit::Stencil));
    }

    #[test]
    fn array_construction_matches_raw_or() {
        let f = Bitfield::from([
            BufferMapAccessFlags::MapRead,
            BufferMapAccessFlags::MapInvalidateRange,
        ]);
        assert_eq!(
            f.bits(),
            gl::MAP_READ_BIT | gl::MAP_INVALIDATE_RANGE_BIT
        );
    }

    #[test]
    fn and_and_xor_work_on_raw_bits() {
        let all = BufferSelectBit::Color | BufferSelectBit::Depth | BufferSelectBit::Stencil;
        let depth_only = all & BufferSelectBit::Depth;
        assert_eq!(depth_only.bits(), gl::DEPTH_BUFFER_BIT);

        let mut toggled = all;
        toggled ^= BufferSelectBit::Stencil;
        assert!(!toggled.test(BufferSelectBit::Stencil));
        toggled ^= BufferSelectBit::Stencil;
        assert_eq!(toggled, all);
    }

    #[test]
    fn empty_field_tests_true_for_empty_set() {
        let f = Bitfield::<BufferSelectBit>::empty();
        assert!(f.is_empty());
        assert!(f.test(Bitfield::empty()));
    }
}
