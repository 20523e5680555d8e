//! Modifier bit sets for program elements.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// A set of declaration modifiers, stored as the JVM modifier bits.
///
/// `Modifiers` is a plain value; set algebra goes through [`BitOr`],
/// [`Modifiers::contains`] and [`Modifiers::without`]. Metadata-backed
/// symbols carry the bits reported by the classpath capability verbatim;
/// tree-backed symbols carry the bits recorded on their declaration node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Modifiers(u16);

impl Modifiers {
    pub const PUBLIC: Modifiers = Modifiers(0x0001);
    pub const PRIVATE: Modifiers = Modifiers(0x0002);
    pub const PROTECTED: Modifiers = Modifiers(0x0004);
    pub const STATIC: Modifiers = Modifiers(0x0008);
    pub const FINAL: Modifiers = Modifiers(0x0010);
    pub const SYNCHRONIZED: Modifiers = Modifiers(0x0020);
    pub const VOLATILE: Modifiers = Modifiers(0x0040);
    pub const TRANSIENT: Modifiers = Modifiers(0x0080);
    pub const NATIVE: Modifiers = Modifiers(0x0100);
    pub const ABSTRACT: Modifiers = Modifiers(0x0400);
    pub const STRICT: Modifiers = Modifiers(0x0800);
    /// Marks a field that is an enum constant.
    pub const ENUM: Modifiers = Modifiers(0x4000);

    /// The empty modifier set.
    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Create from raw JVM modifier bits.
    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Get the raw bits.
    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Check whether all bits of `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    /// Return `self` with all bits of `other` cleared.
    #[inline]
    pub const fn without(self, other: Modifiers) -> Self {
        Self(self.0 & !other.0)
    }

    #[inline]
    pub const fn is_public(self) -> bool {
        self.contains(Self::PUBLIC)
    }

    #[inline]
    pub const fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }

    #[inline]
    pub const fn is_final(self) -> bool {
        self.contains(Self::FINAL)
    }

    #[inline]
    pub const fn is_abstract(self) -> bool {
        self.contains(Self::ABSTRACT)
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    #[inline]
    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifiers {
    #[inline]
    fn bitor_assign(&mut self, rhs: Modifiers) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: &[(Modifiers, &str)] = &[
            (Modifiers::PUBLIC, "public"),
            (Modifiers::PRIVATE, "private"),
            (Modifiers::PROTECTED, "protected"),
            (Modifiers::STATIC, "static"),
            (Modifiers::FINAL, "final"),
            (Modifiers::SYNCHRONIZED, "synchronized"),
            (Modifiers::VOLATILE, "volatile"),
            (Modifiers::TRANSIENT, "transient"),
            (Modifiers::NATIVE, "native"),
            (Modifiers::ABSTRACT, "abstract"),
            (Modifiers::STRICT, "strictfp"),
            (Modifiers::ENUM, "enum"),
        ];

        let mut first = true;
        for (bit, name) in NAMES {
            if self.contains(*bit) {
                if !first {
                    f.write_str(" ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        if first {
            f.write_str("(none)")?;
        }
        Ok(())
    }
}
