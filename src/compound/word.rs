use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

use smallvec::SmallVec;

/// Inline capacity of a [`Word`]. Most dictionary words fit without a heap allocation.
const INLINE_BYTES: usize = 24;

/// An immutable sequence of bytes read as one word of input.
///
/// Words compare, order and hash exactly like their byte slices, so sorting a
/// list of words gives byte-lexicographic order with no locale involved.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word(SmallVec<[u8; INLINE_BYTES]>);

impl Word {
    /// Creates a word holding a copy of `bytes`.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Word(SmallVec::from_slice(bytes))
    }

    /// Returns the bytes of this word.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for Word {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Word {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Borrow<[u8]> for Word {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq<[u8]> for Word {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<&[u8]> for Word {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_bytes() == *other
    }
}

impl PartialEq<&str> for Word {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(&self.0))
    }
}

/// Trait for types that can be turned into a [`Word`].
///
/// Implemented for common string and byte sequence types so that
/// [`WordStore::push`](super::store::WordStore::push) and the search entry points
/// accept them directly without manual conversion.
pub trait IntoWord {
    /// Collects this value into a word.
    fn into_word(self) -> Word;
}

impl IntoWord for Word {
    fn into_word(self) -> Word {
        self
    }
}

impl IntoWord for &Word {
    fn into_word(self) -> Word {
        self.clone()
    }
}

impl IntoWord for &str {
    fn into_word(self) -> Word {
        Word::from_slice(self.as_bytes())
    }
}

impl IntoWord for &&str {
    fn into_word(self) -> Word {
        Word::from_slice(self.as_bytes())
    }
}

impl IntoWord for String {
    fn into_word(self) -> Word {
        Word::from_slice(self.as_bytes())
    }
}

impl IntoWord for &String {
    fn into_word(self) -> Word {
        Word::from_slice(self.as_bytes())
    }
}

impl IntoWord for &[u8] {
    fn into_word(self) -> Word {
        Word::from_slice(self)
    }
}

impl IntoWord for Vec<u8> {
    fn into_word(self) -> Word {
        Word(SmallVec::from_vec(self))
    }
}

impl IntoWord for &Vec<u8> {
    fn into_word(self) -> Word {
        Word::from_slice(self)
    }
}

impl<const N: usize> IntoWord for [u8; N] {
    fn into_word(self) -> Word {
        Word::from_slice(&self)
    }
}

impl<const N: usize> IntoWord for &[u8; N] {
    fn into_word(self) -> Word {
        Word::from_slice(self)
    }
}
