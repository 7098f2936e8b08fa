use hashbrown::HashSet;
use smallvec::SmallVec;

use super::trie::PrefixTrie;

/// The words a byte sequence splits into, as views into that sequence.
pub type Parts<'a> = SmallVec<[&'a [u8]; 8]>;

/// Splits byte sequences into words recognized by a trie.
///
/// No part is ever shorter than the minimum length, which should be the length of
/// the shortest input word. Among several valid splits the one returned is found by
/// trying the longest leading word first and recursing into the remainder, so a
/// given sequence always splits the same way.
///
/// # Examples
///
/// ```
/// use libcompound::{Decomposer, PrefixTrie};
///
/// let trie = PrefixTrie::from_words(["qu", "quart", "artful"]);
/// let decomposer = Decomposer::new(&trie, 2);
///
/// let parts = decomposer.sub_words(b"quartful").unwrap();
/// assert_eq!(parts.as_slice(), [&b"qu"[..], &b"artful"[..]]);
/// assert!(decomposer.sub_words(b"quartz").is_none());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Decomposer<'t> {
    trie: &'t PrefixTrie,
    min_len: usize,
    memoize: bool,
}

impl<'t> Decomposer<'t> {
    /// Creates a decomposer over `trie` whose parts are at least `min_len` bytes long.
    ///
    /// A `min_len` of zero is treated as one: an empty part can never help and would
    /// let the search spin forever.
    pub fn new(trie: &'t PrefixTrie, min_len: usize) -> Self {
        Decomposer {
            trie,
            min_len: min_len.max(1),
            memoize: true,
        }
    }

    /// Enables or disables remembering remainders that failed to split.
    ///
    /// This only changes how much work is done, never the result.
    pub fn with_memo(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    /// The smallest part length considered.
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// The trie words are looked up in.
    pub fn trie(&self) -> &'t PrefixTrie {
        self.trie
    }

    /// Splits `slice` into one or more words, or returns `None` if it cannot be done.
    ///
    /// A slice that is itself a word comes back as a single part. Otherwise split
    /// points are tried from the longest leading word down, and the first split whose
    /// remainder also decomposes wins.
    pub fn sub_words<'a>(&self, slice: &'a [u8]) -> Option<Parts<'a>> {
        let mut parts = Parts::new();
        let mut dead = HashSet::new();
        self.split(slice, &mut parts, &mut dead).then_some(parts)
    }

    /// Appends the parts of `slice` to `parts` and returns true, or leaves `parts`
    /// untouched and returns false.
    ///
    /// Every slice seen here is a suffix of the top-level slice, so its length is
    /// enough to identify it in `dead`.
    fn split<'a>(
        &self,
        slice: &'a [u8],
        parts: &mut Parts<'a>,
        dead: &mut HashSet<usize>,
    ) -> bool {
        if self.trie.is_word(slice) {
            parts.push(slice);
            return true;
        }
        if self.memoize && dead.contains(&slice.len()) {
            return false;
        }
        for &i in self.split_points(slice).iter().rev() {
            let (pre, rest) = slice.split_at(i);
            parts.push(pre);
            if self.split(rest, parts, dead) {
                return true;
            }
            parts.pop();
        }
        if self.memoize {
            dead.insert(slice.len());
        }
        false
    }

    /// Lengths `i` at which `slice[..i]` is a word and both sides are at least
    /// `min_len` long, ascending.
    fn split_points(&self, slice: &[u8]) -> SmallVec<[usize; 8]> {
        let mut points = SmallVec::new();
        let Some(max) = slice.len().checked_sub(self.min_len) else {
            return points;
        };
        let mut node = self.trie.root();
        for (depth, &byte) in slice[..max].iter().enumerate() {
            match node.get(byte) {
                Some(next) => node = next,
                None => break,
            }
            if depth + 1 >= self.min_len && node.is_word() {
                points.push(depth + 1);
            }
        }
        points
    }
}
