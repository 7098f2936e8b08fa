use mark_last::MarkLastIterator;
use smallvec::SmallVec;
use tracing::trace;

use super::children::{ChildIter, Children};
use super::word::{IntoWord, Word};

/// Lengths of the proper prefixes of an inserted word that were already words.
pub type PrefixEnds = SmallVec<[usize; 8]>;

/// A node in the prefix trie.
///
/// A node stands for the byte sequence spelled by the path from the root to it.
/// The node is a word node if that sequence was inserted as a word.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrieNode {
    children: Children,
    word: bool,
}

impl TrieNode {
    /// Creates a node without children.
    ///
    /// # Arguments
    ///
    /// * `word` - Whether this node represents the end of a word
    pub fn new(word: bool) -> Self {
        TrieNode {
            children: Children::None,
            word,
        }
    }

    /// Returns the node that `byte`'s edge leads to, or `None` if no such edge exists.
    #[inline]
    pub fn get(&self, byte: u8) -> Option<&TrieNode> {
        self.children.get(byte)
    }

    /// True if this node corresponds to the end of a word.
    #[inline]
    pub fn is_word(&self) -> bool {
        self.word
    }

    pub(crate) fn set_word(&mut self) {
        self.word = true;
    }

    /// Returns true if following `suffix` from this node ends on a word.
    #[inline]
    pub fn has_suffix(&self, suffix: &[u8]) -> bool {
        suffix
            .iter()
            .try_fold(self, |node, &byte| node.get(byte))
            .is_some_and(TrieNode::is_word)
    }

    /// Returns an iterator over all children of this node, in ascending byte order.
    #[inline]
    pub fn children(&self) -> ChildIter<'_> {
        self.children.iter()
    }

    /// Returns the number of children.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// A byte-keyed prefix tree recording a set of words.
///
/// Membership tests cost one step per byte of the probe, whatever the number of
/// words stored. Every node owns its children outright; there is no sharing between
/// branches, so the tree is freed like any other owned value.
///
/// # Examples
///
/// ```
/// use libcompound::PrefixTrie;
///
/// let mut trie = PrefixTrie::new();
/// assert!(!trie.insert(b"foo"));
/// assert!(trie.insert(b"foobar"));
///
/// assert!(trie.is_word(b"foo"));
/// assert!(!trie.is_word(b"foob"));
/// assert!(trie.has_prefix(b"foob"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefixTrie {
    root: TrieNode,
    words: usize,
    nodes: usize,
}

impl PrefixTrie {
    /// Creates a trie holding no words.
    pub fn new() -> Self {
        PrefixTrie {
            root: TrieNode::new(false),
            words: 0,
            nodes: 1,
        }
    }

    /// Creates a trie holding every word of `words`.
    ///
    /// Words may come in any order. Use [`CandidateSelector`](super::selector::CandidateSelector)
    /// when the prefix information gathered during insertion is needed.
    pub fn from_words<W: IntoWord>(words: impl IntoIterator<Item = W>) -> Self {
        let mut trie = PrefixTrie::new();
        for word in words {
            trie.insert(&word.into_word());
        }
        trie
    }

    /// Inserts `word` and returns true if a proper, non-empty prefix of it was already
    /// a word.
    ///
    /// Only words inserted earlier are seen. Inserting in ascending order therefore
    /// finds every prefix, since a prefix always sorts before the word it starts.
    pub fn insert(&mut self, word: &[u8]) -> bool {
        !self.insert_with_prefixes(word).is_empty()
    }

    /// Inserts `word` and returns the lengths of its proper, non-empty prefixes that
    /// were already words, shortest first.
    ///
    /// The empty prefix never counts, even when the empty word has been inserted.
    pub fn insert_with_prefixes(&mut self, word: &[u8]) -> PrefixEnds {
        let mut ends = PrefixEnds::new();
        let mut node = &mut self.root;
        for (depth, (last, byte)) in word.iter().copied().mark_last().enumerate() {
            let (child, created) = node.children.get_or_insert(byte);
            if created {
                self.nodes += 1;
            } else if !last && child.word {
                ends.push(depth + 1);
            }
            node = child;
        }
        if !node.word {
            node.set_word();
            self.words += 1;
        }
        trace!(len = word.len(), prefixes = ends.len(), "inserted word");
        ends
    }

    /// Returns the node reached by following `prefix` from the root, if that path exists.
    #[inline]
    pub fn node(&self, prefix: &[u8]) -> Option<&TrieNode> {
        prefix
            .iter()
            .try_fold(&self.root, |node, &byte| node.get(byte))
    }

    /// True if `slice` was inserted as a word.
    #[inline]
    pub fn is_word(&self, slice: &[u8]) -> bool {
        self.root.has_suffix(slice)
    }

    /// True if some word in the trie starts with `prefix`.
    ///
    /// Every node but the root lies on the path of a word, so only the bare root of an
    /// empty trie needs checking.
    #[inline]
    pub fn has_prefix(&self, prefix: &[u8]) -> bool {
        self.node(prefix)
            .is_some_and(|node| node.is_word() || node.child_count() > 0)
    }

    /// Returns the root node.
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words
    }

    /// True if no word has been inserted.
    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Returns every word in the trie in ascending byte order.
    pub fn words(&self) -> Vec<Word> {
        let mut words = Vec::with_capacity(self.words);
        let mut path = Vec::new();
        Self::collect_words(&self.root, &mut path, &mut words);
        words
    }

    fn collect_words(node: &TrieNode, path: &mut Vec<u8>, words: &mut Vec<Word>) {
        if node.is_word() {
            words.push(Word::from_slice(path));
        }
        for (byte, child) in node.children() {
            path.push(byte);
            Self::collect_words(child, path, words);
            path.pop();
        }
    }
}

impl Default for PrefixTrie {
    fn default() -> Self {
        PrefixTrie::new()
    }
}

impl<W: IntoWord> FromIterator<W> for PrefixTrie {
    fn from_iter<I: IntoIterator<Item = W>>(iter: I) -> Self {
        PrefixTrie::from_words(iter)
    }
}
