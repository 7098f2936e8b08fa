use std::slice;

use super::trie::TrieNode;

/// A compact representation of the children of a [`TrieNode`] that doesn't allocate a
/// vector until there are at least two children.
///
/// Edges are kept sorted by byte, so iterating the children walks the trie in
/// ascending word order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Children {
    /// No children.
    #[default]
    None,
    /// Exactly one child (byte, node).
    One(Box<(u8, TrieNode)>),
    /// Two or more children, sorted by byte.
    Many(Vec<(u8, TrieNode)>),
}

impl Children {
    /// All edges as a slice, sorted by byte.
    #[inline]
    pub fn as_slice(&self) -> &[(u8, TrieNode)] {
        match self {
            Children::None => &[],
            Children::One(edge) => slice::from_ref(edge.as_ref()),
            Children::Many(children) => children,
        }
    }

    /// Returns the node that `byte`'s edge leads to, or `None` if no such edge exists.
    #[inline]
    pub fn get(&self, byte: u8) -> Option<&TrieNode> {
        match self {
            Children::None => None,
            Children::One(edge) => (edge.0 == byte).then_some(&edge.1),
            Children::Many(children) => {
                // Nodes rarely have more than a handful of children. Checking two edges
                // per iteration beats a binary search at these sizes.
                let chunks = children.chunks_exact(2);
                let remainder = chunks.remainder();
                for chunk in chunks {
                    if chunk[0].0 == byte {
                        return Some(&chunk[0].1);
                    }
                    if chunk[1].0 == byte {
                        return Some(&chunk[1].1);
                    }
                }
                remainder
                    .iter()
                    .find(|(ch, _)| *ch == byte)
                    .map(|(_, node)| node)
            }
        }
    }

    /// Mutable version of [`get`](Children::get).
    pub(crate) fn get_mut(&mut self, byte: u8) -> Option<&mut TrieNode> {
        match self {
            Children::None => None,
            Children::One(edge) => (edge.0 == byte).then_some(&mut edge.1),
            Children::Many(children) => children
                .iter_mut()
                .find(|(ch, _)| *ch == byte)
                .map(|(_, node)| node),
        }
    }

    /// Adds an edge labeled `byte`, keeping the edges sorted.
    ///
    /// The edge must not already exist.
    pub(crate) fn insert(&mut self, byte: u8, node: TrieNode) {
        debug_assert!(self.get(byte).is_none(), "insert: edge already exists");
        *self = match std::mem::take(self) {
            Children::None => Children::One(Box::new((byte, node))),
            Children::One(edge) => {
                let (c1, n1) = *edge;
                if byte < c1 {
                    Children::Many(vec![(byte, node), (c1, n1)])
                } else {
                    Children::Many(vec![(c1, n1), (byte, node)])
                }
            }
            Children::Many(mut children) => {
                let pos = children.partition_point(|&(ch, _)| ch < byte);
                children.insert(pos, (byte, node));
                Children::Many(children)
            }
        };
    }

    /// Returns the child at `byte`, creating an empty one if needed.
    ///
    /// The flag is true when the child had to be created.
    pub(crate) fn get_or_insert(&mut self, byte: u8) -> (&mut TrieNode, bool) {
        let created = self.get(byte).is_none();
        if created {
            self.insert(byte, TrieNode::new(false));
        }
        let node = self.get_mut(byte).expect("edge exists after insertion");
        (node, created)
    }

    /// Returns the number of children.
    #[inline]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// True if there are no children.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Children::None)
    }

    /// Returns an iterator over the children, in ascending byte order.
    #[inline]
    pub fn iter(&self) -> ChildIter<'_> {
        ChildIter {
            inner: self.as_slice().iter(),
        }
    }
}

/// An iterator over the children of a [`TrieNode`].
#[derive(Clone)]
pub struct ChildIter<'t> {
    inner: slice::Iter<'t, (u8, TrieNode)>,
}

impl<'t> Iterator for ChildIter<'t> {
    type Item = (u8, &'t TrieNode);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(ch, node)| (*ch, node))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ChildIter<'_> {}
