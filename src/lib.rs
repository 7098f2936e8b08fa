//! # libcompound
//!
//! Finds, within a list of words, the longest word that is a concatenation of two or
//! more other words from the same list.
//!
//! Words are plain byte sequences. The list is sorted and loaded into a byte-keyed
//! [prefix trie](compound::PrefixTrie), which answers "is this a word?" in one step per
//! byte. While loading, every word that starts with an earlier word is kept aside as a
//! [candidate](compound::Candidate); no other word can be a compound. Candidates are
//! then tried from the longest length down, and the first one that splits entirely
//! into words wins.
//!
//! ## Quick Start
//!
//! ```
//! use libcompound::find_longest_compound;
//!
//! let words = ["foo", "bar", "quux", "foobar", "qu", "splat", "artful", "art", "quart"];
//! let found = find_longest_compound(words).unwrap();
//! assert_eq!(found.to_string(), "foobar = foo + bar");
//! ```
//!
//! For control over loading and to inspect intermediate state, go through
//! [`WordStore`](compound::WordStore) and [`Analysis`](compound::Analysis):
//!
//! ```
//! use libcompound::{Analysis, SearchConfig, WordStore};
//!
//! let mut store = WordStore::new();
//! store.read_from(&b"qu\nquart\nartful\nquartful\n"[..]).unwrap();
//!
//! let mut analysis = Analysis::new(store, SearchConfig::default());
//! assert_eq!(analysis.min_len(), 2);
//! assert!(analysis.trie().is_word(b"artful"));
//!
//! let found = analysis.longest_compound().unwrap();
//! assert_eq!(found.to_string(), "quartful = qu + artful");
//! ```
//!
//! ## Building Blocks
//!
//! The pieces are usable on their own:
//!
//! ```
//! use libcompound::{select_candidates, LongestCompoundSearch, SearchConfig};
//!
//! // Words must already be sorted here.
//! let (trie, mut buckets) = select_candidates(["art", "artful", "ful"]).unwrap();
//! let search = LongestCompoundSearch::new(&trie, 3, SearchConfig::default());
//! let found = search.find_longest_compound(&mut buckets).unwrap();
//! assert_eq!(found.to_string(), "artful = art + ful");
//! ```

#![warn(missing_docs)]

/// Word storage, prefix trie, candidate selection and the compound search.
pub mod compound;

pub use compound::{
    find_longest_compound, select_candidates, Analysis, Candidate, CandidateBuckets,
    CandidateSelector, Compound, Decomposer, IntoWord, LongestCompoundSearch, PrefixTrie,
    SearchConfig, SelectError, TrieNode, Word, WordStore,
};
