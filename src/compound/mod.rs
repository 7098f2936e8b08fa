/// Compact child-edge storage for trie nodes.
pub mod children;
/// Splitting byte sequences into words.
pub mod decompose;
/// Longest-compound search and the analysis pipeline around it.
pub mod search;
/// Trie construction with candidate selection, from a sorted word list.
pub mod selector;
/// The raw word list and how it is read.
pub mod store;
/// Prefix trie node and tree.
pub mod trie;
/// The word type and conversions into it.
pub mod word;

pub use decompose::{Decomposer, Parts};
pub use search::{
    find_longest_compound, Analysis, Compound, LongestCompoundSearch, SearchConfig,
};
pub use selector::{
    select_candidates, Candidate, CandidateBuckets, CandidateSelector, SelectError,
};
pub use store::WordStore;
pub use trie::{PrefixEnds, PrefixTrie, TrieNode};
pub use word::{IntoWord, Word};
