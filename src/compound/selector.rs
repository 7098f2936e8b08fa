use std::fmt;

use hashbrown::HashMap;
use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, trace};

use super::decompose::Decomposer;
use super::trie::{PrefixEnds, PrefixTrie};
use super::word::{IntoWord, Word};

/// A word that starts with at least one other word, and so might be a compound.
///
/// The confirmed prefixes are kept as lengths into `whole`, so they are views and
/// never copies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    whole: Word,
    prefix_ends: PrefixEnds,
    components: Option<Vec<Word>>,
}

impl Candidate {
    /// Creates a candidate from a word and the lengths of its prefixes that are words.
    ///
    /// # Panics
    ///
    /// Panics if a prefix length is zero or not shorter than the word.
    pub fn new(whole: impl IntoWord, prefix_lens: impl IntoIterator<Item = usize>) -> Self {
        let whole = whole.into_word();
        let mut prefix_ends: PrefixEnds = prefix_lens.into_iter().collect();
        prefix_ends.sort_unstable();
        prefix_ends.dedup();
        assert!(
            prefix_ends.iter().all(|&n| n > 0 && n < whole.len()),
            "prefixes must be proper and non-empty"
        );
        Candidate {
            whole,
            prefix_ends,
            components: None,
        }
    }

    /// The candidate word.
    pub fn whole(&self) -> &Word {
        &self.whole
    }

    /// The prefixes of the word that are words themselves, closest preceding word
    /// (that is, longest) first.
    pub fn confirmed_prefixes(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.prefix_ends.iter().rev().map(|&n| &self.whole[..n])
    }

    /// The words making up the candidate, once it has been decomposed.
    pub fn components(&self) -> Option<&[Word]> {
        self.components.as_deref()
    }

    /// True if the candidate has been decomposed.
    pub fn is_compound(&self) -> bool {
        self.components.is_some()
    }

    /// Tries each confirmed prefix in turn, decomposing the rest of the word after it.
    ///
    /// On the first success the components are recorded and returned. Components are
    /// set at most once; a candidate already decomposed returns its components as is.
    pub fn decompose(&mut self, decomposer: &Decomposer<'_>) -> Option<&[Word]> {
        if self.components.is_none() {
            self.components = self.try_decompose(decomposer);
        }
        self.components.as_deref()
    }

    /// Like [`decompose`](Candidate::decompose), but leaves the candidate unchanged.
    pub fn try_decompose(&self, decomposer: &Decomposer<'_>) -> Option<Vec<Word>> {
        for prefix in self.confirmed_prefixes() {
            let rest = &self.whole[prefix.len()..];
            trace!(word = %self.whole, prefix_len = prefix.len(), "trying prefix");
            if let Some(parts) = decomposer.sub_words(rest) {
                let mut components = Vec::with_capacity(parts.len() + 1);
                components.push(Word::from_slice(prefix));
                components.extend(parts.iter().map(|part| Word::from_slice(part)));
                return Some(components);
            }
        }
        None
    }
}

/// Renders as `whole = part + part` once decomposed, or `whole [NOT COMPOUND]`.
impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.components {
            Some(components) => write!(f, "{} = {}", self.whole, components.iter().join(" + ")),
            None => write!(f, "{} [NOT COMPOUND]", self.whole),
        }
    }
}

/// Candidates grouped by word length, each group in insertion order.
#[derive(Clone, Debug, Default)]
pub struct CandidateBuckets {
    buckets: HashMap<usize, Vec<Candidate>>,
    count: usize,
}

impl CandidateBuckets {
    /// Creates an empty set of buckets.
    pub fn new() -> Self {
        CandidateBuckets::default()
    }

    /// Appends a candidate to the bucket for its length.
    pub fn push(&mut self, candidate: Candidate) {
        self.buckets
            .entry(candidate.whole.len())
            .or_default()
            .push(candidate);
        self.count += 1;
    }

    /// The candidates of length `len`, in insertion order.
    pub fn get(&self, len: usize) -> Option<&[Candidate]> {
        self.buckets.get(&len).map(Vec::as_slice)
    }

    pub(crate) fn get_mut(&mut self, len: usize) -> Option<&mut [Candidate]> {
        self.buckets.get_mut(&len).map(Vec::as_mut_slice)
    }

    /// The lengths that have candidates, longest first.
    pub fn lengths_descending(&self) -> Vec<usize> {
        let mut lengths: Vec<usize> = self.buckets.keys().copied().collect();
        lengths.sort_unstable_by(|a, b| b.cmp(a));
        lengths
    }

    /// All candidates, longest length first and in insertion order within a length.
    pub fn iter_longest_first(&self) -> impl Iterator<Item = &Candidate> + '_ {
        self.lengths_descending()
            .into_iter()
            .flat_map(move |len| self.buckets[&len].iter())
    }

    /// Number of distinct lengths.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of candidates over all lengths.
    pub fn candidate_count(&self) -> usize {
        self.count
    }

    /// True if there are no candidates.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Extend<Candidate> for CandidateBuckets {
    fn extend<I: IntoIterator<Item = Candidate>>(&mut self, iter: I) {
        for candidate in iter {
            self.push(candidate);
        }
    }
}

/// Errors that can occur while selecting candidates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    /// Words were not provided in ascending byte order.
    ///
    /// Contains the two words that were out of order.
    #[error("OrderError - {previous:?} came before {current:?}")]
    Order {
        /// The word added before.
        previous: Word,
        /// The word that sorts before it.
        current: Word,
    },
}

/// Builds the prefix trie and picks out the candidate words in a single pass.
///
/// Words must be added in ascending byte order; equal words may repeat. Each word
/// that starts with an earlier word becomes a [`Candidate`], filed under its length.
#[derive(Debug, Default)]
pub struct CandidateSelector {
    trie: PrefixTrie,
    buckets: CandidateBuckets,
    previous: Option<Word>,
    words: usize,
}

impl CandidateSelector {
    /// Creates a selector with an empty trie.
    pub fn new() -> Self {
        CandidateSelector::default()
    }

    /// Inserts a word and returns true if it became a candidate.
    ///
    /// # Errors
    ///
    /// Returns `SelectError::Order` if the word sorts before the previously added one.
    pub fn add_word(&mut self, word: impl IntoWord) -> Result<bool, SelectError> {
        let word = word.into_word();
        if let Some(previous) = &self.previous {
            if word < *previous {
                return Err(SelectError::Order {
                    previous: previous.clone(),
                    current: word,
                });
            }
        }
        self.words += 1;
        let prefix_ends = self.trie.insert_with_prefixes(&word);
        let flagged = !prefix_ends.is_empty();
        if flagged {
            self.buckets.push(Candidate {
                whole: word.clone(),
                prefix_ends,
                components: None,
            });
        }
        self.previous = Some(word);
        Ok(flagged)
    }

    /// Finishes the pass and returns the trie with the candidate buckets.
    pub fn finish(self) -> (PrefixTrie, CandidateBuckets) {
        debug!(
            words = self.words,
            distinct = self.trie.len(),
            nodes = self.trie.node_count(),
            candidates = self.buckets.candidate_count(),
            lengths = self.buckets.len(),
            "built trie"
        );
        (self.trie, self.buckets)
    }
}

/// Builds the trie over sorted `words` and collects the candidate buckets.
///
/// # Errors
///
/// Returns `SelectError::Order` if `words` is not in ascending byte order.
///
/// # Examples
///
/// ```
/// use libcompound::select_candidates;
///
/// let (trie, buckets) = select_candidates(["art", "artful", "qu", "quart"]).unwrap();
/// assert!(trie.is_word(b"quart"));
/// assert_eq!(buckets.lengths_descending(), [6, 5]);
///
/// let quart = &buckets.get(5).unwrap()[0];
/// assert_eq!(quart.confirmed_prefixes().collect::<Vec<_>>(), [b"qu"]);
/// ```
pub fn select_candidates<W: IntoWord>(
    words: impl IntoIterator<Item = W>,
) -> Result<(PrefixTrie, CandidateBuckets), SelectError> {
    let mut selector = CandidateSelector::new();
    for word in words {
        selector.add_word(word)?;
    }
    Ok(selector.finish())
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    const TEST_WORDS: [&str; 12] = [
        "foo",
        "bar",
        "quux",
        "foobar",
        "barfooquux",
        "qu",
        "splat",
        "artful",
        "splatter",
        "squish",
        "quart",
        "art",
    ];

    fn sorted(words: &[&str]) -> Vec<Word> {
        let mut words: Vec<Word> = words.iter().map(IntoWord::into_word).collect();
        words.sort();
        words
    }

    fn prefixes(candidate: &Candidate) -> Vec<String> {
        candidate
            .confirmed_prefixes()
            .map(|p| String::from_utf8_lossy(p).into_owned())
            .collect()
    }

    /// Walks back from `index` while the preceding words are prefixes of the word there,
    /// stopping at the first one that is not.
    fn backward_scan(words: &[Word], index: usize) -> Vec<&[u8]> {
        let word = &words[index];
        words[..index]
            .iter()
            .rev()
            .take_while(|prev| word.starts_with(prev))
            .map(|prev| prev.as_bytes())
            .filter(|prev| prev.len() < word.len())
            .dedup()
            .collect()
    }

    #[test]
    fn buckets_by_length() {
        let (_, buckets) = select_candidates(sorted(&TEST_WORDS)).unwrap();
        assert_eq!(buckets.lengths_descending(), [10, 8, 6, 5, 4]);
        assert_eq!(buckets.candidate_count(), 6);

        let whole: Vec<String> = buckets
            .iter_longest_first()
            .map(|c| c.whole().to_string())
            .collect();
        assert_eq!(
            whole,
            ["barfooquux", "splatter", "artful", "foobar", "quart", "quux"]
        );

        let six = buckets.get(6).unwrap();
        assert_eq!(prefixes(&six[0]), ["art"]);
        assert_eq!(prefixes(&six[1]), ["foo"]);
        assert_eq!(buckets.get(7), None);
    }

    #[test]
    fn prefixes_longest_first() {
        let (_, buckets) = select_candidates(sorted(&["foo", "food", "foodie", "f"])).unwrap();
        let foodie = &buckets.get(6).unwrap()[0];
        assert_eq!(prefixes(foodie), ["food", "foo", "f"]);
    }

    #[test]
    fn prefixes_separated_by_other_words_are_found() {
        // "fa" sorts between "f" and "foo" without being a prefix of "foo".
        let words = sorted(&["f", "fa", "foo"]);
        assert!(backward_scan(&words, 2).is_empty());

        let (_, buckets) = select_candidates(&words).unwrap();
        let foo = &buckets.get(3).unwrap()[0];
        assert_eq!(prefixes(foo), ["f"]);
    }

    #[test]
    fn duplicates_are_not_candidates_of_themselves() {
        let mut selector = CandidateSelector::new();
        assert_eq!(selector.add_word("foo"), Ok(false));
        assert_eq!(selector.add_word("foo"), Ok(false));
        assert_eq!(selector.add_word("foobar"), Ok(true));
        assert_eq!(selector.add_word("foobar"), Ok(true));
        let (trie, buckets) = selector.finish();
        assert_eq!(trie.len(), 2);
        let six = buckets.get(6).unwrap();
        assert_eq!(six.len(), 2);
        assert!(six.iter().all(|c| prefixes(c) == ["foo"]));
    }

    #[test]
    fn empty_word_is_never_a_prefix() {
        let (trie, buckets) = select_candidates(["", "a", "ab"]).unwrap();
        assert!(trie.is_word(b""));
        assert_eq!(prefixes(&buckets.get(2).unwrap()[0]), ["a"]);
        assert_eq!(buckets.get(1), None);
    }

    #[test]
    fn unsorted_input_words_gives_error() {
        const SORTED_WORDS: [&str; 6] = ["ALFA", "BRAVO", "BRAVOS", "CHARLIE", "DELTA", "ECHO"];
        let mut sorted_count = 0;
        for wordlist in SORTED_WORDS.iter().permutations(SORTED_WORDS.len()) {
            let is_sorted = wordlist.iter().zip(SORTED_WORDS).all(|(a, b)| **a == b);
            let res = select_candidates(wordlist.iter().map(|w| **w));
            assert_eq!(res.is_ok(), is_sorted);
            sorted_count += is_sorted as i32;
        }
        assert_eq!(sorted_count, 1);
    }

    #[test]
    fn unsorted_input_words_gives_unsorted_words_in_error() {
        let res = select_candidates(["ALFA", "BRAVO", "GOLF", "FOXTROT", "HOTEL"]);
        assert_eq!(
            res.unwrap_err(),
            SelectError::Order {
                previous: "GOLF".into_word(),
                current: "FOXTROT".into_word(),
            }
        );
    }

    #[test]
    fn empty_input() {
        let (trie, buckets) = select_candidates(Vec::<Word>::new()).unwrap();
        assert!(trie.is_empty());
        assert!(buckets.is_empty());
        assert!(buckets.lengths_descending().is_empty());
    }

    #[test]
    fn display() {
        let mut c = Candidate::new("quartsplat", [2, 5]);
        assert_eq!(c.to_string(), "quartsplat [NOT COMPOUND]");
        c.components = Some(vec!["quart".into_word(), "splat".into_word()]);
        assert_eq!(c.to_string(), "quartsplat = quart + splat");
    }

    #[test]
    #[should_panic(expected = "prefixes must be proper")]
    fn candidate_rejects_whole_word_prefix() {
        Candidate::new("foo", [3]);
    }

    proptest! {
        #[test]
        fn flag_and_prefixes_agree(
            words in prop::collection::vec(prop::collection::vec(b'a'..=b'c', 0..6), 0..32),
        ) {
            let mut words: Vec<Word> = words.into_iter().map(IntoWord::into_word).collect();
            words.sort();
            let mut selector = CandidateSelector::new();
            let flags: Vec<bool> = words.iter().map(|w| selector.add_word(w).unwrap()).collect();
            let (_, buckets) = selector.finish();

            let mut seen: HashMap<usize, usize> = HashMap::new();
            for (index, (word, flagged)) in words.iter().zip(flags).enumerate() {
                let expected: Vec<&[u8]> = (1..word.len())
                    .rev()
                    .map(|n| &word[..n])
                    .filter(|p| words.iter().any(|other| other == p))
                    .collect();
                prop_assert_eq!(flagged, !expected.is_empty());
                if !flagged {
                    continue;
                }
                let slot = seen.entry(word.len()).or_default();
                let candidate = &buckets.get(word.len()).unwrap()[*slot];
                *slot += 1;
                prop_assert_eq!(candidate.whole(), word);
                let found: Vec<&[u8]> = candidate.confirmed_prefixes().collect();
                prop_assert_eq!(&found, &expected);

                // Where the preceding run of prefixes is unbroken, the backward scan
                // over the sorted list finds the same prefixes.
                let scanned = backward_scan(&words, index);
                if scanned.len() == expected.len() {
                    prop_assert_eq!(scanned, expected);
                }
            }
        }
    }
}
