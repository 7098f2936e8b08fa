use std::fmt;

use itertools::Itertools;
use tracing::{debug, info};

use super::decompose::Decomposer;
use super::selector::{select_candidates, CandidateBuckets};
use super::store::WordStore;
use super::trie::PrefixTrie;
use super::word::{IntoWord, Word};

/// A word together with the words it is made of.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Compound {
    whole: Word,
    components: Vec<Word>,
}

impl Compound {
    /// The compound word.
    pub fn whole(&self) -> &Word {
        &self.whole
    }

    /// The words whose concatenation is [`whole`](Compound::whole), in order.
    pub fn components(&self) -> &[Word] {
        &self.components
    }

    /// Splits the result into the word and its components.
    pub fn into_parts(self) -> (Word, Vec<Word>) {
        (self.whole, self.components)
    }
}

/// Renders as `whole = part + part + ...`.
impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.whole, self.components.iter().join(" + "))
    }
}

/// Tuning for the search. None of it changes which word is found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Remember remainders that failed to split while decomposing a word.
    pub memoize: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig { memoize: true }
    }
}

/// Scans candidate buckets from the longest length down and stops at the first word
/// that decomposes.
///
/// When several words of the winning length are compounds, the one earliest in its
/// bucket is returned. That follows sorted input order and carries no other meaning.
#[derive(Clone, Copy, Debug)]
pub struct LongestCompoundSearch<'t> {
    decomposer: Decomposer<'t>,
}

impl<'t> LongestCompoundSearch<'t> {
    /// Creates a search over `trie`, where `min_len` is the length of the shortest
    /// input word.
    pub fn new(trie: &'t PrefixTrie, min_len: usize, config: SearchConfig) -> Self {
        LongestCompoundSearch {
            decomposer: Decomposer::new(trie, min_len).with_memo(config.memoize),
        }
    }

    /// The decomposer used on each candidate.
    pub fn decomposer(&self) -> &Decomposer<'t> {
        &self.decomposer
    }

    /// Returns the longest candidate in `buckets` that decomposes, recording its
    /// components on the candidate.
    pub fn find_longest_compound(&self, buckets: &mut CandidateBuckets) -> Option<Compound> {
        for len in buckets.lengths_descending() {
            let Some(bucket) = buckets.get_mut(len) else {
                continue;
            };
            debug!(len, candidates = bucket.len(), "searching bucket");
            for candidate in bucket.iter_mut() {
                let found = candidate.decompose(&self.decomposer).map(<[Word]>::to_vec);
                if let Some(components) = found {
                    let compound = Compound {
                        whole: candidate.whole().clone(),
                        components,
                    };
                    info!(
                        word = %compound.whole,
                        parts = compound.components.len(),
                        "found compound"
                    );
                    return Some(compound);
                }
            }
        }
        info!("no compound word found");
        None
    }

    /// Yields every candidate in `buckets` that decomposes, in the order
    /// [`find_longest_compound`](Self::find_longest_compound) would try them.
    pub fn compounds<'b>(
        &self,
        buckets: &'b CandidateBuckets,
    ) -> impl Iterator<Item = Compound> + 'b
    where
        't: 'b,
    {
        let decomposer: Decomposer<'b> = self.decomposer;
        buckets.iter_longest_first().filter_map(move |candidate| {
            candidate
                .try_decompose(&decomposer)
                .map(|components| Compound {
                    whole: candidate.whole().clone(),
                    components,
                })
        })
    }
}

/// A word list prepared for searching: sorted, loaded into a trie, with candidates
/// picked out.
#[derive(Debug)]
pub struct Analysis {
    trie: PrefixTrie,
    buckets: CandidateBuckets,
    min_len: usize,
    config: SearchConfig,
}

impl Analysis {
    /// Sorts the words of `store` and builds the trie and candidate buckets.
    pub fn new(store: WordStore, config: SearchConfig) -> Self {
        let min_len = store.min_len().unwrap_or(0);
        let words = store.into_sorted();
        let (trie, buckets) = select_candidates(words).expect("sorted words are in order");
        debug!(min_len, candidates = buckets.candidate_count(), "prepared analysis");
        Analysis {
            trie,
            buckets,
            min_len,
            config,
        }
    }

    /// The trie over all words.
    pub fn trie(&self) -> &PrefixTrie {
        &self.trie
    }

    /// The candidates, with components recorded on any that have been decomposed.
    pub fn buckets(&self) -> &CandidateBuckets {
        &self.buckets
    }

    /// Length of the shortest input word.
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// Finds the longest word made entirely of other words, if there is one.
    pub fn longest_compound(&mut self) -> Option<Compound> {
        LongestCompoundSearch::new(&self.trie, self.min_len, self.config)
            .find_longest_compound(&mut self.buckets)
    }

    /// Every compound word, longest first.
    pub fn compounds(&self) -> impl Iterator<Item = Compound> + '_ {
        LongestCompoundSearch::new(&self.trie, self.min_len, self.config).compounds(&self.buckets)
    }
}

/// Finds the longest word in `words` that is a concatenation of two or more other
/// words from the same list.
///
/// Words may be given in any order.
///
/// # Examples
///
/// ```
/// use libcompound::find_longest_compound;
///
/// let found = find_longest_compound(["qu", "quart", "artful", "quartful"]).unwrap();
/// assert_eq!(found.whole(), &"quartful");
/// assert_eq!(found.to_string(), "quartful = qu + artful");
///
/// assert!(find_longest_compound(["alpha", "beta", "gamma"]).is_none());
/// ```
pub fn find_longest_compound<W: IntoWord>(words: impl IntoIterator<Item = W>) -> Option<Compound> {
    Analysis::new(WordStore::from_words(words), SearchConfig::default()).longest_compound()
}

#[cfg(test)]
mod test {
    use super::*;

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

    fn components(compound: &Compound) -> Vec<String> {
        compound.components().iter().map(Word::to_string).collect()
    }

    #[test]
    fn longest_of_test_words() {
        let found = find_longest_compound(TEST_WORDS).unwrap();
        assert_eq!(found.whole(), &"barfooquux");
        assert_eq!(components(&found), ["bar", "foo", "quux"]);
    }

    #[test]
    fn two_word_compound() {
        let words = ["foo", "bar", "quux", "foobar", "qu", "splat", "artful", "art", "quart"];
        let found = find_longest_compound(words).unwrap();
        assert_eq!(found.whole(), &"foobar");
        assert_eq!(components(&found), ["foo", "bar"]);
    }

    #[test]
    fn later_prefix_rescues_failed_one() {
        let found = find_longest_compound(["qu", "quart", "artful", "quartful"]).unwrap();
        assert_eq!(found.whole(), &"quartful");
        assert_eq!(components(&found), ["qu", "artful"]);
    }

    #[test]
    fn no_word_starts_with_another() {
        assert!(find_longest_compound(["alpha", "bravo", "charlie", "delta"]).is_none());
    }

    #[test]
    fn prefixed_but_not_compound() {
        assert!(find_longest_compound(["a", "ab", "abc"]).is_none());
        let found = find_longest_compound(["a", "ab", "abc", "bc"]).unwrap();
        assert_eq!(found.whole(), &"abc");
        assert_eq!(components(&found), ["a", "bc"]);
    }

    #[test]
    fn empty_list() {
        let mut analysis = Analysis::new(WordStore::new(), SearchConfig::default());
        assert!(analysis.buckets().is_empty());
        assert!(analysis.longest_compound().is_none());
        assert_eq!(analysis.compounds().count(), 0);
    }

    #[test]
    fn input_order_does_not_matter() {
        let words = ["qu", "quart", "artful", "quartful", "ful"];
        let expected = find_longest_compound(words).unwrap();
        assert_eq!(components(&expected), ["quart", "ful"]);
        for perm in words.iter().permutations(words.len()) {
            assert_eq!(find_longest_compound(perm).as_ref(), Some(&expected));
        }
    }

    #[test]
    fn ties_go_to_first_in_sorted_order() {
        let found = find_longest_compound(["zz", "yy", "zzyy", "yyzz"]).unwrap();
        assert_eq!(found.whole(), &"yyzz");
    }

    #[test]
    fn repeated_components_and_duplicate_lines() {
        assert!(find_longest_compound(["foo", "foo"]).is_none());
        let found = find_longest_compound(["foo", "foofoo", "foo"]).unwrap();
        assert_eq!(components(&found), ["foo", "foo"]);
    }

    #[test]
    fn empty_word_is_ignored() {
        let found = find_longest_compound(["", "ab", "a", "b"]).unwrap();
        assert_eq!(found.whole(), &"ab");
        assert_eq!(components(&found), ["a", "b"]);
        assert!(find_longest_compound(["", "ab"]).is_none());
    }

    #[test]
    fn winner_is_recorded_on_candidate() {
        let mut analysis = Analysis::new(TEST_WORDS.into_iter().collect(), SearchConfig::default());
        assert_eq!(analysis.min_len(), 2);
        analysis.longest_compound().unwrap();
        let winner = &analysis.buckets().get(10).unwrap()[0];
        assert!(winner.is_compound());
        assert_eq!(winner.to_string(), "barfooquux = bar + foo + quux");
        let untried = &analysis.buckets().get(8).unwrap()[0];
        assert!(!untried.is_compound());
        assert_eq!(untried.to_string(), "splatter [NOT COMPOUND]");
    }

    #[test]
    fn all_compounds_longest_first() {
        let analysis = Analysis::new(TEST_WORDS.into_iter().collect(), SearchConfig::default());
        let found: Vec<String> = analysis.compounds().map(|c| c.to_string()).collect();
        assert_eq!(
            found,
            ["barfooquux = bar + foo + quux", "foobar = foo + bar", "quart = qu + art"]
        );
    }

    fn longest_with(words: &[&str], memoize: bool) -> Option<Compound> {
        let mut analysis = Analysis::new(words.iter().collect(), SearchConfig { memoize });
        analysis.longest_compound()
    }

    #[test]
    fn longest_recurses_into_unsplit_remainder() {
        let words = ["a", "aa", "aaa", "aab", "aaaaaaab", "b", "ba"];
        let found = longest_with(&words, true).unwrap();
        assert_eq!(found.to_string(), "aaaaaaab = aaa + aaa + a + b");
    }

    #[test]
    fn memo_does_not_change_results() {
        // The long runs of "a" revisit the same failing remainders many times over.
        let lists: [&[&str]; 4] = [
            &["a", "aa", "aaa", "aab", "aaaaaaab", "b", "ba"],
            &["aa", "aaa", "ab", "aaaaaaaaaaaaaaaaaab", "aaaaaaaaaaaaaaaaaaac"],
            &["ab", "abc", "cd", "e", "abcde", "abcdex"],
            &TEST_WORDS,
        ];
        for words in lists {
            let memo = longest_with(words, true);
            let plain = longest_with(words, false);
            assert_eq!(memo, plain, "{words:?}");
            if let Some(found) = memo {
                assert_eq!(found.components().concat(), found.whole().as_bytes());
            }
        }
    }

    #[test]
    fn search_records_components_on_the_buckets() {
        let words = ["artful", "qu", "quart", "quartful", "quartz"];
        let (trie, mut buckets) = select_candidates(words).unwrap();
        let search = LongestCompoundSearch::new(&trie, 2, SearchConfig::default());

        let found = search.find_longest_compound(&mut buckets).unwrap();
        assert_eq!(found.to_string(), "quartful = qu + artful");
        let winner = &buckets.get(8).unwrap()[0];
        assert_eq!(winner.components(), Some(found.components()));

        // A second run returns the recorded result.
        assert_eq!(search.find_longest_compound(&mut buckets), Some(found));
    }

    #[test]
    fn display_and_parts() {
        let found = find_longest_compound(["art", "artful", "ful"]).unwrap();
        assert_eq!(found.to_string(), "artful = art + ful");
        let (whole, parts) = found.into_parts();
        assert_eq!(whole, "artful");
        assert_eq!(parts.concat(), b"artful");
    }
}
