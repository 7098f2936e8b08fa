use std::io::{self, BufRead};

use tracing::debug;

use super::word::{IntoWord, Word};

/// The raw word list, as handed in by the caller.
///
/// Words are kept exactly as given: no trimming, case folding or deduplication.
/// The store tracks the length of its shortest word, which the decomposer uses as
/// the smallest component length worth trying.
#[derive(Clone, Debug)]
pub struct WordStore {
    words: Vec<Word>,
    min_len: Option<usize>,
    sorted: bool,
}

impl WordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        WordStore {
            words: Vec::new(),
            min_len: None,
            sorted: true,
        }
    }

    /// Creates a store holding `words` in the order given.
    pub fn from_words<W: IntoWord>(words: impl IntoIterator<Item = W>) -> Self {
        let mut store = WordStore::new();
        store.extend(words);
        store
    }

    /// Appends a word.
    pub fn push(&mut self, word: impl IntoWord) {
        let word = word.into_word();
        self.min_len = Some(self.min_len.map_or(word.len(), |m| m.min(word.len())));
        if self.sorted {
            self.sorted = self.words.last().map_or(true, |last| *last <= word);
        }
        self.words.push(word);
    }

    /// Appends every word of `words`.
    pub fn extend<W: IntoWord>(&mut self, words: impl IntoIterator<Item = W>) {
        for word in words {
            self.push(word);
        }
    }

    /// Reads words from `reader`, one per line, and returns how many were read.
    ///
    /// Lines are split on `\n`, and a single `\r` before it is dropped. Nothing else is
    /// stripped, so an empty line is an empty word.
    pub fn read_from(&mut self, mut reader: impl BufRead) -> io::Result<usize> {
        // Reuse one buffer for every line instead of allocating per line.
        let mut buf = Vec::with_capacity(80);
        let mut count = 0;
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let mut line = buf.as_slice();
            if let Some(rest) = line.strip_suffix(b"\n") {
                line = rest;
            }
            if let Some(rest) = line.strip_suffix(b"\r") {
                line = rest;
            }
            self.push(line);
            count += 1;
        }
        debug!(count, total = self.words.len(), "read words");
        Ok(count)
    }

    /// Length of the shortest word in the store, or `None` if it is empty.
    pub fn min_len(&self) -> Option<usize> {
        self.min_len
    }

    /// Number of words, duplicates included.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True if no words have been added.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// True if the words are currently in ascending byte order.
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// The words, in their current order.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Sorts the words into ascending byte-lexicographic order.
    ///
    /// The sort is stable, so equal words stay adjacent in their input order.
    pub fn sort(&mut self) {
        if !self.sorted {
            self.words.sort();
            self.sorted = true;
        }
    }

    /// Sorts the store and returns its words.
    pub fn into_sorted(mut self) -> Vec<Word> {
        self.sort();
        self.words
    }
}

impl Default for WordStore {
    fn default() -> Self {
        WordStore::new()
    }
}

impl<W: IntoWord> FromIterator<W> for WordStore {
    fn from_iter<I: IntoIterator<Item = W>>(iter: I) -> Self {
        WordStore::from_words(iter)
    }
}
