//! Bag-of-words vectorization of title soups.
//!
//! Terms are maximal runs of word characters (alphanumeric or `_`) at least
//! two characters long. English stop words are dropped. Each soup becomes a
//! sparse vector of raw term counts over a vocabulary shared by all rows.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::OnceLock;

const MIN_TERM_CHARS: usize = 2;

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here", "hereafter",
    "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his", "how", "however",
    "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its",
    "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd", "made", "many", "may",
    "me", "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly", "move",
    "much", "must", "my", "myself", "name", "namely", "neither", "never", "nevertheless", "next",
    "nine", "no", "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of",
    "off", "often", "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise",
    "our", "ours", "ourselves", "out", "over", "own", "part", "per", "perhaps", "please", "put",
    "rather", "re", "same", "see", "seem", "seemed", "seeming", "seems", "serious", "several",
    "she", "should", "show", "side", "since", "sincere", "six", "sixty", "so", "some", "somehow",
    "someone", "something", "sometime", "sometimes", "somewhere", "still", "such", "system",
    "take", "ten", "than", "that", "the", "their", "them", "themselves", "then", "thence",
    "there", "thereafter", "thereby", "therefore", "therein", "thereupon", "these", "they",
    "thick", "thin", "third", "this", "those", "though", "three", "through", "throughout", "thru",
    "thus", "to", "together", "too", "top", "toward", "towards", "twelve", "twenty", "two", "un",
    "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were", "what",
    "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas", "whereby",
    "wherein", "whereupon", "wherever", "whether", "which", "while", "whither", "who", "whoever",
    "whole", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet", "you",
    "your", "yours", "yourself", "yourselves",
];

fn stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

pub fn is_stop_word(term: &str) -> bool {
    stop_words().contains(term)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Splits a soup into terms, dropping short tokens and stop words
pub fn tokenize(soup: &str) -> impl Iterator<Item = &str> {
    soup.split(|c: char| !is_word_char(c))
        .filter(|t| t.chars().count() >= MIN_TERM_CHARS)
        .filter(|t| !is_stop_word(t))
}

/// Sparse term-count vector for one row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermVector {
    /// (term column, count) pairs sorted by column
    entries: Vec<(u32, u32)>,
    squared_norm: u64,
}

impl TermVector {
    fn from_counts(counts: HashMap<u32, u32>) -> Self {
        let mut entries: Vec<(u32, u32)> = counts.into_iter().collect();
        entries.sort_unstable_by_key(|(term, _)| *term);
        let squared_norm = entries
            .iter()
            .map(|(_, count)| u64::from(*count) * u64::from(*count))
            .sum();
        Self {
            entries,
            squared_norm,
        }
    }

    pub fn entries(&self) -> &[(u32, u32)] {
        &self.entries
    }

    /// Sum of squared counts; zero for an empty vector
    pub fn squared_norm(&self) -> u64 {
        self.squared_norm
    }

    pub fn is_zero(&self) -> bool {
        self.squared_norm == 0
    }

    /// Exact integer dot product via a merge over both sorted entry lists
    pub fn dot(&self, other: &TermVector) -> u64 {
        let (mut i, mut j, mut sum) = (0, 0, 0u64);
        while i < self.entries.len() && j < other.entries.len() {
            let (ta, ca) = self.entries[i];
            let (tb, cb) = other.entries[j];
            match ta.cmp(&tb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += u64::from(ca) * u64::from(cb);
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Vocabulary plus one term vector per row, in row order
#[derive(Debug, Clone, Default)]
pub struct VectorSpace {
    vocabulary: HashMap<String, u32>,
    rows: Vec<TermVector>,
}

impl VectorSpace {
    /// Builds the vocabulary over all soups and vectorizes each one
    ///
    /// Columns are assigned in sorted term order.
    pub fn fit<S: AsRef<str>>(soups: &[S]) -> Self {
        let terms: BTreeSet<&str> = soups
            .iter()
            .flat_map(|soup| tokenize(soup.as_ref()))
            .collect();

        let vocabulary: HashMap<String, u32> = terms
            .into_iter()
            .enumerate()
            .map(|(column, term)| (term.to_string(), column as u32))
            .collect();

        let rows = soups
            .iter()
            .map(|soup| {
                let mut counts: HashMap<u32, u32> = HashMap::new();
                for term in tokenize(soup.as_ref()) {
                    if let Some(&column) = vocabulary.get(term) {
                        *counts.entry(column).or_insert(0) += 1;
                    }
                }
                TermVector::from_counts(counts)
            })
            .collect();

        Self { vocabulary, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    #[cfg(test)]
    pub fn column(&self, term: &str) -> Option<u32> {
        self.vocabulary.get(term).copied()
    }

    pub fn row(&self, index: usize) -> &TermVector {
        &self.rows[index]
    }

    pub fn rows(&self) -> &[TermVector] {
        &self.rows
    }
}
