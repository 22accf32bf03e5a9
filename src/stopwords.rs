use std::collections::HashSet;

use lazy_static::lazy_static;

use crate::text::words;

const ENGLISH: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "even",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "however", "i", "if", "in", "into", "is", "it",
    "its", "itself", "just", "last", "many", "may", "me", "more", "most", "much", "must", "my",
    "myself", "new", "no", "nor", "not", "now", "of", "off", "on", "once", "one", "only", "or",
    "other", "our", "ours", "ourselves", "out", "over", "own", "said", "same", "says", "she",
    "should", "since", "so", "some", "still", "such", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "there", "these", "they", "this", "those", "through", "to",
    "too", "two", "under", "until", "up", "us", "very", "was", "we", "were", "what", "when",
    "where", "which", "while", "who", "whom", "why", "will", "with", "would", "year", "years",
    "yet", "you", "your", "yours", "yourself", "yourselves",
];

lazy_static! {
    static ref ENGLISH_STOPWORDS: HashSet<&'static str> = ENGLISH.iter().copied().collect();
}

/// Statistic about words for a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordsStats {
    /// All the words.
    pub word_count: usize,
    /// All the stop words.
    pub stopword_count: usize,
}

/// Counts the words and english stopwords of the text.
pub fn stopword_count(txt: &str) -> WordsStats {
    words(txt).fold(WordsStats::default(), |mut stats, word| {
        stats.word_count += 1;
        if ENGLISH_STOPWORDS.contains(word.to_lowercase().as_str()) {
            stats.stopword_count += 1;
        }
        stats
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_stopwords() {
        let stats = stopword_count("The mayor said, on Monday, that the bridge is closed.");
        assert_eq!(stats.word_count, 10);
        // the, said, on, that, the, is
        assert_eq!(stats.stopword_count, 6);
    }
}
