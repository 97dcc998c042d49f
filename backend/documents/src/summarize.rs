use unicode_segmentation::UnicodeSegmentation;

/// Default number of sentences kept per document synopsis.
pub const DEFAULT_SUMMARY_SENTENCES: usize = 2;

/// Lead-sentence summarizer: keeps the first N sentences of a text.
///
/// Sentence boundaries follow Unicode text segmentation (UAX #29); fragments
/// with no letter or digit (stray punctuation) do not count as sentences.
#[derive(Debug, Clone, Copy)]
pub struct Summarizer {
    sentences: usize,
}

impl Summarizer {
    pub fn new(sentences: usize) -> Self {
        Self { sentences }
    }

    pub fn sentences(&self) -> usize {
        self.sentences
    }

    /// First N sentences joined by single spaces.
    pub fn summarize(&self, text: &str) -> String {
        text.unicode_sentences()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .take(self.sentences)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(DEFAULT_SUMMARY_SENTENCES)
    }
}
