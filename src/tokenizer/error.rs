//! Tokenizer Error Types

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CleanupError {
    #[error("Unclosed quote {quote} in argument {source_index}")]
    UnclosedQuoter {
        quote: String,
        /// Raw argument holding the opening quote
        source_index: usize,
        /// Token position the stream was truncated at
        position: usize,
    },
}
