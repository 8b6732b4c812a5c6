//! Token model

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Text,
    KeyPrefix,
    Quoter,
    Assignment,
    Separator,
}

/// One lexical unit of the argument list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Index of the raw argument this token came from
    pub source_index: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, source_index: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            source_index,
        }
    }

    pub fn text(text: impl Into<String>, source_index: usize) -> Self {
        Self::new(TokenKind::Text, text, source_index)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
