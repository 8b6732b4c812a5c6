//! Argument tokenization
//!
//! Turns raw argument strings into a flat token stream according to a
//! [`CustomizationProfile`]. Nothing is validated here: unknown keys and
//! malformed quoting are left for the cleanup and allocation stages.
//!
//! Example with the POSIX convention:
//! - args: `["--out=a.txt", "-v", "\"two", "words\""]`
//! - tokens: `KeyPrefix(--) Text(out) Assignment(=) Text(a.txt) Separator
//!   KeyPrefix(-) Text(v) Separator Quoter(") Text(two) Separator Text(words) Quoter(")`

pub mod cleanup;
pub mod error;
pub mod token;


pub use cleanup::{CleanupPipeline, CleanupStage, QuotedTextConsolidation};
pub use error::CleanupError;
pub use token::{Token, TokenKind};

use crate::profile::CustomizationProfile;

/// Text emitted for the implicit boundary between two raw arguments
pub const SEPARATOR_TEXT: &str = " ";

/// Tokenize raw arguments under `profile`
///
/// Any argument starting with a key prefix is read as a key, so a negative
/// number such as `-5` becomes the key `5`. Pass such values quoted
/// (`-x "-5"`) or attached by assignment (`-x=-5`).
pub fn tokenize<S: AsRef<str>>(raw_args: &[S], profile: &CustomizationProfile) -> Vec<Token> {
    let mut tokens = Vec::new();

    for (index, raw) in raw_args.iter().enumerate() {
        let arg = raw.as_ref();
        if index > 0 {
            tokens.push(Token::new(TokenKind::Separator, SEPARATOR_TEXT, index));
        }

        if arg.chars().count() == 1 && arg.starts_with(profile.assignment()) {
            tokens.push(Token::new(TokenKind::Assignment, arg, index));
            continue;
        }

        if !tokenize_keyed(arg, index, profile, &mut tokens) {
            tokenize_text(arg, index, profile, &mut tokens);
        }
    }

    log::trace!("Tokenized {} arguments into {} tokens", raw_args.len(), tokens.len());
    tokens
}

/// Emit `prefix key [= value]` tokens when `arg` starts with a key prefix
///
/// Returns false when the argument is not a key, e.g. a bare prefix or a
/// prefix immediately followed by an assignment or quote.
fn tokenize_keyed(
    arg: &str,
    index: usize,
    profile: &CustomizationProfile,
    tokens: &mut Vec<Token>,
) -> bool {
    let Some(prefix) = profile.match_prefix(arg) else {
        return false;
    };
    let prefix_len = prefix.len();
    if !arg.is_char_boundary(prefix_len) {
        return false;
    }

    let rest = &arg[prefix_len..];
    let key_end = rest
        .find(|c: char| c == profile.assignment() || profile.is_quote(c))
        .unwrap_or(rest.len());
    if key_end == 0 {
        return false;
    }

    tokens.push(Token::new(TokenKind::KeyPrefix, &arg[..prefix_len], index));
    tokens.push(Token::text(&rest[..key_end], index));

    let mut remainder = &rest[key_end..];
    if remainder.starts_with(profile.assignment()) {
        let width = profile.assignment().len_utf8();
        tokens.push(Token::new(TokenKind::Assignment, &remainder[..width], index));
        remainder = &remainder[width..];
        if remainder.is_empty() {
            // `--key=` carries an explicit empty value
            tokens.push(Token::text("", index));
        }
    }
    if !remainder.is_empty() {
        tokenize_text(remainder, index, profile, tokens);
    }
    true
}

/// Split plain text on quote characters
fn tokenize_text(text: &str, index: usize, profile: &CustomizationProfile, tokens: &mut Vec<Token>) {
    if text.is_empty() {
        tokens.push(Token::text("", index));
        return;
    }

    let mut start = 0;
    for (pos, ch) in text.char_indices() {
        if profile.is_quote(ch) {
            if pos > start {
                tokens.push(Token::text(&text[start..pos], index));
            }
            let end = pos + ch.len_utf8();
            tokens.push(Token::new(TokenKind::Quoter, &text[pos..end], index));
            start = end;
        }
    }
    if start < text.len() {
        tokens.push(Token::text(&text[start..], index));
    }
}
