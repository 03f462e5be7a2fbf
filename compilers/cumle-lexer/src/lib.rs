//! Sentence tokenizer shared by rendering, grading and authoring.
//!
//! A token is whatever sits between two single spaces. No trimming and no
//! punctuation handling: `"Ali  geldi."` yields `["Ali", "", "geldi."]`.

pub mod splitter;
pub mod token;

use cumle_protocol::TokenIndex;

use crate::splitter::split_words;
use crate::token::{Span, Token};

/// Primary entry point: Text -> Words
pub fn tokenize(text: &str) -> Vec<&str> {
    split_words(text)
}

/// Same split as [`tokenize`], with positions.
pub fn tokenize_with_spans(text: &str) -> Vec<Token<'_>> {
    let base = text.as_ptr() as usize;
    split_words(text)
        .into_iter()
        .enumerate()
        .map(|(i, word)| {
            // Every word is a subslice of `text`.
            let start = word.as_ptr() as usize - base;
            Token {
                index: TokenIndex::new(i as u32),
                span: Span::new(start, start + word.len()),
                text: word,
            }
        })
        .collect()
}

/// Number of tokens in `text`.
pub fn token_count(text: &str) -> usize {
    tokenize(text).len()
}
