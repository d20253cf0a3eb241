//! Query normalization and tokenization.

use crate::config::TokenizerMode;
use regex::Regex;
use std::{str::SplitWhitespace, sync::LazyLock};

/// Runs of characters outside `[a-z0-9]` separate strict tokens.
static STRICT_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static separator pattern is valid"));

/// Lowercase and trim free text. The result is what the substring fallback matches.
pub fn normalize_query(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Splits normalized query text according to a [`TokenizerMode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tokenizer {
    mode: TokenizerMode,
}

impl Tokenizer {
    pub const fn new(mode: TokenizerMode) -> Self {
        Self { mode }
    }

    /// Lazily iterate the tokens of `text`. Call again to restart.
    ///
    /// `text` must already be normalized with [`normalize_query`].
    pub fn tokens<'a>(&self, text: &'a str) -> Tokens<'a> {
        match self.mode {
            TokenizerMode::Strict => Tokens::Strict(STRICT_SEPARATORS.split(text)),
            TokenizerMode::Loose => Tokens::Loose(text.split_whitespace()),
        }
    }

    /// Normalize `text` and collect its tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = normalize_query(text);
        self.tokens(&normalized).map(str::to_owned).collect()
    }
}

/// Iterator over non-empty query tokens.
#[derive(Debug)]
pub enum Tokens<'a> {
    Strict(regex::Split<'static, 'a>),
    Loose(SplitWhitespace<'a>),
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        match self {
            // Leading/trailing separators produce empty pieces.
            Self::Strict(split) => split.find(|token| !token.is_empty()),
            Self::Loose(split) => split.next(),
        }
    }
}
