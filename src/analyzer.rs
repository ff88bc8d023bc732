//! Analyzer capability registry.
//!
//! Tenants pick their analyzer by identifier in configuration. The registry
//! maps each identifier to a concrete tokenizer factory up front, so a typo
//! surfaces as [`IndexError::UnknownAnalyzer`] when the service is built,
//! not as a failure in the middle of an indexing operation.

use tantivy::tokenizer::{
    Language, LowerCaser, RemoveLongFilter, SimpleTokenizer, Stemmer, TextAnalyzer,
    WhitespaceTokenizer,
};

use crate::error::{IndexError, Result};

/// Name the analyzer is registered under on every index. The schema refers
/// to analyzers by this name, so it must be re-registered on each open.
pub const TOKENIZER_NAME: &str = "ink_text";

/// Tokens longer than this are dropped before lowercasing.
const MAX_TOKEN_CHARS: usize = 40;

/// The analyzers tenants can choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyzerKind {
    /// Word tokens split on non-alphanumerics, lowercased. The default.
    #[default]
    Simple,
    /// [`Self::Simple`] plus English stemming.
    EnglishStem,
    /// Whitespace-split tokens, lowercased, punctuation kept.
    Whitespace,
}

impl AnalyzerKind {
    /// Look up a configured identifier. Matching is case-insensitive.
    pub fn resolve(id: &str) -> Result<Self> {
        match id.to_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "en_stem" | "en-stem" => Ok(Self::EnglishStem),
            "whitespace" => Ok(Self::Whitespace),
            _ => Err(IndexError::UnknownAnalyzer(id.to_string())),
        }
    }

    /// Canonical identifier, the inverse of [`Self::resolve`].
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::EnglishStem => "en_stem",
            Self::Whitespace => "whitespace",
        }
    }

    /// Build a fresh analyzer instance for registration on an index.
    #[must_use]
    pub fn build(self) -> TextAnalyzer {
        match self {
            Self::Simple => TextAnalyzer::builder(SimpleTokenizer::default())
                .filter(RemoveLongFilter::limit(MAX_TOKEN_CHARS))
                .filter(LowerCaser)
                .build(),
            Self::EnglishStem => TextAnalyzer::builder(SimpleTokenizer::default())
                .filter(RemoveLongFilter::limit(MAX_TOKEN_CHARS))
                .filter(LowerCaser)
                .filter(Stemmer::new(Language::English))
                .build(),
            Self::Whitespace => TextAnalyzer::builder(WhitespaceTokenizer::default())
                .filter(LowerCaser)
                .build(),
        }
    }
}
