//! # kanaconv
//!
//! A Rust library for resolving Japanese text into kana readings and
//! rendering them as hiragana, katakana, or romaji.
//!
//! ## Features
//!
//! - **Reading resolution**: ordered multi-source fallback that assigns a
//!   kana reading to every token of input text
//! - **Script conversion**: hiragana, katakana, and romaji output with
//!   correct contracted-sound (digraph) handling
//! - **Custom dictionaries**: compound-phrase overrides applied before
//!   tokenization and single-kanji fallback readings
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! kanaconv = "0.1"
//! ```
//!
//! ```ignore
//! use kanaconv::{KanaConv, Token, Tokenizer};
//!
//! struct MyTokenizer; // wraps a real morphological analyzer
//!
//! impl Tokenizer for MyTokenizer {
//!     fn tokenize(&self, text: &str) -> Vec<Token> {
//!         // segment `text` and supply a katakana reading per token
//!         vec![]
//!     }
//! }
//!
//! let conv = KanaConv::new(MyTokenizer);
//! let romaji = conv.to_roman("幽☆遊☆白書は、最高の漫画デス。");
//! ```
//!
//! The morphological tokenizer is deliberately a trait seam: any analyzer
//! that can segment text and propose katakana readings can drive the
//! pipeline.

pub mod convert;
pub mod dictionary;
pub mod script;
pub mod tables;

pub use convert::{ConvertConfig, ConvertConfigBuilder, KanaConv};
pub use dictionary::CustomDictionary;
pub use tables::ConversionTables;

/// A segment of input text paired with a candidate reading, as produced by
/// the primary morphological tokenizer.
///
/// Tokens are transient: created per conversion call and discarded once
/// their reading has been extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The exact substring of input text this token covers.
    pub surface: String,
    /// The tokenizer's best-guess katakana reading. Empty, or identical to
    /// `surface`, means "no reading available".
    pub reading: String,
}

impl Token {
    pub fn new(surface: impl Into<String>, reading: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            reading: reading.into(),
        }
    }
}

/// Primary morphological tokenizer seam.
///
/// Implementations segment raw text into an ordered sequence of [`Token`]s.
/// The thread-safety of an implementation's internal state is its own
/// contract; the pipeline only ever calls this synchronously through `&self`.
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// A single morphological node returned by the secondary analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphNode {
    /// Katakana reading fragment for this node, if the analyzer has one.
    pub kana: Option<String>,
}

/// Error reported by a [`SecondaryAnalyzer`] implementation.
///
/// The pipeline treats any analyzer error the same as an empty result:
/// it logs the failure and moves on to the next fallback source.
#[derive(Debug, thiserror::Error)]
#[error("secondary analyzer failed: {0}")]
pub struct AnalyzeError(pub String);

/// Fallback reading source consulted when the primary tokenizer has no
/// reading for a token's surface.
///
/// Returning `Err` or a node sequence with no kana fragments both mean
/// "no reading available" and are handled identically by the pipeline.
pub trait SecondaryAnalyzer {
    fn analyze(&self, surface: &str) -> Result<Vec<MorphNode>, AnalyzeError>;
}

/// Errors raised while constructing a [`KanaConv`] pipeline.
///
/// Only construction can fail: the conversion operations themselves always
/// produce output, degrading to surface text when no reading resolves.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid conversion table: {0}")]
    Table(String),
}
