use std::path::Path;

use derive_builder::Builder;

use crate::dictionary::{injected_reading, CustomDictionary};
use crate::script;
use crate::tables::ConversionTables;
use crate::{ConvertError, SecondaryAnalyzer, Token, Tokenizer};

/// Configuration captured at pipeline construction.
///
/// Immutable for the lifetime of a [`KanaConv`] instance; to reconfigure,
/// construct a new instance rather than mutating shared state.
#[derive(Debug, Clone, Builder)]
#[builder(default, setter(into))]
pub struct ConvertConfig {
    /// String inserted between per-token readings.
    pub separator: String,
    /// Consult the custom dictionary (compound substitution and the
    /// single-kanji fallback).
    pub custom_dictionary_fallback: bool,
    /// Consult the secondary analyzer for tokens the primary tokenizer
    /// cannot read. Has no effect unless an analyzer is attached.
    pub secondary_analyzer_fallback: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            separator: " ".to_string(),
            custom_dictionary_fallback: true,
            secondary_analyzer_fallback: false,
        }
    }
}

/// Japanese text conversion pipeline.
///
/// Resolves a katakana reading for every token of input text via an ordered
/// fallback chain, then renders the joined reading as hiragana, katakana,
/// or romaji.
///
/// # Quick Start
///
/// ```rust,no_run
/// use kanaconv::{KanaConv, Token, Tokenizer};
///
/// struct MyTokenizer; // wraps a real morphological analyzer
///
/// impl Tokenizer for MyTokenizer {
///     fn tokenize(&self, text: &str) -> Vec<Token> {
///         vec![Token::new(text, "")]
///     }
/// }
///
/// let conv = KanaConv::new(MyTokenizer);
/// println!("{}", conv.to_hiragana("デス"));
/// ```
pub struct KanaConv<T: Tokenizer> {
    tokenizer: T,
    tables: ConversionTables,
    dictionary: CustomDictionary,
    secondary: Option<Box<dyn SecondaryAnalyzer>>,
    config: ConvertConfig,
}

impl<T: Tokenizer> KanaConv<T> {
    /// Create a pipeline with the builtin conversion tables, an empty custom
    /// dictionary, and default configuration.
    pub fn new(tokenizer: T) -> Self {
        Self::with_config(tokenizer, ConvertConfig::default())
    }

    /// Create a pipeline with the builtin conversion tables and an explicit
    /// configuration.
    pub fn with_config(tokenizer: T, config: ConvertConfig) -> Self {
        Self {
            tokenizer,
            tables: ConversionTables::builtin(),
            dictionary: CustomDictionary::default(),
            secondary: None,
            config,
        }
    }

    /// Create a pipeline from external resources.
    ///
    /// The conversion table is mandatory: a missing or malformed table file
    /// aborts construction. The custom dictionary is optional and degrades
    /// to empty mappings when its resource is missing or malformed.
    pub fn from_resources(
        tokenizer: T,
        table_path: &Path,
        dictionary_path: Option<&Path>,
        config: ConvertConfig,
    ) -> Result<Self, ConvertError> {
        let tables = ConversionTables::from_path(table_path)?;
        let dictionary = dictionary_path
            .map(CustomDictionary::from_path)
            .unwrap_or_default();

        Ok(Self {
            tokenizer,
            tables,
            dictionary,
            secondary: None,
            config,
        })
    }

    /// Replace the custom dictionary (builder-style, before first use).
    pub fn with_dictionary(mut self, dictionary: CustomDictionary) -> Self {
        self.dictionary = dictionary;
        self
    }

    /// Attach a secondary analyzer (builder-style, before first use).
    ///
    /// Without an attached analyzer, a requested
    /// `secondary_analyzer_fallback` silently behaves as if it were
    /// disabled; it never fails construction or a conversion call.
    pub fn with_secondary_analyzer(mut self, analyzer: Box<dyn SecondaryAnalyzer>) -> Self {
        self.secondary = Some(analyzer);
        self
    }

    /// Convert text to hiragana.
    pub fn to_hiragana(&self, text: &str) -> String {
        script::to_hiragana(&self.resolve(text))
    }

    /// Convert text to katakana.
    ///
    /// The resolved reading is katakana by convention, so this is the
    /// resolution output unchanged.
    pub fn to_katakana(&self, text: &str) -> String {
        self.resolve(text)
    }

    /// Convert text to romaji.
    pub fn to_roman(&self, text: &str) -> String {
        script::to_roman(&self.resolve(text), &self.tables)
    }

    /// Resolve the reading for the whole input: compound substitution,
    /// tokenization, per-token fallback, join.
    fn resolve(&self, text: &str) -> String {
        let substituted = if self.config.custom_dictionary_fallback {
            self.dictionary.apply_compounds(text)
        } else {
            text.to_string()
        };

        let tokens = self.tokenizer.tokenize(&substituted);
        let readings: Vec<String> = tokens
            .iter()
            .map(|token| self.resolve_token(token))
            .collect();
        readings.join(&self.config.separator)
    }

    /// Per-token fallback chain, first success wins:
    /// injected literal → primary reading → secondary analyzer →
    /// single-kanji dictionary → surface.
    fn resolve_token(&self, token: &Token) -> String {
        if let Some(inner) = injected_reading(&token.surface) {
            return inner.to_string();
        }

        if !token.reading.is_empty() && token.reading != token.surface {
            return token.reading.clone();
        }

        if self.config.secondary_analyzer_fallback {
            if let Some(reading) = self.secondary_reading(&token.surface) {
                return reading;
            }
        }

        if self.config.custom_dictionary_fallback {
            if let Some(reading) = self.dictionary.single_reading(&token.surface) {
                return reading.to_string();
            }
        }

        token.surface.clone()
    }

    /// Ask the secondary analyzer for a reading; failures never propagate.
    fn secondary_reading(&self, surface: &str) -> Option<String> {
        let analyzer = self.secondary.as_ref()?;
        match analyzer.analyze(surface) {
            Ok(nodes) => {
                let reading: String = nodes.into_iter().filter_map(|node| node.kana).collect();
                if reading.is_empty() {
                    None
                } else {
                    Some(reading)
                }
            }
            Err(e) => {
                log::debug!("Secondary analyzer failed for {surface:?}: {e}");
                None
            }
        }
    }
}
