use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

/// Marker wrapped around a reading injected by compound substitution, so the
/// injected text survives tokenization and is recognized by the
/// literal-passthrough resolution step.
pub(crate) const INJECT_OPEN: char = '⟦';
pub(crate) const INJECT_CLOSE: char = '⟧';

/// User-supplied reading overrides.
///
/// Two layers:
/// - `compound`: phrase → full katakana reading, substituted into the raw
///   text before tokenization;
/// - `single`: one kanji → ordered candidate readings, consulted per token
///   when every analyzer comes up empty. Only the first candidate is ever
///   selected; later candidates are retained as data but not used.
///
/// The dictionary is immutable once the pipeline holds it.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CustomDictionary {
    compound: HashMap<String, String>,
    single: HashMap<String, Vec<String>>,
}

impl CustomDictionary {
    pub fn new(compound: HashMap<String, String>, single: HashMap<String, Vec<String>>) -> Self {
        Self { compound, single }
    }

    /// Load a dictionary from a JSON resource.
    ///
    /// A missing or malformed resource degrades to an empty dictionary with
    /// a logged warning; custom readings are an enhancement, never a
    /// construction requirement.
    pub fn from_path(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!(
                    "Custom dictionary {} unreadable ({e}), continuing without it",
                    path.display()
                );
                return Self::default();
            }
        };

        match serde_json::from_str::<Self>(&content) {
            Ok(dict) => {
                log::info!(
                    "Loaded custom dictionary from {} ({} compounds, {} single entries)",
                    path.display(),
                    dict.compound.len(),
                    dict.single.len()
                );
                dict
            }
            Err(e) => {
                log::warn!(
                    "Custom dictionary {} malformed ({e}), continuing without it",
                    path.display()
                );
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.compound.is_empty() && self.single.is_empty()
    }

    /// Replace every occurrence of a registered compound phrase with its
    /// marker-wrapped reading.
    ///
    /// Compounds are applied longest-phrase-first (ties broken
    /// lexicographically) so that overlapping registrations resolve
    /// deterministically. Each individual compound is replaced by simple
    /// substring containment, left-to-right, non-overlapping with itself.
    /// Text already injected by an earlier compound is never matched again,
    /// so one compound's phrase occurring inside another's reading cannot
    /// nest markers.
    pub(crate) fn apply_compounds(&self, text: &str) -> String {
        if self.compound.is_empty() {
            return text.to_string();
        }

        let mut phrases: Vec<&String> = self.compound.keys().collect();
        phrases.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });

        let mut out = text.to_string();
        for phrase in phrases {
            if let Some(reading) = self.compound.get(phrase) {
                if out.contains(phrase.as_str()) {
                    let injected = format!("{INJECT_OPEN}{reading}{INJECT_CLOSE}");
                    out = replace_outside_injected(&out, phrase, &injected);
                }
            }
        }
        out
    }

    /// First candidate reading for a single-kanji surface, if registered.
    pub(crate) fn single_reading(&self, surface: &str) -> Option<&str> {
        self.single
            .get(surface)
            .and_then(|candidates| candidates.first())
            .map(|s| s.as_str())
    }
}

/// Replace `phrase` with `replacement` in the segments of `text` that lie
/// outside `⟦`…`⟧` spans, copying the spans themselves through verbatim.
fn replace_outside_injected(text: &str, phrase: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while !rest.is_empty() {
        match rest.find(INJECT_OPEN) {
            Some(open) => {
                let (head, span) = rest.split_at(open);
                out.push_str(&head.replace(phrase, replacement));
                match span.find(INJECT_CLOSE) {
                    Some(close) => {
                        let end = close + INJECT_CLOSE.len_utf8();
                        out.push_str(&span[..end]);
                        rest = &span[end..];
                    }
                    None => {
                        // Unterminated span: nothing after it can be outside.
                        out.push_str(span);
                        rest = "";
                    }
                }
            }
            None => {
                out.push_str(&rest.replace(phrase, replacement));
                rest = "";
            }
        }
    }

    out
}

/// Strip the injection markers from a surface produced by compound
/// substitution, yielding the already-resolved reading inside.
pub(crate) fn injected_reading(surface: &str) -> Option<&str> {
    surface
        .strip_prefix(INJECT_OPEN)
        .and_then(|rest| rest.strip_suffix(INJECT_CLOSE))
}
