//! Script rendering for resolved kana readings.
//!
//! The resolved reading is katakana by convention (that is what the
//! tokenizer and dictionaries supply), so katakana output is the identity,
//! hiragana output is a character-local codepoint shift, and romaji output
//! is a single left-to-right scan with one character of lookahead for
//! contracted sounds.

use crate::tables::{
    ConversionTables, KANA_PUNCT_FIRST, KANA_PUNCT_LAST, KATAKANA_FIRST, KATAKANA_LAST,
};

/// Offset between a katakana character and its hiragana equivalent.
const KATAKANA_TO_HIRAGANA: u32 = 0x60;

fn in_katakana_block(c: char) -> bool {
    (KATAKANA_FIRST..=KATAKANA_LAST).contains(&c)
}

fn in_kana_punct_span(c: char) -> bool {
    (KANA_PUNCT_FIRST..=KANA_PUNCT_LAST).contains(&c)
}

/// Render a resolved reading as hiragana.
///
/// Every character in the katakana block ァ–ン shifts down by 0x60; every
/// other character (punctuation, already-hiragana, Latin, symbols) passes
/// through unchanged. Order-preserving, no lookahead.
pub fn to_hiragana(reading: &str) -> String {
    reading
        .chars()
        .map(|c| {
            if in_katakana_block(c) {
                char::from_u32(c as u32 - KATAKANA_TO_HIRAGANA).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Render a resolved reading as romaji.
///
/// At each position, a full katakana character followed by a small katakana
/// character is first tried as a two-character digraph; a registered digraph
/// consumes both characters and takes precedence over the single-character
/// mapping. Otherwise, characters in the katakana block or the kana
/// punctuation span are looked up individually, with unmapped characters
/// silently dropped. Anything outside those ranges passes through unchanged.
pub fn to_roman(reading: &str, tables: &ConversionTables) -> String {
    let chars: Vec<char> = reading.chars().collect();
    let mut out = String::with_capacity(reading.len());
    let mut i = 0;

    while i < chars.len() {
        if i + 1 < chars.len()
            && tables.is_full_katakana(chars[i])
            && tables.is_small_katakana(chars[i + 1])
        {
            let mut digraph = String::with_capacity(8);
            digraph.push(chars[i]);
            digraph.push(chars[i + 1]);
            if let Some(roman) = tables.roman(&digraph) {
                out.push_str(roman);
                i += 2;
                continue;
            }
        }

        let c = chars[i];
        if in_katakana_block(c) || in_kana_punct_span(c) {
            if let Some(roman) = tables.roman(c.encode_utf8(&mut [0; 4])) {
                out.push_str(roman);
            }
        } else {
            out.push(c);
        }
        i += 1;
    }

    out
}
