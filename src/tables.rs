use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::ConvertError;

/// Static kana conversion data: the katakana character classes used by the
/// romaji scanner and the katakana→romaji mapping itself.
///
/// Tables are immutable after construction and can be shared by reference
/// across pipeline instances.
#[derive(Debug)]
pub struct ConversionTables {
    full_katakana: HashSet<char>,
    small_katakana: HashSet<char>,
    katakana_to_roman: HashMap<String, String>,
}

/// On-disk JSON shape of a conversion table resource.
#[derive(Deserialize)]
struct RawTables {
    full_katakana: String,
    small_katakana: String,
    katakana2roman: HashMap<String, String>,
}

/// First and last characters of the katakana Unicode block handled by the
/// hiragana offset rule and the romaji lookup.
pub(crate) const KATAKANA_FIRST: char = 'ァ';
pub(crate) const KATAKANA_LAST: char = 'ン';

/// Kana punctuation span: ideographic comma through the long-vowel mark.
pub(crate) const KANA_PUNCT_FIRST: char = '、';
pub(crate) const KANA_PUNCT_LAST: char = 'ー';

/// Small katakana characters that can form a contracted sound when they
/// follow a full katakana character.
const SMALL_KATAKANA: &str = "ァィゥェォッャュョ";

impl ConversionTables {
    /// Load conversion tables from a JSON resource.
    ///
    /// The file must contain `full_katakana` and `small_katakana` character
    /// strings and a `katakana2roman` object whose keys are one or two
    /// characters long. A missing or malformed resource is a fatal error:
    /// the pipeline cannot operate without its tables.
    pub fn from_path(path: &Path) -> Result<Self, ConvertError> {
        let content = std::fs::read_to_string(path)?;
        let tables = Self::parse(&content)?;
        log::info!(
            "Loaded conversion tables from {} ({} romaji entries)",
            path.display(),
            tables.katakana_to_roman.len()
        );
        Ok(tables)
    }

    fn parse(content: &str) -> Result<Self, ConvertError> {
        let raw: RawTables = serde_json::from_str(content)
            .map_err(|e| ConvertError::Table(format!("Failed to parse JSON: {e}")))?;

        if raw.full_katakana.is_empty() {
            return Err(ConvertError::Table(
                "'full_katakana' must not be empty".to_string(),
            ));
        }
        if raw.small_katakana.is_empty() {
            return Err(ConvertError::Table(
                "'small_katakana' must not be empty".to_string(),
            ));
        }
        for key in raw.katakana2roman.keys() {
            let len = key.chars().count();
            if len == 0 || len > 2 {
                return Err(ConvertError::Table(format!(
                    "romaji key {key:?} must be one or two characters"
                )));
            }
        }

        Ok(Self {
            full_katakana: raw.full_katakana.chars().collect(),
            small_katakana: raw.small_katakana.chars().collect(),
            katakana_to_roman: raw.katakana2roman,
        })
    }

    /// Builtin conversion tables compiled into the crate.
    ///
    /// Covers the gojūon, voiced and semi-voiced rows, ヴ, contracted-sound
    /// digraphs, standalone small kana, and common kana punctuation. Loading
    /// from JSON via [`ConversionTables::from_path`] overrides this entirely;
    /// the builtin table is the zero-setup default.
    pub fn builtin() -> Self {
        let small_katakana: HashSet<char> = SMALL_KATAKANA.chars().collect();
        // Full-size katakana: the ァ–ン block plus ヴ, minus the small kana.
        let full_katakana: HashSet<char> = (KATAKANA_FIRST as u32..='ヴ' as u32)
            .filter_map(char::from_u32)
            .filter(|c| !small_katakana.contains(c))
            .collect();

        let katakana_to_roman = BUILTIN_ROMAN
            .iter()
            .map(|&(kana, roman)| (kana.to_string(), roman.to_string()))
            .collect();

        Self {
            full_katakana,
            small_katakana,
            katakana_to_roman,
        }
    }

    pub(crate) fn is_full_katakana(&self, c: char) -> bool {
        self.full_katakana.contains(&c)
    }

    pub(crate) fn is_small_katakana(&self, c: char) -> bool {
        self.small_katakana.contains(&c)
    }

    /// Look up the romaji mapping for a one- or two-character kana key.
    pub(crate) fn roman(&self, key: &str) -> Option<&str> {
        self.katakana_to_roman.get(key).map(|s| s.as_str())
    }
}

impl Default for ConversionTables {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Builtin katakana→romaji entries. Two-character keys are contracted-sound
/// digraphs; the scanner checks them before single characters.
#[rustfmt::skip]
const BUILTIN_ROMAN: &[(&str, &str)] = &[
    // Gojūon
    ("ア", "a"), ("イ", "i"), ("ウ", "u"), ("エ", "e"), ("オ", "o"),
    ("カ", "ka"), ("キ", "ki"), ("ク", "ku"), ("ケ", "ke"), ("コ", "ko"),
    ("サ", "sa"), ("シ", "shi"), ("ス", "su"), ("セ", "se"), ("ソ", "so"),
    ("タ", "ta"), ("チ", "chi"), ("ツ", "tsu"), ("テ", "te"), ("ト", "to"),
    ("ナ", "na"), ("ニ", "ni"), ("ヌ", "nu"), ("ネ", "ne"), ("ノ", "no"),
    ("ハ", "ha"), ("ヒ", "hi"), ("フ", "fu"), ("ヘ", "he"), ("ホ", "ho"),
    ("マ", "ma"), ("ミ", "mi"), ("ム", "mu"), ("メ", "me"), ("モ", "mo"),
    ("ヤ", "ya"), ("ユ", "yu"), ("ヨ", "yo"),
    ("ラ", "ra"), ("リ", "ri"), ("ル", "ru"), ("レ", "re"), ("ロ", "ro"),
    ("ワ", "wa"), ("ヰ", "wi"), ("ヱ", "we"), ("ヲ", "wo"), ("ン", "n"),
    // Voiced and semi-voiced rows
    ("ガ", "ga"), ("ギ", "gi"), ("グ", "gu"), ("ゲ", "ge"), ("ゴ", "go"),
    ("ザ", "za"), ("ジ", "ji"), ("ズ", "zu"), ("ゼ", "ze"), ("ゾ", "zo"),
    ("ダ", "da"), ("ヂ", "ji"), ("ヅ", "zu"), ("デ", "de"), ("ド", "do"),
    ("バ", "ba"), ("ビ", "bi"), ("ブ", "bu"), ("ベ", "be"), ("ボ", "bo"),
    ("パ", "pa"), ("ピ", "pi"), ("プ", "pu"), ("ペ", "pe"), ("ポ", "po"),
    ("ヴ", "vu"),
    // Standalone small kana
    ("ァ", "a"), ("ィ", "i"), ("ゥ", "u"), ("ェ", "e"), ("ォ", "o"),
    ("ャ", "ya"), ("ュ", "yu"), ("ョ", "yo"),
    // Contracted sounds (palatalized)
    ("キャ", "kya"), ("キュ", "kyu"), ("キョ", "kyo"),
    ("シャ", "sha"), ("シュ", "shu"), ("ショ", "sho"), ("シェ", "she"),
    ("チャ", "cha"), ("チュ", "chu"), ("チョ", "cho"), ("チェ", "che"),
    ("ニャ", "nya"), ("ニュ", "nyu"), ("ニョ", "nyo"),
    ("ヒャ", "hya"), ("ヒュ", "hyu"), ("ヒョ", "hyo"),
    ("ミャ", "mya"), ("ミュ", "myu"), ("ミョ", "myo"),
    ("リャ", "rya"), ("リュ", "ryu"), ("リョ", "ryo"),
    ("ギャ", "gya"), ("ギュ", "gyu"), ("ギョ", "gyo"),
    ("ジャ", "ja"), ("ジュ", "ju"), ("ジョ", "jo"), ("ジェ", "je"),
    ("ヂャ", "ja"), ("ヂュ", "ju"), ("ヂョ", "jo"),
    ("ビャ", "bya"), ("ビュ", "byu"), ("ビョ", "byo"),
    ("ピャ", "pya"), ("ピュ", "pyu"), ("ピョ", "pyo"),
    // Contracted sounds (foreign)
    ("ファ", "fa"), ("フィ", "fi"), ("フェ", "fe"), ("フォ", "fo"),
    ("ウィ", "wi"), ("ウェ", "we"), ("ウォ", "wo"),
    ("ヴァ", "va"), ("ヴィ", "vi"), ("ヴェ", "ve"), ("ヴォ", "vo"),
    ("ティ", "ti"), ("ディ", "di"), ("デュ", "dyu"),
    ("トゥ", "tu"), ("ドゥ", "du"),
    ("ツァ", "tsa"), ("ツィ", "tsi"), ("ツェ", "tse"), ("ツォ", "tso"),
    ("イェ", "ye"),
    // Kana punctuation
    ("、", ", "), ("。", ". "), ("・", " "), ("ー", "-"),
    ("「", "\""), ("」", "\""),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_contains_digraphs_and_singles() {
        let tables = ConversionTables::builtin();
        assert_eq!(tables.roman("ショ"), Some("sho"));
        assert_eq!(tables.roman("シ"), Some("shi"));
        assert_eq!(tables.roman("、"), Some(", "));
        assert_eq!(tables.roman("無"), None);
    }

    #[test]
    fn builtin_character_classes() {
        let tables = ConversionTables::builtin();
        assert!(tables.is_full_katakana('シ'));
        assert!(tables.is_full_katakana('ヴ'));
        assert!(!tables.is_full_katakana('ョ'));
        assert!(tables.is_small_katakana('ョ'));
        assert!(tables.is_small_katakana('ッ'));
        assert!(!tables.is_small_katakana('シ'));
    }

    #[test]
    fn parse_accepts_minimal_table() {
        let json = r#"{
            "full_katakana": "シ",
            "small_katakana": "ョ",
            "katakana2roman": {"ショ": "sho", "シ": "shi"}
        }"#;
        let tables = ConversionTables::parse(json).unwrap();
        assert_eq!(tables.roman("ショ"), Some("sho"));
        assert!(tables.is_full_katakana('シ'));
    }

    #[test]
    fn parse_rejects_malformed_json() {
        let err = ConversionTables::parse("not json").unwrap_err();
        assert!(matches!(err, ConvertError::Table(_)));
    }

    #[test]
    fn parse_rejects_overlong_key() {
        let json = r#"{
            "full_katakana": "シ",
            "small_katakana": "ョ",
            "katakana2roman": {"ショウ": "sho"}
        }"#;
        let err = ConversionTables::parse(json).unwrap_err();
        assert!(matches!(err, ConvertError::Table(_)));
    }

    #[test]
    fn parse_rejects_empty_character_class() {
        let json = r#"{
            "full_katakana": "",
            "small_katakana": "ョ",
            "katakana2roman": {}
        }"#;
        let err = ConversionTables::parse(json).unwrap_err();
        assert!(matches!(err, ConvertError::Table(_)));
    }

    #[test]
    fn from_path_missing_file_is_fatal() {
        let err = ConversionTables::from_path(Path::new("/nonexistent/kana.json")).unwrap_err();
        assert!(matches!(err, ConvertError::Io(_)));
    }
}
