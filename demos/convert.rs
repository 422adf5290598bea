use std::collections::HashMap;

use kanaconv::{ConvertConfigBuilder, CustomDictionary, KanaConv, Token, Tokenizer};

/// Stand-in tokenizer for the demo: emits the whole input as a single
/// unresolved token, so every reading comes from the custom dictionary or
/// surface fallback. A real deployment wraps a morphological analyzer here.
struct NaiveTokenizer;

impl Tokenizer for NaiveTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        vec![Token::new(text, "")]
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut compound = HashMap::new();
    compound.insert("激を飛ばす".to_string(), "ゲキヲトバス".to_string());
    let dictionary = CustomDictionary::new(compound, HashMap::new());

    let config = ConvertConfigBuilder::default().separator("").build()?;
    let conv = KanaConv::with_config(NaiveTokenizer, config).with_dictionary(dictionary);

    let text = "激を飛ばす";
    println!("input:    {text}");
    println!("hiragana: {}", conv.to_hiragana(text));
    println!("katakana: {}", conv.to_katakana(text));
    println!("romaji:   {}", conv.to_roman(text));

    Ok(())
}
