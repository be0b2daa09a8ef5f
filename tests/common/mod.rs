#![allow(dead_code)]

use ime_core::fuzzy::{FuzzySoundex, PhoneticEncoder};
use ime_core::{FrequencyEntry, ImeEngine, LexicalStores};

/// A small English lexicon with a few phonetic, transliteration and
/// substitution entries wired to known tokens.
pub fn make_test_stores() -> LexicalStores {
    let soundex = FuzzySoundex;
    LexicalStores::builder()
        .word("the", 1000)
        .word("they", 600)
        .word("there", 500)
        .word("then", 400)
        .word("cat", 300)
        .word("car", 350)
        .word("care", 200)
        .word("call", 250)
        .word("catalog", 20)
        .word("fine", 40)
        .word("fond", 30)
        .word("phone", 80)
        .word("test", 90)
        .word("tests", 60)
        .word("testing", 70)
        .entry(
            "hello",
            FrequencyEntry {
                frequency: 500,
                ipa: Some("həˈloʊ".to_string()),
                translation: vec!["int.".to_string(), "你好".to_string()],
            },
        )
        .vocabulary(["hello"])
        // sound-alikes that no other stage would produce
        .phonetic(&soundex.encode("cat"), &["kat", "kit"])
        .phonetic(&soundex.encode("fone"), &["phone", "fine"])
        .transliteration("cat", &["猫"])
        .transliteration("fone", &["风"])
        .substitution("teh", "the")
        .build()
}

pub fn make_test_engine() -> ImeEngine {
    ImeEngine::with_defaults(make_test_stores())
}
