// File: src/fuzzy/phonetic.rs
use crate::fuzzy::PhoneticEncoder;

/// Holmes & McCabe "fuzzy soundex".
///
/// A soundex variant that first rewrites common English spellings of the
/// same sound (`PH`/`FF`, `CK`/`KK`, silent `KN`, ...) before the usual
/// letter-to-digit translation. The phonetic-code table must be generated
/// with this same encoder for lookups to line up.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzySoundex;

// A..Z -> code digit; '-' drops the letter entirely.
const TRANSLATION: &[u8; 26] = b"0193017-07745501769301-7-9";

const RULES: &[(&str, &str)] = &[
    ("CA", "KA"),
    ("CC", "KK"),
    ("CK", "KK"),
    ("CE", "SE"),
    ("CHL", "KL"),
    ("CL", "KL"),
    ("CHR", "KR"),
    ("CR", "KR"),
    ("CI", "SI"),
    ("CO", "KO"),
    ("CU", "KU"),
    ("CY", "SY"),
    ("DG", "GG"),
    ("GH", "HH"),
    ("MAC", "MK"),
    ("MC", "MK"),
    ("NST", "NSS"),
    ("PF", "FF"),
    ("PH", "FF"),
    ("SCH", "SSS"),
    ("TIO", "SIO"),
    ("TIA", "SIO"),
    ("TCH", "CHH"),
];

impl FuzzySoundex {
    fn rewrite_start(word: String) -> String {
        let Some(rest) = word.get(2..) else {
            return word;
        };
        let replacement = match &word[..2] {
            "CS" | "CZ" | "TS" | "TZ" => "SS",
            "GN" | "KN" | "NG" => "NN",
            "HR" | "WR" => "RR",
            "HW" => "WW",
            _ => return word,
        };
        format!("{replacement}{rest}")
    }

    fn rewrite_end(word: String) -> String {
        if word.len() < 2 {
            return word;
        }
        let (initial, last_two) = word.split_at(word.len() - 2);
        match last_two {
            "CH" => format!("{initial}KK"),
            "NT" => format!("{initial}TT"),
            "RT" => format!("{initial}RR"),
            _ if word.ends_with("RDT") => format!("{}RR", &word[..word.len() - 3]),
            _ => word,
        }
    }
}

impl PhoneticEncoder for FuzzySoundex {
    fn encode(&self, word: &str) -> String {
        let upper: String = word
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if upper.is_empty() {
            return String::new();
        }

        let mut word = Self::rewrite_end(Self::rewrite_start(upper));
        for (from, to) in RULES {
            word = word.replace(from, to);
        }

        let first_letter = word.as_bytes()[0] as char;

        let mut code = String::with_capacity(word.len());
        let mut last = None;
        for b in word.bytes() {
            let digit = TRANSLATION[(b - b'A') as usize];
            if digit == b'-' {
                continue;
            }
            // squeeze runs of the same digit
            if last != Some(digit) {
                code.push(digit as char);
                last = Some(digit);
            }
        }

        // The first letter replaces its own digit; vowels ('0') are dropped.
        let skip = usize::from(TRANSLATION[(first_letter as u8 - b'A') as usize] != b'-');
        let tail: String = code.chars().skip(skip).filter(|&c| c != '0').collect();
        format!("{first_letter}{tail}")
    }
}
