use crate::config::ImeConfig;
use crate::core::stores::LexicalStores;
use crate::core::types::{truncate_chars, Candidate, FrequencyEntry, MAX_DISPLAY_CHARS};
use crate::error::Result;
use crate::fuzzy::{edit_distance, FuzzySoundex, PhoneticEncoder, SpellCorrector, SymSpell};
use crate::persistence::load_stores;
use std::collections::HashSet;
use tracing::{debug, debug_span};

/// Trie matches kept before the fallback lists are appended.
const TRIE_TOP_K: usize = 10;
/// Cap on the deduplicated list, the typed token included.
const MAX_RANKED: usize = 9;
/// Tokens longer than this also get phonetic and transliteration matches.
const PHONETIC_MIN_LEN: usize = 3;
/// How many spelling / transliteration hits survive when augmenting.
const AUGMENT_TOP: usize = 3;
const SPELL_MAX_EDIT_DISTANCE: usize = 2;

/// The read-only ranking context shared by every session.
///
/// Owns the lexical stores plus the spelling and phonetic black boxes.
/// Nothing here is mutated after construction, so one engine can back any
/// number of sessions through `&ImeEngine`.
pub struct ImeEngine {
    stores: LexicalStores,
    speller: Box<dyn SpellCorrector>,
    encoder: Box<dyn PhoneticEncoder>,
    show_annotations: bool,
}

impl ImeEngine {
    pub fn new(
        stores: LexicalStores,
        speller: Box<dyn SpellCorrector>,
        encoder: Box<dyn PhoneticEncoder>,
    ) -> Self {
        Self { stores, speller, encoder, show_annotations: false }
    }

    /// Builds a SymSpell index over the vocabulary and uses fuzzy soundex.
    pub fn with_defaults(stores: LexicalStores) -> Self {
        let speller = SymSpell::from_stores(&stores, SPELL_MAX_EDIT_DISTANCE);
        Self::new(stores, Box::new(speller), Box::new(FuzzySoundex))
    }

    /// Loads the stores named by `config` (snapshot first, then sources).
    pub fn from_config(config: &ImeConfig) -> Result<Self> {
        let mut engine = Self::with_defaults(load_stores(config)?);
        engine.set_show_annotations(config.show_annotations);
        Ok(engine)
    }

    /// Render `word [ipa] translation` for dictionary words that carry a
    /// pronunciation.
    pub fn set_show_annotations(&mut self, enabled: bool) {
        self.show_annotations = enabled;
    }

    pub fn stores(&self) -> &LexicalStores {
        &self.stores
    }

    /// Display metadata for a ranked word.
    pub fn entry(&self, word: &str) -> Option<&FrequencyEntry> {
        self.stores.entry(word)
    }

    /// Ranked, deduplicated words for a lowercase token: the token itself,
    /// then the strongest trie completions, then spelling and sound-alike
    /// fallbacks. At most 9 entries, token always first.
    pub fn rank(&self, token: &str) -> Vec<String> {
        let _span = debug_span!("rank", token).entered();

        let trie_hits = self.stores.trie().top_k(token, TRIE_TOP_K);
        let trie_count = trie_hits.len();
        let fallback = self.spelling_suggestions(token);
        let fallback_count = fallback.len();

        let mut seen = HashSet::new();
        let ranked: Vec<String> = std::iter::once(token.to_string())
            .chain(trie_hits.into_iter().map(|(id, _)| self.stores.trie().word(id).to_string()))
            .chain(fallback)
            .filter(|word| seen.insert(word.clone()))
            .take(MAX_RANKED)
            .collect();

        debug!(trie_count, fallback_count, ranked = ranked.len());
        ranked
    }

    /// Fallback list appended after the trie matches.
    ///
    /// Short tokens get the full spelling-correction list. Longer ones get
    /// the top spelling hits, the top transliterations, then every word
    /// sharing the token's phonetic code ordered by edit distance.
    pub fn spelling_suggestions(&self, token: &str) -> Vec<String> {
        let mut spelled = self.speller.candidates(token);
        spelled.sort_by(|a, b| b.0.cmp(&a.0));
        let spelled = spelled.into_iter().map(|(_, word)| word);

        if token.len() <= PHONETIC_MIN_LEN {
            return spelled.collect();
        }

        let code = self.encoder.encode(token);
        let mut phonetic: Vec<&String> = self.stores.phonetic_matches(&code).iter().collect();
        phonetic.sort_by_cached_key(|word| edit_distance(word, token));

        spelled
            .take(AUGMENT_TOP)
            .chain(self.stores.transliterations(token).iter().take(AUGMENT_TOP).cloned())
            .chain(phonetic.into_iter().cloned())
            .collect()
    }

    /// Full candidate pipeline for the raw composition buffer.
    ///
    /// `prefix` keeps the user's casing; ranking runs on its lowercase form.
    /// A user substitution for the token is shown first. Words that extend
    /// the typed prefix are displayed with the typed casing.
    pub fn candidates(&self, prefix: &str) -> Vec<Candidate> {
        let token = prefix.to_lowercase();
        let ranked = self.rank(&token);

        let mut candidates = Vec::with_capacity(ranked.len() + 1);
        if let Some(replacement) = self.stores.substitution(&token) {
            candidates.push(Candidate::plain(truncate_chars(replacement, MAX_DISPLAY_CHARS)));
        }
        candidates.extend(ranked.iter().map(|word| self.present(prefix, &token, word)));
        candidates
    }

    fn present(&self, prefix: &str, token: &str, word: &str) -> Candidate {
        let headword = match strip_prefix_ignore_case(word, token) {
            Some(rest) => format!("{prefix}{rest}"),
            None => word.to_string(),
        };
        let headword = truncate_chars(&headword, MAX_DISPLAY_CHARS);

        let ipa = self
            .show_annotations
            .then(|| self.stores.entry(word).and_then(|e| e.ipa.clone()))
            .flatten();
        match ipa {
            Some(ipa) => Candidate::annotated(headword, ipa)
                .with_translation(self.stores.translation_message(word)),
            None => Candidate::plain(headword),
        }
    }
}

/// `word` minus a leading `token`, compared case-insensitively.
fn strip_prefix_ignore_case<'a>(word: &'a str, token: &str) -> Option<&'a str> {
    let head = word.get(..token.len())?;
    head.eq_ignore_ascii_case(token).then(|| &word[token.len()..])
}
