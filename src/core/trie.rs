// --- File: src/core/trie.rs
use crate::core::types::WordId;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

#[derive(Clone, Serialize, Deserialize)]
struct TrieNode {
    children: BTreeMap<u8, usize>,
    word_id: Option<WordId>,
    max_freq_in_subtree: u64,
}

impl TrieNode {
    fn new() -> Self {
        Self { children: BTreeMap::new(), word_id: None, max_freq_in_subtree: 0 }
    }
}

/// A byte-keyed prefix trie over the vocabulary.
///
/// Every node caches the highest word frequency found anywhere below it,
/// which lets [`PrefixTrie::top_k`] skip whole subtrees that cannot enter
/// the current result set. Children are ordered, so enumeration is
/// deterministic for a given vocabulary.
#[derive(Clone, Serialize, Deserialize)]
pub struct PrefixTrie {
    nodes: Vec<TrieNode>,
    words: Vec<String>,
    frequencies: Vec<u64>,
}

impl Default for PrefixTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixTrie {
    pub fn new() -> Self {
        Self { nodes: vec![TrieNode::new()], words: Vec::new(), frequencies: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word(&self, id: WordId) -> &str {
        &self.words[id]
    }

    pub fn frequency(&self, id: WordId) -> u64 {
        self.frequencies[id]
    }

    /// All words in insertion order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn find(&self, word: &str) -> Option<WordId> {
        self.node_for(word).and_then(|idx| self.nodes[idx].word_id)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.find(word).is_some()
    }

    /// Inserts `word` with the given frequency, returning its id.
    /// Re-inserting an existing word raises its frequency if higher.
    /// O(k) complexity where k is key length.
    pub fn insert(&mut self, word: &str, frequency: u64) -> WordId {
        let mut node_idx = 0;
        let mut path = vec![0];
        for &byte in word.as_bytes() {
            let next_idx = match self.nodes[node_idx].children.get(&byte) {
                Some(&id) => id,
                None => {
                    let new_node_id = self.nodes.len();
                    self.nodes.push(TrieNode::new());
                    self.nodes[node_idx].children.insert(byte, new_node_id);
                    new_node_id
                }
            };
            node_idx = next_idx;
            path.push(node_idx);
        }

        let word_id = match self.nodes[node_idx].word_id {
            Some(id) => {
                self.frequencies[id] = self.frequencies[id].max(frequency);
                id
            }
            None => {
                let id = self.words.len();
                self.words.push(word.to_string());
                self.frequencies.push(frequency);
                self.nodes[node_idx].word_id = Some(id);
                id
            }
        };

        // Propagate max frequency up the path
        let freq = self.frequencies[word_id];
        for &idx in path.iter().rev() {
            if freq > self.nodes[idx].max_freq_in_subtree {
                self.nodes[idx].max_freq_in_subtree = freq;
            } else {
                break;
            }
        }
        word_id
    }

    /// Top `k` words starting with `prefix`, by descending frequency.
    /// Equal frequencies are ordered by ascending byte order of the word.
    /// An empty prefix ranks the whole vocabulary.
    pub fn top_k(&self, prefix: &str, k: usize) -> Vec<(WordId, u64)> {
        if k == 0 {
            return vec![];
        }
        let Some(start) = self.node_for(prefix) else {
            return vec![];
        };

        // Max-heap whose top is the weakest entry kept so far.
        let mut heap: BinaryHeap<(Reverse<u64>, &str, WordId)> = BinaryHeap::with_capacity(k + 1);
        self.dfs_search(start, k, &mut heap);

        heap.into_sorted_vec().into_iter().map(|(Reverse(freq), _, id)| (id, freq)).collect()
    }

    fn node_for(&self, prefix: &str) -> Option<usize> {
        let mut node_idx = 0;
        for &byte in prefix.as_bytes() {
            node_idx = *self.nodes[node_idx].children.get(&byte)?;
        }
        Some(node_idx)
    }

    fn dfs_search<'a>(
        &'a self,
        node_idx: usize,
        k: usize,
        heap: &mut BinaryHeap<(Reverse<u64>, &'a str, WordId)>,
    ) {
        let node = &self.nodes[node_idx];
        if let Some(id) = node.word_id {
            let entry = (Reverse(self.frequencies[id]), self.words[id].as_str(), id);
            if heap.len() < k {
                heap.push(entry);
            } else if heap.peek().is_some_and(|weakest| entry < *weakest) {
                heap.pop();
                heap.push(entry);
            }
        }

        for &child_idx in node.children.values() {
            // A tie on frequency can still win on word order, so only
            // strictly weaker subtrees are pruned.
            let weakest = if heap.len() == k { heap.peek().map(|e| e.0 .0) } else { None };
            match weakest {
                Some(min_freq) if self.nodes[child_idx].max_freq_in_subtree < min_freq => {}
                _ => self.dfs_search(child_idx, k, heap),
            }
        }
    }
}
